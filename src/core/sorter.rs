//! Shuffle/sort stage.
//!
//! The reducer merges adjacent pairs, which is only correct when equal keys
//! are contiguous. [`Sorted`] carries that guarantee in the type system: the
//! only ways to build one are to sort a sequence or to verify that it is
//! already sorted.

use std::slice;
use std::vec;
use thiserror::Error;

/// Errors raised when a sequence does not satisfy the sort order
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SortError {
    #[error("Pair at index {index} has a smaller key than its predecessor")]
    OutOfOrder { index: usize },
}

/// A pair sequence proven to be non-decreasing by key.
///
/// # Example
///
/// ```rust
/// use minimr::core::Sorted;
///
/// let sorted = Sorted::sort(vec![("b", 1), ("a", 1), ("b", 2)]);
/// assert_eq!(sorted.as_slice(), &[("a", 1), ("b", 1), ("b", 2)]);
///
/// assert!(Sorted::from_sorted(vec![("b", 1), ("a", 1)]).is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sorted<K, V> {
    pairs: Vec<(K, V)>,
}

impl<K: Ord, V> Sorted<K, V> {
    /// Sort pairs by key.
    ///
    /// The sort is total over keys and stable, so pairs sharing a key keep
    /// their original relative order. The whole sequence is sorted in
    /// memory.
    pub fn sort(mut pairs: Vec<(K, V)>) -> Self {
        pairs.sort_by(|a, b| a.0.cmp(&b.0));
        Self { pairs }
    }

    /// Accept a sequence the caller claims is already sorted.
    ///
    /// This is a single linear pass; the first key that is smaller than the
    /// one before it is reported.
    pub fn from_sorted(pairs: Vec<(K, V)>) -> Result<Self, SortError> {
        match pairs.windows(2).position(|w| w[0].0 > w[1].0) {
            Some(i) => Err(SortError::OutOfOrder { index: i + 1 }),
            None => Ok(Self { pairs }),
        }
    }
}

impl<K, V> Sorted<K, V> {
    /// Borrow the pairs in sorted order.
    pub fn as_slice(&self) -> &[(K, V)] {
        &self.pairs
    }

    /// Iterate over the pairs in sorted order.
    pub fn iter(&self) -> slice::Iter<'_, (K, V)> {
        self.pairs.iter()
    }

    /// Number of pairs, counting duplicates.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// True when there are no pairs.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Give up the sortedness proof and take the pairs back.
    pub fn into_inner(self) -> Vec<(K, V)> {
        self.pairs
    }
}

impl<K, V> IntoIterator for Sorted<K, V> {
    type Item = (K, V);
    type IntoIter = vec::IntoIter<(K, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.into_iter()
    }
}

/// Shuffle/sort stage of the pipeline: group equal keys contiguously.
pub fn shuffle_sort<K: Ord, V>(pairs: Vec<(K, V)>) -> Sorted<K, V> {
    Sorted::sort(pairs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_orders_by_key() {
        let sorted = shuffle_sort(vec![("sat", 1), ("cat", 1), ("the", 1), ("dog", 1)]);
        let keys: Vec<&str> = sorted.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec!["cat", "dog", "sat", "the"]);
    }

    #[test]
    fn sort_is_stable_within_a_key() {
        let sorted = shuffle_sort(vec![("b", 3), ("a", 9), ("b", 1), ("a", 2), ("b", 2)]);
        assert_eq!(
            sorted.into_inner(),
            vec![("a", 9), ("a", 2), ("b", 3), ("b", 1), ("b", 2)]
        );
    }

    #[test]
    fn sort_compares_strings_lexicographically() {
        let pairs = vec![
            ("b".to_string(), 1),
            ("B".to_string(), 1),
            ("ab".to_string(), 1),
            ("a".to_string(), 1),
        ];
        let keys: Vec<String> = shuffle_sort(pairs).into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["B", "a", "ab", "b"]);
    }

    #[test]
    fn from_sorted_accepts_ties() {
        let sorted = Sorted::from_sorted(vec![("a", 1), ("a", 1), ("b", 1)]).unwrap();
        assert_eq!(sorted.len(), 3);
    }

    #[test]
    fn from_sorted_reports_first_violation() {
        let err = Sorted::from_sorted(vec![("a", 1), ("c", 1), ("b", 1), ("a", 1)]).unwrap_err();
        assert_eq!(err, SortError::OutOfOrder { index: 2 });
    }

    #[test]
    fn empty_and_single_sequences_are_sorted() {
        let empty: Sorted<&str, u64> = Sorted::from_sorted(Vec::new()).unwrap();
        assert!(empty.is_empty());
        assert!(Sorted::from_sorted(vec![("only", 1)]).is_ok());
    }
}
