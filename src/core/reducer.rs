//! Reduce stage: collapse sorted pairs into one entry per key.

use super::record::ResultTable;
use super::sorter::Sorted;

/// Capability that aggregates sorted intermediate pairs.
///
/// Reducers only ever see a [`Sorted`] sequence, so equal keys are
/// guaranteed to be adjacent. Any `Fn(Sorted<K, V>) -> ResultTable<K, V>`
/// is a reducer.
pub trait Reducer<K, V> {
    /// Aggregate the pairs, preserving sorted order.
    fn reduce(&self, pairs: Sorted<K, V>) -> ResultTable<K, V>;
}

impl<K, V, F> Reducer<K, V> for F
where
    F: Fn(Sorted<K, V>) -> ResultTable<K, V>,
{
    fn reduce(&self, pairs: Sorted<K, V>) -> ResultTable<K, V> {
        self(pairs)
    }
}

/// Merge runs of equal keys with `combine`.
///
/// Keeps the last emitted entry; a pair whose key equals it is folded in
/// place, any other key starts a new entry.
///
/// # Example
///
/// ```rust
/// use minimr::core::{merge_adjacent, Sorted};
///
/// let sorted = Sorted::sort(vec![("b", 4u32), ("a", 7), ("b", 2)]);
/// let maxima = merge_adjacent(sorted, |acc, v| *acc = (*acc).max(v));
/// assert_eq!(maxima, vec![("a", 7), ("b", 4)]);
/// ```
pub fn merge_adjacent<K, V, F>(pairs: Sorted<K, V>, mut combine: F) -> ResultTable<K, V>
where
    K: PartialEq,
    F: FnMut(&mut V, V),
{
    let mut result: ResultTable<K, V> = Vec::new();
    for (key, value) in pairs {
        if let Some((last_key, acc)) = result.last_mut() {
            if *last_key == key {
                combine(acc, value);
                continue;
            }
        }
        result.push((key, value));
    }
    result
}

/// Word-count reducer: sum the counts of each word.
///
/// ```rust
/// use minimr::core::{shuffle_sort, word_count_reducer};
///
/// let pairs = vec![
///     ("the".to_string(), 1),
///     ("cat".to_string(), 1),
///     ("the".to_string(), 1),
/// ];
/// let table = word_count_reducer(shuffle_sort(pairs));
/// assert_eq!(table, vec![("cat".to_string(), 1), ("the".to_string(), 2)]);
/// ```
pub fn word_count_reducer(pairs: Sorted<String, u64>) -> ResultTable<String, u64> {
    merge_adjacent(pairs, |total, count| *total += count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{shuffle_sort, WordCount};

    fn words(items: &[(&str, u64)]) -> Vec<WordCount> {
        items.iter().map(|(w, c)| (w.to_string(), *c)).collect()
    }

    #[test]
    fn reducer_sums_counts_per_word() {
        let sorted = shuffle_sort(words(&[
            ("the", 1),
            ("cat", 1),
            ("sat", 1),
            ("the", 1),
            ("dog", 1),
            ("sat", 1),
        ]));

        let table = word_count_reducer(sorted);
        assert_eq!(
            table,
            words(&[("cat", 1), ("dog", 1), ("sat", 2), ("the", 2)])
        );
    }

    #[test]
    fn reducer_adds_existing_counts_not_just_occurrences() {
        let sorted = Sorted::from_sorted(words(&[("a", 3), ("a", 4), ("b", 0)])).unwrap();
        assert_eq!(word_count_reducer(sorted), words(&[("a", 7), ("b", 0)]));
    }

    #[test]
    fn reducer_on_empty_input_is_empty() {
        let sorted: Sorted<String, u64> = shuffle_sort(Vec::new());
        assert!(word_count_reducer(sorted).is_empty());
    }

    #[test]
    fn merge_adjacent_keeps_first_value_for_singletons() {
        let sorted = Sorted::from_sorted(vec![("x", 5), ("y", 6)]).unwrap();
        let table = merge_adjacent(sorted, |_, _| panic!("no runs to merge"));
        assert_eq!(table, vec![("x", 5), ("y", 6)]);
    }

    #[test]
    fn closures_are_reducers() {
        let count_keys = |pairs: Sorted<char, u64>| merge_adjacent(pairs, |n, _| *n += 1);
        let sorted = Sorted::from_sorted(vec![('a', 1), ('a', 1), ('a', 1)]).unwrap();
        assert_eq!(count_keys.reduce(sorted), vec![('a', 3)]);
    }
}
