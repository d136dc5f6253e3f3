//! Map stage: raw line records to intermediate key/value pairs.

use super::record::{LineRecord, WordCount};

/// Capability that turns input lines into intermediate pairs.
///
/// Mappers are pure: the output depends only on the records passed in, and
/// no state is carried between calls. Any `Fn(Vec<LineRecord>) -> Vec<(K, V)>`
/// is a mapper, so plain functions and closures can be handed to the
/// pipeline directly.
///
/// # Example
///
/// ```rust
/// use minimr::core::{LineRecord, Mapper};
///
/// // Emit each line's length keyed by its source file name
/// let line_lengths = |records: Vec<LineRecord>| -> Vec<(String, usize)> {
///     records
///         .into_iter()
///         .map(|r| (r.source.display().to_string(), r.line.len()))
///         .collect()
/// };
///
/// let pairs = line_lengths.map(vec![LineRecord::new("a.txt", "abc")]);
/// assert_eq!(pairs, vec![("a.txt".to_string(), 3)]);
/// ```
pub trait Mapper<K, V> {
    /// Map every record, preserving input order.
    fn map(&self, records: Vec<LineRecord>) -> Vec<(K, V)>;
}

impl<K, V, F> Mapper<K, V> for F
where
    F: Fn(Vec<LineRecord>) -> Vec<(K, V)>,
{
    fn map(&self, records: Vec<LineRecord>) -> Vec<(K, V)> {
        self(records)
    }
}

/// Lowercase a line and delete every ASCII punctuation character.
///
/// Punctuation is removed, not replaced, so `"don't"` becomes `"dont"`
/// rather than two tokens.
///
/// ```rust
/// use minimr::core::normalize;
///
/// assert_eq!(normalize("Don't STOP!\n"), "dont stop\n");
/// ```
pub fn normalize(line: &str) -> String {
    line.to_lowercase()
        .chars()
        .filter(|c| !c.is_ascii_punctuation())
        .collect()
}

/// Split a line into normalized, non-empty word tokens.
///
/// ```rust
/// use minimr::core::tokenize;
///
/// assert_eq!(tokenize("The cat  sat."), vec!["the", "cat", "sat"]);
/// assert!(tokenize(" ... \n").is_empty());
/// ```
pub fn tokenize(line: &str) -> Vec<String> {
    normalize(line)
        .split_whitespace()
        .map(str::to_owned)
        .collect()
}

/// Word-count mapper: one `(word, 1)` pair per token.
///
/// Words are emitted in the order they appear within each line, with lines
/// processed in input order. The source path is ignored.
///
/// ```rust
/// use minimr::core::{word_count_mapper, LineRecord};
///
/// let pairs = word_count_mapper(vec![LineRecord::new("a.txt", "Cat, cat CAT.")]);
/// assert_eq!(pairs.len(), 3);
/// assert!(pairs.iter().all(|(word, count)| word == "cat" && *count == 1));
/// ```
pub fn word_count_mapper(records: Vec<LineRecord>) -> Vec<WordCount> {
    records
        .iter()
        .flat_map(|record| tokenize(&record.line))
        .map(|word| (word, 1))
        .collect()
}
