//! Records flowing between pipeline stages.
//!
//! Every stage owns its sequence outright: the mapper consumes line records
//! and produces pairs, the sorter reorders those pairs in place, and the
//! reducer collapses them into the final result table.

use std::path::PathBuf;

/// One line of input text together with the file it came from.
///
/// Line records are ephemeral. They are produced while scanning the input
/// directory and consumed immediately by the mapper.
///
/// # Example
///
/// ```rust
/// use minimr::core::LineRecord;
///
/// let record = LineRecord::new("books/alice.txt", "Down the Rabbit-Hole");
/// assert_eq!(record.line, "Down the Rabbit-Hole");
/// assert_eq!(record.source.to_str(), Some("books/alice.txt"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineRecord {
    /// File the line was read from
    pub source: PathBuf,
    /// Raw line text, as read
    pub line: String,
}

impl LineRecord {
    /// Pair a line with the file it was read from.
    pub fn new(source: impl Into<PathBuf>, line: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            line: line.into(),
        }
    }
}

/// A normalized word and how many times it was seen.
pub type WordCount = (String, u64);

/// Final output of a run: one entry per distinct key, sorted by key.
pub type ResultTable<K, V> = Vec<(K, V)>;
