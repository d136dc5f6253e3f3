//! Minimr: a single-machine MapReduce word-count pipeline
//!
//! Minimr simulates the map → shuffle/sort → reduce stages of a batch
//! processing framework on one machine. It follows a "pure core, imperative
//! shell" split: the data transformations are pure functions with no side
//! effects, while all filesystem access lives in the job runner around them.
//!
//! # Core Concepts
//!
//! - **Mapper**: Pure transformation from line records to key/value pairs
//! - **Sorted**: Proof that pairs are ordered, so equal keys are adjacent
//! - **Reducer**: Pure aggregation of sorted, same-keyed pairs
//! - **Job**: Guards the output directory, runs the stages, commits with a
//!   `_SUCCESS` marker
//!
//! # Example
//!
//! ```rust
//! use minimr::core::{shuffle_sort, word_count_mapper, word_count_reducer, LineRecord};
//!
//! let lines = vec![
//!     LineRecord::new("a.txt", "The cat sat."),
//!     LineRecord::new("b.txt", "The dog sat!"),
//! ];
//!
//! let table = word_count_reducer(shuffle_sort(word_count_mapper(lines)));
//! assert_eq!(
//!     table,
//!     vec![
//!         ("cat".to_string(), 1),
//!         ("dog".to_string(), 1),
//!         ("sat".to_string(), 2),
//!         ("the".to_string(), 2),
//!     ]
//! );
//! ```

pub mod core;
pub mod experiment;
pub mod job;

// Re-export commonly used types
pub use crate::core::{LineRecord, Mapper, Reducer, Sorted};
pub use job::{run, Job, JobConfig, JobError, JobReport};
