//! Pure functional core of the pipeline.
//!
//! This module contains every data transformation of a run:
//! - Mapping line records to intermediate pairs via the `Mapper` trait
//! - Shuffle/sort into a `Sorted` sequence
//! - Reducing sorted pairs via the `Reducer` trait
//!
//! Nothing in this module touches the filesystem. The `job` module is the
//! imperative shell that feeds it input and persists its output.

mod mapper;
mod record;
mod reducer;
mod sorter;

pub use mapper::{normalize, tokenize, word_count_mapper, Mapper};
pub use record::{LineRecord, ResultTable, WordCount};
pub use reducer::{merge_adjacent, word_count_reducer, Reducer};
pub use sorter::{shuffle_sort, SortError, Sorted};
