//! Job execution: the imperative shell around the pure core.
//!
//! This module owns every side effect of a run. It claims the output
//! directory, reads the input files, hands the lines to the pure
//! map/sort/reduce stages in `core`, and persists the result.
//!
//! # Output layout
//!
//! A committed output directory holds exactly two files:
//! - `part-00000`: one `key<TAB>value` line per distinct key, sorted by key
//! - `_SUCCESS`: zero-byte commit marker, written last
//!
//! Consumers must check the marker (see [`is_committed`]) rather than the
//! result file, which may exist after a failed run.
//!
//! # Example
//!
//! ```rust
//! use minimr::core::{word_count_mapper, word_count_reducer};
//! use minimr::job::{self, JobError};
//! # let tmp = tempfile::TempDir::new().unwrap();
//! # let input = tmp.path().join("input");
//! # std::fs::create_dir(&input).unwrap();
//! # std::fs::write(input.join("a.txt"), "Cat, cat CAT.\n").unwrap();
//! # let output = tmp.path().join("output");
//!
//! job::run(word_count_mapper, word_count_reducer, &input, &output)?;
//! assert_eq!(std::fs::read_to_string(output.join("part-00000")).unwrap(), "cat\t3\n");
//!
//! // Reruns into the same location are refused
//! let rerun = job::run(word_count_mapper, word_count_reducer, &input, &output);
//! assert!(matches!(rerun, Err(JobError::OutputExists { .. })));
//! # Ok::<(), JobError>(())
//! ```

pub mod config;
pub mod error;
pub mod guard;
pub mod input;
pub mod output;
pub mod runner;

pub use config::{ConfigError, JobConfig, DEFAULT_OUTPUT_FILE, DEFAULT_SUCCESS_MARKER};
pub use error::JobError;
pub use guard::{claim_output_dir, ClaimedOutput};
pub use input::{collect_lines, list_input_files, CollectedInput};
pub use output::{is_committed, write_result_file, write_success_marker};
pub use runner::{run, Job, JobReport};
