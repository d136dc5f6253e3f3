//! Pipeline orchestration: the imperative shell around the pure core.

use super::config::JobConfig;
use super::error::JobError;
use super::guard::claim_output_dir;
use super::input::collect_lines;
use super::output::{write_result_file, write_success_marker};
use crate::core::{shuffle_sort, Mapper, Reducer};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::time::Duration;
use stillwater::validation::Validation;
use tracing::{debug, info};
use uuid::Uuid;

/// Summary of a committed run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct JobReport {
    /// Unique identifier of this run
    pub run_id: Uuid,

    pub started_at: DateTime<Utc>,

    /// When the commit marker was written
    pub finished_at: DateTime<Utc>,

    /// Number of entries read from the input directory
    pub input_files: usize,

    pub input_lines: usize,

    /// Pairs emitted by the mapper
    pub intermediate_pairs: usize,

    /// Entries in the result file
    pub output_records: usize,

    pub output_dir: PathBuf,
}

impl JobReport {
    /// Wall-clock time from start to commit
    pub fn elapsed(&self) -> Duration {
        self.finished_at
            .signed_duration_since(self.started_at)
            .to_std()
            .unwrap_or(Duration::ZERO)
    }

    /// Pretty-printed JSON rendering of the report
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// A configured MapReduce job.
///
/// # Example
///
/// ```rust
/// use minimr::core::{word_count_mapper, word_count_reducer};
/// use minimr::job::{Job, JobConfig};
/// # let tmp = tempfile::TempDir::new().unwrap();
/// # let input = tmp.path().join("input");
/// # std::fs::create_dir(&input).unwrap();
/// # std::fs::write(input.join("a.txt"), "The cat sat.\n").unwrap();
/// # let output = tmp.path().join("output");
///
/// let job = Job::new(JobConfig::default().with_output_file("counts.tsv"));
/// let report = job.run(word_count_mapper, word_count_reducer, &input, &output)?;
///
/// assert_eq!(report.output_records, 3);
/// assert!(output.join("counts.tsv").is_file());
/// # Ok::<(), minimr::job::JobError>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct Job {
    config: JobConfig,
}

impl Job {
    /// Create a job that writes its output using `config`
    pub fn new(config: JobConfig) -> Self {
        Self { config }
    }

    /// File names this job writes
    pub fn config(&self) -> &JobConfig {
        &self.config
    }

    /// Run the pipeline end to end.
    ///
    /// Steps run strictly in sequence: guard the output, collect lines, map,
    /// sort, reduce, write the result file, commit. The first failure is
    /// returned as-is. If it happens after the output directory was claimed,
    /// the directory is left without a commit marker.
    pub fn run<K, V, M, R>(
        &self,
        mapper: M,
        reducer: R,
        input_dir: impl AsRef<Path>,
        output_dir: impl AsRef<Path>,
    ) -> Result<JobReport, JobError>
    where
        K: Ord + Display,
        V: Display,
        M: Mapper<K, V>,
        R: Reducer<K, V>,
    {
        let input_dir = input_dir.as_ref();
        let output_dir = output_dir.as_ref();

        if let Validation::Failure(errors) = self.config.validate() {
            return Err(JobError::InvalidConfig {
                errors: errors.iter().cloned().collect(),
            });
        }

        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        info!(
            %run_id,
            input = %input_dir.display(),
            output = %output_dir.display(),
            "Starting job"
        );

        let claimed = claim_output_dir(output_dir)?;

        let input = collect_lines(input_dir)?;
        let input_files = input.files.len();
        let input_lines = input.records.len();
        debug!(%run_id, input_files, input_lines, "Collected input");

        let pairs = mapper.map(input.records);
        let intermediate_pairs = pairs.len();
        debug!(%run_id, intermediate_pairs, "Map stage complete");

        let sorted = shuffle_sort(pairs);
        let table = reducer.reduce(sorted);
        debug!(%run_id, output_records = table.len(), "Reduce stage complete");

        let result_path = write_result_file(claimed.path(), &self.config, &table)?;
        debug!(%run_id, path = %result_path.display(), "Wrote result file");

        write_success_marker(claimed.path(), &self.config)?;
        let finished_at = Utc::now();
        info!(%run_id, output_records = table.len(), "Job committed");

        Ok(JobReport {
            run_id,
            started_at,
            finished_at,
            input_files,
            input_lines,
            intermediate_pairs,
            output_records: table.len(),
            output_dir: output_dir.to_path_buf(),
        })
    }
}

/// Run a job with the conventional `part-00000` / `_SUCCESS` layout.
///
/// Fails with [`JobError::OutputExists`] if `output_dir` is already present.
pub fn run<K, V, M, R>(
    mapper: M,
    reducer: R,
    input_dir: impl AsRef<Path>,
    output_dir: impl AsRef<Path>,
) -> Result<JobReport, JobError>
where
    K: Ord + Display,
    V: Display,
    M: Mapper<K, V>,
    R: Reducer<K, V>,
{
    Job::default().run(mapper, reducer, input_dir, output_dir)
}
