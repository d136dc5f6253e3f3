//! Benchmark harness.
//!
//! Replicates a small raw corpus into many numbered input files to build a
//! larger synthetic workload, then times a single end-to-end job over it.

use crate::core::{Mapper, Reducer};
use crate::job::{self, JobError, JobReport};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::Display;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info};
use walkdir::WalkDir;

/// Errors that can occur while preparing or running an experiment
#[derive(Debug, Error)]
pub enum ExperimentError {
    #[error("Failed to prepare '{}'", path.display())]
    Prepare {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("No raw files found in '{}'", path.display())]
    NoRawFiles { path: PathBuf },

    /// Two raw files would be copied to the same numbered names
    #[error("Raw files '{}' and '{}' share the stem '{stem}'", first.display(), second.display())]
    DuplicateStem {
        stem: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error(transparent)]
    Job(#[from] JobError),
}

/// Outcome of one timed run
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExperimentReport {
    /// Copies made of each raw file
    pub copies: usize,

    /// Files in the input directory when the job started
    pub input_files: usize,

    /// Wall-clock time of the job alone, excluding preparation
    pub elapsed: Duration,

    pub job: JobReport,
}

/// Directories and replication factor of an experiment.
///
/// # Example
///
/// ```rust
/// use minimr::core::{word_count_mapper, word_count_reducer};
/// use minimr::experiment::Experiment;
/// # let tmp = tempfile::TempDir::new().unwrap();
/// # let raw = tmp.path().join("raw");
/// # std::fs::create_dir(&raw).unwrap();
/// # std::fs::write(raw.join("text0.txt"), "The cat sat.\n").unwrap();
///
/// let experiment = Experiment::new(
///     &raw,
///     tmp.path().join("input"),
///     tmp.path().join("output"),
///     3,
/// );
/// let report = experiment.run(word_count_mapper, word_count_reducer)?;
///
/// assert_eq!(report.input_files, 3);
/// # Ok::<(), minimr::experiment::ExperimentError>(())
/// ```
#[derive(Clone, Debug)]
pub struct Experiment {
    pub raw_dir: PathBuf,
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub copies: usize,
}

impl Experiment {
    /// Describe an experiment; nothing touches the filesystem until `prepare`.
    pub fn new(
        raw_dir: impl Into<PathBuf>,
        input_dir: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
        copies: usize,
    ) -> Self {
        Self {
            raw_dir: raw_dir.into(),
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            copies,
        }
    }

    /// Reset the working directories and fill the input directory.
    ///
    /// The input directory is created or emptied, the output directory is
    /// removed, and every raw file `name.ext` is copied to
    /// `name_1.txt ..= name_N.txt`. Raw files sharing a stem are rejected
    /// before anything is written. Returns the number of files written.
    pub fn prepare(&self) -> Result<usize, ExperimentError> {
        let raw_files = list_raw_files(&self.raw_dir)?;
        if raw_files.is_empty() {
            return Err(ExperimentError::NoRawFiles {
                path: self.raw_dir.clone(),
            });
        }
        let stems = unique_stems(&raw_files)?;

        clear_dir(&self.input_dir)?;
        remove_path(&self.output_dir)?;

        let mut written = 0;
        for (raw, stem) in raw_files.iter().zip(&stems) {
            let text = fs::read_to_string(raw).map_err(prepare_err(raw))?;

            for i in 1..=self.copies {
                let target = self.input_dir.join(format!("{stem}_{i}.txt"));
                fs::write(&target, &text).map_err(prepare_err(&target))?;
                written += 1;
            }
            debug!(raw = %raw.display(), copies = self.copies, "Replicated raw file");
        }

        Ok(written)
    }

    /// Prepare the directories, then time exactly one job.
    pub fn run<K, V, M, R>(&self, mapper: M, reducer: R) -> Result<ExperimentReport, ExperimentError>
    where
        K: Ord + Display,
        V: Display,
        M: Mapper<K, V>,
        R: Reducer<K, V>,
    {
        let input_files = self.prepare()?;

        let start = Instant::now();
        let job = job::run(mapper, reducer, &self.input_dir, &self.output_dir)?;
        let elapsed = start.elapsed();

        info!(
            copies = self.copies,
            input_files,
            elapsed_secs = elapsed.as_secs_f64(),
            "Experiment finished"
        );

        Ok(ExperimentReport {
            copies: self.copies,
            input_files,
            elapsed,
            job,
        })
    }
}

fn prepare_err(path: &Path) -> impl FnOnce(io::Error) -> ExperimentError + '_ {
    move |source| ExperimentError::Prepare {
        path: path.to_path_buf(),
        source,
    }
}

// Copy-name stem of every raw file, failing on the first collision.
fn unique_stems(raw_files: &[PathBuf]) -> Result<Vec<String>, ExperimentError> {
    let mut seen: HashMap<String, &PathBuf> = HashMap::new();
    let mut stems = Vec::with_capacity(raw_files.len());

    for raw in raw_files {
        let stem = raw
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        if let Some(first) = seen.insert(stem.clone(), raw) {
            return Err(ExperimentError::DuplicateStem {
                stem,
                first: first.clone(),
                second: raw.clone(),
            });
        }
        stems.push(stem);
    }
    Ok(stems)
}

fn list_raw_files(raw_dir: &Path) -> Result<Vec<PathBuf>, ExperimentError> {
    let mut files = Vec::new();
    for entry in WalkDir::new(raw_dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|err| ExperimentError::Prepare {
            path: raw_dir.to_path_buf(),
            source: err.into(),
        })?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

// Empty `dir`, creating it when missing.
fn clear_dir(dir: &Path) -> Result<(), ExperimentError> {
    if !dir.exists() {
        return fs::create_dir_all(dir).map_err(prepare_err(dir));
    }

    for entry in fs::read_dir(dir).map_err(prepare_err(dir))? {
        let path = entry.map_err(prepare_err(dir))?.path();
        remove_path(&path)?;
    }
    Ok(())
}

fn remove_path(path: &Path) -> Result<(), ExperimentError> {
    let Ok(meta) = fs::symlink_metadata(path) else {
        return Ok(());
    };

    let removed = if meta.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };
    removed.map_err(prepare_err(path))
}
