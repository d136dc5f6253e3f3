//! Input collection: flatten a directory of text files into line records.

use super::error::JobError;
use crate::core::LineRecord;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// List the entries directly inside `input_dir`, sorted by file name.
///
/// The listing is flat; nested directories are returned as entries, not
/// descended into. A regular file passed as `input_dir` has no entries and
/// lists as empty.
pub fn list_input_files(input_dir: &Path) -> Result<Vec<PathBuf>, JobError> {
    WalkDir::new(input_dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .map(|entry| {
            entry.map(|e| e.into_path()).map_err(|err| JobError::ListInput {
                path: input_dir.to_path_buf(),
                source: err.into(),
            })
        })
        .collect()
}

/// Everything read from an input directory
#[derive(Debug, Default)]
pub struct CollectedInput {
    /// Files visited, in enumeration order
    pub files: Vec<PathBuf>,
    pub records: Vec<LineRecord>,
}

/// Read every file in `input_dir` line by line.
///
/// Records keep file enumeration order and, within a file, line order.
/// Files must be UTF-8; anything unreadable aborts the collection.
pub fn collect_lines(input_dir: &Path) -> Result<CollectedInput, JobError> {
    let files = list_input_files(input_dir)?;
    let mut records = Vec::new();

    for file in &files {
        let before = records.len();
        read_lines_into(file, &mut records).map_err(|source| JobError::ReadInput {
            path: file.clone(),
            source,
        })?;
        debug!(file = %file.display(), lines = records.len() - before, "Read input file");
    }

    Ok(CollectedInput { files, records })
}

fn read_lines_into(path: &Path, records: &mut Vec<LineRecord>) -> io::Result<()> {
    let reader = BufReader::new(File::open(path)?);
    for line in reader.lines() {
        records.push(LineRecord::new(path, line?));
    }
    Ok(())
}
