//! Output directory guard.
//!
//! A job must never write into a location that already exists. The guard
//! checks this before any input is scanned and claims the directory with an
//! exclusive create, so two runs racing for the same path cannot both pass.

use super::error::JobError;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// An output directory created by, and owned by, the current run.
#[derive(Debug)]
pub struct ClaimedOutput {
    path: PathBuf,
}

impl ClaimedOutput {
    /// Location of the claimed directory
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Refuse a pre-existing output location, otherwise create it.
///
/// Missing parent directories are created. The final path component is
/// created with a non-recursive `create_dir`, which fails atomically if
/// anything appeared there since the existence check.
pub fn claim_output_dir(path: &Path) -> Result<ClaimedOutput, JobError> {
    // symlink_metadata so a dangling link still counts as existing
    if fs::symlink_metadata(path).is_ok() {
        warn!(path = %path.display(), "Refusing to overwrite existing output");
        return Err(JobError::OutputExists {
            path: path.to_path_buf(),
        });
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| JobError::CreateOutput {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    match fs::create_dir(path) {
        Ok(()) => {
            debug!(path = %path.display(), "Claimed output directory");
            Ok(ClaimedOutput {
                path: path.to_path_buf(),
            })
        }
        Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
            warn!(path = %path.display(), "Output appeared while claiming it");
            Err(JobError::OutputExists {
                path: path.to_path_buf(),
            })
        }
        Err(source) => Err(JobError::CreateOutput {
            path: path.to_path_buf(),
            source,
        }),
    }
}
