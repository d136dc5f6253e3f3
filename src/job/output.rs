//! Result file and commit marker.

use super::config::JobConfig;
use super::error::JobError;
use std::fmt::Display;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Write one `key<TAB>value` line per entry, in table order.
///
/// Returns the path of the written file. An empty table produces an empty
/// file.
pub fn write_result_file<K, V>(
    output_dir: &Path,
    config: &JobConfig,
    table: &[(K, V)],
) -> Result<PathBuf, JobError>
where
    K: Display,
    V: Display,
{
    let path = output_dir.join(&config.output_file);
    let write_err = |source| JobError::WriteOutput {
        path: path.clone(),
        source,
    };

    let file = File::create(&path).map_err(write_err)?;
    let mut writer = BufWriter::new(file);
    for (key, value) in table {
        writeln!(writer, "{key}\t{value}").map_err(write_err)?;
    }
    writer.flush().map_err(write_err)?;

    Ok(path)
}

/// Write the zero-byte marker that signals a complete output.
pub fn write_success_marker(output_dir: &Path, config: &JobConfig) -> Result<PathBuf, JobError> {
    let path = output_dir.join(&config.success_marker);
    File::create(&path).map_err(|source| JobError::WriteOutput {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

/// Check whether `output_dir` holds a committed result.
///
/// Only the marker counts: a result file without it is a partial run.
pub fn is_committed(output_dir: &Path, config: &JobConfig) -> bool {
    output_dir.join(&config.success_marker).is_file()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn result_file_is_tab_separated_and_newline_terminated() {
        let tmp = TempDir::new().unwrap();
        let table = vec![("cat".to_string(), 1u64), ("sat".to_string(), 2)];

        let path = write_result_file(tmp.path(), &JobConfig::default(), &table).unwrap();

        assert_eq!(path, tmp.path().join("part-00000"));
        assert_eq!(fs::read_to_string(path).unwrap(), "cat\t1\nsat\t2\n");
    }

    #[test]
    fn empty_table_gives_empty_file() {
        let tmp = TempDir::new().unwrap();
        let table: Vec<(String, u64)> = Vec::new();

        let path = write_result_file(tmp.path(), &JobConfig::default(), &table).unwrap();
        assert_eq!(fs::metadata(path).unwrap().len(), 0);
    }

    #[test]
    fn marker_is_zero_bytes_and_commits() {
        let tmp = TempDir::new().unwrap();
        let config = JobConfig::default();
        assert!(!is_committed(tmp.path(), &config));

        let marker = write_success_marker(tmp.path(), &config).unwrap();

        assert_eq!(marker, tmp.path().join("_SUCCESS"));
        assert_eq!(fs::metadata(&marker).unwrap().len(), 0);
        assert!(is_committed(tmp.path(), &config));
    }

    #[test]
    fn result_file_alone_is_not_committed() {
        let tmp = TempDir::new().unwrap();
        let config = JobConfig::default();
        write_result_file(tmp.path(), &config, &[("a", 1)]).unwrap();

        assert!(!is_committed(tmp.path(), &config));
    }

    #[test]
    fn write_into_missing_directory_fails() {
        let tmp = TempDir::new().unwrap();
        let gone = tmp.path().join("gone");

        let err = write_success_marker(&gone, &JobConfig::default()).unwrap_err();
        assert!(matches!(err, JobError::WriteOutput { .. }));
    }
}
