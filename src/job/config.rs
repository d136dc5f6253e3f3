//! Job configuration and its validation.

use std::path::{Component, Path};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;

/// Conventional name of the single result file
pub const DEFAULT_OUTPUT_FILE: &str = "part-00000";

/// Conventional name of the zero-byte commit marker
pub const DEFAULT_SUCCESS_MARKER: &str = "_SUCCESS";

/// Problems found while validating a [`JobConfig`]
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{field} must not be empty")]
    EmptyName { field: &'static str },

    #[error("{field} '{name}' must be a plain file name")]
    NotAFileName { field: &'static str, name: String },

    #[error("Result file and commit marker are both named '{name}'")]
    NameCollision { name: String },
}

/// Names of the files a job writes into its output directory.
///
/// # Example
///
/// ```rust
/// use minimr::job::JobConfig;
///
/// let config = JobConfig::default().with_output_file("counts.tsv");
/// assert_eq!(config.output_file, "counts.tsv");
/// assert_eq!(config.success_marker, "_SUCCESS");
/// assert!(config.validate().is_success());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JobConfig {
    /// Result file, one `key<TAB>value` line per entry
    pub output_file: String,

    /// Marker written last; its presence means the output is complete
    pub success_marker: String,
}

impl Default for JobConfig {
    fn default() -> Self {
        Self {
            output_file: DEFAULT_OUTPUT_FILE.to_string(),
            success_marker: DEFAULT_SUCCESS_MARKER.to_string(),
        }
    }
}

impl JobConfig {
    pub fn with_output_file(mut self, name: impl Into<String>) -> Self {
        self.output_file = name.into();
        self
    }

    pub fn with_success_marker(mut self, name: impl Into<String>) -> Self {
        self.success_marker = name.into();
        self
    }

    /// Validate every setting, accumulating ALL problems.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<ConfigError>> {
        let checks = vec![
            check_file_name("output_file", &self.output_file),
            check_file_name("success_marker", &self.success_marker),
            check_distinct(&self.output_file, &self.success_marker),
        ];

        Validation::all_vec(checks).map(|_| ())
    }
}

fn check_file_name(field: &'static str, name: &str) -> Validation<(), NonEmptyVec<ConfigError>> {
    if name.is_empty() {
        return Validation::fail(ConfigError::EmptyName { field });
    }

    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Validation::success(()),
        _ => Validation::fail(ConfigError::NotAFileName {
            field,
            name: name.to_string(),
        }),
    }
}

fn check_distinct(output_file: &str, marker: &str) -> Validation<(), NonEmptyVec<ConfigError>> {
    if !output_file.is_empty() && output_file == marker {
        Validation::fail(ConfigError::NameCollision {
            name: output_file.to_string(),
        })
    } else {
        Validation::success(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn errors_of(config: &JobConfig) -> Vec<ConfigError> {
        match config.validate() {
            Validation::Failure(errors) => errors.iter().cloned().collect(),
            Validation::Success(_) => Vec::new(),
        }
    }

    #[test]
    fn default_config_is_valid() {
        let config = JobConfig::default();
        assert_eq!(config.output_file, "part-00000");
        assert_eq!(config.success_marker, "_SUCCESS");
        assert!(config.validate().is_success());
    }

    #[test]
    fn empty_names_are_rejected() {
        let config = JobConfig::default().with_output_file("");
        assert_eq!(
            errors_of(&config),
            vec![ConfigError::EmptyName {
                field: "output_file"
            }]
        );
    }

    #[test]
    fn paths_are_not_file_names() {
        for name in ["nested/part-00000", "..", ".", "/abs"] {
            let config = JobConfig::default().with_success_marker(name);
            let errors = errors_of(&config);
            assert!(
                matches!(errors.as_slice(), [ConfigError::NotAFileName { field: "success_marker", .. }]),
                "{name} should be rejected, got {errors:?}"
            );
        }
    }

    #[test]
    fn validation_accumulates_all_problems() {
        let config = JobConfig::default()
            .with_output_file("")
            .with_success_marker("a/b");

        let errors = errors_of(&config);
        assert_eq!(errors.len(), 2);
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::EmptyName { .. })));
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::NotAFileName { .. })));
    }

    #[test]
    fn identical_names_collide() {
        let config = JobConfig::default()
            .with_output_file("same")
            .with_success_marker("same");

        assert_eq!(
            errors_of(&config),
            vec![ConfigError::NameCollision {
                name: "same".to_string()
            }]
        );
    }
}
