//! Semantic error types for the sqci application.
//!
//! This module defines the error hierarchy for sqci, following the principle of
//! using semantic error enums (via `thiserror`) for conditions the caller might
//! inspect or map to an exit code, while reserving opaque errors
//! (`eyre::Report`) for the application boundary.

use std::sync::Arc;

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur while resolving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable held a value that could not be converted.
    #[error("invalid configuration value for '{field}': {reason}")]
    InvalidValue {
        /// The name of the offending environment variable.
        field: String,
        /// The reason the value is invalid.
        reason: String,
    },

    /// A configuration layer could not be serialised for merging.
    #[error("failed to serialise {layer} layer: {message}")]
    Serialise {
        /// The layer being serialised.
        layer: &'static str,
        /// A description of the serialisation failure.
        message: String,
    },

    /// The `OrthoConfig` library returned an error while merging layers.
    #[error("configuration loading failed: {0}")]
    OrthoConfig(Arc<ortho_config::OrthoError>),
}

/// Errors that can occur while running pipeline steps.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The build directory could not be created.
    #[error("failed to create build directory '{path}': {message}")]
    CreateBuildDir {
        /// The directory that could not be created.
        path: Utf8PathBuf,
        /// A description of the I/O failure.
        message: String,
    },

    /// A step's program could not be started.
    #[error("{step} step failed to start '{program}': {message}")]
    SpawnFailed {
        /// The pipeline step name.
        step: &'static str,
        /// The program that failed to start.
        program: String,
        /// A description of the spawn failure.
        message: String,
    },

    /// A step's program exited unsuccessfully.
    #[error("{step} step '{program}' exited with {}", describe_code(.code))]
    StepFailed {
        /// The pipeline step name.
        step: &'static str,
        /// The program that failed.
        program: String,
        /// The exit code, or `None` when the child was terminated by a signal.
        code: Option<i32>,
    },
}

fn describe_code(code: &Option<i32>) -> String {
    code.map_or_else(
        || String::from("no exit code (terminated by signal)"),
        |value| format!("status {value}"),
    )
}

impl PipelineError {
    /// Returns the process exit code that best reflects this failure.
    ///
    /// Non-zero child exit codes are passed through when they fit in a
    /// process exit status; everything else maps to `1`.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::StepFailed {
                code: Some(code), ..
            } => u8::try_from(*code)
                .ok()
                .filter(|value| *value != 0)
                .unwrap_or(1),
            Self::StepFailed { code: None, .. }
            | Self::SpawnFailed { .. }
            | Self::CreateBuildDir { .. } => 1,
        }
    }
}

/// Top-level error type for the sqci application.
///
/// Aggregates all domain-specific errors into a single type. At the
/// application boundary (`main.rs`) configuration errors are converted to
/// `eyre::Report`, while pipeline errors are mapped to exit codes.
#[derive(Debug, Error)]
pub enum SqciError {
    /// An error occurred while resolving configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// An error occurred while running the pipeline.
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

/// A specialised `Result` type for sqci operations.
pub type Result<T> = std::result::Result<T, SqciError>;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(
        "JOBS",
        "expected unsigned integer, got 'many'",
        "invalid configuration value for 'JOBS': expected unsigned integer, got 'many'"
    )]
    #[case(
        "SQ_JOBS",
        "expected unsigned integer, got '-1'",
        "invalid configuration value for 'SQ_JOBS': expected unsigned integer, got '-1'"
    )]
    fn config_error_invalid_value_displays_correctly(
        #[case] field: &str,
        #[case] reason: &str,
        #[case] expected: &str,
    ) {
        let error = ConfigError::InvalidValue {
            field: String::from(field),
            reason: String::from(reason),
        };
        assert_eq!(error.to_string(), expected);
    }

    #[rstest]
    fn config_error_ortho_config_displays_correctly() {
        let ortho_error = ortho_config::OrthoError::Validation {
            key: String::from("jobs"),
            message: String::from("must be a positive integer"),
        };
        let error = ConfigError::OrthoConfig(Arc::new(ortho_error));
        assert_eq!(
            error.to_string(),
            "configuration loading failed: Validation failed for 'jobs': must be a positive integer"
        );
    }

    #[rstest]
    fn pipeline_error_step_failed_includes_status() {
        let error = PipelineError::StepFailed {
            step: "test",
            program: String::from("ninja"),
            code: Some(2),
        };
        assert_eq!(error.to_string(), "test step 'ninja' exited with status 2");
    }

    #[rstest]
    fn pipeline_error_step_failed_without_code_mentions_signal() {
        let error = PipelineError::StepFailed {
            step: "build",
            program: String::from("ninja"),
            code: None,
        };
        assert_eq!(
            error.to_string(),
            "build step 'ninja' exited with no exit code (terminated by signal)"
        );
    }

    #[rstest]
    #[case(Some(2), 2)]
    #[case(Some(255), 255)]
    #[case(Some(256), 1)]
    #[case(Some(-1), 1)]
    #[case(None, 1)]
    fn pipeline_error_exit_code_maps_child_status(#[case] code: Option<i32>, #[case] expected: u8) {
        let error = PipelineError::StepFailed {
            step: "test",
            program: String::from("ninja"),
            code,
        };
        assert_eq!(error.exit_code(), expected);
    }

    #[rstest]
    fn pipeline_error_spawn_failed_exits_with_one() {
        let error = PipelineError::SpawnFailed {
            step: "configure",
            program: String::from("cmake"),
            message: String::from("No such file or directory"),
        };
        assert_eq!(error.exit_code(), 1);
        assert_eq!(
            error.to_string(),
            "configure step failed to start 'cmake': No such file or directory"
        );
    }

    #[rstest]
    fn sqci_error_wraps_pipeline_error() {
        let pipeline_error = PipelineError::CreateBuildDir {
            path: Utf8PathBuf::from("/work/build"),
            message: String::from("permission denied"),
        };
        let error: SqciError = pipeline_error.into();
        assert_eq!(
            error.to_string(),
            "failed to create build directory '/work/build': permission denied"
        );
    }
}
