//! CLI error type and exit codes.

use artifact_core::ArtifactError;
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Task inputs or ambient variables are invalid.
    #[error("{0}")]
    Validation(String),

    /// The latest-build query returned nothing.
    #[error("{0}")]
    NoMatchingBuild(String),

    /// Destination or transfer failure.
    #[error("{0}")]
    Io(String),

    /// The run was cancelled.
    #[error("Operation cancelled")]
    Cancelled,

    /// The runner itself is misconfigured.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Any other task failure.
    #[error("{0}")]
    Task(String),
}

impl CliError {
    /// Map error to process exit code.
    ///
    /// - 0: Success
    /// - 1: General error
    /// - 2: Invalid task inputs
    /// - 3: No matching build
    /// - 74: I/O or transfer error (EX_IOERR)
    /// - 130: Cancelled (as for SIGINT)
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) => 2,
            Self::NoMatchingBuild(_) => 3,
            Self::Io(_) => 74,
            Self::Cancelled => 130,
            Self::Config(_) | Self::Task(_) => 1,
        }
    }
}

impl From<ArtifactError> for CliError {
    fn from(err: ArtifactError) -> Self {
        if err.is_cancelled() {
            return Self::Cancelled;
        }
        if err.is_validation() {
            return Self::Validation(err.to_string());
        }
        match err {
            ArtifactError::NoMatchingBuild { .. } => Self::NoMatchingBuild(err.to_string()),
            ArtifactError::DestinationUnavailable { .. } | ArtifactError::DownloadFailed(_) => {
                Self::Io(err.to_string())
            }
            other => Self::Task(other.to_string()),
        }
    }
}
