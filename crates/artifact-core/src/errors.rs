//! Error type for a download invocation.
//!
//! Every failure carries the offending input or variable name, or the query
//! parameters that produced no result, so the message alone is enough to
//! diagnose a failed pipeline step.

use std::path::PathBuf;
use thiserror::Error;

use crate::ports::{ArtifactStoreError, BuildQueryError};

/// Error type for download invocations.
#[derive(Debug, Error)]
pub enum ArtifactError {
    /// A required input was not provided.
    #[error("Required input '{field}' is missing")]
    MissingInput {
        /// The input name.
        field: String,
    },

    /// An input was provided with a value outside its domain.
    #[error("Input '{field}' has invalid value '{value}'")]
    InvalidInput {
        /// The input name.
        field: String,
        /// The rejected value.
        value: String,
    },

    /// A build id was missing, zero or not a number.
    #[error("Invalid build id from '{field}': '{value}'")]
    InvalidBuildId {
        /// Input or variable the id was read from.
        field: String,
        /// The rejected value.
        value: String,
    },

    /// The ambient project id is not set.
    #[error("Project context is missing: variable '{variable}' is not set")]
    MissingProjectContext {
        /// The variable name.
        variable: String,
    },

    /// The ambient project id is set but is not a valid identifier.
    #[error("Project context variable '{variable}' is not a valid project id: '{value}'")]
    InvalidProjectContext {
        /// The variable name.
        variable: String,
        /// The rejected value.
        value: String,
    },

    /// The current build was requested on a host that has no build context.
    #[error(
        "The current build id is not available on a {host} host; download from a specific build instead"
    )]
    BuildIdUnavailableForHost {
        /// The host type name.
        host: String,
    },

    /// The step is running on a host type this task does not know.
    #[error("Unsupported host environment '{host}'")]
    UnsupportedHostEnvironment {
        /// The raw host type value (empty when unset).
        host: String,
    },

    /// A latest-build query returned no builds.
    #[error(
        "No build found in project '{project}' for definition {definition_id}{} with tags [{}]",
        .branch_name.as_ref().map(|b| format!(" on branch '{b}'")).unwrap_or_default(),
        .tag_filters.join(", ")
    )]
    NoMatchingBuild {
        /// Project that was queried.
        project: String,
        /// Definition that was queried.
        definition_id: u32,
        /// Branch filter, if any.
        branch_name: Option<String>,
        /// Tag filters as passed to the query.
        tag_filters: Vec<String>,
    },

    /// The build query collaborator failed.
    #[error("Build query failed: {0}")]
    BuildQuery(#[from] BuildQueryError),

    /// The destination directory could not be created.
    #[error("Destination '{}' is unavailable: {message}", .path.display())]
    DestinationUnavailable {
        /// The destination path.
        path: PathBuf,
        /// Cause reported by the filesystem.
        message: String,
    },

    /// The artifact download collaborator failed.
    #[error(transparent)]
    DownloadFailed(#[from] ArtifactStoreError),

    /// The invocation was cancelled.
    #[error("Operation cancelled")]
    Cancelled,
}

impl ArtifactError {
    /// Create a missing input error.
    pub fn missing_input(field: impl Into<String>) -> Self {
        Self::MissingInput {
            field: field.into(),
        }
    }

    /// Create an invalid input error.
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Create an invalid build id error.
    pub fn invalid_build_id(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidBuildId {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Create a destination unavailable error.
    pub fn destination_unavailable(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::DestinationUnavailable {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Check if this error was raised while validating inputs.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::MissingInput { .. }
                | Self::InvalidInput { .. }
                | Self::InvalidBuildId { .. }
                | Self::MissingProjectContext { .. }
                | Self::InvalidProjectContext { .. }
                | Self::BuildIdUnavailableForHost { .. }
                | Self::UnsupportedHostEnvironment { .. }
        )
    }

    /// Check if this is a cancellation, including one reported by the artifact store.
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(
            self,
            Self::Cancelled | Self::DownloadFailed(ArtifactStoreError::Cancelled)
        )
    }
}

/// Convenience result type for download invocations.
pub type ArtifactResult<T> = Result<T, ArtifactError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_field() {
        let err = ArtifactError::missing_input("artifactName");
        assert!(err.to_string().contains("artifactName"));

        let err = ArtifactError::invalid_build_id("buildId", "abc");
        assert!(err.to_string().contains("buildId"));
        assert!(err.to_string().contains("abc"));
    }

    #[test]
    fn test_no_matching_build_message() {
        let err = ArtifactError::NoMatchingBuild {
            project: "Fabrikam".to_string(),
            definition_id: 9,
            branch_name: Some("refs/heads/main".to_string()),
            tag_filters: vec!["nightly".to_string(), "signed".to_string()],
        };
        let msg = err.to_string();
        assert!(msg.contains("Fabrikam"));
        assert!(msg.contains("definition 9"));
        assert!(msg.contains("on branch 'refs/heads/main'"));
        assert!(msg.contains("[nightly, signed]"));

        let err = ArtifactError::NoMatchingBuild {
            project: "Fabrikam".to_string(),
            definition_id: 9,
            branch_name: None,
            tag_filters: vec![String::new()],
        };
        assert!(!err.to_string().contains("branch"));
    }

    #[test]
    fn test_download_failure_is_verbatim() {
        let store_err = ArtifactStoreError::Transfer {
            message: "connection reset".to_string(),
        };
        let expected = store_err.to_string();
        let err = ArtifactError::from(store_err);
        assert_eq!(err.to_string(), expected);
    }

    #[test]
    fn test_classification() {
        assert!(ArtifactError::missing_input("downloadPath").is_validation());
        assert!(
            ArtifactError::BuildIdUnavailableForHost {
                host: "release".to_string()
            }
            .is_validation()
        );
        assert!(!ArtifactError::Cancelled.is_validation());
        assert!(ArtifactError::Cancelled.is_cancelled());
        assert!(ArtifactError::from(ArtifactStoreError::Cancelled).is_cancelled());
        assert!(
            !ArtifactError::destination_unavailable("/out", "permission denied").is_cancelled()
        );
    }
}
