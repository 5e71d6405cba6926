//! Artifact download port.
//!
//! Transfers the files of one artifact of one build to a local directory.
//! Network I/O, retries and pattern matching all belong to the
//! implementation.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::domain::{BuildId, ProjectRef, ResolvedBuild};

/// Everything an artifact store needs to perform one download.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactDownload {
    /// Project owning the build.
    pub project: ProjectRef,
    /// Build that produced the artifact.
    pub build_id: BuildId,
    /// Artifact name within the build.
    pub artifact_name: String,
    /// Absolute destination directory. Exists when the port is called.
    pub destination: PathBuf,
    /// Glob patterns selecting files. Empty means no filtering.
    pub file_patterns: Vec<String>,
}

impl ArtifactDownload {
    /// Build a download description for a resolved build.
    pub fn new(
        build: &ResolvedBuild,
        artifact_name: impl Into<String>,
        destination: impl Into<PathBuf>,
        file_patterns: Vec<String>,
    ) -> Self {
        Self {
            project: build.project.clone(),
            build_id: build.build_id,
            artifact_name: artifact_name.into(),
            destination: destination.into(),
            file_patterns,
        }
    }

    /// True when every file of the artifact should be transferred.
    #[must_use]
    pub fn downloads_all_files(&self) -> bool {
        self.file_patterns.is_empty()
    }
}

/// Totals reported by a completed download.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadSummary {
    /// Number of files written to the destination.
    pub files_downloaded: usize,
    /// Number of bytes written to the destination.
    pub bytes_downloaded: u64,
}

/// Errors from artifact store operations.
#[derive(Debug, Error)]
pub enum ArtifactStoreError {
    /// The build has no artifact with this name.
    #[error("Artifact '{artifact_name}' not found for build {build_id}")]
    ArtifactNotFound {
        /// The artifact name
        artifact_name: String,
        /// The build that was searched
        build_id: BuildId,
    },

    /// A name used as a store path segment is empty, absolute or navigates
    /// out of its parent.
    #[error("Invalid {field} '{value}': must be a single path segment")]
    InvalidPathSegment {
        /// What the value names (`artifact name`, `project`)
        field: String,
        /// The rejected value
        value: String,
    },

    /// A file pattern could not be compiled.
    #[error("Invalid file pattern '{pattern}': {message}")]
    InvalidPattern {
        /// The offending pattern
        pattern: String,
        /// Parser message
        message: String,
    },

    /// Local filesystem failure.
    #[error("I/O error ({kind}): {message}")]
    Io {
        /// The kind of I/O error
        kind: String,
        /// Detailed error message
        message: String,
    },

    /// Transfer failure reported by the store.
    #[error("Artifact transfer failed: {message}")]
    Transfer {
        /// Detailed error message
        message: String,
    },

    /// The download was cancelled mid-transfer.
    #[error("Artifact download cancelled")]
    Cancelled,
}

impl ArtifactStoreError {
    /// Capture a `std::io::Error` as kind and message.
    #[must_use]
    pub fn from_io_error(err: &std::io::Error) -> Self {
        Self::Io {
            kind: format!("{:?}", err.kind()),
            message: err.to_string(),
        }
    }
}

/// Port trait for downloading artifact content.
#[async_trait]
pub trait ArtifactDownloadPort: Send + Sync {
    /// Download the artifact's files into `request.destination`.
    ///
    /// Implementations must observe `cancel` during the transfer.
    async fn download(
        &self,
        request: &ArtifactDownload,
        cancel: &CancellationToken,
    ) -> Result<DownloadSummary, ArtifactStoreError>;
}
