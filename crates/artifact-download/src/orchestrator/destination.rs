//! Destination directory planning for downloads.

use std::path::{Path, PathBuf};

use artifact_core::{ArtifactError, ArtifactResult};

/// A planned download destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadDestination {
    path: PathBuf,
}

impl DownloadDestination {
    /// Plan a destination, resolving relative paths against the working directory.
    pub fn plan(path: &Path) -> ArtifactResult<Self> {
        std::path::absolute(path)
            .map(|path| Self { path })
            .map_err(|e| ArtifactError::destination_unavailable(path, e.to_string()))
    }

    /// Ensure the directory exists, creating it and any parents if necessary.
    pub async fn ensure_dir(&self) -> ArtifactResult<()> {
        if tokio::fs::metadata(&self.path)
            .await
            .is_ok_and(|meta| meta.is_dir())
        {
            return Ok(());
        }

        tokio::fs::create_dir_all(&self.path)
            .await
            .map_err(|e| ArtifactError::destination_unavailable(&self.path, e.to_string()))
    }

    /// The absolute destination path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Consume the destination, returning its path.
    pub fn into_path(self) -> PathBuf {
        self.path
    }
}
