//! File-share artifact store.
//!
//! Serves artifacts published to a shared directory laid out as
//! `<root>/<project>/<build id>/<artifact name>/...`. Files matching the
//! request's patterns are copied into the destination, keeping their
//! relative layout.

mod filter;

pub use filter::PatternFilter;

use std::path::{Component, Path, PathBuf};

use artifact_core::{ArtifactDownload, ArtifactDownloadPort, ArtifactStoreError, DownloadSummary};
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Artifact port implementation backed by a file share.
#[derive(Debug, Clone)]
pub struct FileShareArtifactStore {
    root: PathBuf,
}

/// A file inside an artifact.
#[derive(Debug)]
struct ArtifactFile {
    source: PathBuf,
    relative: String,
}

impl FileShareArtifactStore {
    /// Create a store rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory holding the artifact named by `request`.
    ///
    /// Project and artifact name must each be one plain path segment, so the
    /// result always stays under the share root.
    pub fn artifact_dir(
        &self,
        request: &ArtifactDownload,
    ) -> Result<PathBuf, ArtifactStoreError> {
        let project = request.project.to_string();
        let project = single_segment("project", &project)?;
        let artifact = single_segment("artifact name", &request.artifact_name)?;
        Ok(self
            .root
            .join(project)
            .join(request.build_id.to_string())
            .join(artifact))
    }
}

fn single_segment<'a>(field: &str, value: &'a str) -> Result<&'a Path, ArtifactStoreError> {
    let path = Path::new(value);
    let mut components = path.components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(path),
        _ => Err(ArtifactStoreError::InvalidPathSegment {
            field: field.to_string(),
            value: value.to_string(),
        }),
    }
}

#[async_trait]
impl ArtifactDownloadPort for FileShareArtifactStore {
    async fn download(
        &self,
        request: &ArtifactDownload,
        cancel: &CancellationToken,
    ) -> Result<DownloadSummary, ArtifactStoreError> {
        let source_dir = self.artifact_dir(request)?;
        if !tokio::fs::metadata(&source_dir)
            .await
            .is_ok_and(|meta| meta.is_dir())
        {
            return Err(ArtifactStoreError::ArtifactNotFound {
                artifact_name: request.artifact_name.clone(),
                build_id: request.build_id,
            });
        }

        let filter = PatternFilter::new(&request.file_patterns)?;
        let files = list_files(source_dir.clone()).await?;
        debug!(
            source = %source_dir.display(),
            total = files.len(),
            "Listed artifact files"
        );

        let mut summary = DownloadSummary::default();
        for file in files.iter().filter(|file| filter.is_match(&file.relative)) {
            if cancel.is_cancelled() {
                return Err(ArtifactStoreError::Cancelled);
            }

            let target = request.destination.join(&file.relative);
            if let Some(parent) = target.parent() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| ArtifactStoreError::from_io_error(&e))?;
            }
            let bytes = tokio::fs::copy(&file.source, &target)
                .await
                .map_err(|e| ArtifactStoreError::from_io_error(&e))?;

            summary.files_downloaded += 1;
            summary.bytes_downloaded += bytes;
        }

        info!(
            artifact = %request.artifact_name,
            build_id = %request.build_id,
            files = summary.files_downloaded,
            bytes = summary.bytes_downloaded,
            "Copied artifact from file share"
        );
        Ok(summary)
    }
}

/// Walk the artifact directory on the blocking pool.
async fn list_files(root: PathBuf) -> Result<Vec<ArtifactFile>, ArtifactStoreError> {
    tokio::task::spawn_blocking(move || walk(&root))
        .await
        .map_err(|e| ArtifactStoreError::Transfer {
            message: format!("file listing task failed: {e}"),
        })?
}

fn walk(root: &Path) -> Result<Vec<ArtifactFile>, ArtifactStoreError> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root).follow_links(true).sort_by_file_name() {
        let entry = entry.map_err(|e| ArtifactStoreError::Io {
            kind: e
                .io_error()
                .map_or_else(|| "Other".to_string(), |io| format!("{:?}", io.kind())),
            message: e.to_string(),
        })?;
        if !entry.file_type().is_file() {
            if !entry.file_type().is_dir() {
                warn!(path = %entry.path().display(), "Skipping entry that is not a regular file");
            }
            continue;
        }

        let source = entry.into_path();
        let Ok(relative) = source.strip_prefix(root) else {
            continue;
        };
        let relative = to_slash_path(relative);
        files.push(ArtifactFile { source, relative });
    }
    Ok(files)
}

fn to_slash_path(path: &Path) -> String {
    path.components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::build;
    use artifact_core::ProjectRef;
    use tempfile::TempDir;

    fn seed(root: &Path, files: &[(&str, &str)]) {
        let artifact = root.join("Fabrikam").join("42").join("drop");
        for (relative, content) in files {
            let path = artifact.join(relative);
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(path, content).unwrap();
        }
    }

    fn request(destination: &Path, patterns: &[&str]) -> ArtifactDownload {
        ArtifactDownload {
            project: ProjectRef::Name("Fabrikam".to_string()),
            build_id: build(42),
            artifact_name: "drop".to_string(),
            destination: destination.to_path_buf(),
            file_patterns: patterns.iter().map(|p| (*p).to_string()).collect(),
        }
    }

    #[tokio::test]
    async fn copies_all_files_without_patterns() {
        let share = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        seed(share.path(), &[("a.txt", "hello"), ("bin/app.dll", "0123456789")]);

        let store = FileShareArtifactStore::new(share.path());
        let summary = store
            .download(&request(out.path(), &[]), &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(summary.files_downloaded, 2);
        assert_eq!(summary.bytes_downloaded, 15);
        assert_eq!(std::fs::read_to_string(out.path().join("a.txt")).unwrap(), "hello");
        assert!(out.path().join("bin/app.dll").is_file());
    }

    #[tokio::test]
    async fn applies_patterns_to_relative_paths() {
        let share = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        seed(
            share.path(),
            &[
                ("bin/app.dll", "x"),
                ("bin/app.pdb", "x"),
                ("readme.md", "x"),
            ],
        );

        let store = FileShareArtifactStore::new(share.path());
        let summary = store
            .download(
                &request(out.path(), &["**/*.dll", "**/*.pdb", "!bin/*.pdb"]),
                &CancellationToken::new(),
            )
            .await
            .unwrap();

        assert_eq!(summary.files_downloaded, 1);
        assert!(out.path().join("bin/app.dll").is_file());
        assert!(!out.path().join("bin/app.pdb").exists());
        assert!(!out.path().join("readme.md").exists());
    }

    #[tokio::test]
    async fn missing_artifact_is_reported() {
        let share = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();

        let store = FileShareArtifactStore::new(share.path());
        let err = store
            .download(&request(out.path(), &[]), &CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ArtifactStoreError::ArtifactNotFound { ref artifact_name, .. } if artifact_name == "drop"
        ));
    }

    #[tokio::test]
    async fn cancelled_token_stops_copying() {
        let share = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        seed(share.path(), &[("a.txt", "x")]);

        let token = CancellationToken::new();
        token.cancel();

        let store = FileShareArtifactStore::new(share.path());
        let err = store
            .download(&request(out.path(), &[]), &token)
            .await
            .unwrap_err();

        assert!(matches!(err, ArtifactStoreError::Cancelled));
        assert!(!out.path().join("a.txt").exists());
    }

    #[tokio::test]
    async fn artifact_name_cannot_leave_the_share() {
        let tmp = TempDir::new().unwrap();
        let share = tmp.path().join("share");
        let secret = tmp.path().join("secret");
        std::fs::create_dir_all(share.join("Fabrikam").join("42")).unwrap();
        std::fs::create_dir_all(&secret).unwrap();
        std::fs::write(secret.join("id_rsa"), "PRIVATE").unwrap();
        let out = TempDir::new().unwrap();

        let store = FileShareArtifactStore::new(&share);
        let mut escaping = request(out.path(), &[]);
        escaping.artifact_name = "../../../secret".to_string();
        let err = store
            .download(&escaping, &CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ArtifactStoreError::InvalidPathSegment { ref field, .. } if field == "artifact name"
        ));
        assert!(!out.path().join("id_rsa").exists());
    }

    #[test]
    fn artifact_dir_rejects_unsafe_segments() {
        let store = FileShareArtifactStore::new("/share");
        for name in ["..", "a/../b", "/etc", "", "nested/drop"] {
            let mut req = request(Path::new("/out"), &[]);
            req.artifact_name = name.to_string();
            assert!(store.artifact_dir(&req).is_err(), "accepted {name:?}");
        }

        let mut req = request(Path::new("/out"), &[]);
        req.project = ProjectRef::Name("..".to_string());
        assert!(matches!(
            store.artifact_dir(&req),
            Err(ArtifactStoreError::InvalidPathSegment { ref field, .. }) if field == "project"
        ));

        let req = request(Path::new("/out"), &[]);
        assert_eq!(
            store.artifact_dir(&req).unwrap(),
            Path::new("/share/Fabrikam/42/drop")
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn symlinked_files_are_copied() {
        let share = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        seed(share.path(), &[("real.txt", "linked")]);
        let artifact = share.path().join("Fabrikam").join("42").join("drop");
        std::os::unix::fs::symlink(artifact.join("real.txt"), artifact.join("alias.txt")).unwrap();

        let store = FileShareArtifactStore::new(share.path());
        let summary = store
            .download(&request(out.path(), &[]), &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(summary.files_downloaded, 2);
        assert_eq!(
            std::fs::read_to_string(out.path().join("alias.txt")).unwrap(),
            "linked"
        );
    }

    #[test]
    fn relative_paths_use_forward_slashes() {
        assert_eq!(to_slash_path(Path::new("bin/x64/app.dll")), "bin/x64/app.dll");
    }
}
