//! The validated download request.
//!
//! A `DownloadRequest` is produced once per invocation by input validation
//! and never mutated afterwards. The resolution strategy is carried as a
//! closed enum, so each variant holds exactly the fields it needs.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use uuid::Uuid;

use super::build::{BuildId, ProjectRef};

/// Whether the artifact comes from the running build or another one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
    /// The build currently executing the pipeline.
    Current,
    /// An externally specified build.
    Specific,
}

impl BuildMode {
    /// Parse the `buildType` input value (case-insensitive).
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "current" => Some(Self::Current),
            "specific" => Some(Self::Specific),
            _ => None,
        }
    }
}

/// Which version of a specific pipeline to download from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VersionStrategy {
    /// An explicit build id.
    Specific,
    /// The most recently finished build of the pipeline.
    Latest,
    /// The most recently finished build of the pipeline on one branch.
    LatestFromBranch,
}

impl VersionStrategy {
    /// Parse the `buildVersionToDownload` input value (case-insensitive).
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "specific" => Some(Self::Specific),
            "latest" => Some(Self::Latest),
            "latestfrombranch" => Some(Self::LatestFromBranch),
            _ => None,
        }
    }
}

/// Kind of environment executing the step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HostType {
    /// A build pipeline.
    Build,
    /// A classic release pipeline.
    Release,
    /// A deployment group job.
    DeploymentGroup,
}

impl HostType {
    /// Parse the `system.hostType` variable (case-insensitive).
    ///
    /// Returns `None` for any value outside the three known host types.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "build" => Some(Self::Build),
            "release" => Some(Self::Release),
            "deployment" | "deploymentgroup" => Some(Self::DeploymentGroup),
            _ => None,
        }
    }
}

impl fmt::Display for HostType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Build => "build",
            Self::Release => "release",
            Self::DeploymentGroup => "deployment group",
        };
        f.write_str(name)
    }
}

/// Where the build to download from comes from.
///
/// Exactly one variant is active per request; the variant determines which
/// fields exist.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "camelCase")]
pub enum BuildSource {
    /// The build executing this step.
    Current {
        /// Ambient id of the running build.
        build_id: BuildId,
        /// Ambient id of the running build's project.
        project_id: Uuid,
    },
    /// A build named by id.
    Explicit {
        /// Project owning the build.
        project: ProjectRef,
        /// The requested build.
        build_id: BuildId,
    },
    /// The latest finished build of a pipeline definition.
    Latest {
        /// Project owning the definition.
        project: ProjectRef,
        /// Pipeline definition to query.
        definition_id: u32,
        /// Build tags the result must carry.
        tag_filters: Vec<String>,
    },
    /// The latest finished build of a pipeline definition on a branch.
    LatestFromBranch {
        /// Project owning the definition.
        project: ProjectRef,
        /// Pipeline definition to query.
        definition_id: u32,
        /// Branch the build must have run on.
        branch_name: String,
        /// Build tags the result must carry.
        tag_filters: Vec<String>,
    },
}

impl BuildSource {
    /// The `buildType` view of this source.
    #[must_use]
    pub const fn mode(&self) -> BuildMode {
        match self {
            Self::Current { .. } => BuildMode::Current,
            _ => BuildMode::Specific,
        }
    }

    /// The `buildVersionToDownload` view of this source (`None` for the current build).
    #[must_use]
    pub const fn version_strategy(&self) -> Option<VersionStrategy> {
        match self {
            Self::Current { .. } => None,
            Self::Explicit { .. } => Some(VersionStrategy::Specific),
            Self::Latest { .. } => Some(VersionStrategy::Latest),
            Self::LatestFromBranch { .. } => Some(VersionStrategy::LatestFromBranch),
        }
    }
}

/// A validated, immutable request to download one artifact.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadRequest {
    /// How the source build is chosen.
    pub source: BuildSource,
    /// Name of the artifact within the build.
    pub artifact_name: String,
    /// Glob patterns selecting files; empty means all files.
    pub file_patterns: Vec<String>,
    /// Where the files land. Need not exist yet.
    pub destination_path: PathBuf,
}

impl DownloadRequest {
    /// Create a request downloading every file of the artifact.
    pub fn new(
        source: BuildSource,
        artifact_name: impl Into<String>,
        destination_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            source,
            artifact_name: artifact_name.into(),
            file_patterns: Vec::new(),
            destination_path: destination_path.into(),
        }
    }

    /// Set the file patterns.
    #[must_use]
    pub fn with_file_patterns(mut self, patterns: Vec<String>) -> Self {
        self.file_patterns = patterns;
        self
    }

    /// Current or specific build.
    #[must_use]
    pub const fn mode(&self) -> BuildMode {
        self.source.mode()
    }

    /// Version strategy for specific builds.
    #[must_use]
    pub const fn version_strategy(&self) -> Option<VersionStrategy> {
        self.source.version_strategy()
    }
}
