//! Core domain types and port definitions for pipeline artifact downloads.
//!
//! This crate has no I/O of its own. It defines:
//!
//! - `domain` - build identifiers, project references and the typed download request
//! - `errors` - the single error type surfaced by a task invocation
//! - `names` - task input names and ambient variable names
//! - `ports` - collaborator contracts (task context, build query, artifact download)
#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod errors;
pub mod names;
pub mod ports;

// Re-export commonly used types for convenience
pub use domain::{
    BuildId, BuildMode, BuildSource, BuildSummary, DownloadRequest, HostType, ProjectRef,
    ResolvedBuild, VersionStrategy,
};
pub use errors::{ArtifactError, ArtifactResult};
pub use ports::{
    ArtifactDownload, ArtifactDownloadPort, ArtifactStoreError, BuildQuery, BuildQueryError,
    BuildQueryOrder, BuildQueryPort, DownloadSummary, MemoryTaskContext, TaskContext,
};

// Silence unused dev-dependency warnings for the lib test target
#[cfg(test)]
use serde_json as _;
