//! Build resolution and download orchestration for pipeline artifacts.
//!
//! A task invocation runs three stages strictly in order:
//!
//! - `validator` - raw named inputs and ambient variables become a `DownloadRequest`
//! - `resolver` - the request becomes exactly one `ResolvedBuild`
//! - `orchestrator` - the destination is prepared and the artifact port is driven
//!
//! `DownloadPipelineArtifactTask` wires the three together. `FileShareArtifactStore`
//! is an artifact port implementation for artifacts published to a file share.
#![deny(unused_crate_dependencies)]

// Re-export core types for convenience
pub use artifact_core::{
    ArtifactDownload, ArtifactDownloadPort, ArtifactError, ArtifactResult, ArtifactStoreError,
    BuildQuery, BuildQueryPort, DownloadRequest, DownloadSummary, ResolvedBuild, TaskContext,
};

mod fileshare;
mod orchestrator;
mod resolver;
mod task;
mod validator;

#[cfg(test)]
pub(crate) mod testing;

pub use fileshare::{FileShareArtifactStore, PatternFilter};
pub use orchestrator::{CompletedDownload, DownloadDestination, DownloadOrchestrator};
pub use resolver::{BuildResolver, select_latest};
pub use task::{DownloadPipelineArtifactTask, TASK_STAGE, TASK_VERSION, TaskDeps, TaskOutcome};
pub use validator::{parse_item_patterns, parse_tag_filters, validate};

// Silence unused dev-dependency warnings for the lib test target
#[cfg(test)]
use chrono as _;
#[cfg(test)]
use tempfile as _;
