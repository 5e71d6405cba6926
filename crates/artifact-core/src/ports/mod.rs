//! Port definitions (trait abstractions) for the task's collaborators.
//!
//! Ports define the interfaces the download core expects from the agent
//! and from backing services. They use only domain types.
//!
//! # Design Rules
//!
//! - No HTTP, JSON or filesystem walking details in any signature
//! - Each port has its own error type; adapters map into it at the boundary
//! - Cancellation is passed explicitly to the one long-running call

pub mod artifact_download;
pub mod build_query;
pub mod task_context;

pub use artifact_download::{
    ArtifactDownload, ArtifactDownloadPort, ArtifactStoreError, DownloadSummary,
};
pub use build_query::{BuildQuery, BuildQueryError, BuildQueryOrder, BuildQueryPort};
pub use task_context::{MemoryTaskContext, TaskContext};
