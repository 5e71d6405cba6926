//! Pipeline artifact domain types.
//!
//! Pure data types with no I/O dependencies.
//!
//! - `build` - identifiers (`BuildId`, `ProjectRef`) and build-level values
//! - `request` - the validated `DownloadRequest` and its resolution strategy

pub mod build;
pub mod request;

pub use build::{BuildId, BuildSummary, ProjectRef, ResolvedBuild};
pub use request::{BuildMode, BuildSource, DownloadRequest, HostType, VersionStrategy};
