//! Pipelines REST client implementing the build query port.
//!
//! Lists builds through `{collection}/{project}/_apis/build/builds`. Only
//! `BuildsClient` and its configuration are public; consumers use the client
//! through `artifact_core::BuildQueryPort`.
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]
// DefaultBuildsClient is meant to be used through the BuildQueryPort trait,
// not its internal generic structure
#![allow(private_interfaces)]

mod client;
mod config;
mod error;
mod http;
mod models;
mod port;
mod url;

// ============================================================================
// Public API
// ============================================================================

// Client
pub use client::DefaultBuildsClient;

// Configuration
pub use config::BuildsClientConfig;

// Silence unused dev-dependency warnings
#[cfg(test)]
use tokio_test as _;
