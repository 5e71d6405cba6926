//! Command-line runner for the pipeline artifact download task.
//!
//! `main.rs` is the composition root: it parses flags, installs logging and
//! hands a [`Cli`] to [`handler::execute`]. Everything else lives here so it
//! can be tested without spawning a process.
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Used by main.rs only
use dotenvy as _;
use tokio as _;
use tracing_subscriber as _;

// Silence unused dev-dependency warnings
#[cfg(test)]
use tempfile as _;
#[cfg(test)]
use tokio_test as _;

pub mod bootstrap;
pub mod context;
pub mod error;
pub mod handler;
pub mod parser;

pub use bootstrap::{CliConfig, bootstrap};
pub use context::EnvTaskContext;
pub use error::CliError;
pub use parser::Cli;
