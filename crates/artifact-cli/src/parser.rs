//! Command-line flags.

use std::path::PathBuf;

use clap::Parser;

/// Download a pipeline artifact from the current, a specific or the latest build.
///
/// Task inputs and agent variables are normally read from the environment
/// (`INPUT_<NAME>` and upper-cased variable names); `--input` and
/// `--variable` override them.
#[derive(Debug, Parser)]
#[command(name = "download-pipeline-artifact")]
#[command(version = artifact_download::TASK_VERSION)]
pub struct Cli {
    /// Collection URL used to query builds
    #[arg(long = "collection-url", env = "SYSTEM_COLLECTIONURI")]
    pub collection_url: Option<String>,

    /// Bearer token for the builds API
    #[arg(long = "access-token", env = "SYSTEM_ACCESSTOKEN", hide_env_values = true)]
    pub access_token: Option<String>,

    /// Root of the artifact file share
    #[arg(long = "fileshare-root", env = "PIPELINE_ARTIFACT_FILESHARE_ROOT")]
    pub fileshare_root: Option<PathBuf>,

    /// Per-request timeout for build queries, in seconds
    #[arg(long = "timeout-secs", env = "PIPELINE_ARTIFACT_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    /// Retries after a server or network error when querying builds
    #[arg(long = "max-retries", env = "PIPELINE_ARTIFACT_MAX_RETRIES")]
    pub max_retries: Option<u8>,

    /// Delay before the first retry, in milliseconds (doubles per retry)
    #[arg(long = "retry-delay-ms", env = "PIPELINE_ARTIFACT_RETRY_DELAY_MS")]
    pub retry_delay_ms: Option<u64>,

    /// REST API version for build queries
    #[arg(long = "api-version", env = "PIPELINE_ARTIFACT_API_VERSION")]
    pub api_version: Option<String>,

    /// Task input, e.g. `--input artifactName=drop` (repeatable)
    #[arg(long = "input", value_name = "NAME=VALUE", value_parser = parse_key_value)]
    pub inputs: Vec<(String, String)>,

    /// Agent variable, e.g. `--variable build.buildId=42` (repeatable)
    #[arg(long = "variable", value_name = "NAME=VALUE", value_parser = parse_key_value)]
    pub variables: Vec<(String, String)>,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

/// Parse `name=value`. The value may be empty or contain further `=`.
fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{raw}'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing name in '{raw}'"));
    }
    Ok((name.to_string(), value.to_string()))
}
