//! CLI bootstrap - the composition root.
//!
//! The only place concrete adapters are created:
//! - Build query port (via artifact-rest)
//! - Artifact download port (file share store via artifact-download)

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use artifact_core::{BuildQuery, BuildQueryError, BuildQueryPort, BuildSummary};
use artifact_download::{FileShareArtifactStore, TASK_VERSION, TaskDeps};
use artifact_rest::{BuildsClientConfig, DefaultBuildsClient};
use async_trait::async_trait;
use tracing::debug;

use crate::error::CliError;
use crate::parser::Cli;

/// Adapter settings taken from the command line.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Collection URL for build queries.
    pub collection_url: Option<String>,
    /// Bearer token for build queries.
    pub access_token: Option<String>,
    /// Root of the artifact file share.
    pub fileshare_root: Option<PathBuf>,
    /// Build query timeout; client default when unset.
    pub timeout: Option<Duration>,
    /// Build query retries; client default when unset.
    pub max_retries: Option<u8>,
    /// First retry delay; client default when unset.
    pub retry_delay: Option<Duration>,
    /// REST API version; client default when unset.
    pub api_version: Option<String>,
}

impl CliConfig {
    /// Take the adapter settings from parsed flags. Blank values count as unset.
    pub fn from_cli(cli: &Cli) -> Self {
        let non_blank = |value: &Option<String>| {
            value.clone().filter(|v| !v.trim().is_empty())
        };
        Self {
            collection_url: non_blank(&cli.collection_url),
            access_token: non_blank(&cli.access_token),
            fileshare_root: cli
                .fileshare_root
                .clone()
                .filter(|p| !p.as_os_str().is_empty()),
            timeout: cli.timeout_secs.map(Duration::from_secs),
            max_retries: cli.max_retries,
            retry_delay: cli.retry_delay_ms.map(Duration::from_millis),
            api_version: non_blank(&cli.api_version),
        }
    }

    /// Builds client settings for `collection_url`, applying any overrides.
    fn client_config(&self, collection_url: &str) -> BuildsClientConfig {
        let mut client = BuildsClientConfig::new(collection_url)
            .with_optional_token(self.access_token.clone())
            .with_user_agent(format!("download-pipeline-artifact/{TASK_VERSION}"));
        if let Some(timeout) = self.timeout {
            client = client.with_timeout(timeout);
        }
        if let Some(retries) = self.max_retries {
            client = client.with_max_retries(retries);
        }
        if let Some(delay) = self.retry_delay {
            client = client.with_retry_delay(delay);
        }
        if let Some(version) = &self.api_version {
            client = client.with_api_version(version.clone());
        }
        client
    }
}

/// Build query port used when no collection URL was given.
///
/// Current and explicit builds never query, so they still work; a latest
/// build request fails with a configuration error.
struct UnconfiguredBuildQuery;

#[async_trait]
impl BuildQueryPort for UnconfiguredBuildQuery {
    async fn list_builds(&self, _query: &BuildQuery) -> Result<Vec<BuildSummary>, BuildQueryError> {
        Err(BuildQueryError::Configuration {
            message: "no collection URL; pass --collection-url or set SYSTEM_COLLECTIONURI"
                .to_string(),
        })
    }
}

/// Wire the adapters for one task run.
pub fn bootstrap(config: &CliConfig) -> Result<TaskDeps, CliError> {
    let fileshare_root = config.fileshare_root.clone().ok_or_else(|| {
        CliError::Config(
            "no artifact file share; pass --fileshare-root or set PIPELINE_ARTIFACT_FILESHARE_ROOT"
                .to_string(),
        )
    })?;

    let build_query: Arc<dyn BuildQueryPort> = match &config.collection_url {
        Some(url) => {
            debug!(collection_url = %url, "Using builds REST client");
            let client_config = config.client_config(url);
            debug!(?client_config, "Builds client settings");
            let client = DefaultBuildsClient::new(&client_config)
                .map_err(|e| CliError::Config(e.to_string()))?;
            Arc::new(client)
        }
        None => {
            debug!("No collection URL configured; build queries are disabled");
            Arc::new(UnconfiguredBuildQuery)
        }
    };

    debug!(root = %fileshare_root.display(), "Using artifact file share");
    Ok(TaskDeps {
        build_query,
        artifacts: Arc::new(FileShareArtifactStore::new(fileshare_root)),
    })
}
