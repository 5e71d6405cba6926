//! Build query port.
//!
//! Lists builds of a pipeline definition. The implementation lives in
//! `artifact-rest`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{BuildSummary, ProjectRef};

/// Ordering requested from the build listing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuildQueryOrder {
    /// Most recently finished first.
    #[default]
    FinishTimeDescending,
}

/// Filters for a build listing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildQuery {
    /// Project owning the definitions.
    pub project: ProjectRef,
    /// Pipeline definitions to include.
    pub definition_ids: Vec<u32>,
    /// Branch filter, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_name: Option<String>,
    /// Tags every returned build must carry.
    ///
    /// Passed through exactly as validated, which may include empty entries.
    pub tag_filters: Vec<String>,
    /// Result ordering.
    pub order: BuildQueryOrder,
}

impl BuildQuery {
    /// Query the builds of one definition, most recently finished first.
    pub fn for_definition(project: ProjectRef, definition_id: u32) -> Self {
        Self {
            project,
            definition_ids: vec![definition_id],
            branch_name: None,
            tag_filters: Vec::new(),
            order: BuildQueryOrder::FinishTimeDescending,
        }
    }

    /// Restrict to one branch.
    #[must_use]
    pub fn with_branch(mut self, branch_name: impl Into<String>) -> Self {
        self.branch_name = Some(branch_name.into());
        self
    }

    /// Restrict to builds carrying the given tags.
    #[must_use]
    pub fn with_tags(mut self, tag_filters: Vec<String>) -> Self {
        self.tag_filters = tag_filters;
        self
    }

    /// Tag filters with blank entries removed, as a service expects them.
    pub fn effective_tags(&self) -> impl Iterator<Item = &str> {
        self.tag_filters
            .iter()
            .map(|tag| tag.trim())
            .filter(|tag| !tag.is_empty())
    }
}

/// Errors from build query operations.
#[derive(Debug, Error)]
pub enum BuildQueryError {
    /// The project does not exist or is not visible.
    #[error("Project not found: {project}")]
    ProjectNotFound {
        /// The project that was queried
        project: String,
    },

    /// The caller is not allowed to list builds.
    #[error("Not authorized to list builds in project '{project}'")]
    Unauthorized {
        /// The project that was queried
        project: String,
    },

    /// Network or connectivity error.
    #[error("Network error: {message}")]
    Network {
        /// Description of the network error
        message: String,
    },

    /// Invalid response from the service.
    #[error("Invalid response: {message}")]
    InvalidResponse {
        /// What was invalid
        message: String,
    },

    /// Configuration error.
    #[error("Configuration error: {message}")]
    Configuration {
        /// What's wrong with the configuration
        message: String,
    },
}

/// Port trait for listing builds.
#[async_trait]
pub trait BuildQueryPort: Send + Sync {
    /// List builds matching the query in the requested order.
    async fn list_builds(&self, query: &BuildQuery) -> Result<Vec<BuildSummary>, BuildQueryError>;
}
