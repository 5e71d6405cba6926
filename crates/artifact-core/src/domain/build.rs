//! Build-level identifiers and values.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Numeric identifier of a pipeline run.
///
/// Build ids handed out by the pipeline service start at 1, so zero is
/// never a valid id and cannot be constructed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct BuildId(u32);

impl BuildId {
    /// Create a build id, rejecting zero.
    #[must_use]
    pub const fn new(id: u32) -> Option<Self> {
        if id == 0 { None } else { Some(Self(id)) }
    }

    /// Parse a build id from its decimal string form.
    ///
    /// Surrounding whitespace is ignored. Returns `None` for empty,
    /// non-numeric, negative or zero values.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        raw.trim().parse::<u32>().ok().and_then(Self::new)
    }

    /// The raw numeric value.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for BuildId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u32> for BuildId {
    type Error = String;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| "build id must be non-zero".to_string())
    }
}

impl From<BuildId> for u32 {
    fn from(id: BuildId) -> Self {
        id.0
    }
}

/// Reference to a project, either by id or by name.
///
/// Project inputs accept both forms; anything that parses as a GUID is
/// treated as an id.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ProjectRef {
    /// Project identified by its GUID.
    Id(Uuid),
    /// Project identified by its name.
    Name(String),
}

impl ProjectRef {
    /// Classify a raw project input as an id or a name.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        Uuid::parse_str(trimmed).map_or_else(|_| Self::Name(trimmed.to_string()), Self::Id)
    }

    /// The project id, if this reference carries one.
    #[must_use]
    pub const fn id(&self) -> Option<Uuid> {
        match self {
            Self::Id(id) => Some(*id),
            Self::Name(_) => None,
        }
    }
}

impl fmt::Display for ProjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Name(name) => f.write_str(name),
        }
    }
}

impl From<Uuid> for ProjectRef {
    fn from(id: Uuid) -> Self {
        Self::Id(id)
    }
}

/// One entry of a build listing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildSummary {
    /// The build id.
    pub id: BuildId,
    /// When the build finished; `None` for builds still running.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_time: Option<DateTime<Utc>>,
}

impl BuildSummary {
    /// Create a summary for a finished build.
    #[must_use]
    pub const fn finished(id: BuildId, finish_time: DateTime<Utc>) -> Self {
        Self {
            id,
            finish_time: Some(finish_time),
        }
    }
}

/// The single build an invocation downloads from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedBuild {
    /// Project that owns the build.
    pub project: ProjectRef,
    /// The build to download from.
    pub build_id: BuildId,
}

impl ResolvedBuild {
    /// Create a resolved build.
    pub fn new(project: impl Into<ProjectRef>, build_id: BuildId) -> Self {
        Self {
            project: project.into(),
            build_id,
        }
    }
}

impl fmt::Display for ResolvedBuild {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "build {} in project {}", self.build_id, self.project)
    }
}
