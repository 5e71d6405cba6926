//! Input validation.
//!
//! Turns the task's raw named inputs and the agent's ambient variables into
//! a typed `DownloadRequest`. This is the only place that reads raw input
//! strings; everything downstream works on the typed request.

use artifact_core::names::{inputs, variables};
use artifact_core::{
    ArtifactError, ArtifactResult, BuildId, BuildMode, BuildSource, DownloadRequest, HostType,
    ProjectRef, TaskContext, VersionStrategy,
};
use std::path::PathBuf;
use tracing::debug;
use uuid::Uuid;

/// Validate the context's inputs into a download request.
pub fn validate(ctx: &dyn TaskContext) -> ArtifactResult<DownloadRequest> {
    let build_type = ctx.required_input(inputs::BUILD_TYPE)?;
    let mode = BuildMode::parse(&build_type)
        .ok_or_else(|| ArtifactError::invalid_input(inputs::BUILD_TYPE, &build_type))?;

    let artifact_name = ctx.required_input(inputs::ARTIFACT_NAME)?;
    let destination_path = PathBuf::from(ctx.required_input(inputs::DOWNLOAD_PATH)?);
    let file_patterns = parse_item_patterns(&ctx.input(inputs::ITEM_PATTERN).unwrap_or_default());

    let source = match mode {
        BuildMode::Current => current_source(ctx)?,
        BuildMode::Specific => specific_source(ctx)?,
    };

    debug!(
        ?source,
        artifact = %artifact_name,
        patterns = file_patterns.len(),
        "Validated download request"
    );

    Ok(DownloadRequest {
        source,
        artifact_name,
        file_patterns,
        destination_path,
    })
}

/// Split a multi-line pattern string into patterns.
///
/// Lines are trimmed and blank lines dropped, so an empty string yields no
/// patterns, which means no filtering.
pub fn parse_item_patterns(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

/// Split a comma-separated tag string.
///
/// The split is lossless: an empty string yields one empty entry.
pub fn parse_tag_filters(raw: &str) -> Vec<String> {
    raw.split(',').map(String::from).collect()
}

fn current_source(ctx: &dyn TaskContext) -> ArtifactResult<BuildSource> {
    let raw_build_id = ctx.variable(variables::BUILD_ID);
    let Some(build_id) = raw_build_id.as_deref().and_then(BuildId::parse) else {
        return Err(current_build_unavailable(ctx, raw_build_id));
    };

    let project_id = current_project_id(ctx)?;
    Ok(BuildSource::Current {
        build_id,
        project_id,
    })
}

/// Explain why there is no current build id, based on the host type.
fn current_build_unavailable(ctx: &dyn TaskContext, raw_build_id: Option<String>) -> ArtifactError {
    let raw_host = ctx.variable(variables::HOST_TYPE).unwrap_or_default();
    match HostType::parse(&raw_host) {
        Some(host @ (HostType::Release | HostType::DeploymentGroup)) => {
            ArtifactError::BuildIdUnavailableForHost {
                host: host.to_string(),
            }
        }
        Some(HostType::Build) => {
            ArtifactError::invalid_build_id(variables::BUILD_ID, raw_build_id.unwrap_or_default())
        }
        None => ArtifactError::UnsupportedHostEnvironment { host: raw_host },
    }
}

fn current_project_id(ctx: &dyn TaskContext) -> ArtifactResult<Uuid> {
    let raw = ctx
        .variable(variables::TEAM_PROJECT_ID)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| ArtifactError::MissingProjectContext {
            variable: variables::TEAM_PROJECT_ID.to_string(),
        })?;

    Uuid::parse_str(&raw).map_err(|_| ArtifactError::InvalidProjectContext {
        variable: variables::TEAM_PROJECT_ID.to_string(),
        value: raw,
    })
}

fn specific_source(ctx: &dyn TaskContext) -> ArtifactResult<BuildSource> {
    let project = ProjectRef::parse(&ctx.required_input(inputs::PROJECT)?);

    if let Some(source) = triggering_source(ctx, &project)? {
        return Ok(source);
    }

    let raw_strategy = ctx.required_input(inputs::BUILD_VERSION_TO_DOWNLOAD)?;
    let strategy = VersionStrategy::parse(&raw_strategy).ok_or_else(|| {
        ArtifactError::invalid_input(inputs::BUILD_VERSION_TO_DOWNLOAD, &raw_strategy)
    })?;

    let source = match strategy {
        VersionStrategy::Specific => {
            let raw = ctx.required_input(inputs::BUILD_ID)?;
            let build_id = BuildId::parse(&raw)
                .ok_or_else(|| ArtifactError::invalid_build_id(inputs::BUILD_ID, &raw))?;
            BuildSource::Explicit { project, build_id }
        }
        VersionStrategy::Latest => BuildSource::Latest {
            project,
            definition_id: required_definition(ctx)?,
            tag_filters: tag_filters(ctx),
        },
        VersionStrategy::LatestFromBranch => BuildSource::LatestFromBranch {
            project,
            definition_id: required_definition(ctx)?,
            branch_name: ctx.required_input(inputs::BRANCH_NAME)?,
            tag_filters: tag_filters(ctx),
        },
    };
    Ok(source)
}

/// Use the build that triggered this run, when asked to and when it belongs
/// to the requested definition.
fn triggering_source(
    ctx: &dyn TaskContext,
    project: &ProjectRef,
) -> ArtifactResult<Option<BuildSource>> {
    let enabled = ctx
        .input(inputs::SPECIFIC_BUILD_WITH_TRIGGERING)
        .is_some_and(|value| value.trim().eq_ignore_ascii_case("true"));
    if !enabled {
        return Ok(None);
    }

    let Some(definition_id) = optional_definition(ctx)? else {
        return Ok(None);
    };

    let triggered_definition = ctx
        .variable(variables::TRIGGERED_BY_DEFINITION_ID)
        .and_then(|value| value.trim().parse::<u32>().ok());
    if triggered_definition != Some(definition_id) {
        debug!(
            definition_id,
            ?triggered_definition,
            "Triggering build belongs to another definition"
        );
        return Ok(None);
    }

    let Some(build_id) = ctx
        .variable(variables::TRIGGERED_BY_BUILD_ID)
        .as_deref()
        .and_then(BuildId::parse)
    else {
        return Ok(None);
    };

    let project = ctx
        .variable(variables::TRIGGERED_BY_PROJECT_ID)
        .filter(|value| !value.trim().is_empty())
        .map_or_else(|| project.clone(), |value| ProjectRef::parse(&value));

    debug!(%build_id, %project, "Using triggering build");
    Ok(Some(BuildSource::Explicit { project, build_id }))
}

fn required_definition(ctx: &dyn TaskContext) -> ArtifactResult<u32> {
    optional_definition(ctx)?.ok_or_else(|| ArtifactError::missing_input(inputs::DEFINITION))
}

fn optional_definition(ctx: &dyn TaskContext) -> ArtifactResult<Option<u32>> {
    ctx.input(inputs::DEFINITION)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .map(|raw| {
            raw.parse::<u32>()
                .map_err(|_| ArtifactError::invalid_input(inputs::DEFINITION, &raw))
        })
        .transpose()
}

fn tag_filters(ctx: &dyn TaskContext) -> Vec<String> {
    parse_tag_filters(&ctx.input(inputs::TAGS).unwrap_or_default())
}
