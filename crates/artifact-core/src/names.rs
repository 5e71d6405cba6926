//! Task input names and ambient variable names.

/// Names of the task's string inputs.
pub mod inputs {
    pub const BUILD_TYPE: &str = "buildType";
    pub const PROJECT: &str = "project";
    pub const DEFINITION: &str = "definition";
    pub const SPECIFIC_BUILD_WITH_TRIGGERING: &str = "specificBuildWithTriggering";
    pub const BUILD_VERSION_TO_DOWNLOAD: &str = "buildVersionToDownload";
    pub const BRANCH_NAME: &str = "branchName";
    pub const BUILD_ID: &str = "buildId";
    pub const TAGS: &str = "tags";
    pub const ARTIFACT_NAME: &str = "artifactName";
    pub const ITEM_PATTERN: &str = "itemPattern";
    pub const DOWNLOAD_PATH: &str = "downloadPath";
}

/// Names of the ambient variables supplied by the executing agent.
pub mod variables {
    pub const BUILD_ID: &str = "build.buildId";
    pub const HOST_TYPE: &str = "system.hostType";
    pub const TEAM_PROJECT_ID: &str = "system.teamProjectId";
    pub const TRIGGERED_BY_BUILD_ID: &str = "build.triggeredBy.buildId";
    pub const TRIGGERED_BY_DEFINITION_ID: &str = "build.triggeredBy.definitionId";
    pub const TRIGGERED_BY_PROJECT_ID: &str = "build.triggeredBy.projectId";
}
