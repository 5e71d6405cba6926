//! Mocks and builders shared by the unit tests.

use artifact_core::{
    ArtifactDownload, ArtifactDownloadPort, ArtifactStoreError, BuildId, BuildQuery,
    BuildQueryError, BuildQueryPort, BuildSummary, DownloadSummary,
};
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use mockall::mock;
use tokio_util::sync::CancellationToken;

mock! {
    pub Builds {}

    #[async_trait]
    impl BuildQueryPort for Builds {
        async fn list_builds(&self, query: &BuildQuery) -> Result<Vec<BuildSummary>, BuildQueryError>;
    }
}

mock! {
    pub Artifacts {}

    #[async_trait]
    impl ArtifactDownloadPort for Artifacts {
        async fn download(
            &self,
            request: &ArtifactDownload,
            cancel: &CancellationToken,
        ) -> Result<DownloadSummary, ArtifactStoreError>;
    }
}

pub fn build(id: u32) -> BuildId {
    BuildId::new(id).expect("test build ids are non-zero")
}

pub fn at(seconds: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(seconds, 0).unwrap()
}

pub fn finished(id: u32, seconds: i64) -> BuildSummary {
    BuildSummary::finished(build(id), at(seconds))
}
