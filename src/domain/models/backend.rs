use anyhow::Result;
use async_trait::async_trait;
use serde_derive::Deserialize;
use serde_derive::Serialize;

use super::MessageId;
use super::PendingUpload;
use crate::configuration::Config;
use crate::configuration::ConfigKey;

/// Everything the `/pipeline` endpoint needs for one submission. The
/// placeholder id ties the eventual outcome back to the assistant turn
/// appended when the user hit enter.
pub struct PipelineRequest {
    pub placeholder_id: MessageId,
    pub query: String,
    pub title: String,
    pub audience: String,
    pub source: String,
    pub upload: Option<PendingUpload>,
}

impl PipelineRequest {
    pub fn new(
        placeholder_id: MessageId,
        query: &str,
        upload: Option<PendingUpload>,
    ) -> PipelineRequest {
        return PipelineRequest {
            placeholder_id,
            query: query.to_string(),
            title: Config::get(ConfigKey::ReportTitle),
            audience: Config::get(ConfigKey::ReportAudience),
            source: Config::get(ConfigKey::IngestSource),
            upload,
        };
    }
}

/// A generated PDF the user can open, either saved locally from a binary
/// response body or served by the backend's static route.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PdfArtifact {
    pub location: String,
    pub filename: String,
}

impl PdfArtifact {
    pub fn download_url(&self) -> String {
        let base = Config::get(ConfigKey::BaseURL);
        return format!("{base}/download-pdf/{}", self.filename);
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Pdf(PdfArtifact),
    Report {
        text: String,
        pdf: Option<PdfArtifact>,
    },
}

#[async_trait]
pub trait Pipeline {
    /// Used at startup to verify the backend is reachable before the
    /// first submission.
    async fn health_check(&self) -> Result<()>;

    /// Runs one submission end to end and returns its outcome. One call
    /// per placeholder; cancellation happens by aborting the task driving
    /// this future.
    async fn run(&self, request: PipelineRequest) -> Result<SubmissionOutcome>;
}

pub type PipelineBox = Box<dyn Pipeline + Send + Sync>;
