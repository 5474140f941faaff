#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;

use std::path;
use std::time::Duration;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use reqwest::multipart;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::format_report;
use crate::domain::models::PdfArtifact;
use crate::domain::models::Pipeline;
use crate::domain::models::PipelineEnvelope;
use crate::domain::models::PipelineRequest;
use crate::domain::models::SubmissionOutcome;
use crate::domain::models::NO_RESULTS_TEXT;

fn artifact_id() -> String {
    return Uuid::new_v4()
        .to_string()
        .split('-')
        .take(2)
        .collect::<Vec<_>>()
        .join("-");
}

/// Client for the research pipeline. A submission is a single multipart
/// POST; the response is either a JSON report envelope or a raw PDF body,
/// told apart by content type.
pub struct PipelineClient {
    url: String,
    token: String,
    timeout: String,
    artifact_dir: path::PathBuf,
}

impl Default for PipelineClient {
    fn default() -> PipelineClient {
        return PipelineClient {
            url: Config::get(ConfigKey::BaseURL),
            token: Config::get(ConfigKey::AuthToken),
            timeout: Config::get(ConfigKey::HealthCheckTimeout),
            artifact_dir: dirs::cache_dir().unwrap().join("dossier/artifacts"),
        };
    }
}

impl PipelineClient {
    async fn save_artifact(&self, bytes: &[u8]) -> Result<PdfArtifact> {
        if !self.artifact_dir.exists() {
            fs::create_dir_all(&self.artifact_dir).await?;
        }

        let filename = format!("report-{}.pdf", artifact_id());
        let file_path = self.artifact_dir.join(&filename);
        let mut file = fs::File::create(&file_path).await?;
        file.write_all(bytes).await?;
        file.flush().await?;

        return Ok(PdfArtifact {
            location: file_path.to_string_lossy().to_string(),
            filename,
        });
    }

    fn static_artifact(&self, pdf_path: &str) -> PdfArtifact {
        // The backend reports a server side filesystem path. Only the final
        // component is meaningful to us, via the static file route.
        let filename = pdf_path
            .split('/')
            .next_back()
            .unwrap_or(pdf_path)
            .to_string();

        return PdfArtifact {
            location: format!("{url}/static/{filename}", url = self.url),
            filename,
        };
    }
}

#[async_trait]
impl Pipeline for PipelineClient {
    async fn health_check(&self) -> Result<()> {
        let res = reqwest::Client::new()
            .get(format!("{url}/health", url = self.url))
            .timeout(Duration::from_millis(self.timeout.parse::<u64>()?))
            .send()
            .await;

        if res.is_err() {
            tracing::error!(error = ?res.unwrap_err(), "Pipeline backend is not running");
            bail!("Pipeline backend is not running");
        }

        let res = res.unwrap();
        if res.status() != 200 {
            tracing::error!(
                status = res.status().as_u16(),
                "Pipeline backend health check failed"
            );
            bail!("Pipeline backend health check failed");
        }

        return Ok(());
    }

    async fn run(&self, request: PipelineRequest) -> Result<SubmissionOutcome> {
        let mut form = multipart::Form::new()
            .text("query", request.query)
            .text("title", request.title)
            .text("audience", request.audience)
            .text("source", request.source);

        if let Some(upload) = request.upload {
            let bytes = fs::read(&upload.path).await?;
            form = form.part(
                "file_content",
                multipart::Part::bytes(bytes).file_name(upload.file_name),
            );
        }

        let res = reqwest::Client::new()
            .post(format!("{url}/pipeline", url = self.url))
            .bearer_auth(&self.token)
            .multipart(form)
            .send()
            .await?;

        if !res.status().is_success() {
            tracing::error!(status = res.status().as_u16(), "Pipeline request failed");
            bail!("Pipeline request failed");
        }

        let content_type = res
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| return value.to_str().ok())
            .unwrap_or_default()
            .to_string();

        if content_type.starts_with("application/pdf") {
            let body = res.bytes().await?;
            let artifact = self.save_artifact(&body).await?;
            return Ok(SubmissionOutcome::Pdf(artifact));
        }

        let envelope = res.json::<PipelineEnvelope>().await?;
        tracing::debug!(pdf_path = ?envelope.pdf_path, "pipeline returned a report envelope");

        let text = match envelope.result {
            Some(payload) => format_report(&payload),
            None => NO_RESULTS_TEXT.to_string(),
        };
        let pdf = envelope
            .pdf_path
            .as_deref()
            .map(|pdf_path| return self.static_artifact(pdf_path));

        return Ok(SubmissionOutcome::Report { text, pdf });
    }
}
