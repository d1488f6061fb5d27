//! HTTP client for the Gemini generateContent endpoint.
//!
//! All generation calls in the workspace go through this client; no
//! other module talks to the API directly.

use reqwest::Client;
use tracing::{debug, warn};

use crate::analysis::AnalysisReport;
use crate::error::AiError;
use crate::protocol::{build_request, ApiError, GenerateResponse};
use crate::task::GenerationTask;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const REQUEST_TIMEOUT_SECS: u64 = 120;

/// Result of a generation call.
#[derive(Debug, Clone, PartialEq)]
pub enum AiOutcome {
    /// Markdown or plain text, depending on the task.
    Text(String),
    /// Structured resume scoring.
    Resume(AnalysisReport),
}

#[derive(Clone)]
pub struct GenAiClient {
    http: Client,
    api_key: String,
    base_url: String,
}

impl GenAiClient {
    pub fn new(api_key: String) -> Result<Self, AiError> {
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            http,
            api_key,
            base_url: DEFAULT_BASE_URL.to_owned(),
        })
    }

    /// Point the client at a different endpoint, e.g. a local stub.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Run one generation task and return its outcome.
    ///
    /// Resume analysis never fails on malformed model output: a
    /// fallback report is returned instead so the caller can still
    /// render something.
    pub async fn generate(&self, task: &GenerationTask) -> Result<AiOutcome, AiError> {
        let tier = task.tier();
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url,
            tier.model_id(),
            self.api_key
        );
        let body = build_request(task);

        debug!(task = task.kind(), model = tier.model_id(), "generation request");

        let response = self.http.post(&url).json(&body).send().await?;
        let status = response.status();

        if !status.is_success() {
            let raw = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiError>(&raw)
                .map(|e| e.error.message)
                .unwrap_or(raw);
            warn!(task = task.kind(), status = status.as_u16(), "generation failed");
            return Err(AiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateResponse = response.json().await?;
        let text = parsed.text().ok_or(AiError::EmptyContent)?;

        match task {
            GenerationTask::ResumeAnalysis { .. } => Ok(AiOutcome::Resume(parse_analysis(text))),
            _ => Ok(AiOutcome::Text(text.to_owned())),
        }
    }
}

/// Parse the model's resume analysis, tolerating code fences and
/// falling back to a canned report on invalid JSON.
pub fn parse_analysis(text: &str) -> AnalysisReport {
    let cleaned = strip_json_fences(text);
    match serde_json::from_str(cleaned) {
        Ok(report) => report,
        Err(e) => {
            warn!(error = %e, "resume analysis was not valid JSON");
            AnalysisReport::fallback()
        }
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from model output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}
