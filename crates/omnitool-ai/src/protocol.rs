//! Wire types for the Gemini `generateContent` REST endpoint.

use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::analysis::AnalysisReport;
use crate::prompts;
use crate::task::GenerationTask;

#[derive(Debug, Serialize)]
pub(crate) struct GenerateRequest {
    pub contents: Vec<RequestContent>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
pub(crate) struct RequestContent {
    pub parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
pub(crate) struct RequestPart {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(rename = "inlineData", skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
}

impl RequestPart {
    fn text(text: String) -> Self {
        Self {
            text: Some(text),
            inline_data: None,
        }
    }

    fn inline(mime_type: String, data: &[u8]) -> Self {
        Self {
            text: None,
            inline_data: Some(InlineData {
                mime_type,
                data: base64::engine::general_purpose::STANDARD.encode(data),
            }),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct InlineData {
    #[serde(rename = "mimeType")]
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct GenerationConfig {
    #[serde(rename = "responseMimeType")]
    pub response_mime_type: &'static str,
    #[serde(rename = "responseSchema")]
    pub response_schema: serde_json::Value,
}

/// Build the full request payload for a task, including the JSON
/// response schema for resume analysis and inline image data for OCR.
pub(crate) fn build_request(task: &GenerationTask) -> GenerateRequest {
    let (parts, generation_config) = match task {
        GenerationTask::Ideation { topic } => {
            (vec![RequestPart::text(prompts::ideation(topic))], None)
        }
        GenerationTask::Tagging { content } => {
            (vec![RequestPart::text(prompts::tagging(content))], None)
        }
        GenerationTask::CodeGen { prompt, language } => (
            vec![RequestPart::text(prompts::codegen(prompt, language))],
            None,
        ),
        GenerationTask::ResumeAnalysis { cv_text } => (
            vec![RequestPart::text(prompts::resume_analysis(cv_text))],
            Some(GenerationConfig {
                response_mime_type: "application/json",
                response_schema: AnalysisReport::response_schema(),
            }),
        ),
        GenerationTask::Ocr { mime_type, data } => (
            vec![
                RequestPart::text(prompts::OCR.to_owned()),
                RequestPart::inline(mime_type.clone(), data),
            ],
            None,
        ),
    };

    GenerateRequest {
        contents: vec![RequestContent { parts }],
        generation_config,
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct GenerateResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Candidate {
    pub content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ResponseContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ResponsePart {
    pub text: Option<String>,
}

impl GenerateResponse {
    /// Text of the first candidate part that carries any.
    pub fn text(&self) -> Option<&str> {
        self.candidates
            .iter()
            .filter_map(|c| c.content.as_ref())
            .flat_map(|c| c.parts.iter())
            .find_map(|p| p.text.as_deref())
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiError {
    pub error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    pub message: String,
}
