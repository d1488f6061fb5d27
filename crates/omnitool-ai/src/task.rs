//! Generation task kinds and their model-tier routing.

/// Which Gemini model a task is routed to.
///
/// Flash handles high-volume text tasks; Pro is reserved for tasks that
/// benefit from deeper reasoning (code generation, resume scoring).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelTier {
    Flash,
    Pro,
}

impl ModelTier {
    pub fn model_id(&self) -> &'static str {
        match self {
            ModelTier::Flash => "gemini-3-flash-preview",
            ModelTier::Pro => "gemini-3-pro-preview",
        }
    }
}

/// A single generation request, carrying everything needed to build
/// the wire payload.
#[derive(Debug, Clone)]
pub enum GenerationTask {
    /// Video content ideas for a topic.
    Ideation { topic: String },
    /// A hashtag strategy for a piece of content.
    Tagging { content: String },
    /// Production-quality code in the given language.
    CodeGen { prompt: String, language: String },
    /// Structured scoring of a resume, returned as JSON.
    ResumeAnalysis { cv_text: String },
    /// Text extraction from an image, returned as Markdown.
    Ocr { mime_type: String, data: Vec<u8> },
}

impl GenerationTask {
    pub fn tier(&self) -> ModelTier {
        match self {
            GenerationTask::Ideation { .. }
            | GenerationTask::Tagging { .. }
            | GenerationTask::Ocr { .. } => ModelTier::Flash,
            GenerationTask::CodeGen { .. } | GenerationTask::ResumeAnalysis { .. } => {
                ModelTier::Pro
            }
        }
    }

    /// Short label used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            GenerationTask::Ideation { .. } => "ideation",
            GenerationTask::Tagging { .. } => "tagging",
            GenerationTask::CodeGen { .. } => "codegen",
            GenerationTask::ResumeAnalysis { .. } => "resume_analysis",
            GenerationTask::Ocr { .. } => "ocr",
        }
    }
}
