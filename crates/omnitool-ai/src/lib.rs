//! Gemini generation client for the OmniTool suite
//!
//! Five task kinds share one wire contract: ideation, hashtag
//! strategy, code generation, structured resume scoring, and OCR on
//! images. Tasks are routed to a fast or high-capability model per
//! kind; resume analysis enforces a JSON response schema and degrades
//! to a fallback report when the model returns malformed output.

pub mod analysis;
pub mod client;
pub mod error;
pub mod prompts;
mod protocol;
pub mod task;

pub use analysis::AnalysisReport;
pub use client::{parse_analysis, AiOutcome, GenAiClient};
pub use error::AiError;
pub use task::{GenerationTask, ModelTier};
