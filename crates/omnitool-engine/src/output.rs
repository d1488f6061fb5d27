//! Result records and output-file naming.

use chrono::{DateTime, Utc};
use omnitool_ai::AnalysisReport;
use omnitool_document::MediaType;
use serde::Serialize;

use crate::operation::OperationKind;

/// One file produced by a job.
#[derive(Debug, Clone)]
pub struct OutputFile {
    pub name: String,
    pub bytes: Vec<u8>,
    pub media_type: MediaType,
}

/// Text produced by a generation task, stamped with when it arrived.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedContent {
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl GeneratedContent {
    pub fn now(content: String) -> Self {
        Self {
            content,
            timestamp: Utc::now(),
        }
    }
}

/// What a completed job hands back.
#[derive(Debug, Clone)]
pub enum JobOutput {
    Files(Vec<OutputFile>),
    Text(GeneratedContent),
    Resume(AnalysisReport),
}

/// Sizes and timing recorded for every completed job.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessMetrics {
    pub input_size_bytes: usize,
    pub output_size_bytes: usize,
    pub page_count: u32,
    pub processing_time_ms: u64,
}

/// `omnitool-<operation>-<timestamp>.<ext>` for single-file results.
pub fn single_output_name(kind: OperationKind, media: MediaType, timestamp_ms: i64) -> String {
    format!(
        "omnitool-{}-{}.{}",
        kind.id(),
        timestamp_ms,
        media.extension()
    )
}

/// `omni-archive-<timestamp>.zip` for multi-file results.
pub fn archive_name(timestamp_ms: i64) -> String {
    format!("omni-archive-{}.zip", timestamp_ms)
}

/// Name of the n-th document in a split archive, 1-based.
pub fn chapter_name(index: usize) -> String {
    format!("chapter_{}.pdf", index + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_single_output_name() {
        assert_eq!(
            single_output_name(OperationKind::Rotate, MediaType::Pdf, 1700000000000),
            "omnitool-rotate-1700000000000.pdf"
        );
    }

    #[test]
    fn test_archive_and_chapter_names() {
        assert_eq!(archive_name(42), "omni-archive-42.zip");
        assert_eq!(chapter_name(0), "chapter_1.pdf");
        assert_eq!(chapter_name(9), "chapter_10.pdf");
    }
}
