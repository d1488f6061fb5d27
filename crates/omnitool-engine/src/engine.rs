//! Operation dispatch: one typed operation in, one job output out.

use chrono::Utc;
use omnitool_ai::{AiOutcome, GenAiClient, GenerationTask};
use omnitool_document::{
    apply_watermark, compress_document, convert_to_archival, images_to_pdf, merge_documents,
    pack_archive, pdf_to_images, protect_document, remove_pages, rotate_pages, split_document,
    ArchiveEntry, DocumentBuffer, MediaType, PageRenderer,
};
use tracing::info;

use crate::error::EngineError;
use crate::operation::{gate_media, Operation};
use crate::output::{
    archive_name, chapter_name, single_output_name, GeneratedContent, JobOutput, OutputFile,
};

/// Runs operations against document buffers. Holds the AI client and
/// the page renderer, the two external collaborators.
pub struct Engine {
    ai: GenAiClient,
    renderer: Box<dyn PageRenderer + Send>,
}

impl Engine {
    pub fn new(ai: GenAiClient, renderer: Box<dyn PageRenderer + Send>) -> Self {
        Self { ai, renderer }
    }

    /// Execute one operation over the selected inputs.
    ///
    /// Inputs are media-gated first; operations that take a single
    /// document use the first buffer, matching the selection rules.
    pub async fn run(
        &mut self,
        operation: &Operation,
        inputs: &[DocumentBuffer],
    ) -> Result<JobOutput, EngineError> {
        let kind = operation.kind();
        for input in inputs {
            gate_media(kind, input.media_type())?;
        }
        let first = inputs.first().ok_or(EngineError::NoFilesSelected)?;
        let timestamp_ms = Utc::now().timestamp_millis();

        info!(operation = kind.id(), inputs = inputs.len(), "running operation");

        let output = match operation {
            Operation::Merge => {
                let docs = inputs.iter().map(|b| b.bytes().to_vec()).collect();
                single_pdf(kind, merge_documents(docs)?, timestamp_ms)
            }
            Operation::Split { groups } => {
                let parts = split_document(first.bytes(), groups)?;
                let entries: Vec<ArchiveEntry> = parts
                    .into_iter()
                    .enumerate()
                    .map(|(i, bytes)| ArchiveEntry {
                        name: chapter_name(i),
                        bytes,
                    })
                    .collect();
                archive(&entries, timestamp_ms)?
            }
            Operation::Rotate { degrees } => {
                single_pdf(kind, rotate_pages(first.bytes(), *degrees)?, timestamp_ms)
            }
            Operation::Watermark { text } => {
                single_pdf(kind, apply_watermark(first.bytes(), text)?, timestamp_ms)
            }
            Operation::Convert => {
                let images: Vec<Vec<u8>> = inputs.iter().map(|b| b.bytes().to_vec()).collect();
                single_pdf(kind, images_to_pdf(&images)?, timestamp_ms)
            }
            Operation::PdfToJpg => {
                let pages =
                    pdf_to_images(first.bytes(), first.basename(), self.renderer.as_mut())?;
                let entries: Vec<ArchiveEntry> = pages
                    .into_iter()
                    .map(|page| ArchiveEntry {
                        name: page.name,
                        bytes: page.bytes,
                    })
                    .collect();
                archive(&entries, timestamp_ms)?
            }
            Operation::Remove { pages } => {
                single_pdf(kind, remove_pages(first.bytes(), pages)?, timestamp_ms)
            }
            Operation::Compress => {
                single_pdf(kind, compress_document(first.bytes())?, timestamp_ms)
            }
            Operation::Protect { password } => {
                single_pdf(kind, protect_document(first.bytes(), password)?, timestamp_ms)
            }
            Operation::Archival => {
                single_pdf(kind, convert_to_archival(first.bytes())?, timestamp_ms)
            }
            Operation::Ocr => {
                let task = GenerationTask::Ocr {
                    mime_type: first.media_type().mime().to_owned(),
                    data: first.bytes().to_vec(),
                };
                match self.ai.generate(&task).await? {
                    AiOutcome::Text(text) => JobOutput::Text(GeneratedContent::now(text)),
                    AiOutcome::Resume(report) => JobOutput::Resume(report),
                }
            }
        };

        Ok(output)
    }

    /// Run a standalone generation task (ideation, tagging, code,
    /// resume scoring) outside the file pipeline.
    pub async fn generate(&self, task: &GenerationTask) -> Result<JobOutput, EngineError> {
        match self.ai.generate(task).await? {
            AiOutcome::Text(text) => Ok(JobOutput::Text(GeneratedContent::now(text))),
            AiOutcome::Resume(report) => Ok(JobOutput::Resume(report)),
        }
    }
}

fn single_pdf(
    kind: crate::operation::OperationKind,
    bytes: Vec<u8>,
    timestamp_ms: i64,
) -> JobOutput {
    JobOutput::Files(vec![OutputFile {
        name: single_output_name(kind, MediaType::Pdf, timestamp_ms),
        bytes,
        media_type: MediaType::Pdf,
    }])
}

fn archive(entries: &[ArchiveEntry], timestamp_ms: i64) -> Result<JobOutput, EngineError> {
    let bytes = pack_archive(entries)?;
    Ok(JobOutput::Files(vec![OutputFile {
        name: archive_name(timestamp_ms),
        bytes,
        media_type: MediaType::Zip,
    }]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operation::{normalize, OperationKind};
    use crate::testutil::{jpeg_buffer, pdf_buffer, test_engine};
    use omnitool_document::get_page_count;

    #[tokio::test]
    async fn test_merge_sums_page_counts() {
        let mut engine = test_engine();
        let inputs = vec![pdf_buffer(2, "a.pdf"), pdf_buffer(3, "b.pdf")];
        let op = normalize(OperationKind::Merge, "");

        let output = engine.run(&op, &inputs).await.unwrap();
        let JobOutput::Files(files) = output else {
            panic!("expected files");
        };
        assert_eq!(files.len(), 1);
        assert!(files[0].name.starts_with("omnitool-merge-"));
        assert!(files[0].name.ends_with(".pdf"));
        assert_eq!(get_page_count(&files[0].bytes).unwrap(), 5);
    }

    #[tokio::test]
    async fn test_split_produces_chapter_archive() {
        let mut engine = test_engine();
        let inputs = vec![pdf_buffer(5, "book.pdf")];
        let op = normalize(OperationKind::Split, "1-2, 3-5");

        let output = engine.run(&op, &inputs).await.unwrap();
        let JobOutput::Files(files) = output else {
            panic!("expected files");
        };
        assert!(files[0].name.starts_with("omni-archive-"));
        assert_eq!(files[0].media_type, MediaType::Zip);

        let mut zip = zip_of(&files[0].bytes);
        let names: Vec<String> = (0..zip.len())
            .map(|i| zip.by_index(i).unwrap().name().to_owned())
            .collect();
        assert_eq!(names, vec!["chapter_1.pdf", "chapter_2.pdf"]);
    }

    #[tokio::test]
    async fn test_pdf2jpg_archives_page_images() {
        let mut engine = test_engine();
        let inputs = vec![pdf_buffer(3, "scan.pdf")];
        let op = normalize(OperationKind::PdfToJpg, "");

        let output = engine.run(&op, &inputs).await.unwrap();
        let JobOutput::Files(files) = output else {
            panic!("expected files");
        };
        let mut zip = zip_of(&files[0].bytes);
        assert_eq!(zip.len(), 3);
        assert_eq!(zip.by_index(0).unwrap().name(), "scan_page_1.jpg");
    }

    #[tokio::test]
    async fn test_media_gating_rejects_image_for_rotate() {
        let mut engine = test_engine();
        let inputs = vec![jpeg_buffer("photo.jpg")];
        let op = normalize(OperationKind::Rotate, "90");

        let err = engine.run(&op, &inputs).await.unwrap_err();
        assert!(matches!(err, EngineError::UnsupportedMedia { .. }));
    }

    #[tokio::test]
    async fn test_convert_accepts_multiple_images() {
        let mut engine = test_engine();
        let inputs = vec![jpeg_buffer("a.jpg"), jpeg_buffer("b.jpg")];
        let op = normalize(OperationKind::Convert, "");

        let output = engine.run(&op, &inputs).await.unwrap();
        let JobOutput::Files(files) = output else {
            panic!("expected files");
        };
        assert_eq!(get_page_count(&files[0].bytes).unwrap(), 2);
    }

    #[tokio::test]
    async fn test_protect_is_not_supported() {
        let mut engine = test_engine();
        let inputs = vec![pdf_buffer(1, "a.pdf")];
        let op = normalize(OperationKind::Protect, "hunter2");

        let err = engine.run(&op, &inputs).await.unwrap_err();
        assert!(matches!(
            err,
            EngineError::Transform(omnitool_document::TransformError::NotSupported(_))
        ));
    }

    #[tokio::test]
    async fn test_run_with_no_inputs_fails() {
        let mut engine = test_engine();
        let op = normalize(OperationKind::Compress, "");
        let err = engine.run(&op, &[]).await.unwrap_err();
        assert!(matches!(err, EngineError::NoFilesSelected));
    }

    fn zip_of(bytes: &[u8]) -> zip::ZipArchive<std::io::Cursor<&[u8]>> {
        zip::ZipArchive::new(std::io::Cursor::new(bytes)).unwrap()
    }
}
