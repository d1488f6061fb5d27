//! Job lifecycle: file selection, processing, results.
//!
//! A job is bound to one operation kind. State transitions are the
//! only mutation points; every other method is an accessor.

use omnitool_document::{get_page_count, validate_pdf, DocumentBuffer, MediaType, PdfInfo};
use tracing::warn;

use crate::engine::Engine;
use crate::error::EngineError;
use crate::operation::{gate_media, normalize, OperationKind};
use crate::output::{JobOutput, ProcessMetrics};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobState {
    Idle,
    FilesSelected,
    Processing,
    ResultReady,
    Failed,
}

/// A completed job's output plus its metrics.
#[derive(Debug, Clone)]
pub struct JobResult {
    pub output: JobOutput,
    pub metrics: ProcessMetrics,
}

pub struct Job {
    kind: OperationKind,
    state: JobState,
    inputs: Vec<DocumentBuffer>,
    result: Option<JobResult>,
    last_error: Option<String>,
}

impl Job {
    pub fn new(kind: OperationKind) -> Self {
        Self {
            kind,
            state: JobState::Idle,
            inputs: Vec::new(),
            result: None,
            last_error: None,
        }
    }

    pub fn kind(&self) -> OperationKind {
        self.kind
    }

    pub fn state(&self) -> JobState {
        self.state
    }

    pub fn inputs(&self) -> &[DocumentBuffer] {
        &self.inputs
    }

    pub fn result(&self) -> Option<&JobResult> {
        self.result.as_ref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Validation metadata for one selected input, when it is a PDF.
    pub fn input_info(&self, index: usize) -> Option<PdfInfo> {
        let buffer = self.inputs.get(index)?;
        if buffer.media_type() != MediaType::Pdf {
            return None;
        }
        validate_pdf(buffer.bytes()).ok()
    }

    /// Add files to the selection. Merge and convert accumulate;
    /// every other operation replaces the current selection. PDF
    /// inputs are structurally validated here, before any transform
    /// touches them. Any pending result is discarded.
    pub fn select_files(&mut self, files: Vec<DocumentBuffer>) -> Result<(), EngineError> {
        if self.state == JobState::Processing {
            return Err(EngineError::Busy);
        }
        for file in &files {
            gate_media(self.kind, file.media_type())?;
            if file.media_type() == MediaType::Pdf {
                validate_pdf(file.bytes())?;
            }
        }
        if self.kind.accumulates_inputs() {
            self.inputs.extend(files);
        } else {
            self.inputs = files;
        }
        self.result = None;
        self.last_error = None;
        self.state = if self.inputs.is_empty() {
            JobState::Idle
        } else {
            JobState::FilesSelected
        };
        Ok(())
    }

    /// Drop one file from the selection. Out-of-range indices are
    /// ignored, as is any call while processing.
    pub fn remove_file(&mut self, index: usize) {
        if self.state == JobState::Processing || index >= self.inputs.len() {
            return;
        }
        self.inputs.remove(index);
        if self.inputs.is_empty() {
            self.state = JobState::Idle;
        }
    }

    /// Rebind the job to a different operation, dropping all buffers
    /// and results.
    pub fn switch_operation(&mut self, kind: OperationKind) -> Result<(), EngineError> {
        if self.state == JobState::Processing {
            return Err(EngineError::Busy);
        }
        self.kind = kind;
        self.reset();
        Ok(())
    }

    /// Discard buffers, results and errors, returning to `Idle`.
    pub fn reset(&mut self) {
        self.inputs.clear();
        self.result = None;
        self.last_error = None;
        self.state = JobState::Idle;
    }

    /// Run the job's operation over the selected files.
    ///
    /// `param` is the raw parameter string; it is normalized once with
    /// the operation's defaults. On success the result is retained on
    /// the job; on failure the inputs are retained so the caller can
    /// adjust parameters and try again.
    pub async fn process(&mut self, engine: &mut Engine, param: &str) -> Result<(), EngineError> {
        if self.state == JobState::Processing {
            return Err(EngineError::Busy);
        }
        if self.inputs.is_empty() {
            return Err(EngineError::NoFilesSelected);
        }

        let operation = normalize(self.kind, param);
        self.state = JobState::Processing;
        self.result = None;
        self.last_error = None;

        let input_size_bytes: usize = self.inputs.iter().map(|b| b.len()).sum();
        let started = std::time::Instant::now();

        match engine.run(&operation, &self.inputs).await {
            Ok(output) => {
                let metrics = ProcessMetrics {
                    input_size_bytes,
                    output_size_bytes: output_size(&output),
                    page_count: output_page_count(&output),
                    processing_time_ms: started.elapsed().as_millis() as u64,
                };
                self.result = Some(JobResult { output, metrics });
                self.state = JobState::ResultReady;
                Ok(())
            }
            Err(e) => {
                warn!(operation = self.kind.id(), error = %e, "job failed");
                self.last_error = Some(e.to_string());
                self.state = JobState::Failed;
                Err(e)
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn force_state(&mut self, state: JobState) {
        self.state = state;
    }
}

fn output_size(output: &JobOutput) -> usize {
    match output {
        JobOutput::Files(files) => files.iter().map(|f| f.bytes.len()).sum(),
        JobOutput::Text(content) => content.content.len(),
        JobOutput::Resume(_) => 0,
    }
}

/// Page count of the first PDF output, zero otherwise.
fn output_page_count(output: &JobOutput) -> u32 {
    match output {
        JobOutput::Files(files) => files
            .iter()
            .find(|f| f.media_type == MediaType::Pdf)
            .and_then(|f| get_page_count(&f.bytes).ok())
            .unwrap_or(0),
        _ => 0,
    }
}
