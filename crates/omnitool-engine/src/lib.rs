//! Job orchestration for the OmniTool suite
//!
//! Ties the document transforms and the generation client together: a
//! `Job` tracks selected files through a small state machine, the
//! `Engine` dispatches the chosen `Operation`, and results come back
//! as named output files or generated text with processing metrics.

pub mod engine;
pub mod error;
pub mod io;
pub mod job;
pub mod operation;
pub mod output;

#[cfg(test)]
pub(crate) mod testutil;

pub use engine::Engine;
pub use error::EngineError;
pub use io::{read_input, write_outputs};
pub use job::{Job, JobResult, JobState};
pub use operation::{normalize, Operation, OperationKind};
pub use output::{GeneratedContent, JobOutput, OutputFile, ProcessMetrics};
