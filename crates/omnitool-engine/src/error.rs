use omnitool_ai::AiError;
use omnitool_document::TransformError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("no files selected")]
    NoFilesSelected,

    #[error("a job is already processing")]
    Busy,

    #[error("operation '{operation}' does not accept {media} input")]
    UnsupportedMedia {
        operation: &'static str,
        media: &'static str,
    },

    #[error("unrecognized file type: {0}")]
    UnknownMedia(String),

    #[error(transparent)]
    Transform(#[from] TransformError),

    #[error(transparent)]
    Ai(#[from] AiError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
