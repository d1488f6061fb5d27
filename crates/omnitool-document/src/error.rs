use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransformError {
    #[error("Invalid input format: {0}")]
    InvalidInput(String),

    #[error("No input documents provided")]
    EmptyInputSet,

    #[error("Invalid page range: {0}")]
    InvalidRange(String),

    #[error("Unsupported parameter: {0}")]
    UnsupportedParameter(String),

    #[error("Input too large: {actual} bytes (limit {limit})")]
    InputTooLarge { actual: usize, limit: usize },

    #[error("Not supported: {0}")]
    NotSupported(String),

    #[error("PDF operation failed: {0}")]
    OperationError(String),

    #[error("Image error: {0}")]
    ImageError(String),

    #[error("Archive error: {0}")]
    ArchiveError(String),
}
