use thiserror::Error;

/// Everything the pipeline can report back to its caller
///
/// None of these are fatal: a failed call leaves the session exactly as it
/// was, so the last good fetch/process results stay usable.
#[derive(Error, Debug)]
pub enum Error {
    /// Bad status, transport failure, timeout, or a body that is not JSON
    #[error("Network error: {0}")]
    NetworkError(String),

    /// A pipeline stage was called before the stage it depends on
    #[error("Precondition failed: {0}")]
    PreconditionError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Export failed: {0}")]
    ExportError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<exoscout_api::ArchiveError> for Error {
    fn from(err: exoscout_api::ArchiveError) -> Self {
        Error::NetworkError(err.to_string())
    }
}
