use thumbdrop_storage::StorageError;

/// Errors raised while deriving artifacts from a stored upload.
#[derive(Debug, thiserror::Error)]
pub enum ProcessingError {
    #[error("Failed to decode image: {0}")]
    Decode(String),

    #[error("Failed to encode image: {0}")]
    Encode(String),

    #[error("Failed to open archive: {0}")]
    Archive(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Processing task failed: {0}")]
    Task(String),
}

pub type ProcessingResult<T> = Result<T, ProcessingError>;

impl From<tokio::task::JoinError> for ProcessingError {
    fn from(err: tokio::task::JoinError) -> Self {
        ProcessingError::Task(err.to_string())
    }
}
