/// Storage-specific errors
use thiserror::Error;

/// Result type alias using `StorageError`
pub type Result<T> = std::result::Result<T, StorageError>;

/// Storage error types
#[derive(Error, Debug)]
pub enum StorageError {
    /// Content is not JSON at all
    #[error("Invalid JSON")]
    InvalidJson(#[source] serde_json::Error),

    /// JSON parsed but does not have the expected shape
    #[error("Malformed state: {0}")]
    Malformed(String),

    /// An import document contained no songs
    #[error("No songs found in JSON")]
    NoSongs,

    /// Serialization error while writing
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl StorageError {
    /// Create a malformed-content error
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::Malformed(msg.into())
    }
}

impl From<StorageError> for songbox_core::CoreError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Io(e) => songbox_core::CoreError::Io(e),
            other => songbox_core::CoreError::storage(other.to_string()),
        }
    }
}
