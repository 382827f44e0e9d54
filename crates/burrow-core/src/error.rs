use thiserror::Error;

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, StorageError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// The short code is already taken by another record.
    #[error("short code already exists: {0}")]
    Conflict(String),
    /// Any other backend failure. Callers surface it without retrying.
    #[error("storage operation failed: {0}")]
    Operation(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShortenerError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("invalid short code: {0}")]
    InvalidShortCode(String),
    #[error("short code not found: {0}")]
    NotFound(String),
    #[error("no free short code after {attempts} attempts")]
    CodeSpaceExhausted { attempts: u32 },
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}
