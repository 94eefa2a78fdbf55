use thiserror::Error;

/// Result type for snippet store operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors raised while constructing domain values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("invalid expiry: {0}")]
    InvalidExpiry(String),
    #[error("invalid snippet id: {0}")]
    InvalidSnippetId(String),
}

/// Classification of a failure reported by the backing engine.
#[derive(Debug, Clone, Error)]
pub enum BackendError {
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("storage operation timed out: {0}")]
    Timeout(String),
    #[error("storage query failed: {0}")]
    Query(String),
    #[error("stored data is invalid: {0}")]
    InvalidData(String),
}

/// A failed snippet store operation.
///
/// "No matching live row" is not an error: lookups report it as `Ok(None)`.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("failed to connect to snippet store: {0}")]
    Connect(#[source] BackendError),
    #[error("failed to read snippets: {0}")]
    Read(#[source] BackendError),
    #[error("failed to write snippet: {0}")]
    Write(#[source] BackendError),
}
