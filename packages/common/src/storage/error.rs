use thiserror::Error;

/// Errors that can occur during object storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The derived object key is not acceptable to the store.
    #[error("invalid object key: {0}")]
    InvalidKey(String),
    /// An I/O error occurred.
    #[error("storage IO error: {0}")]
    Io(#[from] std::io::Error),
    /// The remote store rejected or failed the request.
    #[error("object store backend error: {0}")]
    Backend(String),
    /// The store could not be constructed from the given settings.
    #[error("object store configuration error: {0}")]
    Config(String),
}
