use async_trait::async_trait;

use super::error::StorageError;

/// Key-addressed object storage that serves stored objects from a public URL.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store `data` under `key`, replacing any object already stored there,
    /// and return the public URL it can be fetched from.
    async fn put(&self, key: &str, content_type: &str, data: Vec<u8>)
    -> Result<String, StorageError>;
}

/// Join a public base URL and an object key with exactly one `/`.
pub fn public_url(base: &str, key: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        key.trim_start_matches('/')
    )
}
