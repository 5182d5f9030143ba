use std::sync::Arc;

use common::storage::filesystem::FilesystemObjectStore;
use common::storage::s3::S3ObjectStore;
use common::storage::{ObjectStore, StorageError};
use common::{StorageBackend, StorageConfig};
use tracing::info;

/// Construct the object store selected by `config.backend`.
pub async fn build_object_store(
    config: &StorageConfig,
) -> Result<Arc<dyn ObjectStore>, StorageError> {
    match config.backend {
        StorageBackend::S3 => {
            info!(
                endpoint = %config.s3.endpoint,
                bucket = %config.s3.bucket,
                "Using S3 object store"
            );
            let store = S3ObjectStore::new(&config.s3, config.public_url.clone())?;
            Ok(Arc::new(store))
        }
        StorageBackend::Filesystem => {
            info!(root = %config.filesystem.root.display(), "Using filesystem object store");
            let store = FilesystemObjectStore::new(
                config.filesystem.root.clone(),
                config.public_url.clone(),
            )
            .await?;
            Ok(Arc::new(store))
        }
    }
}
