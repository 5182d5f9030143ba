pub mod config;
pub mod storage;

pub use config::{FilesystemStorageConfig, S3StorageConfig, StorageBackend, StorageConfig};
