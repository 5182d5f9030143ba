use async_trait::async_trait;
use s3::creds::Credentials;
use s3::{Bucket, Region};

use super::error::StorageError;
use super::traits::{ObjectStore, public_url};
use crate::config::S3StorageConfig;

/// Object store backed by an S3-compatible bucket (Cloudflare R2, MinIO, AWS).
pub struct S3ObjectStore {
    bucket: Box<Bucket>,
    public_base: String,
}

impl S3ObjectStore {
    /// Build a client for the configured bucket. No network call is made here.
    pub fn new(config: &S3StorageConfig, public_base: String) -> Result<Self, StorageError> {
        let credentials = Credentials::new(
            Some(&config.access_key),
            Some(&config.secret_key),
            None,
            None,
            None,
        )
        .map_err(|e| StorageError::Config(format!("invalid S3 credentials: {e}")))?;

        let region = Region::Custom {
            region: config.region.clone(),
            endpoint: config.endpoint.clone(),
        };

        let bucket = Bucket::new(&config.bucket, region, credentials)
            .map_err(|e| StorageError::Config(format!("invalid S3 bucket settings: {e}")))?
            .with_path_style();

        Ok(Self {
            bucket,
            public_base,
        })
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn put(
        &self,
        key: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> Result<String, StorageError> {
        let response = self
            .bucket
            .put_object_with_content_type(key, &data, content_type)
            .await
            .map_err(|e| StorageError::Backend(e.to_string()))?;

        let status = response.status_code();
        if !(200..300).contains(&status) {
            return Err(StorageError::Backend(format!(
                "PUT {key} returned status {status}"
            )));
        }

        tracing::debug!(key, size = data.len(), "Stored object in bucket");
        Ok(public_url(&self.public_base, key))
    }
}
