use std::path::PathBuf;

use serde::Deserialize;

/// Which object store implementation backs image uploads.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Any S3-compatible endpoint (Cloudflare R2 in production).
    #[default]
    S3,
    /// Local directory, intended for development and tests.
    Filesystem,
}

/// Credentials and location of an S3-compatible bucket.
#[derive(Debug, Deserialize, Clone)]
pub struct S3StorageConfig {
    #[serde(default)]
    pub endpoint: String,
    #[serde(default)]
    pub bucket: String,
    #[serde(default)]
    pub access_key: String,
    #[serde(default)]
    pub secret_key: String,
    /// Signing region. R2 expects "auto". Default: "auto".
    #[serde(default = "default_region")]
    pub region: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct FilesystemStorageConfig {
    /// Directory objects are written under. Default: "./uploads".
    #[serde(default = "default_root")]
    pub root: PathBuf,
}

/// App-level object storage configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    /// Base URL objects are publicly served from; keys are appended after a `/`.
    #[serde(default)]
    pub public_url: String,
    #[serde(default)]
    pub s3: S3StorageConfig,
    #[serde(default)]
    pub filesystem: FilesystemStorageConfig,
}

fn default_region() -> String {
    "auto".into()
}
fn default_root() -> PathBuf {
    PathBuf::from("./uploads")
}

impl Default for S3StorageConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            bucket: String::new(),
            access_key: String::new(),
            secret_key: String::new(),
            region: default_region(),
        }
    }
}

impl Default for FilesystemStorageConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
        }
    }
}

impl StorageConfig {
    /// Names of required settings that are missing for the selected backend.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.public_url.trim().is_empty() {
            missing.push("storage.public_url");
        }
        if self.backend == StorageBackend::S3 {
            let required = [
                ("storage.s3.endpoint", &self.s3.endpoint),
                ("storage.s3.bucket", &self.s3.bucket),
                ("storage.s3.access_key", &self.s3.access_key),
                ("storage.s3.secret_key", &self.s3.secret_key),
            ];
            for (name, value) in required {
                if value.trim().is_empty() {
                    missing.push(name);
                }
            }
        }
        missing
    }
}
