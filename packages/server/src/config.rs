use common::StorageConfig;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    pub allow_origins: Vec<String>,
    pub max_age: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors: CorsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MediaConfig {
    /// Image URL assigned to new records until an image is uploaded.
    pub default_image_url: String,
    /// Maximum accepted image upload size in bytes.
    pub max_image_size: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub storage: StorageConfig,
    pub media: MediaConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("server.cors.allow_origins", vec!["*"])?
            .set_default("server.cors.max_age", 12 * 60 * 60)?
            .set_default("database.url", "")?
            .set_default("storage.backend", "s3")?
            .set_default("storage.public_url", "")?
            .set_default("media.default_image_url", "")?
            .set_default("media.max_image_size", 10 * 1024 * 1024)?
            // Load from config/config.toml
            .add_source(File::with_name("config/config").required(false))
            // Override from environment (e.g., CATALOG__STORAGE__S3__BUCKET)
            .add_source(Environment::with_prefix("CATALOG").separator("__"))
            .build()?;

        let config: Self = s.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations with missing required settings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut missing = Vec::new();
        if self.database.url.trim().is_empty() {
            missing.push("database.url");
        }
        if self.media.default_image_url.trim().is_empty() {
            missing.push("media.default_image_url");
        }
        missing.extend(self.storage.missing_fields());

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Message(format!(
                "missing required settings: {}",
                missing.join(", ")
            )))
        }
    }
}
