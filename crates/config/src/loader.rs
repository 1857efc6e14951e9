use super::defaults::DEFAULT_CONFIG_TEMPLATE;
use super::errors::ConfigError;
use super::migration::migrate_config_if_needed;
use super::models::Config;
use std::path::Path;
use std::sync::Arc;

/// Environment variables overriding the S3 credentials from the file.
pub const ENV_S3_ACCESS_KEY_ID: &str = "UPDROP_S3_ACCESS_KEY_ID";
pub const ENV_S3_SECRET_ACCESS_KEY: &str = "UPDROP_S3_SECRET_ACCESS_KEY";

impl Config {
    /// Loads configuration from a file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Self::from_file_with_events(path, None).await
    }

    /// Loads configuration from a file with optional event bus for notifications
    pub async fn from_file_with_events<P: AsRef<Path>>(
        path: P,
        events: Option<&Arc<updrop_events::EventBus>>,
    ) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        // Create default config if it doesn't exist
        if !path.exists() {
            create_default_config(path).await?;
        }

        // Migrate config if needed
        migrate_config_if_needed(path, events).await?;

        // Read and parse config
        let content = tokio::fs::read_to_string(path).await?;
        let mut config: Config = toml::from_str(&content)?;
        config.apply_env_overrides();

        Ok(config)
    }

    /// Credentials from the environment take precedence over the file.
    fn apply_env_overrides(&mut self) {
        if let Ok(value) = std::env::var(ENV_S3_ACCESS_KEY_ID) {
            if !value.is_empty() {
                tracing::debug!("Using S3 access key id from {}", ENV_S3_ACCESS_KEY_ID);
                self.storage.s3.access_key_id = value;
            }
        }
        if let Ok(value) = std::env::var(ENV_S3_SECRET_ACCESS_KEY) {
            if !value.is_empty() {
                tracing::debug!("Using S3 secret access key from {}", ENV_S3_SECRET_ACCESS_KEY);
                self.storage.s3.secret_access_key = value;
            }
        }
    }
}

/// Creates a default configuration file
async fn create_default_config<P: AsRef<Path>>(path: P) -> Result<(), ConfigError> {
    tokio::fs::write(path, DEFAULT_CONFIG_TEMPLATE).await?;
    Ok(())
}
