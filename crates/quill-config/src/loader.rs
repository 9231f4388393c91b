//! Configuration loader with layered sources.

use crate::AppConfig;
use config::{Config, ConfigError, Environment, File};
use quill_core::QuillError;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Prefix for environment variable overrides (`QUILL_SERVER__PORT=8080`).
pub const ENV_PREFIX: &str = "QUILL";

/// Configuration loader with runtime refresh support.
#[derive(Clone)]
pub struct ConfigLoader {
    config: Arc<RwLock<AppConfig>>,
    config_dir: String,
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    ///
    /// Configuration is loaded from multiple sources in order:
    /// 1. `config/default.toml` - Default values
    /// 2. `config/{environment}.toml` - Environment-specific overrides
    /// 3. `config/local.toml` - Local overrides (not committed)
    /// 4. Environment variables with `QUILL_` prefix
    pub fn new(config_dir: impl Into<String>) -> Result<Self, QuillError> {
        let config_dir = config_dir.into();
        let config = Self::load_config(&config_dir)?;

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            config_dir,
        })
    }

    /// Loads configuration from the default location (`./config`).
    pub fn from_default_location() -> Result<Self, QuillError> {
        Self::new("./config")
    }

    /// Returns the current configuration.
    pub async fn get(&self) -> AppConfig {
        self.config.read().await.clone()
    }

    /// Reloads the configuration from disk.
    pub async fn reload(&self) -> Result<(), QuillError> {
        let new_config = Self::load_config(&self.config_dir)?;
        let mut config = self.config.write().await;
        *config = new_config;
        info!("Configuration reloaded successfully");
        Ok(())
    }

    /// Loads configuration from the specified directory.
    fn load_config(config_dir: &str) -> Result<AppConfig, QuillError> {
        // Load .env file if present
        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file found or error loading it: {}", e);
        }

        let environment =
            std::env::var("QUILL_ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        info!("Loading configuration for environment: {}", environment);

        let mut builder = Config::builder();

        for name in ["default", environment.as_str(), "local"] {
            let path = format!("{}/{}.toml", config_dir, name);
            if Path::new(&path).exists() {
                debug!("Loading config from: {}", path);
                builder = builder.add_source(File::with_name(&path).required(false));
            }
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().map_err(config_error_to_quill_error)?;

        let app_config: AppConfig = config
            .try_deserialize()
            .map_err(config_error_to_quill_error)?;

        Self::validate_config(&app_config)?;

        Ok(app_config)
    }

    /// Validates the configuration.
    fn validate_config(config: &AppConfig) -> Result<(), QuillError> {
        if config.database.url.trim().is_empty() {
            return Err(QuillError::Configuration("Database URL is required".to_string()));
        }

        if config.database.max_connections == 0 {
            return Err(QuillError::Configuration(
                "database.max_connections must be at least 1".to_string(),
            ));
        }

        if config.database.min_connections > config.database.max_connections {
            return Err(QuillError::Configuration(
                "database.min_connections cannot exceed database.max_connections".to_string(),
            ));
        }

        if config.audit.enabled && config.audit.path.as_os_str().is_empty() {
            return Err(QuillError::Configuration(
                "audit.path is required when the audit log is enabled".to_string(),
            ));
        }

        Ok(())
    }
}

fn config_error_to_quill_error(err: ConfigError) -> QuillError {
    QuillError::Configuration(err.to_string())
}
