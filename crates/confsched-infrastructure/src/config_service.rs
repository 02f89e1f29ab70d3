//! Configuration service implementation.
//!
//! Loads the root configuration from `~/.config/confsched/config.toml`.

use crate::paths::{ConfschedPaths, ServiceType};
use confsched_core::config::AppConfig;
use confsched_core::error::Result;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Configuration service that loads and caches the root configuration.
///
/// A missing or empty file yields `AppConfig::default()`. A malformed file
/// is reported as a serialization error rather than silently ignored.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
    config: Arc<RwLock<Option<AppConfig>>>,
}

impl ConfigService {
    /// Creates a service reading the default config file location.
    pub fn new() -> Result<Self> {
        let path = ConfschedPaths::default().get_path(ServiceType::Config)?;
        Ok(Self::with_path(path))
    }

    /// Creates a service reading an explicit file.
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            path,
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Gets the root configuration, loading from file if not cached.
    pub async fn get_config(&self) -> Result<AppConfig> {
        if let Some(cached) = self.config.read().await.as_ref() {
            return Ok(cached.clone());
        }

        let loaded = self.load_config().await?;
        *self.config.write().await = Some(loaded.clone());
        Ok(loaded)
    }

    async fn load_config(&self) -> Result<AppConfig> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("Config file {:?} not found, using defaults", self.path);
                return Ok(AppConfig::default());
            }
            Err(e) => return Err(e.into()),
        };

        if content.trim().is_empty() {
            return Ok(AppConfig::default());
        }

        let config: AppConfig = toml::from_str(&content)?;
        tracing::debug!("Loaded config from {:?}", self.path);
        Ok(config)
    }
}
