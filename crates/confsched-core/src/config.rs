//! Application configuration model.
//!
//! The file lives at `~/.config/confsched/config.toml`; see
//! `confsched_infrastructure::config_service` for loading.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default endpoint serving the conference session dataset.
pub const DEFAULT_SESSIONS_URL: &str = "https://api.droidkaigi.jp/2020/sessions";

/// Default endpoint accepting session feedback form posts.
pub const DEFAULT_FEEDBACK_FORM_URL: &str =
    "https://docs.google.com/forms/d/e/confsched-feedback/formResponse";

/// Root configuration.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    /// Default tracing filter, overridden by `RUST_LOG`.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            storage: StorageConfig::default(),
            log_level: default_log_level(),
        }
    }
}

/// Remote endpoints.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ApiConfig {
    #[serde(default = "default_sessions_url")]
    pub sessions_url: String,
    #[serde(default = "default_feedback_form_url")]
    pub feedback_form_url: String,
    /// Request timeout in seconds for both endpoints.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            sessions_url: default_sessions_url(),
            feedback_form_url: default_feedback_form_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Local persistence settings.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct StorageConfig {
    /// Overrides the platform data directory when set.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_sessions_url() -> String {
    DEFAULT_SESSIONS_URL.to_string()
}

fn default_feedback_form_url() -> String {
    DEFAULT_FEEDBACK_FORM_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
[api]
sessions_url = "http://localhost:8080/sessions"
"#,
        )
        .unwrap();

        assert_eq!(config.api.sessions_url, "http://localhost:8080/sessions");
        assert_eq!(config.api.feedback_form_url, DEFAULT_FEEDBACK_FORM_URL);
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.log_level, "info");
        assert!(config.storage.data_dir.is_none());
    }
}
