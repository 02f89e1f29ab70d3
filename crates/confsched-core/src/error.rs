//! Error types for the confsched workspace.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Every failure a confsched operation or stream can report.
///
/// Errors are `Clone` so that a terminal failure can be published through a
/// watch channel to every subscriber of the merged session stream.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfschedError {
    /// Local file could not be read or written
    #[error("IO error: {message}")]
    Io { message: String },

    /// A stored file or remote payload did not decode
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    /// A subscribed data source failed or stopped emitting
    #[error("Source unavailable: {source_name} - {message}")]
    SourceUnavailable {
        source_name: String,
        message: String,
    },

    /// Remote API call failed
    #[error("Transport failure: {0}")]
    Transport(String),
}

impl ConfschedError {
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn source_unavailable(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SourceUnavailable {
            source_name: source_name.into(),
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    fn serialization(format: &str, message: impl ToString) -> Self {
        Self::Serialization {
            format: format.to_string(),
            message: message.to_string(),
        }
    }

    pub fn is_serialization(&self) -> bool {
        matches!(self, Self::Serialization { .. })
    }

    pub fn is_source_unavailable(&self) -> bool {
        matches!(self, Self::SourceUnavailable { .. })
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Wraps a stream-level failure so subscribers see which source broke.
    ///
    /// Errors that already name a source are passed through unchanged.
    pub fn into_source_error(self, source_name: &str) -> Self {
        match self {
            Self::SourceUnavailable { .. } => self,
            other => Self::source_unavailable(source_name, other.to_string()),
        }
    }
}

impl From<std::io::Error> for ConfschedError {
    fn from(err: std::io::Error) -> Self {
        Self::io(format!("{} (kind: {:?})", err, err.kind()))
    }
}

impl From<serde_json::Error> for ConfschedError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization("JSON", err)
    }
}

impl From<toml::de::Error> for ConfschedError {
    fn from(err: toml::de::Error) -> Self {
        Self::serialization("TOML", err)
    }
}

impl From<reqwest::Error> for ConfschedError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::serialization("JSON", err)
        } else {
            Self::Transport(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, ConfschedError>;
