//! Unified path management for confsched files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/confsched/         # Config directory
//! └── config.toml              # Application configuration
//!
//! ~/.local/share/confsched/    # Data directory
//! ├── conference.json          # Sessions, speakers and feedback
//! └── favorites.json           # Favorite session ids
//! ```

use std::path::{Path, PathBuf};

use confsched_core::error::{ConfschedError, Result};

const APP_DIR: &str = "confsched";

/// Files managed by the infrastructure layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceType {
    Config,
    Conference,
    Favorites,
}

impl ServiceType {
    fn file_name(self) -> &'static str {
        match self {
            ServiceType::Config => "config.toml",
            ServiceType::Conference => "conference.json",
            ServiceType::Favorites => "favorites.json",
        }
    }
}

/// Resolves confsched paths, optionally rooted at an explicit base directory.
///
/// With a base directory (tests, `storage.data_dir` override) every file
/// lives directly inside it. Without one, the platform config and data
/// directories are used.
#[derive(Debug, Clone, Default)]
pub struct ConfschedPaths {
    base_dir: Option<PathBuf>,
}

impl ConfschedPaths {
    pub fn new(base_dir: Option<&Path>) -> Self {
        Self {
            base_dir: base_dir.map(Path::to_path_buf),
        }
    }

    /// Returns the confsched configuration directory.
    pub fn config_dir(&self) -> Result<PathBuf> {
        match &self.base_dir {
            Some(base) => Ok(base.clone()),
            None => dirs::config_dir()
                .map(|dir| dir.join(APP_DIR))
                .ok_or_else(|| ConfschedError::config("Cannot find config directory")),
        }
    }

    /// Returns the confsched data directory.
    pub fn data_dir(&self) -> Result<PathBuf> {
        match &self.base_dir {
            Some(base) => Ok(base.clone()),
            None => dirs::data_dir()
                .map(|dir| dir.join(APP_DIR))
                .ok_or_else(|| ConfschedError::config("Cannot find data directory")),
        }
    }

    /// Returns the file path for the given service.
    pub fn get_path(&self, service: ServiceType) -> Result<PathBuf> {
        let dir = match service {
            ServiceType::Config => self.config_dir()?,
            ServiceType::Conference | ServiceType::Favorites => self.data_dir()?,
        };
        Ok(dir.join(service.file_name()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_dir_override() {
        let paths = ConfschedPaths::new(Some(Path::new("/tmp/confsched-test")));
        assert_eq!(
            paths.get_path(ServiceType::Conference).unwrap(),
            PathBuf::from("/tmp/confsched-test/conference.json")
        );
        assert_eq!(
            paths.get_path(ServiceType::Config).unwrap(),
            PathBuf::from("/tmp/confsched-test/config.toml")
        );
    }

    #[test]
    fn test_default_paths_end_with_app_dir() {
        let paths = ConfschedPaths::default();
        if let Ok(dir) = paths.data_dir() {
            assert!(dir.ends_with(APP_DIR));
        }
        if let Ok(file) = paths.get_path(ServiceType::Favorites) {
            assert!(file.ends_with("favorites.json"));
        }
    }
}
