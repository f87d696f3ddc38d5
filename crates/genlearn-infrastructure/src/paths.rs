//! Path management for GenLearn client files.
//!
//! ```text
//! ~/.config/genlearn/
//! ├── config.toml     # ClientConfig
//! ├── settings.toml   # UserSettings
//! └── auth.toml       # bearer token
//! ```

use std::path::{Path, PathBuf};

pub const APP_DIR_NAME: &str = "genlearn";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Platform config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find the platform config directory"),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for genlearn_core::GenlearnError {
    fn from(e: PathError) -> Self {
        genlearn_core::GenlearnError::config(e.to_string())
    }
}

/// Resolved locations of the client's files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenlearnPaths {
    root: PathBuf,
}

impl GenlearnPaths {
    /// Uses `dirs::config_dir()/genlearn`.
    pub fn platform() -> Result<Self, PathError> {
        let base = dirs::config_dir().ok_or(PathError::ConfigDirNotFound)?;
        Ok(Self::with_root(base.join(APP_DIR_NAME)))
    }

    /// Uses an explicit directory, e.g. from `--config-dir`.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_file(&self) -> PathBuf {
        self.root.join("config.toml")
    }

    pub fn settings_file(&self) -> PathBuf {
        self.root.join("settings.toml")
    }

    pub fn auth_file(&self) -> PathBuf {
        self.root.join("auth.toml")
    }
}
