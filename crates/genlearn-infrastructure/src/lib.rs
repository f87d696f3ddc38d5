//! Local persistence and configuration for the GenLearn client.

pub mod config;
pub mod paths;
pub mod settings_repository;
pub mod storage;
pub mod token_store;

pub use crate::config::ClientConfig;
pub use crate::paths::GenlearnPaths;
pub use crate::settings_repository::TomlSettingsRepository;
pub use crate::token_store::FileTokenStore;
