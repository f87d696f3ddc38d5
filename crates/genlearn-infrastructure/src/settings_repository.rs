//! TOML-backed settings persistence.

use crate::storage::AtomicTomlFile;
use genlearn_core::Result;
use genlearn_core::user::{SettingsRepository, UserSettings};
use std::path::PathBuf;

/// Persists [`UserSettings`] to `settings.toml`.
pub struct TomlSettingsRepository {
    file: AtomicTomlFile<UserSettings>,
}

impl TomlSettingsRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: AtomicTomlFile::new(path),
        }
    }
}

impl SettingsRepository for TomlSettingsRepository {
    fn load(&self) -> Result<Option<UserSettings>> {
        Ok(self.file.load()?)
    }

    fn save(&self, settings: &UserSettings) -> Result<()> {
        Ok(self.file.save(settings)?)
    }
}
