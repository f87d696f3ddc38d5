//! File-backed bearer token storage.

use crate::storage::AtomicTomlFile;
use chrono::Utc;
use genlearn_core::Result;
use genlearn_core::auth::TokenStore;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::RwLock;
use tracing::debug;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct AuthFile {
    access_token: String,
    saved_at: String,
}

/// Keeps the bearer token in `auth.toml`, with an in-memory copy so every
/// request does not hit the disk.
pub struct FileTokenStore {
    file: AtomicTomlFile<AuthFile>,
    cached: RwLock<Option<Option<String>>>,
}

impl FileTokenStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: AtomicTomlFile::new(path),
            cached: RwLock::new(None),
        }
    }

    fn set_cache(&self, value: Option<String>) {
        if let Ok(mut cached) = self.cached.write() {
            *cached = Some(value);
        }
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<String>> {
        if let Ok(cached) = self.cached.read() {
            if let Some(token) = cached.as_ref() {
                return Ok(token.clone());
            }
        }
        let token = self.file.load()?.map(|f| f.access_token);
        self.set_cache(token.clone());
        Ok(token)
    }

    fn save(&self, token: &str) -> Result<()> {
        self.file.save(&AuthFile {
            access_token: token.to_string(),
            saved_at: Utc::now().to_rfc3339(),
        })?;
        self.set_cache(Some(token.to_string()));
        debug!("Access token stored");
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.file.remove()?;
        self.set_cache(None);
        debug!("Access token cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_token_round_trip_and_clear() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("auth.toml");
        let store = FileTokenStore::new(path.clone());
        assert_eq!(store.load().unwrap(), None);

        store.save("jwt-abc").unwrap();
        assert_eq!(FileTokenStore::new(path.clone()).load().unwrap().as_deref(), Some("jwt-abc"));

        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
        assert!(!path.exists());
    }
}
