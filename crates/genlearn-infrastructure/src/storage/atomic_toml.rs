//! Atomic TOML file operations.
//!
//! Writes go to a sibling tmp file, are fsynced, then renamed over the
//! target while an exclusive `fs2` lock on `<name>.lock` is held.

use genlearn_core::GenlearnError;
use serde::{Serialize, de::DeserializeOwned};
use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum AtomicTomlError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("TOML serialization error: {0}")]
    Render(#[from] toml::ser::Error),
    #[error("Lock error: {0}")]
    Lock(String),
}

impl From<AtomicTomlError> for GenlearnError {
    fn from(e: AtomicTomlError) -> Self {
        match e {
            AtomicTomlError::Io(e) => e.into(),
            AtomicTomlError::Parse(e) => e.into(),
            AtomicTomlError::Render(e) => e.into(),
            AtomicTomlError::Lock(message) => GenlearnError::io(message),
        }
    }
}

/// Handle to a TOML file that is never observed half-written.
pub struct AtomicTomlFile<T> {
    path: PathBuf,
    _phantom: PhantomData<T>,
}

impl<T> AtomicTomlFile<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _phantom: PhantomData,
        }
    }

    /// Loads and deserializes the file.
    ///
    /// Returns `Ok(None)` when the file is missing or blank.
    pub fn load(&self) -> Result<Option<T>, AtomicTomlError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(None);
        }

        let data: T = toml::from_str(&content)?;
        Ok(Some(data))
    }

    /// Serializes `data` and replaces the file atomically, holding the lock
    /// file for the duration of the write.
    pub fn save(&self, data: &T) -> Result<(), AtomicTomlError> {
        let rendered = toml::to_string_pretty(data)?;
        let _lock = FileLock::acquire(&self.path)?;

        let tmp_path = self.temp_path()?;
        let mut tmp = File::create(&tmp_path)?;
        tmp.write_all(rendered.as_bytes())?;
        tmp.sync_all()?;
        drop(tmp);

        fs::rename(&tmp_path, &self.path)?;
        debug!(path = %self.path.display(), bytes = rendered.len(), "TOML file replaced");
        Ok(())
    }

    /// Deletes the file. Missing files are not an error.
    pub fn remove(&self) -> Result<(), AtomicTomlError> {
        let _lock = FileLock::acquire(&self.path)?;
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn temp_path(&self) -> Result<PathBuf, AtomicTomlError> {
        match (self.path.parent(), self.path.file_name()) {
            (Some(dir), Some(name)) => Ok(dir.join(format!(".{}.tmp", name.to_string_lossy()))),
            _ => Err(AtomicTomlError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("Not a file path: {}", self.path.display()),
            ))),
        }
    }
}

/// Exclusive lock on `<file>.lock`, released and removed on drop.
struct FileLock {
    #[allow(dead_code)]
    file: File,
    lock_path: PathBuf,
}

impl FileLock {
    /// Creates missing parent directories as a side effect.
    fn acquire(path: &Path) -> Result<Self, AtomicTomlError> {
        if let Some(dir) = path.parent().filter(|d| !d.exists()) {
            fs::create_dir_all(dir)?;
        }
        let lock_path = path.with_extension("lock");
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        #[cfg(unix)]
        {
            use fs2::FileExt;
            file.lock_exclusive()
                .map_err(|e| AtomicTomlError::Lock(format!("{}: {}", lock_path.display(), e)))?;
        }

        Ok(FileLock { file, lock_path })
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.lock_path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Counter {
        label: String,
        hits: u32,
    }

    #[test]
    fn test_save_then_load() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicTomlFile::<Counter>::new(temp_dir.path().join("nested/counter.toml"));

        file.save(&Counter {
            label: "quiz".into(),
            hits: 3,
        })
        .unwrap();

        let loaded = file.load().unwrap().unwrap();
        assert_eq!(loaded.hits, 3);
        assert!(!temp_dir.path().join("nested/.counter.toml.tmp").exists());
    }

    #[test]
    fn test_missing_and_blank_files_load_as_none() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("counter.toml");
        let file = AtomicTomlFile::<Counter>::new(path.clone());
        assert!(file.load().unwrap().is_none());

        fs::write(&path, "   \n").unwrap();
        assert!(file.load().unwrap().is_none());
    }

    #[test]
    fn test_save_replaces_previous_contents_and_releases_lock() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicTomlFile::<Counter>::new(temp_dir.path().join("counter.toml"));

        for hits in [1, 7] {
            file.save(&Counter {
                label: "streak".into(),
                hits,
            })
            .unwrap();
        }

        assert_eq!(file.load().unwrap().unwrap().hits, 7);
        assert!(!temp_dir.path().join("counter.lock").exists());
    }

    #[test]
    fn test_remove_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicTomlFile::<Counter>::new(temp_dir.path().join("counter.toml"));
        file.remove().unwrap();
        file.save(&Counter {
            label: "x".into(),
            hits: 1,
        })
        .unwrap();
        file.remove().unwrap();
        assert!(file.load().unwrap().is_none());
    }

    #[test]
    fn test_corrupt_file_maps_to_serialization_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("counter.toml");
        fs::write(&path, "label = [unterminated").unwrap();
        let err: GenlearnError = AtomicTomlFile::<Counter>::new(path).load().unwrap_err().into();
        assert!(err.is_serialization());
    }
}
