//! File-backed key/value store
//!
//! One `<key>.json` file per key inside a data directory. Writes go to a
//! `.tmp` sibling first and are renamed into place, so a slot is either
//! the old value or the new one.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::domain::{DomainError, DomainResult};
use super::traits::KeyValueStore;

#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> DomainResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| {
            DomainError::Storage(format!("Failed to create data dir {}: {}", dir.display(), e))
        })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding `key`
    pub fn path_for(&self, key: &str) -> DomainResult<PathBuf> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

fn validate_key(key: &str) -> DomainResult<()> {
    if key.trim().is_empty() {
        return Err(DomainError::InvalidInput("storage key must not be empty".to_string()));
    }
    if key.contains(['/', '\\']) || key == "." || key == ".." {
        return Err(DomainError::InvalidInput(format!(
            "storage key '{}' must not contain path separators",
            key
        )));
    }
    Ok(())
}

impl KeyValueStore for FileStore {
    fn get_item(&self, key: &str) -> DomainResult<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(DomainError::Storage(format!("Failed to read {}: {}", path.display(), e))),
        }
    }

    fn set_item(&mut self, key: &str, value: &str) -> DomainResult<()> {
        let path = self.path_for(key)?;
        let tmp = path.with_extension("json.tmp");

        let write_atomically = || -> io::Result<()> {
            let mut file = fs::File::create(&tmp)?;
            file.write_all(value.as_bytes())?;
            file.sync_all()?;
            fs::rename(&tmp, &path)
        };
        write_atomically().map_err(|e| {
            let _ = fs::remove_file(&tmp);
            DomainError::Storage(format!("Failed to write {}: {}", path.display(), e))
        })?;

        log::debug!("[FileStore] Wrote {} byte(s) to {}", value.len(), path.display());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> DomainResult<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(DomainError::Storage(format!("Failed to remove {}: {}", path.display(), e))),
        }
    }
}
