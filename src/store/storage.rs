use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::StoreError;

/// String blobs by key, the device key-value storage the stores sit on.
pub trait KeyValueStorage: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// One `<key>.json` file per key inside a data directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    base_directory: PathBuf,
}

impl FileStorage {
    pub fn new(base_directory: impl Into<PathBuf>) -> Self {
        Self {
            base_directory: base_directory.into(),
        }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.base_directory.join(format!("{}.json", key))
    }
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> StoreError + '_ {
    move |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        fs::read_to_string(&path).map(Some).map_err(io_error(&path))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        fs::create_dir_all(&self.base_directory).map_err(io_error(&self.base_directory))?;
        let path = self.path_for(key);
        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, value).map_err(io_error(&temp_path))?;
        fs::rename(&temp_path, &path).map_err(io_error(&path))
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key);
        if path.exists() {
            fs::remove_file(&path).map_err(io_error(&path))?;
        }
        Ok(())
    }
}

/// In-process storage for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self.entries.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().map_err(|_| StoreError::Poisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().map_err(|_| StoreError::Poisoned)?;
        entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use tempfile::TempDir;

    #[test]
    fn test_file_storage_round_trip() -> Result<()> {
        let dir = TempDir::new()?;
        let storage = FileStorage::new(dir.path().join("nested"));
        assert_eq!(storage.get("planner-user-storage")?, None);

        storage.set("planner-user-storage", "{\"a\":1}")?;
        assert!(dir.path().join("nested/planner-user-storage.json").exists());
        assert!(!dir.path().join("nested/planner-user-storage.json.tmp").exists());
        assert_eq!(storage.get("planner-user-storage")?.as_deref(), Some("{\"a\":1}"));

        storage.set("planner-user-storage", "{}")?;
        assert_eq!(storage.get("planner-user-storage")?.as_deref(), Some("{}"));

        storage.remove("planner-user-storage")?;
        storage.remove("planner-user-storage")?;
        assert_eq!(storage.get("planner-user-storage")?, None);
        Ok(())
    }

    #[test]
    fn test_memory_storage_keys_are_independent() -> Result<()> {
        let storage = MemoryStorage::new();
        storage.set("a", "1")?;
        storage.set("b", "2")?;
        storage.remove("a")?;
        assert_eq!(storage.get("a")?, None);
        assert_eq!(storage.get("b")?.as_deref(), Some("2"));
        Ok(())
    }
}
