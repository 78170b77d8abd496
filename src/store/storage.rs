use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

use crate::store::StoreError;

/// Per-device key/value document storage. Each key holds one whole document.
pub trait Storage {
    /// Returns `Ok(None)` when nothing has been stored under `key` yet.
    fn read(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn write(&mut self, key: &str, contents: &str) -> Result<(), StoreError>;
}

/// Stores each key as `<key>.json` under a base directory.
pub struct FileStorage {
    base_dir: PathBuf,
}

impl FileStorage {
    pub fn with_base_dir(base_dir: PathBuf) -> Result<Self, StoreError> {
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    pub fn file_path(&self, key: &str) -> PathBuf {
        self.base_dir.join(format!("{key}.json"))
    }
}

impl Storage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.file_path(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(&path)?))
    }

    fn write(&mut self, key: &str, contents: &str) -> Result<(), StoreError> {
        let path = self.file_path(key);
        let tmp_path = path.with_extension("json.tmp");

        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(contents.as_bytes())?;
        file.sync_all()?;

        fs::rename(&tmp_path, &path)?;
        Ok(())
    }
}

/// In-process storage, used by tests and embedders without a filesystem.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    docs: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.docs.get(key).map(String::as_str)
    }
}

impl Storage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.docs.get(key).cloned())
    }

    fn write(&mut self, key: &str, contents: &str) -> Result<(), StoreError> {
        self.docs.insert(key.to_string(), contents.to_string());
        Ok(())
    }
}
