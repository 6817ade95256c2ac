//! File-backed key-value store.
//!
//! One JSON object per store file, read once on open and rewritten in full
//! on every `set`. Snapshots are small, so full rewrites keep the on-disk
//! copy consistent without a journal.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::RwLock;

use aoimap_core::ports::KeyValueStore;
use aoimap_core::{AoimapError, Result};

/// File-backed implementation of `KeyValueStore`
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: RwLock<HashMap<String, String>>,
}

impl FileStore {
    /// Open the store at `path`, loading existing entries.
    ///
    /// A missing file starts empty. A file that exists but does not parse
    /// also starts empty, with a warning; the next `set` overwrites it.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(entries) => entries,
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "store file unreadable, starting empty"
                    );
                    HashMap::new()
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(AoimapError::Io(e)),
        };
        Ok(Self { path, entries: RwLock::new(entries) })
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    fn flush(&self, entries: &HashMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(entries)
            .map_err(|e| AoimapError::Serialization(e.to_string()))?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.read().unwrap().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.write().unwrap();
        entries.insert(key.to_string(), value.to_string());
        self.flush(&entries)
    }
}
