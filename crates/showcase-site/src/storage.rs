//! Per-client key/value store backed by a JSON file.
//!
//! Failures of the backing file never reach callers: they are logged and the
//! store keeps working from memory, behaving as empty when the file could not
//! be read.

use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, warn};

/// File name used inside the data directory.
pub const STORE_FILE: &str = "storage.json";

/// String key/value store.
pub struct Storage {
    path: Option<PathBuf>,
    entries: Mutex<BTreeMap<String, String>>,
}

impl Storage {
    /// Open the store at `path`, creating it on first write.
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let entries = match load(&path) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Store at {} unreadable, starting empty: {}", path.display(), e);
                BTreeMap::new()
            }
        };
        debug!("Opened store at {} with {} keys", path.display(), entries.len());

        Self {
            path: Some(path),
            entries: Mutex::new(entries),
        }
    }

    /// Open `STORE_FILE` inside `dir`.
    pub fn open_in<P: AsRef<Path>>(dir: P) -> Self {
        Self::open(dir.as_ref().join(STORE_FILE))
    }

    /// A store that never touches the filesystem.
    pub fn in_memory() -> Self {
        Self {
            path: None,
            entries: Mutex::new(BTreeMap::new()),
        }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.entries().get(key).cloned()
    }

    pub fn set(&self, key: &str, value: &str) {
        let mut entries = self.entries();
        entries.insert(key.to_string(), value.to_string());
        self.persist(&entries);
    }

    /// Remove `key`, returning the old value.
    pub fn remove(&self, key: &str) -> Option<String> {
        let mut entries = self.entries();
        let old = entries.remove(key);
        if old.is_some() {
            self.persist(&entries);
        }
        old
    }

    pub fn keys(&self) -> Vec<String> {
        self.entries().keys().cloned().collect()
    }

    fn entries(&self) -> MutexGuard<'_, BTreeMap<String, String>> {
        // A poisoned lock still holds a consistent map
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn persist(&self, entries: &BTreeMap<String, String>) {
        let Some(path) = &self.path else {
            return;
        };
        if let Err(e) = save(path, entries) {
            warn!("Failed to write store at {}: {}", path.display(), e);
        }
    }
}

fn load(path: &Path) -> Result<BTreeMap<String, String>> {
    match fs::read(path) {
        Ok(data) => Ok(serde_json::from_slice(&data)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
        Err(e) => Err(e.into()),
    }
}

fn save(path: &Path, entries: &BTreeMap<String, String>) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let data = serde_json::to_vec_pretty(entries)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, data)?;
    fs::rename(&tmp, path).map_err(|e| Error::Storage(format!("rename failed: {}", e)))
}
