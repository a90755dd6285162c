//! # JSON Store
//!
//! File-backed key-value store where each key holds either an ordered array of
//! records (one collection) or a single JSON object (the settings singleton).
//!
//! ## File Structure
//!
//! ```text
//! data/
//! ├── invoices.json
//! ├── expenses.json
//! ├── ...
//! └── settings.json
//! ```
//!
//! ## Features
//!
//! - Missing keys read as empty collections, never as errors
//! - In-memory cache populated on first read and updated on every write
//! - Atomic file writes with temp files

use anyhow::Result;
use log::{debug, info};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// File-backed store with an in-memory cache.
pub struct JsonStore {
    base_dir: PathBuf,
    cache: Mutex<HashMap<String, Value>>,
}

impl JsonStore {
    /// Open a store rooted at `base_dir`, creating the directory if needed.
    pub fn new(base_dir: impl Into<PathBuf>) -> Result<Self> {
        let base_dir = base_dir.into();
        if !base_dir.exists() {
            fs::create_dir_all(&base_dir)?;
            info!("Created data directory: {:?}", base_dir);
        }
        Ok(Self {
            base_dir,
            cache: Mutex::new(HashMap::new()),
        })
    }

    /// The directory this store persists into.
    pub fn base_directory(&self) -> &Path {
        &self.base_dir
    }

    fn file_path(&self, key: &str) -> PathBuf {
        self.base_dir.join(format!("{}.json", key))
    }

    /// Read the collection stored under `key`.
    ///
    /// Returns the cached value when present, otherwise deserializes from disk
    /// and populates the cache. A missing file yields an empty collection.
    pub fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>> {
        match self.read_raw(key)? {
            Some(value) => Ok(serde_json::from_value(value)?),
            None => Ok(Vec::new()),
        }
    }

    /// Replace the collection stored under `key`, updating cache and disk.
    pub fn write<T: Serialize>(&self, key: &str, items: &[T]) -> Result<()> {
        self.write_raw(key, serde_json::to_value(items)?)
    }

    /// Read a singleton object stored under `key`, if any.
    pub fn read_object<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.read_raw(key)? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    /// Replace the singleton object stored under `key`.
    pub fn write_object<T: Serialize>(&self, key: &str, object: &T) -> Result<()> {
        self.write_raw(key, serde_json::to_value(object)?)
    }

    fn read_raw(&self, key: &str) -> Result<Option<Value>> {
        {
            let cache = self.cache.lock().expect("store cache lock poisoned");
            if let Some(value) = cache.get(key) {
                return Ok(Some(value.clone()));
            }
        }

        let path = self.file_path(key);
        if !path.exists() {
            debug!("No file for key '{}', treating as empty", key);
            return Ok(None);
        }

        let contents = fs::read_to_string(&path)?;
        let value: Value = serde_json::from_str(&contents)?;
        debug!("Loaded key '{}' from {:?}", key, path);

        let mut cache = self.cache.lock().expect("store cache lock poisoned");
        cache.insert(key.to_string(), value.clone());
        Ok(Some(value))
    }

    fn write_raw(&self, key: &str, value: Value) -> Result<()> {
        let path = self.file_path(key);
        let contents = serde_json::to_string(&value)?;

        // Atomic write pattern: write to temp file, then rename.
        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, contents)?;
        fs::rename(&temp_path, &path)?;
        debug!("Saved key '{}' to {:?}", key, path);

        let mut cache = self.cache.lock().expect("store cache lock poisoned");
        cache.insert(key.to_string(), value);
        Ok(())
    }
}
