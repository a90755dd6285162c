//! # Settings Service
//!
//! Access to the [`AppSettings`] singleton. Settings are read and written
//! independently of the entity collections and inform repository behavior:
//! a configured sheet URL switches remote sync on.

use anyhow::Result;
use log::info;
use std::sync::Arc;

use crate::domain::models::AppSettings;
use crate::storage::JsonStore;

/// Storage key for the settings singleton.
const SETTINGS_KEY: &str = "settings";

#[derive(Clone)]
pub struct SettingsService {
    store: Arc<JsonStore>,
}

impl SettingsService {
    pub fn new(store: Arc<JsonStore>) -> Self {
        Self { store }
    }

    /// Load settings, merging the stored blob over documented defaults.
    ///
    /// A missing blob yields pure defaults; a blob written by an older version
    /// of the application deserializes with defaults filled in for fields it
    /// does not know about.
    pub fn get(&self) -> Result<AppSettings> {
        Ok(self
            .store
            .read_object::<AppSettings>(SETTINGS_KEY)?
            .unwrap_or_default())
    }

    pub fn save(&self, settings: &AppSettings) -> Result<()> {
        self.store.write_object(SETTINGS_KEY, settings)?;
        info!("Saved application settings");
        Ok(())
    }
}
