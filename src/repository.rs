//! # Generic Collection Repository
//!
//! Reconciliation engine between the local store and the remote sheet. One
//! typed instance exists per entity collection; all of them share this generic
//! engine, with the collection identity carried by the [`Record`] associated
//! constants instead of threaded-through sheet-name strings.
//!
//! Semantics:
//!
//! - **Read**: remote-first when an endpoint is configured. A successful fetch
//!   overwrites the local store (remote is authoritative); any transport
//!   failure downgrades silently to the local copy.
//! - **Save/Delete**: local-first. The full collection is written locally,
//!   then mirrored to the remote side as a full-collection replace. A remote
//!   failure never rolls back the local write; it surfaces as a non-fatal
//!   warning on the returned [`WriteOutcome`].
//!
//! Full-collection replace costs O(collection size) network payload per
//! mutation. Target collections are hundreds of rows, not millions; this is a
//! deliberate scalability ceiling that avoids per-record diffing against a
//! spreadsheet backend with no native partial update.
//!
//! Overlapping save/delete calls against the same collection serialize through
//! a per-collection async mutex, so a slow remote replace cannot silently drop
//! a concurrent edit.

use anyhow::Result;
use chrono::{DateTime, Utc};
use log::warn;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::settings_service::SettingsService;
use crate::storage::JsonStore;
use crate::sync::client::SheetTransport;
use crate::sync::error::SheetError;
use crate::sync::signal::SyncSignal;

/// A persisted entity belonging to one named collection.
///
/// The associated constants bind the entity to its local storage key and its
/// remote sheet name at compile time.
pub trait Record: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    const STORAGE_KEY: &'static str;
    const SHEET_NAME: &'static str;

    fn id(&self) -> &str;
    fn created_at(&self) -> Option<DateTime<Utc>>;
    fn set_created_at(&mut self, at: DateTime<Utc>);
    fn set_updated_at(&mut self, at: DateTime<Utc>);
}

/// Result of a save or delete: the refreshed full collection, plus a warning
/// when the change could not be mirrored remotely and is local-only for now.
#[derive(Debug)]
pub struct WriteOutcome<T> {
    pub items: Vec<T>,
    pub sync_warning: Option<String>,
}

impl<T> WriteOutcome<T> {
    pub fn synced(&self) -> bool {
        self.sync_warning.is_none()
    }
}

/// Typed repository over one collection.
pub struct CollectionRepository<T: Record> {
    store: Arc<JsonStore>,
    transport: Arc<dyn SheetTransport>,
    signal: SyncSignal,
    settings: SettingsService,
    write_lock: Arc<Mutex<()>>,
    _entity: PhantomData<fn() -> T>,
}

impl<T: Record> Clone for CollectionRepository<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            transport: self.transport.clone(),
            signal: self.signal.clone(),
            settings: self.settings.clone(),
            write_lock: self.write_lock.clone(),
            _entity: PhantomData,
        }
    }
}

impl<T: Record> CollectionRepository<T> {
    pub fn new(
        store: Arc<JsonStore>,
        transport: Arc<dyn SheetTransport>,
        signal: SyncSignal,
        settings: SettingsService,
    ) -> Self {
        Self {
            store,
            transport,
            signal,
            settings,
            write_lock: Arc::new(Mutex::new(())),
            _entity: PhantomData,
        }
    }

    /// Read the collection, preferring the remote sheet when configured.
    pub async fn get(&self) -> Result<Vec<T>> {
        if let Some(endpoint) = self.sheet_endpoint()? {
            let _syncing = self.signal.begin();
            match self.fetch_remote(&endpoint).await {
                Ok(items) => {
                    // Remote is authoritative; refresh the local tier with it.
                    // A failed refresh only costs the cache, never the read.
                    if let Err(e) = self.store.write(T::STORAGE_KEY, &items) {
                        warn!(
                            "Failed to cache fetched sheet {} locally: {}",
                            T::SHEET_NAME,
                            e
                        );
                    }
                    return Ok(items);
                }
                Err(e) => {
                    warn!(
                        "Failed to fetch sheet {}, falling back to local: {}",
                        T::SHEET_NAME,
                        e
                    );
                }
            }
        }
        self.local()
    }

    /// Read the local snapshot without touching the network.
    pub fn local(&self) -> Result<Vec<T>> {
        self.store.read(T::STORAGE_KEY)
    }

    /// Upsert `item` by id: local write first, then best-effort remote mirror.
    pub async fn save(&self, mut item: T) -> Result<WriteOutcome<T>> {
        let _write = self.write_lock.lock().await;

        let mut items: Vec<T> = self.store.read(T::STORAGE_KEY)?;
        let now = Utc::now();
        let existing = items.iter().position(|i| i.id() == item.id());

        // created_at is set once and never overwritten: backfill it from the
        // stored record when the caller dropped it on an update.
        if item.created_at().is_none() {
            let inherited = existing.and_then(|idx| items[idx].created_at());
            item.set_created_at(inherited.unwrap_or(now));
        }
        item.set_updated_at(now);

        match existing {
            Some(idx) => items[idx] = item,
            None => items.push(item),
        }

        self.store.write(T::STORAGE_KEY, &items)?;
        let sync_warning = self.mirror_remote(&items).await;
        Ok(WriteOutcome {
            items,
            sync_warning,
        })
    }

    /// Remove the record with `id`, if present: local write first, then
    /// best-effort remote mirror of the remaining collection.
    pub async fn delete(&self, id: &str) -> Result<WriteOutcome<T>> {
        let _write = self.write_lock.lock().await;

        let mut items: Vec<T> = self.store.read(T::STORAGE_KEY)?;
        items.retain(|i| i.id() != id);

        self.store.write(T::STORAGE_KEY, &items)?;
        let sync_warning = self.mirror_remote(&items).await;
        Ok(WriteOutcome {
            items,
            sync_warning,
        })
    }

    fn sheet_endpoint(&self) -> Result<Option<String>> {
        let settings = self.settings.get()?;
        Ok(settings
            .google_sheet_url
            .filter(|url| !url.trim().is_empty()))
    }

    async fn fetch_remote(&self, endpoint: &str) -> std::result::Result<Vec<T>, SheetError> {
        let rows = self.transport.fetch_all(endpoint, T::SHEET_NAME).await?;
        rows.into_iter()
            .map(|row| serde_json::from_value(row).map_err(SheetError::from))
            .collect()
    }

    /// Push the entire collection to the remote sheet. Returns a user-facing
    /// warning string on failure instead of an error: the local write has
    /// already succeeded and must not be rolled back.
    async fn mirror_remote(&self, items: &[T]) -> Option<String> {
        let endpoint = match self.sheet_endpoint() {
            Ok(Some(endpoint)) => endpoint,
            Ok(None) => return None,
            Err(e) => {
                warn!("Could not load settings before sync: {}", e);
                return None;
            }
        };

        let _syncing = self.signal.begin();
        let rows: std::result::Result<Vec<_>, _> =
            items.iter().map(serde_json::to_value).collect();
        let rows = match rows {
            Ok(rows) => rows,
            Err(e) => {
                warn!("Could not serialize {} for sync: {}", T::SHEET_NAME, e);
                return Some(format!(
                    "Could not sync to the remote sheet; change saved locally only ({})",
                    e
                ));
            }
        };

        match self
            .transport
            .replace_all(&endpoint, T::SHEET_NAME, rows)
            .await
        {
            Ok(()) => None,
            Err(e) => {
                warn!(
                    "Failed to sync sheet {}, change saved locally only: {}",
                    T::SHEET_NAME,
                    e
                );
                Some(format!(
                    "Could not sync to the remote sheet; change saved locally only ({})",
                    e
                ))
            }
        }
    }
}
