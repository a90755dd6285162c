//! Shared test fixtures: a scriptable in-memory transport and repository
//! wiring over a temp-dir store.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use uuid::Uuid;

use crate::domain::models::{AppSettings, Client, Expense, Invoice, InvoiceKind, InvoiceStatus};
use crate::domain::settings_service::SettingsService;
use crate::repository::{CollectionRepository, Record};
use crate::storage::JsonStore;
use crate::sync::client::SheetTransport;
use crate::sync::error::{Result as SheetResult, SheetError};
use crate::sync::signal::SyncSignal;

/// Transport double: scripted fetch outcomes, captured push payloads.
#[derive(Default)]
pub struct MockTransport {
    fetches: Mutex<VecDeque<SheetResult<Vec<Value>>>>,
    fetch_calls: AtomicUsize,
    pushes: Mutex<Vec<(String, Vec<Value>)>>,
    push_failure: AtomicBool,
    push_delay_ms: AtomicU64,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Queue the outcome of the next fetch.
    pub fn script_fetch(&self, outcome: SheetResult<Vec<Value>>) {
        self.fetches.lock().unwrap().push_back(outcome);
    }

    pub fn fetch_count(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    /// Every captured replace-all call as (sheet, rows).
    pub fn pushes(&self) -> Vec<(String, Vec<Value>)> {
        self.pushes.lock().unwrap().clone()
    }

    /// Make subsequent replace-all calls fail.
    pub fn fail_pushes(&self, fail: bool) {
        self.push_failure.store(fail, Ordering::SeqCst);
    }

    /// Make subsequent replace-all calls sleep, simulating a slow endpoint.
    pub fn delay_pushes(&self, millis: u64) {
        self.push_delay_ms.store(millis, Ordering::SeqCst);
    }
}

#[async_trait]
impl SheetTransport for MockTransport {
    async fn fetch_all(&self, _endpoint: &str, _sheet: &str) -> SheetResult<Vec<Value>> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        self.fetches
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(SheetError::protocol("no scripted fetch outcome")))
    }

    async fn replace_all(&self, _endpoint: &str, sheet: &str, rows: Vec<Value>) -> SheetResult<()> {
        let delay = self.push_delay_ms.load(Ordering::SeqCst);
        if delay > 0 {
            tokio::time::sleep(std::time::Duration::from_millis(delay)).await;
        }
        if self.push_failure.load(Ordering::SeqCst) {
            return Err(SheetError::status(500, "scripted push failure"));
        }
        self.pushes.lock().unwrap().push((sheet.to_string(), rows));
        Ok(())
    }
}

/// One wired repository plus the collaborators behind it.
pub struct Fixture<T: Record> {
    pub repo: CollectionRepository<T>,
    pub store: Arc<JsonStore>,
    pub transport: Arc<MockTransport>,
    pub signal: SyncSignal,
    pub settings: SettingsService,
    pub _temp_dir: TempDir,
}

impl<T: Record> Fixture<T> {
    /// A sibling repository for another collection sharing the same store,
    /// transport, signal and settings.
    pub fn sibling<U: Record>(&self) -> CollectionRepository<U> {
        CollectionRepository::new(
            self.store.clone(),
            self.transport.clone(),
            self.signal.clone(),
            self.settings.clone(),
        )
    }
}

/// Build a repository over a fresh temp-dir store, with remote sync switched
/// on when `sheet_url` is given.
pub fn repository_fixture<T: Record>(sheet_url: Option<&str>) -> Fixture<T> {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let store = Arc::new(JsonStore::new(temp_dir.path()).expect("Failed to create store"));
    let transport = MockTransport::new();
    let signal = SyncSignal::new();
    let settings = SettingsService::new(store.clone());

    if let Some(url) = sheet_url {
        let mut app_settings = AppSettings::default();
        app_settings.google_sheet_url = Some(url.to_string());
        settings.save(&app_settings).expect("Failed to seed settings");
    }

    let repo = CollectionRepository::new(
        store.clone(),
        transport.clone(),
        signal.clone(),
        settings.clone(),
    );
    Fixture {
        repo,
        store,
        transport,
        signal,
        settings,
        _temp_dir: temp_dir,
    }
}

pub fn client_named(name: &str) -> Client {
    Client {
        id: Uuid::new_v4().to_string(),
        name: name.to_string(),
        company_name: None,
        email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
        phone: "555-0100".to_string(),
        address: "1 Main St".to_string(),
        tax_id: None,
        website: None,
        notes: None,
        created_at: None,
        updated_at: None,
    }
}

pub fn invoice_numbered(kind: InvoiceKind, number: &str) -> Invoice {
    Invoice {
        id: Uuid::new_v4().to_string(),
        kind,
        number: number.to_string(),
        date: chrono::NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        due_date: chrono::NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
        client_name: "Acme".to_string(),
        client_email: "billing@acme.example".to_string(),
        client_address: None,
        items: Vec::new(),
        notes: None,
        status: InvoiceStatus::Draft,
        subtotal: 100.0,
        tax_rate: 0.0,
        tax_amount: 0.0,
        discount_rate: 0.0,
        discount_amount: 0.0,
        total: 100.0,
        currency: "$".to_string(),
        enable_renewal: false,
        renewal_date: None,
        enable_follow_up: false,
        follow_up_duration: None,
        follow_up_date: None,
        created_at: None,
        updated_at: None,
    }
}

pub fn expense_on(date: chrono::NaiveDate) -> Expense {
    Expense {
        id: Uuid::new_v4().to_string(),
        date,
        category: "Software".to_string(),
        description: "Hosting".to_string(),
        amount: 25.0,
        receipt_url: None,
        is_recurring: false,
        frequency: Default::default(),
        next_due_date: None,
        created_at: None,
        updated_at: None,
    }
}
