//! # Application Wiring
//!
//! Composition root: opens the local store, builds the HTTP transport and the
//! sync signal once, and hands out one typed repository (or service) per
//! entity collection. This is the surface the UI layer consumes.

use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;

use crate::domain::models::{Client, PayrollRun, Project, Reminder, Staff, WorkLog};
use crate::domain::{ExpenseService, InvoiceService, SettingsService};
use crate::repository::CollectionRepository;
use crate::storage::JsonStore;
use crate::sync::client::{SheetClient, SheetTransport};
use crate::sync::signal::SyncSignal;

/// Business-management core: every collection repository and service, wired
/// over one shared store, transport and sync signal.
#[derive(Clone)]
pub struct App {
    pub settings: SettingsService,
    pub invoices: InvoiceService,
    pub expenses: ExpenseService,
    pub clients: CollectionRepository<Client>,
    pub projects: CollectionRepository<Project>,
    pub reminders: CollectionRepository<Reminder>,
    pub staff: CollectionRepository<Staff>,
    pub work_logs: CollectionRepository<WorkLog>,
    pub payroll: CollectionRepository<PayrollRun>,
    signal: SyncSignal,
}

impl App {
    /// Open the application core against a data directory.
    pub fn open(data_dir: impl Into<PathBuf>) -> Result<Self> {
        let store = Arc::new(JsonStore::new(data_dir)?);
        let transport: Arc<dyn SheetTransport> = Arc::new(SheetClient::new());
        Ok(Self::wire(store, transport))
    }

    /// Wire the core over explicit collaborators. Entry point for tests and
    /// alternative transports.
    pub fn wire(store: Arc<JsonStore>, transport: Arc<dyn SheetTransport>) -> Self {
        let signal = SyncSignal::new();
        let settings = SettingsService::new(store.clone());

        macro_rules! repo {
            () => {
                CollectionRepository::new(
                    store.clone(),
                    transport.clone(),
                    signal.clone(),
                    settings.clone(),
                )
            };
        }

        let invoices_repo = repo!();
        let expenses_repo = repo!();
        let reminders: CollectionRepository<Reminder> = repo!();

        Self {
            invoices: InvoiceService::new(invoices_repo, reminders.clone(), settings.clone()),
            expenses: ExpenseService::new(expenses_repo, reminders.clone()),
            clients: repo!(),
            projects: repo!(),
            reminders,
            staff: repo!(),
            work_logs: repo!(),
            payroll: repo!(),
            settings,
            signal,
        }
    }

    /// Register a listener for sync-in-progress transitions. Any number of
    /// listeners may subscribe.
    pub fn subscribe_sync(&self, listener: impl Fn(bool) + Send + Sync + 'static) {
        self.signal.subscribe(listener);
    }

    /// Whether a remote operation is currently in flight.
    pub fn is_syncing(&self) -> bool {
        self.signal.is_syncing()
    }
}
