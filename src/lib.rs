//! # Billbook Core
//!
//! Persistence and synchronization layer for a small business-management
//! application (invoices, expenses, clients, projects, staff and payroll).
//!
//! Every collection lives in two tiers:
//!
//! - a durable local store (one JSON file per collection, fronted by an
//!   in-memory cache), and
//! - an optional remote spreadsheet-backed endpoint that, when configured in
//!   [`AppSettings`](domain::models::AppSettings), acts as the source of truth.
//!
//! Reads are remote-first with a local fallback; writes land locally first and
//! are mirrored to the remote side as a best-effort full-collection replace.
//! A process-wide [`SyncSignal`](sync::SyncSignal) reports in-flight remote
//! operations to any number of subscribers.

pub mod app;
pub mod domain;
pub mod repository;
pub mod storage;
pub mod sync;

#[cfg(test)]
pub(crate) mod test_support;

pub use app::App;
pub use repository::{CollectionRepository, Record, WriteOutcome};
pub use sync::error::SheetError;
pub use sync::signal::SyncSignal;
