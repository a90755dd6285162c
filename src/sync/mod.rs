//! # Sync Module
//!
//! Remote tier: a stateless HTTP client for the spreadsheet-backed endpoint,
//! the error taxonomy for transport failures, and the observable "is syncing"
//! signal that brackets every remote operation.

pub mod client;
pub mod error;
pub mod signal;

pub use client::{SheetClient, SheetTransport};
pub use error::SheetError;
pub use signal::SyncSignal;
