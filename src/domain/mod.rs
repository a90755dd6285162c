//! # Domain Module
//!
//! Entity models and the services that carry business behavior on top of the
//! generic collection repository: settings access, invoice side effects
//! (renewal and follow-up reminders, renewal approval) and expense side
//! effects (recurring-expense reminders).

pub mod expense_service;
pub mod invoice_service;
pub mod models;
pub mod settings_service;

pub use expense_service::ExpenseService;
pub use invoice_service::InvoiceService;
pub use settings_service::SettingsService;
