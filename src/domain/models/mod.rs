//! # Domain Models
//!
//! Persisted entity types. Field names serialize in camelCase because the
//! remote sheet endpoint stores rows in that shape; the local JSON files use
//! the same encoding so a record round-trips identically through either tier.

pub mod client;
pub mod expense;
pub mod invoice;
pub mod payroll;
pub mod project;
pub mod reminder;
pub mod settings;
pub mod staff;
pub mod work_log;

pub use client::Client;
pub use expense::{Expense, RecurrenceFrequency};
pub use invoice::{Invoice, InvoiceKind, InvoiceStatus, LineItem};
pub use payroll::{PayrollRun, PayrollStatus};
pub use project::{Project, ProjectStatus};
pub use reminder::{Reminder, ReminderStatus, ReminderType};
pub use settings::{AppSettings, FollowUpOption, ServiceCategory, ServiceItem};
pub use staff::{BankDetails, Staff, StaffStatus, StaffType};
pub use work_log::WorkLog;

/// Wire each entity to its local storage key and remote sheet name.
///
/// All entities share the `id` / `created_at` / `updated_at` field names, so
/// one macro covers the whole closed set of collections.
macro_rules! impl_record {
    ($entity:ty, $key:literal, $sheet:literal) => {
        impl crate::repository::Record for $entity {
            const STORAGE_KEY: &'static str = $key;
            const SHEET_NAME: &'static str = $sheet;

            fn id(&self) -> &str {
                &self.id
            }

            fn created_at(&self) -> Option<chrono::DateTime<chrono::Utc>> {
                self.created_at
            }

            fn set_created_at(&mut self, at: chrono::DateTime<chrono::Utc>) {
                self.created_at = Some(at);
            }

            fn set_updated_at(&mut self, at: chrono::DateTime<chrono::Utc>) {
                self.updated_at = Some(at);
            }
        }
    };
}

impl_record!(Invoice, "invoices", "Invoices");
impl_record!(Expense, "expenses", "Expenses");
impl_record!(Client, "clients", "Clients");
impl_record!(Project, "projects", "Projects");
impl_record!(Reminder, "reminders", "Reminders");
impl_record!(Staff, "staff", "Staff");
impl_record!(WorkLog, "worklogs", "WorkLogs");
impl_record!(PayrollRun, "payroll", "Payroll");
