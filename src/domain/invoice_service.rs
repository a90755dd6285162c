//! # Invoice Service
//!
//! Invoice and estimate workflow over the generic repository, including the
//! derived-record side effects:
//!
//! - saving a renewal-enabled invoice upserts a `renewal` reminder
//! - saving a follow-up-enabled estimate upserts a `followup` reminder, with
//!   the follow-up date resolved from the configured duration options
//! - approving a renewal clones the invoice into a fresh draft dated one year
//!   ahead
//!
//! Side effects run after the primary record is persisted, and their failures
//! are logged rather than propagated, so they can never block or roll back an
//! invoice save.

use anyhow::Result;
use chrono::{Duration, Months, NaiveDate, Utc};
use log::{info, warn};
use uuid::Uuid;

use crate::domain::models::{
    Invoice, InvoiceKind, InvoiceStatus, LineItem, Reminder, ReminderStatus, ReminderType,
};
use crate::domain::settings_service::SettingsService;
use crate::repository::{CollectionRepository, WriteOutcome};

/// Legacy duration code kept readable for documents saved before the options
/// list became configurable.
const LEGACY_THREE_DAYS: &str = "3_days";

#[derive(Clone)]
pub struct InvoiceService {
    invoices: CollectionRepository<Invoice>,
    reminders: CollectionRepository<Reminder>,
    settings: SettingsService,
}

impl InvoiceService {
    pub fn new(
        invoices: CollectionRepository<Invoice>,
        reminders: CollectionRepository<Reminder>,
        settings: SettingsService,
    ) -> Self {
        Self {
            invoices,
            reminders,
            settings,
        }
    }

    pub async fn get(&self) -> Result<Vec<Invoice>> {
        self.invoices.get().await
    }

    /// Save an invoice, then maintain its derived reminders.
    pub async fn save(&self, invoice: Invoice) -> Result<WriteOutcome<Invoice>> {
        let outcome = self.invoices.save(invoice.clone()).await?;

        if let Err(e) = self.maintain_reminders(&invoice).await {
            warn!(
                "Reminder side effects failed for invoice {}: {}",
                invoice.number, e
            );
        }
        Ok(outcome)
    }

    pub async fn delete(&self, id: &str) -> Result<WriteOutcome<Invoice>> {
        self.invoices.delete(id).await
    }

    /// Approve a renewal: clone `original_id` into a fresh draft dated today,
    /// due in two weeks, renewing again in a year. Returns `None` when the
    /// original no longer exists.
    pub async fn generate_renewal(&self, original_id: &str) -> Result<Option<Invoice>> {
        let invoices = self.invoices.get().await?;
        let Some(original) = invoices.into_iter().find(|i| i.id == original_id) else {
            warn!("Cannot renew unknown invoice {}", original_id);
            return Ok(None);
        };

        let today = Utc::now().date_naive();
        let mut renewed = original.clone();
        renewed.id = Uuid::new_v4().to_string();
        renewed.number = format!("{}-REN", original.number);
        renewed.date = today;
        renewed.due_date = today + Duration::weeks(2);
        renewed.renewal_date = today.checked_add_months(Months::new(12));
        renewed.status = InvoiceStatus::Draft;
        renewed.created_at = None;
        renewed.updated_at = None;
        renewed.items = original
            .items
            .iter()
            .map(|item| LineItem {
                id: Uuid::new_v4().to_string(),
                ..item.clone()
            })
            .collect();

        info!("Generated renewal invoice {} from {}", renewed.number, original.number);

        let new_id = renewed.id.clone();
        let outcome = self.save(renewed).await?;
        Ok(outcome.items.into_iter().find(|i| i.id == new_id))
    }

    async fn maintain_reminders(&self, invoice: &Invoice) -> Result<()> {
        if invoice.enable_renewal {
            if let Some(renewal_date) = invoice.renewal_date {
                let title = format!(
                    "Renew Invoice #{} for {}",
                    invoice.number, invoice.client_name
                );
                self.upsert_reminder(invoice, ReminderType::Renewal, title, renewal_date)
                    .await?;
            }
        }

        if invoice.kind == InvoiceKind::Estimate && invoice.enable_follow_up {
            if let Some(date) = self.resolve_follow_up_date(invoice)? {
                let title = format!(
                    "Follow up on Estimate #{} for {}",
                    invoice.number, invoice.client_name
                );
                self.upsert_reminder(invoice, ReminderType::Followup, title, date)
                    .await?;
            }
        }

        Ok(())
    }

    /// Resolve the follow-up date: configured duration label first, then the
    /// legacy three-day code, then any explicit date on the document.
    fn resolve_follow_up_date(&self, invoice: &Invoice) -> Result<Option<NaiveDate>> {
        let duration = invoice.follow_up_duration.as_deref();

        let settings = self.settings.get()?;
        if let Some(option) = settings
            .follow_up_options
            .iter()
            .find(|option| Some(option.label.as_str()) == duration)
        {
            return Ok(Some(invoice.date + Duration::days(option.days)));
        }
        if duration == Some(LEGACY_THREE_DAYS) {
            return Ok(Some(invoice.date + Duration::days(3)));
        }
        Ok(invoice.follow_up_date)
    }

    /// Upsert the derived reminder for `invoice` keyed by related id and type:
    /// an existing match keeps its id and status, so repeated saves never
    /// duplicate and never un-complete a reminder.
    async fn upsert_reminder(
        &self,
        invoice: &Invoice,
        kind: ReminderType,
        title: String,
        date: NaiveDate,
    ) -> Result<()> {
        let existing = self
            .reminders
            .local()?
            .into_iter()
            .find(|r| r.related_id.as_deref() == Some(invoice.id.as_str()) && r.kind == kind);

        let reminder = Reminder {
            id: existing
                .as_ref()
                .map(|r| r.id.clone())
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            title,
            date,
            kind,
            related_id: Some(invoice.id.clone()),
            status: existing
                .as_ref()
                .map(|r| r.status)
                .unwrap_or(ReminderStatus::Pending),
            created_at: None,
            updated_at: None,
        };
        self.reminders.save(reminder).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{invoice_numbered, repository_fixture};

    fn setup_service() -> (InvoiceService, crate::test_support::Fixture<Invoice>) {
        let fixture = repository_fixture::<Invoice>(None);
        let service = InvoiceService::new(
            fixture.repo.clone(),
            fixture.sibling::<Reminder>(),
            fixture.settings.clone(),
        );
        (service, fixture)
    }

    fn renewal_invoice() -> Invoice {
        let mut invoice = invoice_numbered(InvoiceKind::Invoice, "INV-001");
        invoice.enable_renewal = true;
        invoice.renewal_date = NaiveDate::from_ymd_opt(2025, 3, 1);
        invoice
    }

    #[tokio::test]
    async fn renewal_save_creates_a_renewal_reminder() {
        let (service, fixture) = setup_service();
        let invoice = renewal_invoice();

        service.save(invoice.clone()).await.unwrap();

        let reminders = fixture.sibling::<Reminder>().local().unwrap();
        assert_eq!(reminders.len(), 1);
        let reminder = &reminders[0];
        assert_eq!(reminder.kind, ReminderType::Renewal);
        assert_eq!(reminder.related_id.as_deref(), Some(invoice.id.as_str()));
        assert_eq!(reminder.date, invoice.renewal_date.unwrap());
        assert_eq!(reminder.status, ReminderStatus::Pending);
        assert_eq!(reminder.title, "Renew Invoice #INV-001 for Acme");
    }

    #[tokio::test]
    async fn repeated_saves_update_one_reminder_in_place() {
        let (service, fixture) = setup_service();
        let mut invoice = renewal_invoice();

        service.save(invoice.clone()).await.unwrap();
        let first = fixture.sibling::<Reminder>().local().unwrap();

        invoice.renewal_date = NaiveDate::from_ymd_opt(2025, 6, 1);
        service.save(invoice).await.unwrap();

        let second = fixture.sibling::<Reminder>().local().unwrap();
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].id, first[0].id);
        assert_eq!(second[0].date, NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
    }

    #[tokio::test]
    async fn completed_renewal_reminder_stays_completed_on_resave() {
        let (service, fixture) = setup_service();
        let invoice = renewal_invoice();
        let reminders = fixture.sibling::<Reminder>();

        service.save(invoice.clone()).await.unwrap();
        let mut reminder = reminders.local().unwrap().remove(0);
        reminder.status = ReminderStatus::Completed;
        reminders.save(reminder).await.unwrap();

        service.save(invoice).await.unwrap();

        let after = reminders.local().unwrap();
        assert_eq!(after.len(), 1);
        assert_eq!(after[0].status, ReminderStatus::Completed);
    }

    #[tokio::test]
    async fn estimate_follow_up_resolves_duration_label_from_settings() {
        let (service, fixture) = setup_service();
        let mut estimate = invoice_numbered(InvoiceKind::Estimate, "EST-001");
        estimate.enable_follow_up = true;
        estimate.follow_up_duration = Some("1 Week".to_string());

        service.save(estimate.clone()).await.unwrap();

        let reminders = fixture.sibling::<Reminder>().local().unwrap();
        assert_eq!(reminders.len(), 1);
        assert_eq!(reminders[0].kind, ReminderType::Followup);
        // Estimate dated 2024-03-01, "1 Week" option is 7 days.
        assert_eq!(reminders[0].date, NaiveDate::from_ymd_opt(2024, 3, 8).unwrap());
        assert_eq!(reminders[0].title, "Follow up on Estimate #EST-001 for Acme");
    }

    #[tokio::test]
    async fn legacy_three_day_code_still_resolves() {
        let (service, fixture) = setup_service();
        let mut estimate = invoice_numbered(InvoiceKind::Estimate, "EST-002");
        estimate.enable_follow_up = true;
        estimate.follow_up_duration = Some(LEGACY_THREE_DAYS.to_string());

        service.save(estimate).await.unwrap();

        let reminders = fixture.sibling::<Reminder>().local().unwrap();
        assert_eq!(reminders[0].date, NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
    }

    #[tokio::test]
    async fn follow_up_never_fires_for_plain_invoices() {
        let (service, fixture) = setup_service();
        let mut invoice = invoice_numbered(InvoiceKind::Invoice, "INV-002");
        invoice.enable_follow_up = true;
        invoice.follow_up_duration = Some("1 Week".to_string());

        service.save(invoice).await.unwrap();

        assert!(fixture.sibling::<Reminder>().local().unwrap().is_empty());
    }

    #[tokio::test]
    async fn generate_renewal_clones_into_a_fresh_draft() {
        let (service, _fixture) = setup_service();
        let mut original = renewal_invoice();
        original.status = InvoiceStatus::Paid;
        original.items = vec![LineItem {
            id: "line-1".to_string(),
            description: "Retainer".to_string(),
            quantity: 1.0,
            rate: 100.0,
            amount: 100.0,
        }];
        service.save(original.clone()).await.unwrap();

        let renewed = service
            .generate_renewal(&original.id)
            .await
            .unwrap()
            .expect("renewal produced");

        let today = Utc::now().date_naive();
        assert_ne!(renewed.id, original.id);
        assert_eq!(renewed.number, "INV-001-REN");
        assert_eq!(renewed.status, InvoiceStatus::Draft);
        assert_eq!(renewed.date, today);
        assert_eq!(renewed.due_date, today + Duration::weeks(2));
        assert_eq!(renewed.renewal_date, today.checked_add_months(Months::new(12)));
        assert_eq!(renewed.items.len(), 1);
        assert_ne!(renewed.items[0].id, "line-1");
        assert_eq!(renewed.items[0].description, "Retainer");

        // Both documents now live in the collection.
        let all = service.get().await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn generate_renewal_for_unknown_id_is_none() {
        let (service, _fixture) = setup_service();

        let renewed = service.generate_renewal("missing").await.unwrap();
        assert!(renewed.is_none());
    }
}
