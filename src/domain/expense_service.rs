//! # Expense Service
//!
//! Expense workflow over the generic repository. Saving a recurring expense
//! maintains a derived `expense` reminder dated one period after the expense:
//! an existing *pending* reminder for the expense is updated in place, while a
//! completed one does not block creating a fresh reminder for the next cycle.
//! (The pending-only check is deliberate and differs from the renewal and
//! follow-up upserts, which match regardless of status.)

use anyhow::Result;
use chrono::{Days, Months, NaiveDate};
use log::warn;
use uuid::Uuid;

use crate::domain::models::{Expense, RecurrenceFrequency, Reminder, ReminderStatus, ReminderType};
use crate::repository::{CollectionRepository, WriteOutcome};

#[derive(Clone)]
pub struct ExpenseService {
    expenses: CollectionRepository<Expense>,
    reminders: CollectionRepository<Reminder>,
}

impl ExpenseService {
    pub fn new(
        expenses: CollectionRepository<Expense>,
        reminders: CollectionRepository<Reminder>,
    ) -> Self {
        Self {
            expenses,
            reminders,
        }
    }

    pub async fn get(&self) -> Result<Vec<Expense>> {
        self.expenses.get().await
    }

    /// Save an expense, then maintain its recurring-expense reminder.
    pub async fn save(&self, expense: Expense) -> Result<WriteOutcome<Expense>> {
        let outcome = self.expenses.save(expense.clone()).await?;

        if let Err(e) = self.maintain_recurring_reminder(&expense).await {
            warn!(
                "Recurring reminder side effect failed for expense {}: {}",
                expense.id, e
            );
        }
        Ok(outcome)
    }

    pub async fn delete(&self, id: &str) -> Result<WriteOutcome<Expense>> {
        self.expenses.delete(id).await
    }

    async fn maintain_recurring_reminder(&self, expense: &Expense) -> Result<()> {
        if !expense.is_recurring {
            return Ok(());
        }
        let Some(next_date) = next_occurrence(expense.date, expense.frequency) else {
            return Ok(());
        };

        let existing = self
            .reminders
            .local()?
            .into_iter()
            .find(|r| {
                r.related_id.as_deref() == Some(expense.id.as_str())
                    && r.kind == ReminderType::Expense
                    && r.status == ReminderStatus::Pending
            });

        let reminder = Reminder {
            id: existing
                .as_ref()
                .map(|r| r.id.clone())
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            title: format!(
                "Recurring Expense: {} ({})",
                expense.description, expense.frequency
            ),
            date: next_date,
            kind: ReminderType::Expense,
            related_id: Some(expense.id.clone()),
            status: ReminderStatus::Pending,
            created_at: None,
            updated_at: None,
        };
        self.reminders.save(reminder).await?;
        Ok(())
    }
}

/// Next occurrence of a recurring expense: its date plus one period.
/// `None` frequency (or a date-arithmetic overflow) yields no occurrence.
fn next_occurrence(date: NaiveDate, frequency: RecurrenceFrequency) -> Option<NaiveDate> {
    match frequency {
        RecurrenceFrequency::Daily => date.checked_add_days(Days::new(1)),
        RecurrenceFrequency::Weekly => date.checked_add_days(Days::new(7)),
        RecurrenceFrequency::Monthly => date.checked_add_months(Months::new(1)),
        RecurrenceFrequency::Yearly => date.checked_add_months(Months::new(12)),
        RecurrenceFrequency::None => None,
    }
}
