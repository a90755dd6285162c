use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// What produced a reminder. `renewal`, `followup` and `expense` reminders are
/// derived records maintained by the invoice/expense services; `general` ones
/// are authored directly by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderType {
    General,
    Renewal,
    Followup,
    Expense,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderStatus {
    Pending,
    Completed,
}

/// A dated to-do item.
///
/// `related_id` is a weak back-reference to the invoice or expense that
/// produced a derived reminder: it is an informational lookup key only, never
/// an ownership edge. Deleting the related entity does not delete the
/// reminder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    pub id: String,
    pub title: String,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: ReminderType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_id: Option<String>,
    pub status: ReminderStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}
