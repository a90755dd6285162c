use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Hours logged by a staff member on a given day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkLog {
    pub id: String,
    pub staff_id: String,
    pub date: NaiveDate,
    pub hours: f64,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}
