use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayrollStatus {
    Draft,
    Paid,
}

/// One payroll run for one staff member in one month.
///
/// `total` is base + bonus - deductions, computed by the caller before save;
/// the store does not recompute or validate it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollRun {
    pub id: String,
    /// Month the run covers, `YYYY-MM`.
    pub month: String,
    pub staff_id: String,
    pub base_amount: f64,
    pub bonus: f64,
    pub deductions: f64,
    pub total: f64,
    pub status: PayrollStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}
