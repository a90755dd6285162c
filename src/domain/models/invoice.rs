use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Whether a document is a billable invoice or an estimate awaiting approval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceKind {
    Invoice,
    Estimate,
}

/// Document lifecycle status. Draft/pending/paid/overdue apply to invoices,
/// accepted/rejected/expired to estimates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Draft,
    Pending,
    Paid,
    Overdue,
    Accepted,
    Rejected,
    Expired,
}

/// One billed line: quantity times rate, with the amount precomputed by the
/// caller (the store never recomputes derived figures).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub id: String,
    pub description: String,
    pub quantity: f64,
    pub rate: f64,
    pub amount: f64,
}

/// Invoice or estimate with a denormalized client snapshot.
///
/// Client fields are copied in at creation time, not referenced by key, so a
/// document stays faithful to what was issued even if the client record
/// changes later. All monetary totals are caller-computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: InvoiceKind,
    pub number: String,
    pub date: NaiveDate,
    pub due_date: NaiveDate,
    pub client_name: String,
    pub client_email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_address: Option<String>,
    pub items: Vec<LineItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub status: InvoiceStatus,
    pub subtotal: f64,
    pub tax_rate: f64,
    pub tax_amount: f64,
    pub discount_rate: f64,
    pub discount_amount: f64,
    pub total: f64,
    pub currency: String,
    #[serde(default)]
    pub enable_renewal: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub renewal_date: Option<NaiveDate>,
    #[serde(default)]
    pub enable_follow_up: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub follow_up_duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub follow_up_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}
