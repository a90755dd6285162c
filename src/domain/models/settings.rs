use serde::{Deserialize, Serialize};

/// A named follow-up delay offered when saving an estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FollowUpOption {
    pub label: String,
    pub days: i64,
}

/// A reusable service with a default rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceItem {
    pub id: String,
    pub name: String,
    pub default_rate: f64,
}

/// A group of services in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceCategory {
    pub id: String,
    pub name: String,
    pub items: Vec<ServiceItem>,
}

/// Process-wide configuration singleton.
///
/// The presence of `google_sheet_url` is the remote-sync on/off switch: when
/// set, reads prefer the remote sheet and writes mirror to it.
///
/// The container-level `#[serde(default)]` merges a stored blob over the
/// defaults below, so settings fields added in later versions deserialize
/// cleanly from older saved blobs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_sheet_url: Option<String>,
    pub company_name: String,
    pub company_email: String,
    pub company_address: String,
    pub currency_symbol: String,
    pub dark_mode: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url_dark: Option<String>,
    pub logo_width: u32,
    pub tax_enabled: bool,
    pub tax_label: String,
    pub expense_categories: Vec<String>,
    pub follow_up_options: Vec<FollowUpOption>,
    pub service_catalog: Vec<ServiceCategory>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            google_sheet_url: None,
            company_name: "My Company Inc.".to_string(),
            company_email: "billing@mycompany.com".to_string(),
            company_address: "123 Business Rd, Tech City".to_string(),
            currency_symbol: "$".to_string(),
            dark_mode: false,
            logo_url: None,
            logo_url_dark: None,
            logo_width: 150,
            tax_enabled: true,
            tax_label: "Tax".to_string(),
            expense_categories: [
                "Office Supplies",
                "Travel",
                "Software",
                "Marketing",
                "Utilities",
                "Rent",
                "Other",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            follow_up_options: vec![
                FollowUpOption {
                    label: "3 Days".to_string(),
                    days: 3,
                },
                FollowUpOption {
                    label: "1 Week".to_string(),
                    days: 7,
                },
                FollowUpOption {
                    label: "2 Weeks".to_string(),
                    days: 14,
                },
                FollowUpOption {
                    label: "1 Month".to_string(),
                    days: 30,
                },
            ],
            service_catalog: Vec::new(),
        }
    }
}
