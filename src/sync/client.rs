//! # Sheet Client
//!
//! Stateless HTTP wrapper for the spreadsheet-backed endpoint. Two verbs are
//! supported against a named sheet resource:
//!
//! - `fetch_all` — `action: "GET"`, returns every row of the sheet
//! - `replace_all` — `action: "SYNC"`, clears the sheet and rewrites it with
//!   the supplied payload (full-collection overwrite, not a patch)
//!
//! The endpoint address is caller-supplied on every call; this client carries
//! no configuration beyond the HTTP client itself and never retries. Fallback
//! on failure is entirely the caller's responsibility.

use async_trait::async_trait;
use log::debug;
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

use crate::sync::error::{Result, SheetError};

/// Explicit request timeout. A hung request would otherwise leave the sync
/// signal raised until the platform default kicks in.
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const MAX_LOG_BODY_CHARS: usize = 512;

/// Request envelope understood by the sheet endpoint.
#[derive(Debug, Serialize)]
struct SheetRequest<'a> {
    action: &'a str,
    sheet: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    payload: Option<&'a [Value]>,
}

/// Response envelope produced by the sheet endpoint.
#[derive(Debug, Deserialize)]
struct SheetResponse {
    status: String,
    #[serde(default)]
    data: Option<Vec<Value>>,
    #[serde(default)]
    message: Option<String>,
}

/// Transport seam between the repository and the wire.
///
/// The repository depends on this trait rather than on [`SheetClient`]
/// directly so tests can script remote behavior without a network.
#[async_trait]
pub trait SheetTransport: Send + Sync {
    /// Fetch every row of `sheet`. An empty sheet yields an empty vector.
    async fn fetch_all(&self, endpoint: &str, sheet: &str) -> Result<Vec<Value>>;

    /// Replace the entire contents of `sheet` with `rows`.
    async fn replace_all(&self, endpoint: &str, sheet: &str, rows: Vec<Value>) -> Result<()>;
}

/// HTTP implementation of [`SheetTransport`].
#[derive(Debug, Clone)]
pub struct SheetClient {
    http: reqwest::Client,
}

impl Default for SheetClient {
    fn default() -> Self {
        Self::new()
    }
}

impl SheetClient {
    pub fn new() -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .expect("Failed to build HTTP client");
        Self { http }
    }

    fn body_preview(body: &str) -> String {
        let mut preview = body.chars().take(MAX_LOG_BODY_CHARS).collect::<String>();
        if body.chars().count() > MAX_LOG_BODY_CHARS {
            preview.push_str("...");
        }
        preview
    }

    async fn request(&self, endpoint: &str, request: SheetRequest<'_>) -> Result<SheetResponse> {
        debug!("Sheet request: {} {}", request.action, request.sheet);

        // The endpoint expects JSON delivered as text/plain (its CORS contract),
        // so the body is serialized by hand rather than via .json().
        let response = self
            .http
            .post(endpoint)
            .header(CONTENT_TYPE, "text/plain;charset=utf-8")
            .body(serde_json::to_string(&request)?)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            debug!("Sheet response error ({}): {}", status, Self::body_preview(&body));
            return Err(SheetError::status(status.as_u16(), Self::body_preview(&body)));
        }

        let parsed: SheetResponse = serde_json::from_str(&body)?;
        if parsed.status != "success" {
            return Err(SheetError::remote(
                parsed
                    .message
                    .unwrap_or_else(|| format!("status was '{}'", parsed.status)),
            ));
        }
        Ok(parsed)
    }
}

#[async_trait]
impl SheetTransport for SheetClient {
    async fn fetch_all(&self, endpoint: &str, sheet: &str) -> Result<Vec<Value>> {
        let response = self
            .request(
                endpoint,
                SheetRequest {
                    action: "GET",
                    sheet,
                    payload: None,
                },
            )
            .await?;

        response
            .data
            .ok_or_else(|| SheetError::protocol("GET response carried no data array"))
    }

    async fn replace_all(&self, endpoint: &str, sheet: &str, rows: Vec<Value>) -> Result<()> {
        self.request(
            endpoint,
            SheetRequest {
                action: "SYNC",
                sheet,
                payload: Some(&rows),
            },
        )
        .await?;
        Ok(())
    }
}
