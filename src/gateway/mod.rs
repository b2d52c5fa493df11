//! Outbound calls to the collaborator services.
//!
//! One request per call, no automatic retry. Every call resolves to a typed
//! `Outcome`: transport failures, non-2xx statuses, and undecodable bodies
//! all normalize into `GatewayError`, so callers never need defensive
//! exception handling.

use std::fmt;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;

use crate::config::Config;
use crate::constants::*;
use crate::utils::truncate_str;

/// Result of one gateway call.
pub type Outcome<T> = std::result::Result<T, GatewayError>;

/// Why a call failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The service could not be reached at the transport level.
    Unreachable,
    /// The service answered with a non-2xx status or an undecodable body.
    Rejected,
    /// The bounded request timeout elapsed.
    Timeout,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FailureKind::Unreachable => "unreachable",
            FailureKind::Rejected => "rejected",
            FailureKind::Timeout => "timeout",
        };
        f.write_str(s)
    }
}

/// Normalized failure for any gateway call.
#[derive(Debug, Clone, Error)]
#[error("{kind}: {detail}")]
pub struct GatewayError {
    pub kind: FailureKind,
    pub detail: String,
}

/// Response of the AI query endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct AskResponse {
    pub answer: Option<String>,
    #[serde(default)]
    pub intent: Option<String>,
}

/// Response of the threat-intel stats endpoint.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct StatsResponse {
    pub total_iocs: u64,
}

/// Response of the IP enrichment endpoint. The service omits the detail
/// fields for clean addresses and may answer 2xx with an `error` body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EnrichResponse {
    pub is_malicious: Option<bool>,
    pub source: Option<String>,
    pub confidence: Option<f64>,
    pub last_seen: Option<String>,
    pub tags: Option<String>,
    pub error: Option<String>,
}

/// Performs the network calls for both collaborator services.
#[derive(Clone)]
pub struct RequestGateway {
    client: Client,
    ai_base: String,
    intel_base: String,
}

impl RequestGateway {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            ai_base: config.ai_query_url.clone(),
            intel_base: config.threat_intel_url.clone(),
        })
    }

    /// Send one investigation prompt to the AI query service.
    pub async fn ask(&self, prompt: &str) -> Outcome<AskResponse> {
        let url = format!("{}{}", self.ai_base, AI_QUERY_PATH);
        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({ "prompt": prompt }))
            .send()
            .await
            .map_err(transport_error)?;
        decode(response).await
    }

    /// Fetch the aggregate indicator count.
    pub async fn stats(&self) -> Outcome<StatsResponse> {
        let url = format!("{}{}", self.intel_base, INTEL_STATS_PATH);
        let response = self.client.get(&url).send().await.map_err(transport_error)?;
        decode(response).await
    }

    /// Look up the reputation of one IP address.
    pub async fn enrich_ip(&self, address: &str) -> Outcome<EnrichResponse> {
        let url = format!("{}{}/{}", self.intel_base, INTEL_ENRICH_PATH, address);
        let response = self.client.get(&url).send().await.map_err(transport_error)?;
        decode(response).await
    }
}

/// Map a reqwest transport error to the right failure kind.
fn transport_error(err: reqwest::Error) -> GatewayError {
    let kind = if err.is_timeout() {
        FailureKind::Timeout
    } else {
        FailureKind::Unreachable
    };
    GatewayError {
        kind,
        detail: truncate_str(&err.to_string(), ERROR_DETAIL_MAX_LEN),
    }
}

/// Turn an HTTP response into a decoded body or a `Rejected` error.
async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Outcome<T> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(GatewayError {
            kind: FailureKind::Rejected,
            detail: format!("HTTP {}: {}", status, truncate_str(&body, ERROR_DETAIL_MAX_LEN)),
        });
    }
    response.json::<T>().await.map_err(|e| GatewayError {
        kind: FailureKind::Rejected,
        detail: format!("malformed response: {}", e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── FailureKind ───────────────────────────────────────────────

    #[test]
    fn failure_kind_display() {
        assert_eq!(FailureKind::Unreachable.to_string(), "unreachable");
        assert_eq!(FailureKind::Rejected.to_string(), "rejected");
        assert_eq!(FailureKind::Timeout.to_string(), "timeout");
    }

    #[test]
    fn gateway_error_display_includes_kind_and_detail() {
        let err = GatewayError {
            kind: FailureKind::Rejected,
            detail: "HTTP 500".to_string(),
        };
        assert_eq!(err.to_string(), "rejected: HTTP 500");
    }

    // ── Wire decoding ─────────────────────────────────────────────

    #[test]
    fn ask_response_with_intent() {
        let r: AskResponse =
            serde_json::from_str(r#"{"answer":"Looks benign.","intent":"triage"}"#).unwrap();
        assert_eq!(r.answer.as_deref(), Some("Looks benign."));
        assert_eq!(r.intent.as_deref(), Some("triage"));
    }

    #[test]
    fn ask_response_without_intent() {
        let r: AskResponse = serde_json::from_str(r#"{"answer":"Done."}"#).unwrap();
        assert_eq!(r.answer.as_deref(), Some("Done."));
        assert!(r.intent.is_none());
    }

    #[test]
    fn ask_response_null_answer() {
        let r: AskResponse = serde_json::from_str(r#"{"answer":null}"#).unwrap();
        assert!(r.answer.is_none());
    }

    #[test]
    fn stats_response_decodes() {
        let r: StatsResponse = serde_json::from_str(r#"{"total_iocs":48211}"#).unwrap();
        assert_eq!(r.total_iocs, 48211);
    }

    #[test]
    fn enrich_response_clean_shape() {
        let r: EnrichResponse = serde_json::from_str(r#"{"is_malicious":false}"#).unwrap();
        assert_eq!(r.is_malicious, Some(false));
        assert!(r.source.is_none());
    }

    #[test]
    fn enrich_response_malicious_shape() {
        let r: EnrichResponse = serde_json::from_str(
            r#"{"is_malicious":true,"source":"abuse-feed","confidence":0.87,
                "last_seen":"2026-08-01","tags":"botnet,scanner"}"#,
        )
        .unwrap();
        assert_eq!(r.is_malicious, Some(true));
        assert_eq!(r.source.as_deref(), Some("abuse-feed"));
        assert_eq!(r.confidence, Some(0.87));
        assert_eq!(r.tags.as_deref(), Some("botnet,scanner"));
    }

    #[test]
    fn enrich_response_error_shape() {
        let r: EnrichResponse =
            serde_json::from_str(r#"{"error":"feed offline"}"#).unwrap();
        assert!(r.is_malicious.is_none());
        assert_eq!(r.error.as_deref(), Some("feed offline"));
    }
}
