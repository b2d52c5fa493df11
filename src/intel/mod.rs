//! Threat-intel lookup engine.
//!
//! Holds a single-slot reputation result plus the best-effort indicator
//! count. Each user action produces exactly one network attempt; a new
//! lookup replaces the previous result entirely.

use crate::constants::{INTEL_UNREACHABLE_TEXT, VERDICT_CLEAN, VERDICT_MALICIOUS};
use crate::gateway::{EnrichResponse, Outcome, StatsResponse};

/// Decoded reputation of one address.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupReport {
    Malicious {
        source: String,
        confidence: f64,
        last_seen: String,
        tags: Option<String>,
    },
    Clean,
    Failed {
        message: String,
    },
}

impl LookupReport {
    /// Decode a 2xx enrichment body. Bodies without the indicator field
    /// (including `error`-shaped ones) become the failure variant.
    pub fn from_response(response: EnrichResponse) -> Self {
        match response.is_malicious {
            Some(true) => LookupReport::Malicious {
                source: response.source.unwrap_or_else(|| "unknown".to_string()),
                confidence: response.confidence.unwrap_or(0.0).clamp(0.0, 1.0),
                last_seen: response.last_seen.unwrap_or_else(|| "unknown".to_string()),
                tags: response.tags,
            },
            Some(false) => LookupReport::Clean,
            None => LookupReport::Failed {
                message: response
                    .error
                    .unwrap_or_else(|| "Unexpected response from the threat intelligence service".to_string()),
            },
        }
    }

    /// Verdict banner for the result panel.
    pub fn verdict(&self) -> &str {
        match self {
            LookupReport::Malicious { .. } => VERDICT_MALICIOUS,
            LookupReport::Clean => VERDICT_CLEAN,
            LookupReport::Failed { message } => message,
        }
    }

    /// Confidence as a whole percent, for malicious results only.
    pub fn confidence_percent(&self) -> Option<String> {
        match self {
            LookupReport::Malicious { confidence, .. } => {
                Some(format!("{:.0}%", confidence * 100.0))
            }
            _ => None,
        }
    }
}

/// Aggregate indicator count, fetched once when the screen first opens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsSummary {
    pub total_indicators: u64,
}

/// A lookup accepted by `begin`, ready to be dispatched to the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupTicket {
    pub seq: u64,
    pub address: String,
}

pub struct LookupEngine {
    report: Option<LookupReport>,
    pending: bool,
    stats: StatsSummary,
    stats_requested: bool,
    next_seq: u64,
    inflight: Option<u64>,
}

impl Default for LookupEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl LookupEngine {
    pub fn new() -> Self {
        Self {
            report: None,
            pending: false,
            stats: StatsSummary::default(),
            stats_requested: false,
            next_seq: 0,
            inflight: None,
        }
    }

    /// Accept an address for lookup. Clears the prior result and marks the
    /// lookup pending. Returns `None` for blank input or while one is in
    /// flight.
    pub fn begin(&mut self, address: &str) -> Option<LookupTicket> {
        let address = address.trim();
        if address.is_empty() || self.pending {
            return None;
        }

        self.report = None;
        self.pending = true;

        self.next_seq += 1;
        self.inflight = Some(self.next_seq);
        Some(LookupTicket {
            seq: self.next_seq,
            address: address.to_string(),
        })
    }

    /// Fold a completed lookup into the slot. Stale sequences are dropped.
    pub fn complete(&mut self, seq: u64, outcome: Outcome<EnrichResponse>) {
        if self.inflight != Some(seq) {
            return;
        }
        self.inflight = None;

        self.report = Some(match outcome {
            Ok(response) => LookupReport::from_response(response),
            Err(_) => LookupReport::Failed {
                message: INTEL_UNREACHABLE_TEXT.to_string(),
            },
        });
        self.pending = false;
    }

    /// Whether the stats fetch should be dispatched; flips to true exactly
    /// once, the first time the screen opens.
    pub fn take_stats_request(&mut self) -> bool {
        if self.stats_requested {
            return false;
        }
        self.stats_requested = true;
        true
    }

    /// Apply the stats outcome. Failure keeps the zero default and raises no
    /// error — the count is a best-effort enrichment, not a critical path.
    pub fn apply_stats(&mut self, outcome: Outcome<StatsResponse>) {
        if let Ok(stats) = outcome {
            self.stats = StatsSummary {
                total_indicators: stats.total_iocs,
            };
        }
    }

    /// Drop the result slot and stats; any in-flight ticket is abandoned.
    pub fn reset(&mut self) {
        self.report = None;
        self.pending = false;
        self.stats = StatsSummary::default();
        self.stats_requested = false;
        self.inflight = None;
    }

    pub fn report(&self) -> Option<&LookupReport> {
        self.report.as_ref()
    }

    pub fn pending(&self) -> bool {
        self.pending
    }

    pub fn stats(&self) -> StatsSummary {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::{FailureKind, GatewayError};

    fn malicious_response() -> EnrichResponse {
        EnrichResponse {
            is_malicious: Some(true),
            source: Some("abuse-feed".to_string()),
            confidence: Some(0.87),
            last_seen: Some("2026-08-01".to_string()),
            tags: Some("botnet,scanner".to_string()),
            error: None,
        }
    }

    fn clean_response() -> EnrichResponse {
        EnrichResponse {
            is_malicious: Some(false),
            ..EnrichResponse::default()
        }
    }

    fn rejected() -> GatewayError {
        GatewayError {
            kind: FailureKind::Rejected,
            detail: "HTTP 502".to_string(),
        }
    }

    // ── begin guards ──────────────────────────────────────────────

    #[test]
    fn blank_address_is_a_noop() {
        let mut engine = LookupEngine::new();
        assert!(engine.begin("").is_none());
        assert!(engine.begin("   ").is_none());
        assert!(!engine.pending());
    }

    #[test]
    fn begin_rejected_while_pending() {
        let mut engine = LookupEngine::new();
        let first = engine.begin("1.2.3.4").unwrap();
        assert!(engine.begin("8.8.8.8").is_none());
        engine.complete(first.seq, Ok(clean_response()));
        assert!(engine.begin("8.8.8.8").is_some());
    }

    #[test]
    fn begin_clears_the_previous_result() {
        let mut engine = LookupEngine::new();
        let first = engine.begin("1.2.3.4").unwrap();
        engine.complete(first.seq, Ok(malicious_response()));
        assert!(engine.report().is_some());

        engine.begin("8.8.8.8").unwrap();
        assert!(engine.report().is_none());
        assert!(engine.pending());
    }

    // ── Report decoding ───────────────────────────────────────────

    #[test]
    fn malicious_lookup_renders_verdict_and_confidence() {
        let mut engine = LookupEngine::new();
        let ticket = engine.begin("1.2.3.4").unwrap();
        engine.complete(ticket.seq, Ok(malicious_response()));

        let report = engine.report().unwrap();
        assert_eq!(report.verdict(), "MALICIOUS DETECTED");
        assert_eq!(report.confidence_percent().as_deref(), Some("87%"));
        assert!(!engine.pending());
    }

    #[test]
    fn clean_lookup_renders_no_threats() {
        let mut engine = LookupEngine::new();
        let ticket = engine.begin("8.8.8.8").unwrap();
        engine.complete(ticket.seq, Ok(clean_response()));

        let report = engine.report().unwrap();
        assert_eq!(report, &LookupReport::Clean);
        assert!(report.verdict().starts_with("No threats found"));
        assert!(report.confidence_percent().is_none());
    }

    #[test]
    fn gateway_failure_becomes_fixed_failure_text() {
        let mut engine = LookupEngine::new();
        let ticket = engine.begin("1.2.3.4").unwrap();
        engine.complete(ticket.seq, Err(rejected()));

        assert_eq!(
            engine.report(),
            Some(&LookupReport::Failed {
                message: INTEL_UNREACHABLE_TEXT.to_string()
            })
        );
        assert!(!engine.pending());
    }

    #[test]
    fn error_shaped_body_becomes_failure() {
        let response = EnrichResponse {
            error: Some("feed offline".to_string()),
            ..EnrichResponse::default()
        };
        assert_eq!(
            LookupReport::from_response(response),
            LookupReport::Failed {
                message: "feed offline".to_string()
            }
        );
    }

    #[test]
    fn missing_indicator_field_becomes_failure() {
        let report = LookupReport::from_response(EnrichResponse::default());
        assert!(matches!(report, LookupReport::Failed { .. }));
    }

    #[test]
    fn confidence_clamped_into_unit_range() {
        let response = EnrichResponse {
            is_malicious: Some(true),
            confidence: Some(1.7),
            ..EnrichResponse::default()
        };
        let report = LookupReport::from_response(response);
        assert_eq!(report.confidence_percent().as_deref(), Some("100%"));
    }

    // ── Staleness guard ───────────────────────────────────────────

    #[test]
    fn stale_completion_is_dropped_after_reset() {
        let mut engine = LookupEngine::new();
        let ticket = engine.begin("1.2.3.4").unwrap();
        engine.reset();
        engine.complete(ticket.seq, Ok(malicious_response()));
        assert!(engine.report().is_none());
        assert!(!engine.pending());
    }

    // ── Stats ─────────────────────────────────────────────────────

    #[test]
    fn stats_requested_exactly_once() {
        let mut engine = LookupEngine::new();
        assert!(engine.take_stats_request());
        assert!(!engine.take_stats_request());
    }

    #[test]
    fn stats_success_updates_the_count() {
        let mut engine = LookupEngine::new();
        engine.apply_stats(Ok(StatsResponse { total_iocs: 48211 }));
        assert_eq!(engine.stats().total_indicators, 48211);
    }

    #[test]
    fn stats_failure_keeps_zero_default() {
        let mut engine = LookupEngine::new();
        engine.apply_stats(Err(rejected()));
        assert_eq!(engine.stats().total_indicators, 0);
    }
}
