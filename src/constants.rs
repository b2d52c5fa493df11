//! Application-wide constants.
//!
//! Centralizes endpoint defaults, fixed console texts, and UI timing so
//! nothing is scattered across the codebase.

use std::path::PathBuf;

// ── Timing ────────────────────────────────────────────────────────
/// Event poll timeout (ms) -- how often the UI checks for input.
pub const EVENT_POLL_MS: u64 = 50;
/// Status message display duration (seconds).
pub const STATUS_MESSAGE_TIMEOUT_SECS: u64 = 5;
/// Default outbound request timeout (seconds).
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;
/// Minimum allowed request timeout (seconds).
pub const MIN_REQUEST_TIMEOUT_SECS: u64 = 1;

// ── Collaborator services ─────────────────────────────────────────
/// Default AI query service base URL.
pub const DEFAULT_AI_QUERY_URL: &str = "http://127.0.0.1:8000";
/// Default threat-intel service base URL.
pub const DEFAULT_THREAT_INTEL_URL: &str = "http://127.0.0.1:7000";
/// Default analytics dashboard URL (external, opened in a browser).
pub const DEFAULT_DASHBOARD_URL: &str =
    "http://127.0.0.1:5601/app/dashboards#/view/security-overview";
/// AI query endpoint path.
pub const AI_QUERY_PATH: &str = "/query/ask";
/// Threat-intel aggregate stats endpoint path.
pub const INTEL_STATS_PATH: &str = "/stats";
/// Threat-intel IP enrichment endpoint path prefix.
pub const INTEL_ENRICH_PATH: &str = "/enrich/ip";

// ── Session ───────────────────────────────────────────────────────
/// Identifier accepted by the local credential check.
pub const LOCAL_OPERATOR_IDENTIFIER: &str = "admin";
/// Secret accepted by the local credential check.
pub const LOCAL_OPERATOR_SECRET: &str = "admin";
/// Display name minted for the local operator.
pub const LOCAL_OPERATOR_NAME: &str = "Admin User";
/// Role minted for the local operator.
pub const LOCAL_OPERATOR_ROLE: &str = "admin";

// ── Fixed console texts ───────────────────────────────────────────
/// Greeting seeded as the first assistant message of every thread.
pub const ASSISTANT_GREETING: &str = "Hello! I'm **Vigil AI**. I can help you \
investigate network threats, analyze logs, or answer questions about your \
security posture. How can I help you today?";
/// Assistant reply used when the service answered without an `answer` field.
pub const ANSWER_FALLBACK: &str = "Processing complete.";
/// Diagnostic assistant message appended when the AI service is unreachable.
pub const AI_UNREACHABLE_MESSAGE: &str = "⚠️ **Connection error**: I couldn't \
reach the AI investigation service.\n\nMake sure the query service is online, \
then send your question again.";
/// Failure text shown when the threat-intel service is unreachable.
pub const INTEL_UNREACHABLE_TEXT: &str =
    "Could not connect to the threat intelligence service";
/// Verdict banner for a malicious lookup result.
pub const VERDICT_MALICIOUS: &str = "MALICIOUS DETECTED";
/// Verdict banner for a clean lookup result.
pub const VERDICT_CLEAN: &str = "No threats found for this IP";

// ── UI Layout ─────────────────────────────────────────────────────
/// Page up/down step size for chat scrolling.
pub const PAGE_SIZE: usize = 20;
/// Login card width.
pub const LOGIN_CARD_WIDTH: u16 = 48;
/// Login card height.
pub const LOGIN_CARD_HEIGHT: u16 = 14;
/// Truncation length for gateway error details surfaced to the UI.
pub const ERROR_DETAIL_MAX_LEN: usize = 200;

// ── Spinner Animation ─────────────────────────────────────────────
/// Spinner character sequence for loading indicators.
pub const SPINNER_CHARS: &[&str] = &["◐", "◓", "◑", "◒"];

// ── Paths ─────────────────────────────────────────────────────────

/// Returns the user's home directory, falling back to /tmp.
pub fn home_dir() -> PathBuf {
    PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string()))
}

/// Returns `~/.config/vigil/`.
pub fn config_dir() -> PathBuf {
    home_dir().join(".config").join("vigil")
}

/// Returns `~/.config/vigil/config.toml`.
pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Returns `~/.config/vigil/session.json` (persisted operator identity).
pub fn session_file_path() -> PathBuf {
    config_dir().join("session.json")
}

/// Returns `~/.config/vigil/themes/`.
pub fn custom_theme_dir() -> PathBuf {
    config_dir().join("themes")
}

/// Returns `~/.config/vigil/themes/<name>.toml`.
pub fn custom_theme_path(name: &str) -> PathBuf {
    custom_theme_dir().join(format!("{}.toml", name))
}
