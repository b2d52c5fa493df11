use serde::Deserialize;

use crate::constants::*;

/// Application configuration with sensible defaults.
///
/// Can be overridden via ~/.config/vigil/config.toml
#[derive(Debug, Clone)]
pub struct Config {
    /// AI query service base URL.
    pub ai_query_url: String,
    /// Threat-intel service base URL.
    pub threat_intel_url: String,
    /// External analytics dashboard URL (opened in a browser, not embedded).
    pub dashboard_url: String,
    /// Outbound request timeout in seconds.
    pub request_timeout_secs: u64,
    /// Theme name (built-in or custom).
    pub theme: String,
    /// UI language.
    pub lang: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ai_query_url: DEFAULT_AI_QUERY_URL.to_string(),
            threat_intel_url: DEFAULT_THREAT_INTEL_URL.to_string(),
            dashboard_url: DEFAULT_DASHBOARD_URL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            theme: "default".to_string(),
            lang: "en".to_string(),
        }
    }
}

/// TOML-deserializable config file format.
/// All fields are optional — missing fields use defaults.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct FileConfig {
    ai_query_url: Option<String>,
    threat_intel_url: Option<String>,
    dashboard_url: Option<String>,
    request_timeout_secs: Option<u64>,
    theme: Option<String>,
    lang: Option<String>,
}

impl Config {
    /// Load config from ~/.config/vigil/config.toml, falling back to defaults
    /// for any missing fields. If the file doesn't exist, returns pure defaults.
    pub fn load() -> Self {
        let config_path = crate::constants::config_file_path();
        let content = match std::fs::read_to_string(&config_path) {
            Ok(c) => c,
            Err(_) => return Config::default(), // No config file — use defaults
        };

        let file_config: FileConfig = match toml::from_str(&content) {
            Ok(fc) => fc,
            Err(e) => {
                eprintln!(
                    "Warning: Failed to parse {}: {}. Using defaults.",
                    config_path.display(),
                    e
                );
                return Config::default();
            }
        };

        Config::merged(file_config)
    }

    /// Merge file values over defaults, trimming and clamping where needed.
    fn merged(file_config: FileConfig) -> Self {
        let mut config = Config::default();

        if let Some(v) = file_config.ai_query_url {
            if !v.is_empty() {
                config.ai_query_url = v.trim_end_matches('/').to_string();
            }
        }
        if let Some(v) = file_config.threat_intel_url {
            if !v.is_empty() {
                config.threat_intel_url = v.trim_end_matches('/').to_string();
            }
        }
        if let Some(v) = file_config.dashboard_url {
            if !v.is_empty() {
                config.dashboard_url = v;
            }
        }
        if let Some(v) = file_config.request_timeout_secs {
            config.request_timeout_secs = v.max(MIN_REQUEST_TIMEOUT_SECS);
        }
        if let Some(v) = file_config.theme {
            if !v.is_empty() {
                config.theme = v;
            }
        }
        if let Some(v) = file_config.lang {
            if !v.is_empty() {
                config.lang = v;
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_config_uses_defaults() {
        let config = Config::merged(FileConfig::default());
        assert_eq!(config.ai_query_url, DEFAULT_AI_QUERY_URL);
        assert_eq!(config.threat_intel_url, DEFAULT_THREAT_INTEL_URL);
        assert_eq!(config.request_timeout_secs, DEFAULT_REQUEST_TIMEOUT_SECS);
        assert_eq!(config.theme, "default");
    }

    #[test]
    fn file_values_override_defaults() {
        let fc: FileConfig = toml::from_str(
            r#"
            ai_query_url = "http://ai.internal:9000"
            threat_intel_url = "http://ti.internal:9100"
            theme = "nord"
            "#,
        )
        .unwrap();
        let config = Config::merged(fc);
        assert_eq!(config.ai_query_url, "http://ai.internal:9000");
        assert_eq!(config.threat_intel_url, "http://ti.internal:9100");
        assert_eq!(config.theme, "nord");
        // Untouched fields keep defaults
        assert_eq!(config.dashboard_url, DEFAULT_DASHBOARD_URL);
    }

    #[test]
    fn trailing_slash_stripped_from_service_urls() {
        let fc: FileConfig = toml::from_str(r#"ai_query_url = "http://ai:9000/""#).unwrap();
        let config = Config::merged(fc);
        assert_eq!(config.ai_query_url, "http://ai:9000");
    }

    #[test]
    fn timeout_clamped_to_minimum() {
        let fc: FileConfig = toml::from_str("request_timeout_secs = 0").unwrap();
        let config = Config::merged(fc);
        assert_eq!(config.request_timeout_secs, MIN_REQUEST_TIMEOUT_SECS);
    }

    #[test]
    fn empty_strings_ignored() {
        let fc: FileConfig = toml::from_str(r#"theme = """#).unwrap();
        let config = Config::merged(fc);
        assert_eq!(config.theme, "default");
    }
}
