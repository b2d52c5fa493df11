//! # Vigil - Terminal Security-Operations Console
//!
//! An authenticated workspace for security analysts: a live overview, an
//! AI investigation assistant, and IP threat-intelligence lookups, backed
//! by external collaborator services.

#[macro_use]
extern crate rust_i18n;

// Load locale files from `locales/` directory, default to English
i18n!("locales", fallback = "en");

mod app;
mod chat;
mod config;
pub mod constants;
mod gateway;
mod intel;
mod session;
mod ui;
mod utils;

use anyhow::Result;
use clap::Parser;

use config::Config;

/// Vigil - Terminal Security-Operations Console
#[derive(Parser, Debug)]
#[command(
    name = "vigil",
    version,
    about = "A terminal security-operations console with an AI investigation assistant"
)]
struct Cli {
    /// Color theme (default, gruvbox, nord, dracula, or a custom theme name)
    #[arg(long, short = 't')]
    theme: Option<String>,

    /// AI query service base URL
    #[arg(long, value_name = "URL")]
    ai_url: Option<String>,

    /// Threat-intel service base URL
    #[arg(long, value_name = "URL")]
    intel_url: Option<String>,

    /// UI language
    #[arg(long, short = 'l', value_name = "LANG")]
    lang: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load and apply CLI overrides to config
    let mut config = Config::load();
    if let Some(ref theme_name) = cli.theme {
        config.theme = theme_name.clone();
    }
    if let Some(ref url) = cli.ai_url {
        config.ai_query_url = url.trim_end_matches('/').to_string();
    }
    if let Some(ref url) = cli.intel_url {
        config.threat_intel_url = url.trim_end_matches('/').to_string();
    }
    if let Some(ref lang) = cli.lang {
        config.lang = lang.clone();
    }

    // Set UI language (CLI > config > default "en")
    rust_i18n::set_locale(&config.lang);

    // Build and run the application
    let mut app = app::App::new(&config)?;
    app.run().await
}
