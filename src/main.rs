//! # NEXUS - Terminal Chat Client
//!
//! A scrolling message list, a text box, and one HTTP round trip per
//! message to the NEXUS agent backend.

#[macro_use]
extern crate rust_i18n;

// Load locale files from `locales/` directory, default to English
i18n!("locales", fallback = "en");

mod app;
mod chat;
mod config;
pub mod constants;
mod logging;
mod plain;
mod ui;
mod utils;

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;

use chat::{ChatBackend, HttpBackend};
use config::Config;
use logging::LogTarget;

/// NEXUS - terminal chat client
#[derive(Parser, Debug)]
#[command(name = "nexus", version, about = "A terminal chat client for the NEXUS agent")]
struct Cli {
    /// Chat backend URL (overrides NEXUS_API_URL and the config file)
    #[arg(long, short = 'e', value_name = "URL")]
    endpoint: Option<String>,

    /// Color theme (nexus, nord, gruvbox, dracula, or a custom theme name)
    #[arg(long, short = 't')]
    theme: Option<String>,

    /// UI language (en, pt)
    #[arg(long, short = 'l', value_name = "LANG")]
    lang: Option<String>,

    /// Opening assistant message (empty for none)
    #[arg(long, value_name = "TEXT")]
    greeting: Option<String>,

    /// Request timeout in seconds (0 = none)
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Tracing filter directive, e.g. "nexus=debug"
    #[arg(long, value_name = "DIRECTIVE")]
    log_level: Option<String>,

    /// Line mode: read messages from stdin, print replies to stdout
    #[arg(long)]
    plain: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Optional .env next to the config file (may set NEXUS_API_URL or RUST_LOG)
    let _ = dotenvy::from_path(constants::env_file_path());

    let log_target = if cli.plain {
        LogTarget::Stderr
    } else {
        LogTarget::File(constants::log_file_path())
    };
    if let Err(e) = logging::init(cli.log_level.as_deref(), log_target) {
        eprintln!("nexus: logging disabled: {:#}", e);
    }

    // Load and apply CLI overrides to config
    let mut config = Config::load();
    if let Some(endpoint) = cli.endpoint {
        if !config::is_http_url(&endpoint) {
            bail!("--endpoint must be an http(s) URL, got {:?}", endpoint);
        }
        config.endpoint = endpoint;
    }
    if let Some(theme_name) = cli.theme {
        config.theme = theme_name;
    }
    if let Some(ref lang) = cli.lang {
        config.set_lang(lang);
    }
    if let Some(greeting) = cli.greeting {
        config.greeting = Some(greeting);
    }
    if let Some(secs) = cli.timeout {
        config.request_timeout_secs = secs;
    }

    rust_i18n::set_locale(&config.lang);

    info!(
        "nexus v{} starting (endpoint: {})",
        env!("CARGO_PKG_VERSION"),
        config.endpoint
    );

    let backend: Arc<dyn ChatBackend> = Arc::new(
        HttpBackend::new(config.endpoint.clone(), config.request_timeout())
            .context("building HTTP client")?,
    );

    if cli.plain {
        return plain::run(app::new_session(&config), backend.as_ref()).await;
    }

    let mut app = app::App::new(&config, backend);
    app.run().await?;

    println!("\n{}\n", t!("app.stopped"));
    Ok(())
}
