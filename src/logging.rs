//! Tracing subscriber setup.
//!
//! The TUI owns stdout/stderr while it runs, so interactive sessions log to
//! a file; line mode logs to stderr.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use crate::constants::DEFAULT_LOG_DIRECTIVE;

pub enum LogTarget {
    File(PathBuf),
    Stderr,
}

/// Install the global subscriber. `directive` comes from `--log-level`;
/// `RUST_LOG` wins when set. On error nothing is installed and the caller
/// runs without logging.
pub fn init(directive: Option<&str>, target: LogTarget) -> Result<()> {
    let filter = build_filter(std::env::var("RUST_LOG").ok().as_deref(), directive);

    match target {
        LogTarget::Stderr => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
        LogTarget::File(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("creating log directory {}", parent.display()))?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("opening log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
    }
    Ok(())
}

fn build_filter(env: Option<&str>, directive: Option<&str>) -> EnvFilter {
    env.filter(|s| !s.is_empty())
        .or(directive)
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_DIRECTIVE))
}
