//! File-backed tracing setup
//!
//! The terminal is owned by the UI, so events go to a log file instead of
//! stdout/stderr.

use crate::config::LoggingConfig;
use color_eyre::Result;
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub fn init(config: &LoggingConfig) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.path)?;

    // RUST_LOG wins over the configured level
    let env_override = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = EnvFilter::try_new(filter_directives(env_override.as_deref(), &config.level))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(false),
        )
        .try_init()?;

    Ok(())
}

fn filter_directives(env_override: Option<&str>, level: &str) -> String {
    match env_override.map(str::trim) {
        Some(directives) if !directives.is_empty() => directives.to_string(),
        _ => format!("rt_docwatch={level}"),
    }
}
