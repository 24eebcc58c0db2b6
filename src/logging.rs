//! Tracing setup.
//!
//! The game owns the terminal, so log lines never go to stdout or stderr. They
//! are only written when a log file is given.

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install a subscriber writing to `path`, filtered by `RUST_LOG` (default `info`).
///
/// # Example
/// ```bash
/// RUST_LOG=wrapsnake=debug wrapsnake --log-file snake.log
/// ```
pub fn init(path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false).compact())
        .try_init()
        .context("installing tracing subscriber")?;

    Ok(())
}
