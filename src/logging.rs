//! Log setup. The TUI owns the terminal, so everything goes to a file in the
//! data directory. `RUST_LOG` overrides the default filter.

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const DEFAULT_FILTER: &str = "roxbudget=info";

pub(crate) fn init(log_path: &Path) -> Result<()> {
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .with_context(|| format!("Could not open log file: {}", log_path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let file_layer = fmt::layer()
        .with_ansi(false)
        .with_target(false)
        .with_writer(Arc::new(log_file));

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init()
        .context("Failed to install log subscriber")?;
    Ok(())
}
