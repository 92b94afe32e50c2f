use std::{fs::File, path::Path, sync::Mutex};

use anyhow::{Context, Result};
use tracing::Level;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Route JSON logs to `file` at `level`; `RUST_LOG` takes precedence.
///
/// The terminal belongs to the UI, so without a file nothing is installed.
pub(crate) fn init_logging(file: Option<&Path>, level: Level) -> Result<()> {
    let Some(path) = file else {
        return Ok(());
    };

    let log_file = File::options()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file '{}'", path.display()))?;

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(directives(level))?,
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(Mutex::new(log_file))
                .with_current_span(false)
                .with_span_list(false),
        )
        .with(filter)
        .try_init()?;

    Ok(())
}

fn directives(level: Level) -> String {
    let name = level.as_str().to_lowercase();
    format!("binwatch={name},binwatch_core={name},binwatch_tui={name}")
}
