use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::shared::error::SimulatorError;

/// Filter used when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "fbcon=debug";

/// Install a fmt subscriber that appends to `log_file`.
///
/// The TUI owns the terminal, so nothing is ever logged to stdout or stderr.
/// Without a log file no subscriber is installed and events are dropped.
/// Returns whether a subscriber was installed by this call.
pub fn init(log_file: Option<&Path>) -> Result<bool, SimulatorError> {
    let Some(path) = log_file else {
        return Ok(false);
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| SimulatorError::LogFile {
            path: path.to_path_buf(),
            source,
        })?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .is_ok();
    Ok(installed)
}
