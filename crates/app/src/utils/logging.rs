use std::time::Duration;

use rota_domain::RosterError;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info";

/// Output format for the process-wide subscriber
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Install the global tracing subscriber.
///
/// The filter comes from `RUST_LOG` and falls back to `info`. Calling this
/// more than once is harmless; later calls return an error that callers may
/// ignore.
///
/// # Errors
/// Returns an error when a global subscriber is already installed.
pub fn init_tracing(format: LogFormat) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);
    match format {
        LogFormat::Pretty => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    }
    .map_err(|err| anyhow::anyhow!("failed to install tracing subscriber: {err}"))
}

/// Log the outcome of a roster command with structured fields.
///
/// `command` should be a stable identifier such as `"roster::generate"`.
#[inline]
pub fn log_command_execution(
    command: &str,
    elapsed: Duration,
    success: bool,
    error_type: Option<&str>,
) {
    let duration_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);

    if success {
        info!(command, duration_ms, "command_execution_success");
    } else {
        let error_type = error_type.unwrap_or("unknown");
        warn!(command, duration_ms, error_type, "command_execution_failure");
    }
}

/// Stable label for a roster error, for logs.
#[inline]
pub fn error_label(error: &RosterError) -> &'static str {
    error.label()
}
