//! Log subscriber setup for the binary

use crate::config::{InspectConfig, LogFormat};
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber. Logs go to stderr so command output on
/// stdout stays machine readable.
///
/// An unparseable filter falls back to `info`.
///
/// # Errors
/// Returns an error if a global subscriber is already installed.
pub fn init_logging(config: &InspectConfig) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    match config.log_format {
        LogFormat::Text => registry
            .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
            .try_init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
    }
}
