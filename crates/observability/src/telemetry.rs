//! Global subscriber initialization.
//!
//! Logs go to stderr so that machine-readable command output on stdout is
//! never interleaved with log lines.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

use crate::config::ObservabilityConfig;
use crate::error::ObservabilityError;

/// Install the global tracing subscriber.
///
/// Returns `InitFailed` if a subscriber is already installed or the filter
/// directive does not parse.
pub fn init(config: ObservabilityConfig) -> Result<(), ObservabilityError> {
    let env_filter = build_filter(config.log_level.as_deref())?;

    let fmt_layer = config.enable_console.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(config.ansi)
            .with_target(true)
    });

    Registry::default()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| ObservabilityError::InitFailed(e.to_string()))?;

    tracing::debug!(
        service.name = %config.service_name,
        service.version = config.service_version.as_deref().unwrap_or("unknown"),
        "Tracing initialized"
    );
    Ok(())
}

/// Initialize with configuration from environment variables
pub fn init_from_env() -> Result<(), ObservabilityError> {
    init(ObservabilityConfig::from_env())
}

fn build_filter(level: Option<&str>) -> Result<EnvFilter, ObservabilityError> {
    match level {
        Some(directive) => EnvFilter::try_new(directive)
            .map_err(|e| ObservabilityError::Config(format!("bad log filter '{}': {}", directive, e))),
        None => Ok(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))),
    }
}
