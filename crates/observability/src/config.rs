//! Configuration for logging

use serde::{Deserialize, Serialize};

const DEFAULT_SERVICE_NAME: &str = "skillbridge";

/// Observability configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Service name attached to the startup event
    #[serde(default = "default_service_name")]
    pub service_name: String,

    /// Service version (optional)
    #[serde(default)]
    pub service_version: Option<String>,

    /// Emit formatted log lines to stderr
    #[serde(default = "default_true")]
    pub enable_console: bool,

    /// Filter directive (e.g. "info", "skillbridge_client=debug").
    /// Falls back to `RUST_LOG`, then "warn".
    #[serde(default)]
    pub log_level: Option<String>,

    /// ANSI colors in console output
    #[serde(default = "default_true")]
    pub ansi: bool,
}

fn default_service_name() -> String {
    DEFAULT_SERVICE_NAME.to_string()
}

fn default_true() -> bool {
    true
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            service_name: default_service_name(),
            service_version: None,
            enable_console: true,
            log_level: None,
            ansi: true,
        }
    }
}

impl ObservabilityConfig {
    /// Create a new configuration with service name
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            ..Default::default()
        }
    }

    /// Set service version
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.service_version = Some(version.into());
        self
    }

    /// Enable or disable console output
    pub fn with_console(mut self, enable: bool) -> Self {
        self.enable_console = enable;
        self
    }

    /// Set log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = Some(level.into());
        self
    }

    pub fn with_ansi(mut self, ansi: bool) -> Self {
        self.ansi = ansi;
        self
    }

    /// Build from environment variables
    ///
    /// Reads:
    /// - `SERVICE_NAME` → service_name
    /// - `SERVICE_VERSION` → service_version
    /// - `SKILLBRIDGE_LOG` or `RUST_LOG` → log_level
    /// - `NO_COLOR` (any value) → ansi off
    pub fn from_env() -> Self {
        let service_name =
            std::env::var("SERVICE_NAME").unwrap_or_else(|_| default_service_name());
        let service_version = std::env::var("SERVICE_VERSION").ok();
        let log_level = std::env::var("SKILLBRIDGE_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .ok();
        let ansi = std::env::var_os("NO_COLOR").is_none();

        Self {
            service_name,
            service_version,
            enable_console: true,
            log_level,
            ansi,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let config = ObservabilityConfig::new("skillbridge-cli")
            .with_version("0.1.0")
            .with_log_level("debug")
            .with_ansi(false);
        assert_eq!(config.service_name, "skillbridge-cli");
        assert_eq!(config.service_version.as_deref(), Some("0.1.0"));
        assert_eq!(config.log_level.as_deref(), Some("debug"));
        assert!(!config.ansi);
        assert!(config.enable_console);
    }

    #[test]
    fn test_deserialize_fills_defaults() {
        let config: ObservabilityConfig =
            serde_json::from_str(r#"{ "log_level": "info" }"#).unwrap();
        assert_eq!(config.service_name, "skillbridge");
        assert!(config.enable_console);
        assert!(config.ansi);
        assert_eq!(config.log_level.as_deref(), Some("info"));
    }
}
