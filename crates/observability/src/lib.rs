//! SkillBridge Observability - tracing setup and span helpers
//!
//! Every SkillBridge binary initializes logging through this crate so the
//! filter, format and output stream are the same everywhere.
//!
//! # Quick Start
//!
//! ```no_run
//! use skillbridge_observability::{init, ObservabilityConfig};
//!
//! let config = ObservabilityConfig::new("skillbridge-cli").with_log_level("debug");
//! init(config)?;
//!
//! tracing::info!("Dashboard started");
//! # Ok::<(), skillbridge_observability::ObservabilityError>(())
//! ```
//!
//! # Environment Variables
//!
//! - `SERVICE_NAME` - Service name
//! - `SKILLBRIDGE_LOG` or `RUST_LOG` - Log level filter
//! - `NO_COLOR` - Disable ANSI colors

pub mod config;
pub mod error;
pub mod telemetry;
pub mod tracing;

pub use config::ObservabilityConfig;
pub use error::ObservabilityError;
pub use telemetry::{init, init_from_env};
pub use tracing::{record_duration, record_error};
