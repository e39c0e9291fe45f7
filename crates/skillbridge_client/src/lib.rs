//! SkillBridge client: REST access to the task/matching service and the
//! volunteer discovery view built on top of it.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use skillbridge_client::{DiscoveryView, SessionStore, SkillBridgeClient, SkillBridgeConfig};
//! use skillbridge_core::TaskFilter;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = SkillBridgeConfig::from_env()?;
//!     let session = SessionStore::from_config(&config).load()?;
//!     let client = SkillBridgeClient::new(config, session.clone())?;
//!
//!     let mut view = DiscoveryView::mount(Arc::new(client), &session);
//!     view.load().await;
//!     view.set_filter(TaskFilter::new().title("Garden"));
//!     for task in view.visible_tasks() {
//!         println!("{} {}", task.id, task.title);
//!     }
//!     view.unmount();
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod session_store;
pub mod types;
pub mod view;


pub use api::TaskApi;
pub use client::SkillBridgeClient;
pub use config::{default_session_path, SkillBridgeConfig, DEFAULT_API_URL};
pub use error::{ClientError, Result};
pub use session_store::SessionStore;
pub use types::{DiscoverySnapshot, Notification, NotificationLevel};
pub use view::{DiscoveryView, ViewHandle, ViewState};
