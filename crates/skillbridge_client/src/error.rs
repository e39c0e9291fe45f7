//! Error types for SkillBridge API operations.

use thiserror::Error;

/// Errors that can occur when talking to the task/matching service.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Configuration error (bad env vars, invalid values)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Transport failure: connection refused, reset, timeout
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response. `message` is taken from the body when possible.
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Payload did not fit the canonical model
    #[error(transparent)]
    Normalize(#[from] skillbridge_core::CoreError),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Session file I/O
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// No stored session; log in first
    #[error("No session found at {0}")]
    MissingSession(String),
}

impl ClientError {
    /// Text suitable for a user-facing notification. Server messages are
    /// passed through unchanged.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Api { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Result type for SkillBridge client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
