//! Result and notification types produced by the client and the view.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use skillbridge_core::{Match, Rejected, Task, TaskId};

/// Everything the discovery dashboard needs, fetched in one fan-out.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DiscoverySnapshot {
    /// Matches in server order
    pub matches: Vec<Match>,
    /// Ids of tasks the volunteer already applied to
    pub applied: HashSet<TaskId>,
    /// Full catalog, normalized
    pub tasks: Vec<Task>,
    /// Records dropped during normalization (catalog and matches)
    pub rejected: Vec<Rejected>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationLevel {
    Success,
    Info,
    Error,
}

/// Transient user-facing message (a toast).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NotificationLevel::Error
    }
}
