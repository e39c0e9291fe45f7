//! Canonical SkillBridge entities.
//!
//! These are the shapes the rest of the system works with. Wire payloads
//! arrive as [`crate::normalize::RawTask`] and friends and are converted
//! once at the API boundary.

use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub type TaskId = u64;
pub type UserId = u64;
pub type ApplicationId = u64;

/// Lifecycle of a posted task. Server-authoritative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum TaskStatus {
    #[default]
    Open,
    Ongoing,
    Completed,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Open => "Open",
            TaskStatus::Ongoing => "Ongoing",
            TaskStatus::Completed => "Completed",
        }
    }
}

impl FromStr for TaskStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "open" => Ok(TaskStatus::Open),
            "ongoing" | "in_progress" => Ok(TaskStatus::Ongoing),
            "completed" | "closed" => Ok(TaskStatus::Completed),
            _ => Err(CoreError::UnknownTaskStatus(s.to_string())),
        }
    }
}

impl TryFrom<String> for TaskStatus {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// State of a volunteer's application to a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum ApplicationStatus {
    #[default]
    Applied,
    Accepted,
    Rejected,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Applied => "applied",
            ApplicationStatus::Accepted => "accepted",
            ApplicationStatus::Rejected => "rejected",
        }
    }
}

impl FromStr for ApplicationStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "applied" | "pending" => Ok(ApplicationStatus::Applied),
            "accepted" => Ok(ApplicationStatus::Accepted),
            "rejected" => Ok(ApplicationStatus::Rejected),
            _ => Err(CoreError::UnknownApplicationStatus(s.to_string())),
        }
    }
}

impl TryFrom<String> for ApplicationStatus {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One entry of a task's `required_skills`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SkillRequirement {
    pub skill: String,
    #[serde(default)]
    pub level: String,
}

impl SkillRequirement {
    pub fn new(skill: impl Into<String>, level: impl Into<String>) -> Self {
        Self {
            skill: skill.into(),
            level: level.into(),
        }
    }
}

/// A task in its canonical, normalized form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: String,
    pub location: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub required_skills: Vec<SkillRequirement>,
    pub cause: Option<String>,
    pub volunteers_needed: u32,
    pub status: TaskStatus,
}

impl Task {
    /// Minimal open task; mostly useful for building fixtures.
    pub fn new(id: TaskId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: String::new(),
            location: String::new(),
            start_date: None,
            end_date: None,
            required_skills: Vec::new(),
            cause: None,
            volunteers_needed: 1,
            status: TaskStatus::Open,
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn with_skill(mut self, skill: impl Into<String>, level: impl Into<String>) -> Self {
        self.required_skills.push(SkillRequirement::new(skill, level));
        self
    }

    pub fn with_cause(mut self, cause: impl Into<String>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    pub fn requires_skill(&self, skill: &str) -> bool {
        self.required_skills.iter().any(|s| s.skill == skill)
    }
}

/// A server-computed match between a volunteer and a task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub task: Task,
    /// 0..=100
    pub score: u8,
    /// Human-readable reasons, in the order the server gave them.
    pub reasons: Vec<String>,
}

/// Entry of `/volunteers/{id}/applied-tasks`; only `task_id` matters for
/// discovery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedTaskRecord {
    pub task_id: TaskId,
    #[serde(default)]
    pub status: ApplicationStatus,
}

/// An application as returned by `/task-applications` endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskApplication {
    pub id: ApplicationId,
    pub task_id: TaskId,
    pub volunteer_id: UserId,
    #[serde(default)]
    pub status: ApplicationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Body of `POST /task-applications`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewApplication {
    pub task_id: TaskId,
    pub volunteer_id: UserId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl NewApplication {
    pub fn new(task_id: TaskId, volunteer_id: UserId) -> Self {
        Self {
            task_id,
            volunteer_id,
            message: None,
        }
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// Body of `POST /tasks` (nonprofit admin).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    pub required_skills: Vec<SkillRequirement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cause: Option<String>,
    pub volunteers_needed: u32,
    pub status: TaskStatus,
}

/// Body of `PUT /tasks/{id}`; only set fields are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_skills: Option<Vec<SkillRequirement>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volunteers_needed: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
}

impl TaskUpdate {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_task_status_is_case_insensitive() {
        let s: TaskStatus = serde_json::from_value(json!("ongoing")).unwrap();
        assert_eq!(s, TaskStatus::Ongoing);
        let s: TaskStatus = serde_json::from_value(json!("Completed")).unwrap();
        assert_eq!(s, TaskStatus::Completed);
        assert!(serde_json::from_value::<TaskStatus>(json!("Archived")).is_err());
    }

    #[test]
    fn test_task_status_serializes_capitalized() {
        assert_eq!(serde_json::to_value(TaskStatus::Open).unwrap(), json!("Open"));
    }

    #[test]
    fn test_application_status_roundtrip_lowercase() {
        assert_eq!(
            serde_json::to_value(ApplicationStatus::Accepted).unwrap(),
            json!("accepted")
        );
        let s: ApplicationStatus = serde_json::from_value(json!("Rejected")).unwrap();
        assert_eq!(s, ApplicationStatus::Rejected);
    }

    #[test]
    fn test_applied_record_defaults_status() {
        let r: AppliedTaskRecord = serde_json::from_value(json!({ "task_id": 3 })).unwrap();
        assert_eq!(r.task_id, 3);
        assert_eq!(r.status, ApplicationStatus::Applied);
    }

    #[test]
    fn test_new_application_omits_empty_message() {
        let body = serde_json::to_value(NewApplication::new(3, 7)).unwrap();
        assert_eq!(body, json!({ "task_id": 3, "volunteer_id": 7 }));
    }

    #[test]
    fn test_task_update_only_sends_set_fields() {
        let update = TaskUpdate {
            status: Some(TaskStatus::Completed),
            ..Default::default()
        };
        assert!(!update.is_empty());
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            json!({ "status": "Completed" })
        );
        assert!(TaskUpdate::default().is_empty());
    }
}
