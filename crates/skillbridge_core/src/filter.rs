//! Discovery filtering.
//!
//! Tasks the volunteer already applied to are always excluded first. The
//! remaining filters are ANDed; an absent or empty filter value matches
//! everything.

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

use crate::model::{Task, TaskId};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskFilter {
    /// Case-sensitive substring of the title.
    pub title: Option<String>,
    /// Exact location.
    pub location: Option<String>,
    /// Exact skill name among `required_skills`.
    pub skill: Option<String>,
}

impl TaskFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn skill(mut self, skill: impl Into<String>) -> Self {
        self.skill = Some(skill.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        present(&self.title).is_none()
            && present(&self.location).is_none()
            && present(&self.skill).is_none()
    }

    pub fn matches(&self, task: &Task) -> bool {
        if let Some(title) = present(&self.title) {
            if !task.title.contains(title) {
                return false;
            }
        }
        if let Some(location) = present(&self.location) {
            if task.location != location {
                return false;
            }
        }
        if let Some(skill) = present(&self.skill) {
            if !task.requires_skill(skill) {
                return false;
            }
        }
        true
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Visible discovery list: not-yet-applied tasks passing every filter, in
/// input order.
pub fn apply(tasks: &[Task], applied: &HashSet<TaskId>, filter: &TaskFilter) -> Vec<Task> {
    tasks
        .iter()
        .filter(|task| !applied.contains(&task.id))
        .filter(|task| filter.matches(task))
        .cloned()
        .collect()
}

/// Sorted, deduplicated non-empty locations, for filter choices.
pub fn distinct_locations(tasks: &[Task]) -> Vec<String> {
    tasks
        .iter()
        .map(|t| t.location.as_str())
        .filter(|l| !l.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Sorted, deduplicated skill names across all tasks.
pub fn distinct_skills(tasks: &[Task]) -> Vec<String> {
    tasks
        .iter()
        .flat_map(|t| t.required_skills.iter().map(|s| s.skill.as_str()))
        .filter(|s| !s.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
