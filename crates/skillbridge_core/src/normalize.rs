//! Decode step between server payloads and the canonical model.
//!
//! The task service is loose about shapes: `required_skills` may be a JSON
//! array of `{skill, level}` objects or a string holding that array as JSON
//! text, and list endpoints may or may not wrap their items in `{"data": [...]}`.
//! Every endpoint decodes through one of the types here so nothing
//! downstream has to care.
//!
//! Normalization returns a typed result. Batch helpers drop bad records and
//! log them instead of failing the whole list.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::error::{CoreError, Result};
use crate::model::{Match, SkillRequirement, Task, TaskId, TaskStatus};

/// `required_skills` as it appears on the wire. Shape decides the variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawSkills {
    List(Vec<SkillRequirement>),
    Encoded(String),
}

impl RawSkills {
    fn decode(self, task_id: TaskId) -> Result<Vec<SkillRequirement>> {
        match self {
            RawSkills::List(list) => Ok(list),
            RawSkills::Encoded(text) => {
                let text = text.trim();
                if text.is_empty() {
                    return Ok(Vec::new());
                }
                serde_json::from_str(text)
                    .map_err(|source| CoreError::MalformedSkills { task_id, source })
            }
        }
    }
}

/// Task record exactly as the server sends it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTask {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub required_skills: Option<RawSkills>,
    #[serde(default)]
    pub cause: Option<String>,
    #[serde(default)]
    pub volunteers_needed: Option<u32>,
    #[serde(default)]
    pub status: Option<TaskStatus>,
}

impl From<Task> for RawTask {
    fn from(task: Task) -> Self {
        Self {
            id: task.id,
            title: task.title,
            description: Some(task.description),
            location: Some(task.location),
            start_date: task.start_date.map(|d| d.to_string()),
            end_date: task.end_date.map(|d| d.to_string()),
            required_skills: Some(RawSkills::List(task.required_skills)),
            cause: task.cause,
            volunteers_needed: Some(task.volunteers_needed),
            status: Some(task.status),
        }
    }
}

/// Entry of `/volunteers/{id}/matched-tasks`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawMatch {
    pub task: RawTask,
    pub score: f64,
    #[serde(default)]
    pub reasons: Vec<String>,
}

/// A list endpoint body: either a bare array or `{"data": [...]}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Listing<T> {
    Bare(Vec<T>),
    Wrapped { data: Vec<T> },
}

impl<T> Listing<T> {
    pub fn into_items(self) -> Vec<T> {
        match self {
            Listing::Bare(items) | Listing::Wrapped { data: items } => items,
        }
    }
}

/// A record dropped during batch normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rejected {
    /// `None` when the record had no usable `id`.
    pub task_id: Option<TaskId>,
    pub reason: String,
}

/// Output of a batch normalization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizeReport<T> {
    pub items: Vec<T>,
    pub rejected: Vec<Rejected>,
}

impl<T> Default for NormalizeReport<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            rejected: Vec::new(),
        }
    }
}

impl<T> NormalizeReport<T> {
    fn reject(&mut self, task_id: Option<TaskId>, error: &dyn std::fmt::Display, what: &str) {
        warn!(task.id = ?task_id, error = %error, "Excluding {}", what);
        self.rejected.push(Rejected {
            task_id,
            reason: error.to_string(),
        });
    }
}

/// Convert one wire task into the canonical shape.
pub fn normalize_task(raw: RawTask) -> Result<Task> {
    let required_skills = match raw.required_skills {
        Some(skills) => skills.decode(raw.id)?,
        None => Vec::new(),
    };

    Ok(Task {
        id: raw.id,
        start_date: parse_date(raw.id, "start_date", raw.start_date.as_deref()),
        end_date: parse_date(raw.id, "end_date", raw.end_date.as_deref()),
        title: raw.title,
        description: raw.description.unwrap_or_default(),
        location: raw.location.unwrap_or_default(),
        required_skills,
        cause: raw.cause.filter(|c| !c.trim().is_empty()),
        volunteers_needed: raw.volunteers_needed.unwrap_or(1),
        status: raw.status.unwrap_or_default(),
    })
}

/// Normalize a catalog, excluding (and logging) records that fail.
///
/// Records are taken as raw JSON so a single malformed one, whatever the
/// field, never fails the whole list.
pub fn normalize_tasks(raw: Vec<Value>) -> NormalizeReport<Task> {
    let mut report = NormalizeReport::default();
    for record in raw {
        let task_id = record_id(&record);
        match serde_json::from_value::<RawTask>(record) {
            Ok(task) => match normalize_task(task) {
                Ok(task) => report.items.push(task),
                Err(e) => report.reject(task_id, &e, "task record"),
            },
            Err(e) => report.reject(task_id, &e, "task record"),
        }
    }
    report
}

/// Convert one matched-task entry. Score is rounded and clamped to 0..=100.
pub fn normalize_match(raw: RawMatch) -> Result<Match> {
    let score = if raw.score.is_finite() {
        raw.score.round().clamp(0.0, 100.0) as u8
    } else {
        0
    };
    Ok(Match {
        task: normalize_task(raw.task)?,
        score,
        reasons: raw.reasons,
    })
}

/// Same contract as [`normalize_tasks`] for `matched-tasks` entries.
pub fn normalize_matches(raw: Vec<Value>) -> NormalizeReport<Match> {
    let mut report = NormalizeReport::default();
    for record in raw {
        let task_id = record.get("task").and_then(record_id);
        match serde_json::from_value::<RawMatch>(record) {
            Ok(m) => match normalize_match(m) {
                Ok(m) => report.items.push(m),
                Err(e) => report.reject(task_id, &e, "matched task"),
            },
            Err(e) => report.reject(task_id, &e, "matched task"),
        }
    }
    report
}

fn record_id(record: &Value) -> Option<TaskId> {
    record.get("id").and_then(Value::as_u64)
}

/// Accepts `YYYY-MM-DD`, RFC 3339, or anything starting with a calendar date.
fn parse_date(task_id: TaskId, field: &str, value: Option<&str>) -> Option<NaiveDate> {
    let raw = value?.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    if let Some(date) = raw
        .get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
    {
        return Some(date);
    }
    warn!(task.id = task_id, field, value = raw, "Unparseable date, leaving empty");
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: serde_json::Value) -> RawTask {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_list_skills_pass_through() {
        let task = normalize_task(raw(json!({
            "id": 1,
            "title": "Community Garden Setup",
            "required_skills": [{ "skill": "Gardening", "level": "Beginner" }]
        })))
        .unwrap();
        assert_eq!(
            task.required_skills,
            vec![SkillRequirement::new("Gardening", "Beginner")]
        );
    }

    #[test]
    fn test_encoded_skills_are_decoded() {
        let task = normalize_task(raw(json!({
            "id": 2,
            "title": "Tutoring",
            "required_skills": "[{\"skill\":\"Math\",\"level\":\"Advanced\"}]"
        })))
        .unwrap();
        assert_eq!(
            task.required_skills,
            vec![SkillRequirement::new("Math", "Advanced")]
        );
    }

    #[test]
    fn test_encoded_empty_array_is_empty_list() {
        let task = normalize_task(raw(json!({
            "id": 3,
            "title": "Beach Cleanup",
            "required_skills": "[]"
        })))
        .unwrap();
        assert!(task.required_skills.is_empty());
    }

    #[test]
    fn test_missing_skills_is_empty_list() {
        let task = normalize_task(raw(json!({ "id": 4, "title": "x", "required_skills": null })))
            .unwrap();
        assert!(task.required_skills.is_empty());
    }

    #[test]
    fn test_malformed_skills_is_an_error() {
        let err = normalize_task(raw(json!({
            "id": 5,
            "title": "Broken",
            "required_skills": "[{\"skill\":"
        })))
        .unwrap_err();
        assert!(matches!(err, CoreError::MalformedSkills { task_id: 5, .. }));
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = normalize_task(raw(json!({
            "id": 6,
            "title": "Food Bank",
            "location": "Austin",
            "start_date": "2024-06-01",
            "required_skills": "[{\"skill\":\"Logistics\",\"level\":\"Intermediate\"}]",
            "cause": "Hunger",
            "volunteers_needed": 4,
            "status": "Ongoing"
        })))
        .unwrap();
        let twice = normalize_task(RawTask::from(once.clone())).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_cause_defaults_to_none() {
        let task = normalize_task(raw(json!({ "id": 7, "title": "x" }))).unwrap();
        assert_eq!(task.cause, None);
        assert_eq!(task.status, TaskStatus::Open);
        assert_eq!(task.volunteers_needed, 1);
    }

    #[test]
    fn test_dates_accept_datetime_strings() {
        let task = normalize_task(raw(json!({
            "id": 8,
            "title": "x",
            "start_date": "2024-06-01T09:00:00Z",
            "end_date": "2024-06-02 17:00:00",
        })))
        .unwrap();
        assert_eq!(task.start_date, NaiveDate::from_ymd_opt(2024, 6, 1));
        assert_eq!(task.end_date, NaiveDate::from_ymd_opt(2024, 6, 2));
    }

    #[test]
    fn test_batch_excludes_bad_records() {
        let report = normalize_tasks(vec![
            json!({ "id": 1, "title": "ok", "required_skills": [] }),
            json!({ "id": 2, "title": "bad", "required_skills": "not json" }),
            json!({ "id": 3, "title": "ok too" }),
        ]);
        let ids: Vec<_> = report.items.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(report.rejected.len(), 1);
        assert_eq!(report.rejected[0].task_id, Some(2));
    }

    #[test]
    fn test_batch_excludes_records_that_do_not_decode() {
        let report = normalize_tasks(vec![
            json!({ "id": 1, "title": "Community Garden Setup" }),
            json!({ "id": 2, "title": "List of names", "required_skills": ["Gardening"] }),
            json!({ "id": 3, "title": "Cancelled drive", "status": "Cancelled" }),
            json!({ "id": 4, "title": "Volunteers as text", "volunteers_needed": "four" }),
            json!({ "title": "No id" }),
            json!({ "id": 6, "title": "Beach Cleanup" }),
        ]);
        let ids: Vec<_> = report.items.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 6]);
        let rejected: Vec<_> = report.rejected.iter().map(|r| r.task_id).collect();
        assert_eq!(rejected, vec![Some(2), Some(3), Some(4), None]);
        assert!(report.rejected.iter().all(|r| !r.reason.is_empty()));
    }

    #[test]
    fn test_skill_name_list_is_rejected_in_either_shape() {
        let report = normalize_tasks(vec![
            json!({ "id": 1, "title": "array", "required_skills": ["Gardening"] }),
            json!({ "id": 2, "title": "string", "required_skills": "[\"Gardening\"]" }),
        ]);
        assert!(report.items.is_empty());
        assert_eq!(report.rejected.len(), 2);
    }

    #[test]
    fn test_match_batch_excludes_bad_entries() {
        let report = normalize_matches(vec![
            json!({ "task": { "id": 1, "title": "a" }, "score": 91, "reasons": ["Same city"] }),
            json!({ "task": { "id": 2, "title": "b", "status": "Archived" }, "score": 70 }),
            json!({ "task": { "id": 3, "title": "c" }, "score": "high" }),
        ]);
        let ids: Vec<_> = report.items.iter().map(|m| m.task.id).collect();
        assert_eq!(ids, vec![1]);
        let rejected: Vec<_> = report.rejected.iter().map(|r| r.task_id).collect();
        assert_eq!(rejected, vec![Some(2), Some(3)]);
    }

    #[test]
    fn test_listing_accepts_both_shapes() {
        let bare: Listing<RawTask> =
            serde_json::from_value(json!([{ "id": 1, "title": "a" }])).unwrap();
        let wrapped: Listing<RawTask> =
            serde_json::from_value(json!({ "data": [{ "id": 1, "title": "a" }] })).unwrap();
        assert_eq!(bare.into_items(), wrapped.into_items());

        let empty: Listing<RawTask> = serde_json::from_value(json!([])).unwrap();
        assert!(empty.into_items().is_empty());
    }

    #[test]
    fn test_match_score_is_clamped() {
        let m = normalize_match(RawMatch {
            task: raw(json!({ "id": 1, "title": "a" })),
            score: 104.6,
            reasons: vec!["Skill match: Gardening".into()],
        })
        .unwrap();
        assert_eq!(m.score, 100);

        let m = normalize_match(RawMatch {
            task: raw(json!({ "id": 1, "title": "a" })),
            score: 79.4,
            reasons: vec![],
        })
        .unwrap();
        assert_eq!(m.score, 79);
    }
}
