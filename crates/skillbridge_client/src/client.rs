//! SkillBridge REST client.
//!
//! Thin typed wrapper over `reqwest`: every endpoint decodes through
//! `skillbridge_core::normalize`, so callers only see canonical types.
//! No retries; a transport failure or non-2xx response is returned as-is.

use std::time::Instant;

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use skillbridge_core::normalize::{self, Listing, NormalizeReport, RawTask};
use skillbridge_core::{
    AppliedTaskRecord, ApplicationId, ApplicationStatus, Match, NewApplication, NewTask,
    SessionContext, Task, TaskApplication, TaskId, TaskUpdate, UserId,
};
use skillbridge_observability::{http_request_span, record_duration};
use tracing::{debug, error, info, Instrument};

use crate::api::TaskApi;
use crate::config::SkillBridgeConfig;
use crate::error::{ClientError, Result};
use crate::types::DiscoverySnapshot;

/// Single-object body, bare or wrapped in `{"data": ...}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum Envelope<T> {
    Bare(T),
    Wrapped { data: T },
}

impl<T> Envelope<T> {
    fn into_inner(self) -> T {
        match self {
            Envelope::Bare(v) | Envelope::Wrapped { data: v } => v,
        }
    }
}

/// Client for the task/matching service.
///
/// Holds the injected session; the bearer token is attached to every call.
#[derive(Clone)]
pub struct SkillBridgeClient {
    http: reqwest::Client,
    config: SkillBridgeConfig,
    session: SessionContext,
}

impl SkillBridgeClient {
    pub fn new(config: SkillBridgeConfig, session: SessionContext) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;
        Ok(Self {
            http,
            config,
            session,
        })
    }

    // ── Discovery ──────────────────────────────────────────────────

    /// `GET /volunteers/{id}/matched-tasks`
    pub async fn matched_tasks(&self, volunteer_id: UserId) -> Result<NormalizeReport<Match>> {
        let path = format!("/volunteers/{}/matched-tasks", volunteer_id);
        let listing: Listing<Value> = self.get(&path).await?;
        Ok(normalize::normalize_matches(listing.into_items()))
    }

    /// `GET /volunteers/{id}/applied-tasks`
    pub async fn applied_tasks(&self, volunteer_id: UserId) -> Result<Vec<AppliedTaskRecord>> {
        let path = format!("/volunteers/{}/applied-tasks", volunteer_id);
        let listing: Listing<AppliedTaskRecord> = self.get(&path).await?;
        Ok(listing.into_items())
    }

    /// `GET /tasks`
    pub async fn tasks(&self) -> Result<NormalizeReport<Task>> {
        let listing: Listing<Value> = self.get("/tasks").await?;
        Ok(normalize::normalize_tasks(listing.into_items()))
    }

    /// Fan out the three discovery requests concurrently and wait for all.
    ///
    /// The first failure fails the whole fetch; no partial snapshot.
    pub async fn fetch_discovery(&self, volunteer_id: UserId) -> Result<DiscoverySnapshot> {
        let span = tracing::info_span!(
            "discovery.fetch",
            volunteer.id = volunteer_id,
            duration_ms = tracing::field::Empty,
        );
        async {
            let start = Instant::now();
            let fetched = tokio::try_join!(
                self.matched_tasks(volunteer_id),
                self.applied_tasks(volunteer_id),
                self.tasks(),
            );
            let (matches, applied, catalog) = match fetched {
                Ok(parts) => parts,
                Err(e) => {
                    error!(error = %e, "Discovery fetch failed");
                    return Err(e);
                }
            };

            record_duration("duration_ms", start.elapsed());

            let mut rejected = catalog.rejected;
            rejected.extend(matches.rejected);

            let snapshot = DiscoverySnapshot {
                matches: matches.items,
                applied: applied.into_iter().map(|r| r.task_id).collect(),
                tasks: catalog.items,
                rejected,
            };
            info!(
                matches = snapshot.matches.len(),
                applied = snapshot.applied.len(),
                tasks = snapshot.tasks.len(),
                rejected = snapshot.rejected.len(),
                "Discovery fetch complete"
            );
            Ok(snapshot)
        }
        .instrument(span)
        .await
    }

    // ── Applications ───────────────────────────────────────────────

    /// `POST /task-applications`
    pub async fn apply_to_task(
        &self,
        application: NewApplication,
    ) -> Result<Option<TaskApplication>> {
        let body = self
            .send_json(Method::POST, "/task-applications", &application)
            .await?;
        Ok(decode_lenient::<TaskApplication>(&body))
    }

    /// `POST /task-applications/{id}/update-status`
    pub async fn update_application_status(
        &self,
        application_id: ApplicationId,
        status: ApplicationStatus,
    ) -> Result<()> {
        let path = format!("/task-applications/{}/update-status", application_id);
        self.send_json(Method::POST, &path, &json!({ "status": status }))
            .await?;
        Ok(())
    }

    /// `GET /tasks/{id}/applications`
    pub async fn task_applications(&self, task_id: TaskId) -> Result<Vec<TaskApplication>> {
        let path = format!("/tasks/{}/applications", task_id);
        let listing: Listing<TaskApplication> = self.get(&path).await?;
        Ok(listing.into_items())
    }

    // ── Task administration ────────────────────────────────────────

    /// `GET /tasks/{id}`
    pub async fn task(&self, task_id: TaskId) -> Result<Task> {
        let path = format!("/tasks/{}", task_id);
        let raw: Envelope<RawTask> = self.get(&path).await?;
        Ok(normalize::normalize_task(raw.into_inner())?)
    }

    /// `POST /tasks`
    pub async fn create_task(&self, task: &NewTask) -> Result<Task> {
        let body = self.send_json(Method::POST, "/tasks", task).await?;
        let raw: Envelope<RawTask> = serde_json::from_str(&body)?;
        Ok(normalize::normalize_task(raw.into_inner())?)
    }

    /// `PUT /tasks/{id}`
    pub async fn update_task(&self, task_id: TaskId, update: &TaskUpdate) -> Result<Task> {
        if update.is_empty() {
            return Err(ClientError::Config("task update has no fields set".into()));
        }
        let path = format!("/tasks/{}", task_id);
        let body = self.send_json(Method::PUT, &path, update).await?;
        let raw: Envelope<RawTask> = serde_json::from_str(&body)?;
        Ok(normalize::normalize_task(raw.into_inner())?)
    }

    // ── Plumbing ───────────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let request = self.http.get(self.config.endpoint(path));
        let body = self.execute("GET", path, request).await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn send_json<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<String> {
        let label = method.as_str().to_string();
        let request = self
            .http
            .request(method, self.config.endpoint(path))
            .json(body);
        self.execute(&label, path, request).await
    }

    /// Send with auth, map non-2xx to `ClientError::Api`, return the body text.
    async fn execute(&self, method: &str, path: &str, request: RequestBuilder) -> Result<String> {
        let span = http_request_span!(method, path);
        async {
            let response = request
                .header(AUTHORIZATION, self.session.bearer())
                .send()
                .await?;
            let status = response.status();
            tracing::Span::current().record("http.status_code", status.as_u16());
            read_body(status, response).await
        }
        .instrument(span)
        .await
    }
}

async fn read_body(status: StatusCode, response: Response) -> Result<String> {
    let body = response.text().await?;
    if status.is_success() {
        debug!(bytes = body.len(), "Response received");
        return Ok(body);
    }
    let message = error_message(status, &body);
    debug!(status = status.as_u16(), message = %message, "API returned error");
    Err(ClientError::Api {
        status: status.as_u16(),
        message,
    })
}

/// Pull a human-readable message out of an error body.
fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        for key in ["message", "detail", "error"] {
            if let Some(text) = value.get(key).and_then(Value::as_str) {
                return text.to_string();
            }
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string()
    } else {
        trimmed.to_string()
    }
}

fn decode_lenient<T: DeserializeOwned>(body: &str) -> Option<T> {
    serde_json::from_str::<Envelope<T>>(body)
        .ok()
        .map(Envelope::into_inner)
}

#[async_trait]
impl TaskApi for SkillBridgeClient {
    async fn fetch_discovery(&self, volunteer_id: UserId) -> Result<DiscoverySnapshot> {
        SkillBridgeClient::fetch_discovery(self, volunteer_id).await
    }

    async fn apply_to_task(&self, application: NewApplication) -> Result<Option<TaskApplication>> {
        SkillBridgeClient::apply_to_task(self, application).await
    }

    async fn update_application_status(
        &self,
        application_id: ApplicationId,
        status: ApplicationStatus,
    ) -> Result<()> {
        SkillBridgeClient::update_application_status(self, application_id, status).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_prefers_message_field() {
        let msg = error_message(
            StatusCode::UNPROCESSABLE_ENTITY,
            r#"{"message":"Already applied","detail":"dup"}"#,
        );
        assert_eq!(msg, "Already applied");
    }

    #[test]
    fn test_error_message_falls_back_to_detail_then_body() {
        assert_eq!(
            error_message(StatusCode::NOT_FOUND, r#"{"detail":"Task not found"}"#),
            "Task not found"
        );
        assert_eq!(
            error_message(StatusCode::BAD_GATEWAY, "upstream down"),
            "upstream down"
        );
        assert_eq!(
            error_message(StatusCode::SERVICE_UNAVAILABLE, ""),
            "Service Unavailable"
        );
    }

    #[test]
    fn test_decode_lenient_accepts_wrapped_and_garbage() {
        let wrapped = r#"{"data":{"id":9,"task_id":3,"volunteer_id":7,"status":"applied"}}"#;
        let app: Option<TaskApplication> = decode_lenient(wrapped);
        assert_eq!(app.map(|a| a.id), Some(9));
        assert!(decode_lenient::<TaskApplication>(r#"{"ok":true}"#).is_none());
    }
}
