//! Shared fixtures for the HTTP-level tests.

use mockito::{Mock, ServerGuard};
use serde_json::{json, Value};
use skillbridge_client::{SkillBridgeClient, SkillBridgeConfig};
use skillbridge_core::{SessionContext, SessionUser, UserId, UserRole};

pub const TOKEN: &str = "test-token";

pub fn volunteer_session(id: UserId) -> SessionContext {
    SessionContext::new(
        TOKEN,
        SessionUser {
            id,
            name: "Test Volunteer".to_string(),
            email: Some("volunteer@example.org".to_string()),
            role: UserRole::Volunteer,
        },
    )
}

/// Client pointed at the mock server's `/api` prefix.
pub fn client_for(server: &ServerGuard, session: SessionContext) -> SkillBridgeClient {
    let config = SkillBridgeConfig::new(format!("{}/api", server.url()));
    SkillBridgeClient::new(config, session).expect("client builds")
}

pub fn task_json(id: u64, title: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "description": format!("{} description", title),
        "location": "Austin",
        "start_date": "2024-06-01",
        "end_date": "2024-06-02",
        "required_skills": [{ "skill": "Gardening", "level": "Beginner" }],
        "volunteers_needed": 3,
        "status": "Open"
    })
}

/// Register a JSON response for `method path`, requiring the bearer token.
#[allow(dead_code)]
pub async fn mock_json(
    server: &mut ServerGuard,
    method: &str,
    path: &str,
    status: usize,
    body: Value,
) -> Mock {
    server
        .mock(method, path)
        .match_header("authorization", format!("Bearer {}", TOKEN).as_str())
        .with_status(status)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create_async()
        .await
}

/// Standard discovery fixture: volunteer applied to task 3, catalog 1..=4.
#[allow(dead_code)]
pub async fn mock_discovery(server: &mut ServerGuard, volunteer_id: UserId) -> Vec<Mock> {
    vec![
        mock_json(
            server,
            "GET",
            &format!("/api/volunteers/{}/matched-tasks", volunteer_id),
            200,
            json!([
                {
                    "task": task_json(1, "Community Garden Setup"),
                    "score": 86,
                    "reasons": ["Skill match: Gardening", "Same city"]
                },
                {
                    "task": task_json(3, "Garden Tool Drive"),
                    "score": 64,
                    "reasons": ["Availability overlaps"]
                }
            ]),
        )
        .await,
        mock_json(
            server,
            "GET",
            &format!("/api/volunteers/{}/applied-tasks", volunteer_id),
            200,
            json!([{ "task_id": 3, "status": "applied" }]),
        )
        .await,
        mock_json(
            server,
            "GET",
            "/api/tasks",
            200,
            json!({
                "data": [
                    task_json(1, "Community Garden Setup"),
                    task_json(2, "Beach Cleanup"),
                    task_json(3, "Garden Tool Drive"),
                    task_json(4, "Food Bank Sorting")
                ]
            }),
        )
        .await,
    ]
}
