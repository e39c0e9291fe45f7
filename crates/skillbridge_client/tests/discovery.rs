//! End-to-end discovery scenarios: real client, mock server, discovery view.
//!
//! Run with: cargo test -p skillbridge-client --test discovery

mod common;

use std::sync::Arc;

use common::{client_for, mock_discovery, mock_json, volunteer_session};
use serde_json::json;
use skillbridge_client::{DiscoveryView, ViewState};
use skillbridge_core::{ScoreTier, TaskFilter};

#[tokio::test]
async fn test_discovery_hides_already_applied_task() {
    let mut server = mockito::Server::new_async().await;
    let _mocks = mock_discovery(&mut server, 7).await;
    let session = volunteer_session(7);
    let client = client_for(&server, session.clone());

    let mut view = DiscoveryView::mount(Arc::new(client), &session);
    view.load().await;

    assert_eq!(view.state(), &ViewState::Ready);
    let ids: Vec<_> = view.visible_tasks().iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![1, 2, 4]);

    let matches = view.visible_matches();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].task.id, 1);
    assert_eq!(matches[0].tier(), ScoreTier::High);
}

#[tokio::test]
async fn test_title_filter_keeps_only_matching_titles() {
    let mut server = mockito::Server::new_async().await;
    let _matched = mock_json(&mut server, "GET", "/api/volunteers/7/matched-tasks", 200, json!([])).await;
    let _applied = mock_json(&mut server, "GET", "/api/volunteers/7/applied-tasks", 200, json!([])).await;
    let _tasks = mock_json(
        &mut server,
        "GET",
        "/api/tasks",
        200,
        json!([
            { "id": 1, "title": "Community Garden Setup" },
            { "id": 2, "title": "Beach Cleanup" }
        ]),
    )
    .await;
    let session = volunteer_session(7);
    let client = client_for(&server, session.clone());

    let mut view = DiscoveryView::mount(Arc::new(client), &session);
    view.load().await;
    view.set_filter(TaskFilter::new().title("Garden"));

    let titles: Vec<_> = view.visible_tasks().iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["Community Garden Setup"]);
}

#[tokio::test]
async fn test_rejected_application_leaves_applied_state_alone() {
    let mut server = mockito::Server::new_async().await;
    let _mocks = mock_discovery(&mut server, 7).await;
    let _apply = mock_json(
        &mut server,
        "POST",
        "/api/task-applications",
        422,
        json!({ "message": "Already applied" }),
    )
    .await;
    let session = volunteer_session(7);
    let client = client_for(&server, session.clone());

    let mut view = DiscoveryView::mount(Arc::new(client), &session);
    view.load().await;
    let applied_before = view.applied().clone();

    assert!(view.apply(2).await.is_err());

    assert_eq!(view.applied(), &applied_before);
    let notes = view.take_notifications();
    assert!(notes
        .iter()
        .any(|n| n.is_error() && n.message == "Already applied"));
    let ids: Vec<_> = view.visible_tasks().iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![1, 2, 4]);
}

#[tokio::test]
async fn test_failed_endpoint_empties_the_view() {
    let mut server = mockito::Server::new_async().await;
    let _matched = mock_json(&mut server, "GET", "/api/volunteers/7/matched-tasks", 503, json!({})).await;
    let _applied = mock_json(&mut server, "GET", "/api/volunteers/7/applied-tasks", 200, json!([])).await;
    let _tasks = mock_json(&mut server, "GET", "/api/tasks", 200, json!([{ "id": 1, "title": "a" }])).await;
    let session = volunteer_session(7);
    let client = client_for(&server, session.clone());

    let mut view = DiscoveryView::mount(Arc::new(client), &session);
    view.load().await;

    assert!(matches!(view.state(), ViewState::Failed(_)));
    assert!(view.visible_tasks().is_empty());
}

#[tokio::test]
async fn test_malformed_records_are_dropped_not_fatal() {
    let mut server = mockito::Server::new_async().await;
    let _matched = mock_json(
        &mut server,
        "GET",
        "/api/volunteers/7/matched-tasks",
        200,
        json!([
            { "task": { "id": 1, "title": "Community Garden Setup" }, "score": 88 },
            { "task": { "id": 5, "title": "Bad", "status": "Cancelled" }, "score": 90 }
        ]),
    )
    .await;
    let _applied = mock_json(&mut server, "GET", "/api/volunteers/7/applied-tasks", 200, json!([])).await;
    let _tasks = mock_json(
        &mut server,
        "GET",
        "/api/tasks",
        200,
        json!({
            "data": [
                { "id": 1, "title": "Community Garden Setup" },
                { "id": 2, "title": "Skill names only", "required_skills": ["Gardening"] },
                { "id": 3, "title": "Cancelled drive", "status": "Cancelled" },
                { "id": 4, "title": "Beach Cleanup" }
            ]
        }),
    )
    .await;
    let session = volunteer_session(7);
    let client = client_for(&server, session.clone());

    let mut view = DiscoveryView::mount(Arc::new(client), &session);
    view.load().await;

    assert_eq!(view.state(), &ViewState::Ready);
    let ids: Vec<_> = view.visible_tasks().iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![1, 4]);
    let matched: Vec<_> = view.visible_matches().iter().map(|m| m.task.id).collect();
    assert_eq!(matched, vec![1]);
}
