// Router-level tests for the Lookout API
//
// These exercise the full ingest -> store -> query path over an in-memory
// database, without binding a socket.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::Utc;
use http_body_util::BodyExt;
use lookout_api::{build_app, hub::EventHub, AppContext};
use lookout_storage::Database;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

async fn test_app() -> Router {
    let db = Arc::new(Database::in_memory().await.unwrap());
    let hub = Arc::new(EventHub::new(64));
    build_app(AppContext::new(db, hub))
}

fn event_body(session_id: &str, event_type: &str) -> Value {
    json!({
        "timestamp": Utc::now().timestamp_millis(),
        "session_id": session_id,
        "event_type": event_type,
    })
}

fn post_event(body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/v1/events")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_ingest_returns_stored_record() {
    let app = test_app().await;

    let mut body = event_body("session_abc", "PreToolUse");
    body["tool_name"] = json!("Bash");
    body["payload"] = json!({"tool_use_id": "tool_use_1"});

    let response = app.oneshot(post_event(&body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let record = body_json(response).await;
    assert_eq!(record["id"], 1);
    assert_eq!(record["session_id"], "session_abc");
    assert_eq!(record["event_type"], "PreToolUse");
    assert_eq!(record["tool_name"], "Bash");
    assert_eq!(record["payload"]["tool_use_id"], "tool_use_1");
}

#[tokio::test]
async fn test_invalid_event_is_rejected_without_side_effects() {
    let app = test_app().await;

    let body = json!({
        "timestamp": Utc::now().timestamp_millis(),
        "event_type": "PreToolUse",
    });

    let response = app.clone().oneshot(post_event(&body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let error = body_json(response).await;
    assert!(error["error"].as_str().unwrap().contains("session_id"));

    // Nothing was stored
    let response = app.oneshot(get("/v1/events")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let listed = body_json(response).await;
    assert_eq!(listed["data"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_legacy_event_type_field_name_is_accepted() {
    let app = test_app().await;

    let body = json!({
        "timestamp": Utc::now().timestamp_millis(),
        "session_id": "session_abc",
        "hook_event_type": "SessionStart",
    });

    let response = app.oneshot(post_event(&body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let record = body_json(response).await;
    assert_eq!(record["event_type"], "SessionStart");
}

#[tokio::test]
async fn test_list_events_newest_first_with_limit() {
    let app = test_app().await;

    for _ in 0..5 {
        let response = app
            .clone()
            .oneshot(post_event(&event_body("s1", "Notification")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app.oneshot(get("/v1/events?limit=3")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let listed = body_json(response).await;
    let ids: Vec<i64> = listed["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![5, 4, 3]);
}

#[tokio::test]
async fn test_list_events_filters() {
    let app = test_app().await;

    for (session, event_type) in [
        ("s1", "SessionStart"),
        ("s1", "PreToolUse"),
        ("s2", "SessionStart"),
    ] {
        app.clone()
            .oneshot(post_event(&event_body(session, event_type)))
            .await
            .unwrap();
    }

    let response = app
        .clone()
        .oneshot(get("/v1/events?session_id=s1&event_type=SessionStart"))
        .await
        .unwrap();
    let listed = body_json(response).await;
    let data = listed["data"].as_array().unwrap().clone();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["id"], 1);

    let response = app.oneshot(get("/v1/events?session_id=s2")).await.unwrap();
    let listed = body_json(response).await;
    assert_eq!(listed["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_active_sessions_roster() {
    let app = test_app().await;

    let now = Utc::now().timestamp_millis();

    let mut recent = event_body("recent", "SessionStart");
    recent["timestamp"] = json!(now - 30 * 60 * 1000);
    recent["model_name"] = json!("claude-sonnet-4-5");
    app.clone().oneshot(post_event(&recent)).await.unwrap();

    let mut stale = event_body("stale", "SessionStart");
    stale["timestamp"] = json!(now - 90 * 60 * 1000);
    app.clone().oneshot(post_event(&stale)).await.unwrap();

    let response = app
        .oneshot(get("/v1/sessions/active?minutes=60"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let roster = body_json(response).await;
    let data = roster["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["session_id"], "recent");
    assert_eq!(data[0]["model_name"], "claude-sonnet-4-5");
    assert_eq!(data[0]["event_count"], 1);
}

#[tokio::test]
async fn test_tool_stats() {
    let app = test_app().await;

    for _ in 0..8 {
        let mut body = event_body("s1", "PostToolUse");
        body["tool_name"] = json!("Bash");
        app.clone().oneshot(post_event(&body)).await.unwrap();
    }
    for _ in 0..2 {
        let mut body = event_body("s1", "PostToolUseFailure");
        body["tool_name"] = json!("Bash");
        app.clone().oneshot(post_event(&body)).await.unwrap();
    }

    let response = app.oneshot(get("/v1/stats/tools?hours=1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let stats = body_json(response).await;
    assert_eq!(stats["success_failure"]["success"], 8);
    assert_eq!(stats["success_failure"]["failure"], 2);

    let usage = stats["tool_usage"].as_array().unwrap();
    assert_eq!(usage.len(), 1);
    assert_eq!(usage[0]["tool_name"], "Bash");
    assert_eq!(usage[0]["count"], 10);
}

#[tokio::test]
async fn test_stats_on_empty_store() {
    let app = test_app().await;

    let response = app.clone().oneshot(get("/v1/stats/tools")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let stats = body_json(response).await;
    assert_eq!(stats["success_failure"]["success"], 0);
    assert_eq!(stats["success_failure"]["failure"], 0);
    assert_eq!(stats["tool_usage"].as_array().unwrap().len(), 0);

    let response = app.oneshot(get("/v1/sessions/active")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let roster = body_json(response).await;
    assert_eq!(roster["data"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_stream_endpoint_opens() {
    let app = test_app().await;

    // Only inspect status and headers; the body is an endless stream
    let response = app.oneshot(get("/v1/events/stream")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["content-type"],
        "text/event-stream"
    );
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = test_app().await;

    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
}
