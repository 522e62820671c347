// ABOUTME: Integration tests for the HTTP route layer
// ABOUTME: Exercises handlers end-to-end against a file-backed test database
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Rentora

#![allow(missing_docs, clippy::unwrap_used)]

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use rentora_server::config::{AssistantConfig, ServerConfig};
use rentora_server::database::Database;
use rentora_server::llm::AssistantClient;
use rentora_server::resources::ServerResources;
use rentora_server::routes::{
    ChatRoutes, HealthRoutes, LeadRoutes, PropertyRoutes, SchedulerRoutes,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;
use uuid::Uuid;

/// Assistant configuration that never leaves the process in these tests
fn test_assistant_config() -> AssistantConfig {
    AssistantConfig {
        api_key: "sk-test".to_owned(),
        assistant_id: "asst_test".to_owned(),
        base_url: "http://127.0.0.1:1/v1".to_owned(),
        poll_interval_ms: 1,
        max_poll_attempts: 1,
    }
}

async fn test_app() -> (Router, Database, TempDir) {
    let dir = TempDir::new().unwrap();
    let url = format!("sqlite:{}/test.db", dir.path().display());
    let database = Database::new(&url).await.unwrap();

    let assistant_config = test_assistant_config();
    let config = ServerConfig {
        http_port: 0,
        database_url: url,
        cors_allowed_origins: Vec::new(),
        assistant: assistant_config.clone(),
    };
    let assistant = AssistantClient::new(assistant_config).unwrap();
    let resources = Arc::new(ServerResources::new(database.clone(), assistant, config));

    let app = Router::new()
        .merge(HealthRoutes::routes(resources.clone()))
        .merge(ChatRoutes::routes(resources.clone()))
        .merge(LeadRoutes::routes(resources.clone()))
        .merge(PropertyRoutes::routes(resources.clone()))
        .merge(SchedulerRoutes::routes(resources));

    (app, database, dir)
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let (app, _db, _dir) = test_app().await;

    let response = app.oneshot(get_request("/api/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], json!("ok"));
    assert_eq!(body["database"], json!("reachable"));
}

// ============================================================================
// Leads
// ============================================================================

#[tokio::test]
async fn test_lead_crud_flow() {
    let (app, _db, _dir) = test_app().await;

    // Create
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/leads",
            &json!({"name": "Somchai P.", "email": "somchai@example.com"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = json_body(response).await;
    let lead_id = created["id"].as_str().unwrap().to_owned();
    assert_eq!(created["status"], json!("new"));

    // Read
    let response = app
        .clone()
        .oneshot(get_request(&format!("/api/leads/{lead_id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Update status
    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/leads/{lead_id}"),
            &json!({"status": "qualified"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated = json_body(response).await;
    assert_eq!(updated["status"], json!("qualified"));

    // List
    let response = app.clone().oneshot(get_request("/api/leads")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let list = json_body(response).await;
    assert_eq!(list["total"], json!(1));
}

#[tokio::test]
async fn test_create_lead_duplicate_email_rejected() {
    let (app, _db, _dir) = test_app().await;

    let body = json!({"name": "Ann", "email": "ann@example.com"});
    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/leads", &body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .oneshot(json_request("POST", "/api/leads", &body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error = json_body(response).await;
    assert_eq!(error["error"]["code"], json!("invalid_input"));
}

#[tokio::test]
async fn test_get_missing_lead_is_404() {
    let (app, _db, _dir) = test_app().await;

    let response = app
        .oneshot(get_request("/api/leads/does-not-exist"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let error = json_body(response).await;
    assert_eq!(error["error"]["code"], json!("not_found"));
}

// ============================================================================
// Properties
// ============================================================================

#[tokio::test]
async fn test_property_search_with_query_filters() {
    let (app, db, _dir) = test_app().await;

    let building_id = Uuid::new_v4().to_string();
    let now = "2025-01-01T00:00:00+00:00";
    sqlx::query("INSERT INTO buildings (id, name, distance_to_bts, created_at) VALUES ($1, 'Lumpini Park View', 0.4, $2)")
        .bind(&building_id)
        .bind(now)
        .execute(db.pool())
        .await
        .unwrap();
    for (code, bedrooms, price) in [("LPV-0803", 1_i64, 18_000.0), ("LPV-1201", 2, 32_000.0)] {
        sqlx::query(
            r"
            INSERT INTO properties (id, building_id, property_code, building_name, bedrooms, bathrooms, price, size, photo_urls, created_at)
            VALUES ($1, $2, $3, NULL, $4, 1, $5, 40.0, NULL, $6)
            ",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(&building_id)
        .bind(code)
        .bind(bedrooms)
        .bind(price)
        .bind(now)
        .execute(db.pool())
        .await
        .unwrap();
    }

    let response = app
        .clone()
        .oneshot(get_request("/api/properties?bedrooms=2&max_price=40000"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["total"], json!(1));
    assert_eq!(body["properties"][0]["property_code"], json!("LPV-1201"));
    assert_eq!(
        body["properties"][0]["building_name"],
        json!("Lumpini Park View")
    );

    // No filters returns the full inventory
    let response = app.oneshot(get_request("/api/properties")).await.unwrap();
    let body = json_body(response).await;
    assert_eq!(body["total"], json!(2));
}

// ============================================================================
// Chat
// ============================================================================

#[tokio::test]
async fn test_chat_rejects_empty_message() {
    let (app, _db, _dir) = test_app().await;

    let response = app
        .oneshot(json_request("POST", "/chat", &json!({"message": "   "})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error = json_body(response).await;
    assert_eq!(error["error"]["code"], json!("invalid_input"));
}

#[tokio::test]
async fn test_chat_history_missing_thread_is_404() {
    let (app, _db, _dir) = test_app().await;

    let response = app
        .oneshot(get_request("/api/chat/threads/thread_unknown/messages"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ============================================================================
// Scheduler
// ============================================================================

#[tokio::test]
async fn test_schedule_viewing_is_not_implemented() {
    let (app, _db, _dir) = test_app().await;

    let response = app
        .oneshot(json_request("POST", "/api/schedule/viewings", &json!({})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_IMPLEMENTED);
    let error = json_body(response).await;
    assert_eq!(error["error"]["code"], json!("not_implemented"));
}
