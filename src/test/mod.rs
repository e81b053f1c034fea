//! HTTP-level tests: the real router wired to in-memory repositories,
//! driven through `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::database::memory::{InMemoryHiveRepository, InMemoryHiveSectionRepository};
use crate::database::{HiveRepository, HiveSectionRepository};
use crate::router::build_router;
use crate::services::{HiveSectionService, HiveService};
use crate::state::AppState;

fn test_app() -> Router {
    let hives: Arc<dyn HiveRepository> = Arc::new(InMemoryHiveRepository::new());
    let sections: Arc<dyn HiveSectionRepository> = Arc::new(InMemoryHiveSectionRepository::new());

    let hive_section_service = Arc::new(HiveSectionService::new(sections, hives.clone()));
    let hive_service = Arc::new(HiveService::new(hives, hive_section_service.clone()));

    build_router(AppState {
        db_pool: None,
        hive_service,
        hive_section_service,
    })
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> Response {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    app.clone().oneshot(request).await.unwrap()
}

async fn read_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn hive_body(address: &str, code: &str, name: &str) -> Value {
    json!({ "address": address, "code": code, "name": name })
}

fn section_body(store_hive_id: i32, code: &str, name: &str) -> Value {
    json!({ "storeHiveId": store_hive_id, "code": code, "name": name })
}

async fn create_hive(app: &Router, code: &str) -> i32 {
    let response = send(
        app,
        Method::POST,
        "/api/hives",
        Some(hive_body("Aisle 1", code, &format!("Hive {code}"))),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    read_json(response).await["id"].as_i64().unwrap() as i32
}

async fn create_section(app: &Router, hive_id: i32, code: &str) -> i32 {
    let response = send(
        app,
        Method::POST,
        "/api/sections",
        Some(section_body(hive_id, code, &format!("Section {code}"))),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    read_json(response).await["id"].as_i64().unwrap() as i32
}

#[tokio::test]
async fn health_endpoints_respond() {
    let app = test_app();

    let response = send(&app, Method::GET, "/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await["status"], "healthy");

    let response = send(&app, Method::GET, "/health/ready", None).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn create_hive_round_trip() {
    let app = test_app();

    let response = send(
        &app,
        Method::POST,
        "/api/hives",
        Some(hive_body("A1", "H1", "Hive One")),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let location = response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap()
        .to_string();
    let created = read_json(response).await;

    let id = created["id"].as_i64().unwrap();
    assert_eq!(location, format!("/api/hives/{id}"));
    assert_eq!(created["isDeleted"], json!(false));

    let response = send(&app, Method::GET, &location, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let fetched = read_json(response).await;
    assert_eq!(fetched["address"], "A1");
    assert_eq!(fetched["code"], "H1");
    assert_eq!(fetched["name"], "Hive One");
    assert_eq!(fetched["isDeleted"], json!(false));
}

#[tokio::test]
async fn create_hive_with_empty_address_mentions_the_field() {
    let app = test_app();

    let response = send(
        &app,
        Method::POST,
        "/api/hives",
        Some(hive_body("", "H1", "N")),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json(response).await;
    let message = body["message"].as_str().unwrap();
    assert!(message.contains("Address"));
    assert!(!message.contains("Code"));
    assert!(!message.contains("Name"));
}

#[tokio::test]
async fn create_hive_with_all_fields_empty_mentions_all_three() {
    let app = test_app();

    let response = send(&app, Method::POST, "/api/hives", Some(hive_body("", "", ""))).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json(response).await;
    let message = body["message"].as_str().unwrap();
    assert!(message.contains("Address"));
    assert!(message.contains("Code"));
    assert!(message.contains("Name"));
}

#[tokio::test]
async fn listing_includes_soft_deleted_hives_ordered_by_id() {
    let app = test_app();

    let first = create_hive(&app, "H1").await;
    let second = create_hive(&app, "H2").await;

    let response = send(
        &app,
        Method::PUT,
        &format!("/api/hives/{first}/status/true"),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = send(&app, Method::GET, "/api/hives", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let hives = read_json(response).await;
    let hives = hives.as_array().unwrap();

    assert_eq!(hives.len(), 2);
    assert_eq!(hives[0]["id"].as_i64().unwrap() as i32, first);
    assert_eq!(hives[1]["id"].as_i64().unwrap() as i32, second);
    assert_eq!(hives[0]["isDeleted"], json!(true));
    // List items are projections without the address field.
    assert!(hives[0].get("address").is_none());
}

#[tokio::test]
async fn soft_delete_is_idempotent() {
    let app = test_app();
    let id = create_hive(&app, "H1").await;

    for _ in 0..2 {
        let response = send(
            &app,
            Method::PUT,
            &format!("/api/hives/{id}/status/true"),
            None,
        )
        .await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    let response = send(&app, Method::GET, &format!("/api/hives/{id}"), None).await;
    assert_eq!(read_json(response).await["isDeleted"], json!(true));
}

#[tokio::test]
async fn set_status_on_unknown_hive_is_404() {
    let app = test_app();

    let response = send(&app, Method::PUT, "/api/hives/999/status/true", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn status_segment_must_be_a_strict_boolean() {
    let app = test_app();
    let id = create_hive(&app, "H1").await;

    let response = send(
        &app,
        Method::PUT,
        &format!("/api/hives/{id}/status/maybe"),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn hard_delete_is_guarded_by_soft_delete() {
    let app = test_app();
    let id = create_hive(&app, "H1").await;

    let response = send(&app, Method::DELETE, &format!("/api/hives/{id}"), None).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    send(
        &app,
        Method::PUT,
        &format!("/api/hives/{id}/status/true"),
        None,
    )
    .await;

    let response = send(&app, Method::DELETE, &format!("/api/hives/{id}"), None).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = send(&app, Method::GET, &format!("/api/hives/{id}"), None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn hive_with_sections_cannot_be_hard_deleted() {
    let app = test_app();
    let hive_id = create_hive(&app, "H1").await;
    create_section(&app, hive_id, "S1").await;

    send(
        &app,
        Method::PUT,
        &format!("/api/hives/{hive_id}/status/true"),
        None,
    )
    .await;

    let response = send(&app, Method::DELETE, &format!("/api/hives/{hive_id}"), None).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn update_hive_replaces_all_fields() {
    let app = test_app();
    let id = create_hive(&app, "H1").await;

    let response = send(
        &app,
        Method::PUT,
        &format!("/api/hives/{id}"),
        Some(hive_body("B2", "H9", "Renamed")),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = send(&app, Method::GET, &format!("/api/hives/{id}"), None).await;
    let hive = read_json(response).await;
    assert_eq!(hive["address"], "B2");
    assert_eq!(hive["code"], "H9");
    assert_eq!(hive["name"], "Renamed");
}

#[tokio::test]
async fn updating_a_soft_deleted_hive_is_a_conflict() {
    let app = test_app();
    let id = create_hive(&app, "H1").await;

    send(
        &app,
        Method::PUT,
        &format!("/api/hives/{id}/status/true"),
        None,
    )
    .await;

    let response = send(
        &app,
        Method::PUT,
        &format!("/api/hives/{id}"),
        Some(hive_body("B2", "H9", "Renamed")),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn duplicate_hive_code_is_a_conflict() {
    let app = test_app();
    create_hive(&app, "H1").await;

    let response = send(
        &app,
        Method::POST,
        "/api/hives",
        Some(hive_body("A2", "H1", "Other")),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn section_create_round_trip_with_location_header() {
    let app = test_app();
    let hive_id = create_hive(&app, "H1").await;

    let response = send(
        &app,
        Method::POST,
        "/api/sections",
        Some(section_body(hive_id, "S1", "Section One")),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let location = response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap()
        .to_string();
    let created = read_json(response).await;

    let id = created["id"].as_i64().unwrap();
    assert_eq!(location, format!("/api/sections/{id}"));
    assert_eq!(created["storeHiveId"].as_i64().unwrap() as i32, hive_id);
    assert_eq!(created["isDeleted"], json!(false));
}

#[tokio::test]
async fn section_with_unknown_parent_hive_is_404() {
    let app = test_app();

    let response = send(
        &app,
        Method::POST,
        "/api/sections",
        Some(section_body(77, "S1", "Orphan")),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Nothing was silently created.
    let response = send(&app, Method::GET, "/api/sections", None).await;
    assert_eq!(read_json(response).await.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn section_under_soft_deleted_hive_is_a_conflict() {
    let app = test_app();
    let hive_id = create_hive(&app, "H1").await;

    send(
        &app,
        Method::PUT,
        &format!("/api/hives/{hive_id}/status/true"),
        None,
    )
    .await;

    let response = send(
        &app,
        Method::POST,
        "/api/sections",
        Some(section_body(hive_id, "S1", "Section One")),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn hive_sections_listing_is_scoped_and_keeps_deleted_sections() {
    let app = test_app();
    let first_hive = create_hive(&app, "H1").await;
    let second_hive = create_hive(&app, "H2").await;

    let s1 = create_section(&app, first_hive, "S1").await;
    create_section(&app, second_hive, "S2").await;
    let s3 = create_section(&app, first_hive, "S3").await;

    send(
        &app,
        Method::PUT,
        &format!("/api/sections/{s3}/status/true"),
        None,
    )
    .await;

    let response = send(
        &app,
        Method::GET,
        &format!("/api/hives/{first_hive}/sections"),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let sections = read_json(response).await;
    let sections = sections.as_array().unwrap().clone();

    let ids: Vec<i64> = sections.iter().map(|s| s["id"].as_i64().unwrap()).collect();
    assert_eq!(ids, vec![s1 as i64, s3 as i64]);
    assert!(sections
        .iter()
        .all(|s| s["storeHiveId"].as_i64().unwrap() as i32 == first_hive));
    assert_eq!(sections[1]["isDeleted"], json!(true));
}

#[tokio::test]
async fn sections_of_unknown_hive_is_404() {
    let app = test_app();

    let response = send(&app, Method::GET, "/api/hives/500/sections", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn section_parent_hive_is_immutable() {
    let app = test_app();
    let first_hive = create_hive(&app, "H1").await;
    let second_hive = create_hive(&app, "H2").await;
    let section_id = create_section(&app, first_hive, "S1").await;

    let response = send(
        &app,
        Method::PUT,
        &format!("/api/sections/{section_id}"),
        Some(section_body(second_hive, "S1", "Section One")),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn updating_a_soft_deleted_section_is_a_conflict() {
    let app = test_app();
    let hive_id = create_hive(&app, "H1").await;
    let section_id = create_section(&app, hive_id, "S1").await;

    send(
        &app,
        Method::PUT,
        &format!("/api/sections/{section_id}/status/true"),
        None,
    )
    .await;

    let response = send(
        &app,
        Method::PUT,
        &format!("/api/sections/{section_id}"),
        Some(section_body(hive_id, "S1", "Renamed")),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn updating_a_section_to_a_taken_code_is_a_conflict() {
    let app = test_app();
    let hive_id = create_hive(&app, "H1").await;
    create_section(&app, hive_id, "S1").await;
    let second = create_section(&app, hive_id, "S2").await;

    let response = send(
        &app,
        Method::PUT,
        &format!("/api/sections/{second}"),
        Some(section_body(hive_id, "S1", "Section Two")),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // Keeping its own code is not a collision.
    let response = send(
        &app,
        Method::PUT,
        &format!("/api/sections/{second}"),
        Some(section_body(hive_id, "S2", "Renamed")),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn delete_section_id_zero_is_rejected_with_400() {
    let app = test_app();

    let response = send(&app, Method::DELETE, "/api/sections/0", None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn section_hard_delete_is_guarded_by_soft_delete() {
    let app = test_app();
    let hive_id = create_hive(&app, "H1").await;
    let section_id = create_section(&app, hive_id, "S1").await;

    let response = send(
        &app,
        Method::DELETE,
        &format!("/api/sections/{section_id}"),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    send(
        &app,
        Method::PUT,
        &format!("/api/sections/{section_id}/status/true"),
        None,
    )
    .await;

    let response = send(
        &app,
        Method::DELETE,
        &format!("/api/sections/{section_id}"),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = send(
        &app,
        Method::GET,
        &format!("/api/sections/{section_id}"),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn section_codes_are_unique_within_a_hive_only() {
    let app = test_app();
    let first_hive = create_hive(&app, "H1").await;
    let second_hive = create_hive(&app, "H2").await;
    create_section(&app, first_hive, "S1").await;

    let response = send(
        &app,
        Method::POST,
        "/api/sections",
        Some(section_body(first_hive, "S1", "Duplicate")),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // Same code in a different hive is fine.
    let response = send(
        &app,
        Method::POST,
        "/api/sections",
        Some(section_body(second_hive, "S1", "Section One")),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn malformed_body_is_rejected_with_400() {
    let app = test_app();

    let response = send(
        &app,
        Method::POST,
        "/api/hives",
        Some(json!({ "code": "H1" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
