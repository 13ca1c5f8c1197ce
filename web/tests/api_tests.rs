//! HTTP tests against the real router over the in-memory store.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use rsvp_testing::{InMemoryRecordStore, init_tracing};
use rsvp_web::{AppState, CORRELATION_ID_HEADER, build_router};
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

fn setup() -> (InMemoryRecordStore, Router) {
    init_tracing();
    let store = InMemoryRecordStore::new();
    let app = build_router(AppState::from_store(Arc::new(store.clone())));
    (store, app)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn send_raw(app: &Router, uri: &str, body: &'static str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn rsvp(name: &str, email: &str, status: &str) -> Value {
    json!({ "name": name, "email": email, "rsvp_status": status })
}

#[tokio::test]
async fn rsvp_with_unknown_status_is_saved_as_pending() {
    let (store, app) = setup();
    let event = store.seed_event("Gala");

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/api/v1/events/{event}/rsvps"),
        Some(rsvp("A", "a@x.io", "maybe")),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({ "message": "RSVP saved!" }));

    let (status, guests) = send(&app, Method::GET, "/api/v1/guests", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(guests[0]["status"], "pending");
}

#[tokio::test]
async fn duplicate_rsvp_is_409() {
    let (store, app) = setup();
    let event = store.seed_event("Gala");
    let uri = format!("/api/v1/events/{event}/rsvps");

    let (first, _) = send(&app, Method::POST, &uri, Some(rsvp("A", "a@x.io", "attending"))).await;
    let (second, body) = send(&app, Method::POST, &uri, Some(rsvp("A", "a@x.io", "attending"))).await;

    assert_eq!(first, StatusCode::CREATED);
    assert_eq!(second, StatusCode::CONFLICT);
    assert_eq!(body, json!({ "error": "You already RSVP'd to this event" }));
    assert_eq!(store.guest_count(), 1);
}

#[tokio::test]
async fn rsvp_validation_errors_are_400() {
    let (store, app) = setup();
    let event = store.seed_event("Gala");
    let uri = format!("/api/v1/events/{event}/rsvps");

    let (status, body) = send(&app, Method::POST, &uri, Some(json!({ "email": "a@x.io" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Name and email required");

    let (status, body) = send(&app, Method::POST, &uri, Some(rsvp("A", "a@x", "attending"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid email format");

    assert_eq!(store.guest_count(), 0);
}

#[tokio::test]
async fn invalid_event_id_is_400() {
    let (_store, app) = setup();

    for uri in ["/api/v1/events/0/rsvps", "/api/v1/events/abc/rsvps"] {
        let (status, body) = send(&app, Method::POST, uri, Some(rsvp("A", "a@x.io", ""))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid event ID");
    }
}

#[tokio::test]
async fn malformed_json_is_400() {
    let (store, app) = setup();
    let event = store.seed_event("Gala");

    let (status, body) = send_raw(&app, &format!("/api/v1/events/{event}/rsvps"), "{not json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Invalid JSON" }));

    let (status, body) = send_raw(&app, "/api/v1/events", r#"{"title": 42}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid JSON");
}

#[tokio::test]
async fn create_event_returns_echo_without_absent_fields() {
    let (store, app) = setup();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/events",
        Some(json!({ "title": "Gala", "event_date": "2025-08-20T18:00:00Z" })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        body,
        json!({
            "id": 1,
            "title": "Gala",
            "event_date": "2025-08-20T18:00:00Z",
            "message": "Event created!"
        })
    );
    assert_eq!(store.event_count(), 1);
}

#[tokio::test]
async fn create_event_with_bad_date_is_400_and_inserts_nothing() {
    let (store, app) = setup();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/events",
        Some(json!({ "title": "Gala", "event_date": "next friday" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "Invalid date format – use ISO (e.g., 2025-08-20T18:00:00Z)"
    );
    assert_eq!(store.event_count(), 0);

    let (status, body) = send(&app, Method::POST, "/api/v1/events", Some(json!({ "event_date": "2025-08-20T18:00:00Z" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Title is required");
}

#[tokio::test]
async fn title_only_event_lists_with_plain_display() {
    let (store, app) = setup();
    store.seed_event("Gala");

    let (status, body) = send(&app, Method::GET, "/api/v1/events", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["display"], "Gala");
    assert_eq!(body[0]["rsvps"], 0);
    assert!(body[0].get("description").is_none());
    assert!(body[0].get("location").is_none());
}

#[tokio::test]
async fn full_event_display_joins_components() {
    let (_store, app) = setup();
    send(
        &app,
        Method::POST,
        "/api/v1/events",
        Some(json!({
            "title": "Annual Company Summer Garden Party",
            "description": "Food",
            "event_date": "2025-08-20T18:00:00Z",
            "location": "Hall"
        })),
    )
    .await;

    let (_, body) = send(&app, Method::GET, "/api/v1/events", None).await;

    assert_eq!(
        body[0]["display"],
        "Annual Company Summer Garde... – Food – Hall – 20 Aug 25"
    );
}

#[tokio::test]
async fn empty_event_list_is_an_empty_array() {
    let (_store, app) = setup();

    let (status, body) = send(&app, Method::GET, "/api/v1/events", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn failed_rsvp_count_still_lists_event() {
    let (store, app) = setup();
    let event = store.seed_event("Gala");
    store.fail_rsvp_count_for(event);

    let (status, body) = send(&app, Method::GET, "/api/v1/events", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["rsvps"], 0);
}

#[tokio::test]
async fn storage_failure_is_500_with_generic_message() {
    let (store, app) = setup();
    store.fail_reads();

    let (status, body) = send(&app, Method::GET, "/api/v1/guests", None).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Failed to load guests" }));
}

#[tokio::test]
async fn guest_listing_filters_by_status_and_search() {
    let (store, app) = setup();
    let event = store.seed_event("Gala");
    let uri = format!("/api/v1/events/{event}/rsvps");
    for (name, email, status) in [
        ("Joanna", "joanna@x.io", "attending"),
        ("Mo", "mo@jo.io", "declined"),
        ("Kim", "kim@x.io", "attending"),
    ] {
        send(&app, Method::POST, &uri, Some(rsvp(name, email, status))).await;
    }

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/v1/guests?status=attending&search=jo",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let names: Vec<_> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|g| g["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, ["Joanna"]);

    let (_, everyone) = send(&app, Method::GET, "/api/v1/guests?status=&search=", None).await;
    assert_eq!(everyone.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn create_guest_returns_stored_guest() {
    let (_store, app) = setup();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/guests",
        Some(json!({ "name": "Ann", "email": "ann@x.io", "status": "attending" })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        body,
        json!({
            "id": 1,
            "name": "Ann",
            "email": "ann@x.io",
            "status": "attending",
            "created_at": "2025-01-01T00:00:00Z"
        })
    );
}

#[tokio::test]
async fn delete_guest_is_204_even_when_missing() {
    let (store, app) = setup();
    send(
        &app,
        Method::POST,
        "/api/v1/guests",
        Some(json!({ "name": "Ann", "email": "ann@x.io" })),
    )
    .await;

    let (status, body) = send(&app, Method::DELETE, "/api/v1/guests/1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);
    assert_eq!(store.guest_count(), 0);

    let (status, _) = send(&app, Method::DELETE, "/api/v1/guests/1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, Method::DELETE, "/api/v1/guests/-4", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid guest ID");
}

#[tokio::test]
async fn health_and_readiness() {
    let (store, app) = setup();

    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, body) = send(&app, Method::GET, "/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "ready": true, "database": true }));

    store.fail_reads();
    let (status, body) = send(&app, Method::GET, "/ready", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["ready"], false);
}

#[tokio::test]
async fn responses_carry_correlation_id() {
    let (_store, app) = setup();

    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert!(response.headers().contains_key(CORRELATION_ID_HEADER));
}
