//! HTTP-level tests driving the axum router directly.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use chrono::{Duration, Utc};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use shareit_server::db::repositories::LocalRepository;
use shareit_server::db::repository::FullRepository;
use shareit_server::http::{create_router, AppState};

fn test_router() -> Router {
    let repo = Arc::new(LocalRepository::new()) as Arc<dyn FullRepository>;
    create_router(AppState::new(repo))
}

/// Send a request and return the status plus the parsed JSON body (Null for
/// empty bodies).
async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    user_id: Option<i64>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(id) = user_id {
        builder = builder.header("X-Sharer-User-Id", id.to_string());
    }
    let request = match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

async fn create_user(app: &Router, name: &str, email: &str) -> i64 {
    let (status, body) = send(
        app,
        Method::POST,
        "/users",
        None,
        Some(json!({"name": name, "email": email})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_i64().unwrap()
}

async fn create_item(app: &Router, owner: i64, name: &str) -> i64 {
    let (status, body) = send(
        app,
        Method::POST,
        "/items",
        Some(owner),
        Some(json!({
            "name": name,
            "description": format!("{} description", name),
            "available": true
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_i64().unwrap()
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = test_router();
    let (status, body) = send(&app, Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "connected");
}

#[tokio::test]
async fn test_user_crud_roundtrip() {
    let app = test_router();
    let id = create_user(&app, "alice", "alice@example.com").await;

    let (status, body) = send(&app, Method::GET, &format!("/users/{}", id), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "alice@example.com");

    let (status, body) = send(
        &app,
        Method::PATCH,
        &format!("/users/{}", id),
        None,
        Some(json!({"name": "alice b."})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "alice b.");
    assert_eq!(body["email"], "alice@example.com");

    let (status, _) = send(&app, Method::DELETE, &format!("/users/{}", id), None, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, Method::GET, &format!("/users/{}", id), None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_duplicate_email_maps_to_conflict() {
    let app = test_router();
    create_user(&app, "alice", "alice@example.com").await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/users",
        None,
        Some(json!({"name": "imposter", "email": "alice@example.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_blank_user_fields_map_to_bad_request() {
    let app = test_router();
    let (status, _) = send(
        &app,
        Method::POST,
        "/users",
        None,
        Some(json!({"name": "", "email": "a@example.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_missing_user_header_is_bad_request() {
    let app = test_router();
    let (status, _) = send(
        &app,
        Method::POST,
        "/items",
        None,
        Some(json!({"name": "drill", "description": "d", "available": true})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_item_update_by_non_owner_is_forbidden() {
    let app = test_router();
    let owner = create_user(&app, "owner", "owner@example.com").await;
    let other = create_user(&app, "other", "other@example.com").await;
    let item = create_item(&app, owner, "drill").await;

    let (status, _) = send(
        &app,
        Method::PATCH,
        &format!("/items/{}", item),
        Some(other),
        Some(json!({"name": "mine now"})),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_item_search() {
    let app = test_router();
    let owner = create_user(&app, "owner", "owner@example.com").await;
    create_item(&app, owner, "Power Drill").await;
    create_item(&app, owner, "hand saw").await;

    let (status, body) = send(
        &app,
        Method::GET,
        "/items/search?text=drill",
        Some(owner),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["name"], "Power Drill");
}

#[tokio::test]
async fn test_booking_flow_over_http() {
    let app = test_router();
    let owner = create_user(&app, "owner", "owner@example.com").await;
    let booker = create_user(&app, "booker", "booker@example.com").await;
    let stranger = create_user(&app, "stranger", "stranger@example.com").await;
    let item = create_item(&app, owner, "drill").await;

    let now = Utc::now();
    let (status, body) = send(
        &app,
        Method::POST,
        "/bookings",
        Some(booker),
        Some(json!({
            "start": now + Duration::days(1),
            "end": now + Duration::days(2),
            "itemId": item
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "WAITING");
    let booking = body["id"].as_i64().unwrap();

    // Only the owner may approve.
    let (status, _) = send(
        &app,
        Method::PATCH,
        &format!("/bookings/{}?approved=true", booking),
        Some(booker),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(
        &app,
        Method::PATCH,
        &format!("/bookings/{}?approved=true", booking),
        Some(owner),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "APPROVED");

    // Visible to booker and owner; 404 for everyone else.
    let (status, _) = send(
        &app,
        Method::GET,
        &format!("/bookings/{}", booking),
        Some(booker),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(
        &app,
        Method::GET,
        &format!("/bookings/{}", booking),
        Some(stranger),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // State listings: defaults to ALL, FUTURE matches, PAST does not.
    let (status, body) = send(&app, Method::GET, "/bookings", Some(booker), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (_, body) = send(
        &app,
        Method::GET,
        "/bookings?state=FUTURE",
        Some(booker),
        None,
    )
    .await;
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (_, body) = send(&app, Method::GET, "/bookings?state=PAST", Some(booker), None).await;
    assert!(body.as_array().unwrap().is_empty());

    let (status, body) = send(
        &app,
        Method::GET,
        "/bookings/owner?state=ALL",
        Some(owner),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_owner_items_report_booking_slots() {
    let app = test_router();
    let owner = create_user(&app, "owner", "owner@example.com").await;
    let booker = create_user(&app, "booker", "booker@example.com").await;
    let item = create_item(&app, owner, "drill").await;

    let now = Utc::now();
    let (_, body) = send(
        &app,
        Method::POST,
        "/bookings",
        Some(booker),
        Some(json!({
            "start": now + Duration::days(1),
            "end": now + Duration::days(2),
            "itemId": item
        })),
    )
    .await;
    let booking = body["id"].as_i64().unwrap();
    send(
        &app,
        Method::PATCH,
        &format!("/bookings/{}?approved=true", booking),
        Some(owner),
        None,
    )
    .await;

    let (status, body) = send(&app, Method::GET, "/items", Some(owner), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(!body[0]["nextBooking"].is_null());
    assert!(body[0]["lastBooking"].is_null());

    // GET /items/owner serves the same listing.
    let (status, body) = send(&app, Method::GET, "/items/owner", Some(owner), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    // A non-owner looking at the item gets no slots.
    let (_, body) = send(
        &app,
        Method::GET,
        &format!("/items/{}", item),
        Some(booker),
        None,
    )
    .await;
    assert!(body["nextBooking"].is_null());
}

#[tokio::test]
async fn test_comment_flow_over_http() {
    let app = test_router();
    let owner = create_user(&app, "owner", "owner@example.com").await;
    let booker = create_user(&app, "booker", "booker@example.com").await;
    let item = create_item(&app, owner, "drill").await;

    // No finished rental yet: commenting is rejected.
    let (status, _) = send(
        &app,
        Method::POST,
        &format!("/items/{}/comment", item),
        Some(booker),
        Some(json!({"text": "nice"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Book in the past and approve, then comment.
    let now = Utc::now();
    let (_, body) = send(
        &app,
        Method::POST,
        "/bookings",
        Some(booker),
        Some(json!({
            "start": now - Duration::days(3),
            "end": now - Duration::days(1),
            "itemId": item
        })),
    )
    .await;
    let booking = body["id"].as_i64().unwrap();
    send(
        &app,
        Method::PATCH,
        &format!("/bookings/{}?approved=true", booking),
        Some(owner),
        None,
    )
    .await;

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/items/{}/comment", item),
        Some(booker),
        Some(json!({"text": "nice"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["authorName"], "booker");
}

#[tokio::test]
async fn test_request_endpoints() {
    let app = test_router();
    let requester = create_user(&app, "requester", "requester@example.com").await;
    let supplier = create_user(&app, "supplier", "supplier@example.com").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/requests",
        Some(requester),
        Some(json!({"description": "need a drill"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let request = body["id"].as_i64().unwrap();

    // The supplier fulfills the request with an item.
    let (status, _) = send(
        &app,
        Method::POST,
        "/items",
        Some(supplier),
        Some(json!({
            "name": "drill",
            "description": "fulfills the request",
            "available": true,
            "requestId": request
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, Method::GET, "/requests", Some(requester), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["items"].as_array().unwrap().len(), 1);

    let (status, body) = send(&app, Method::GET, "/requests/all", Some(supplier), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/requests/{}", request),
        Some(supplier),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["description"], "need a drill");

    let (status, _) = send(&app, Method::GET, "/requests/999", Some(supplier), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
