//! Gateway handlers: validate request shape, then forward.
//!
//! Each handler mirrors one backend endpoint. Create endpoints deserialize
//! the body into a validation DTO first; everything else is passed through
//! untouched, including partial PATCH bodies and query strings.

use axum::extract::{Path, RawQuery, State};
use axum::http::HeaderMap;
use axum::response::Response;
use axum::Json;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::client::USER_ID_HEADER;
use crate::dto::{
    CreateBookingDto, CreateCommentDto, CreateItemDto, CreateRequestDto, CreateUserDto,
};
use crate::error::GatewayError;
use crate::state::AppState;

/// Extract and parse the `X-Sharer-User-Id` header.
fn sharer_id(headers: &HeaderMap) -> Result<i64, GatewayError> {
    let value = headers.get(USER_ID_HEADER).ok_or_else(|| {
        GatewayError::Validation(format!("{} header is required", USER_ID_HEADER))
    })?;

    value
        .to_str()
        .ok()
        .and_then(|v| v.trim().parse::<i64>().ok())
        .ok_or_else(|| {
            GatewayError::Validation(format!("{} header must be a numeric id", USER_ID_HEADER))
        })
}

/// Deserialize a JSON body into its validation DTO.
fn parse<T: DeserializeOwned>(body: &Value) -> Result<T, GatewayError> {
    serde_json::from_value(body.clone())
        .map_err(|e| GatewayError::Validation(format!("Invalid request body: {}", e)))
}

/// Re-attach the original query string to a forwarded path.
fn with_query(path: &str, query: Option<String>) -> String {
    match query {
        Some(q) if !q.is_empty() => format!("{}?{}", path, q),
        _ => path.to_string(),
    }
}

// =============================================================================
// User Directory
// =============================================================================

/// POST /users
pub async fn create_user(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Response, GatewayError> {
    let dto: CreateUserDto = parse(&body)?;
    dto.validate().map_err(GatewayError::Validation)?;
    state.client.forward(Method::POST, "/users", None, Some(&body)).await
}

/// GET /users
pub async fn list_users(State(state): State<AppState>) -> Result<Response, GatewayError> {
    state.client.forward(Method::GET, "/users", None, None).await
}

/// GET /users/{user_id}
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Response, GatewayError> {
    state
        .client
        .forward(Method::GET, &format!("/users/{}", user_id), None, None)
        .await
}

/// PATCH /users/{user_id}
pub async fn update_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Json(body): Json<Value>,
) -> Result<Response, GatewayError> {
    state
        .client
        .forward(
            Method::PATCH,
            &format!("/users/{}", user_id),
            None,
            Some(&body),
        )
        .await
}

/// DELETE /users/{user_id}
pub async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Response, GatewayError> {
    state
        .client
        .forward(Method::DELETE, &format!("/users/{}", user_id), None, None)
        .await
}

// =============================================================================
// Item Catalog
// =============================================================================

/// POST /items
pub async fn create_item(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<Response, GatewayError> {
    let user_id = sharer_id(&headers)?;
    let dto: CreateItemDto = parse(&body)?;
    dto.validate().map_err(GatewayError::Validation)?;
    state
        .client
        .forward(Method::POST, "/items", Some(user_id), Some(&body))
        .await
}

/// PATCH /items/{item_id}
pub async fn update_item(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(item_id): Path<i64>,
    Json(body): Json<Value>,
) -> Result<Response, GatewayError> {
    let user_id = sharer_id(&headers)?;
    state
        .client
        .forward(
            Method::PATCH,
            &format!("/items/{}", item_id),
            Some(user_id),
            Some(&body),
        )
        .await
}

/// GET /items/{item_id}
pub async fn get_item(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(item_id): Path<i64>,
) -> Result<Response, GatewayError> {
    let user_id = sharer_id(&headers)?;
    state
        .client
        .forward(Method::GET, &format!("/items/{}", item_id), Some(user_id), None)
        .await
}

/// GET /items
pub async fn get_items(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, GatewayError> {
    let user_id = sharer_id(&headers)?;
    state.client.forward(Method::GET, "/items", Some(user_id), None).await
}

/// GET /items/owner
pub async fn get_owner_items(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, GatewayError> {
    let user_id = sharer_id(&headers)?;
    state
        .client
        .forward(Method::GET, "/items/owner", Some(user_id), None)
        .await
}

/// GET /items/search?text=
pub async fn search_items(
    State(state): State<AppState>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
) -> Result<Response, GatewayError> {
    let user_id = sharer_id(&headers)?;
    state
        .client
        .forward(
            Method::GET,
            &with_query("/items/search", query),
            Some(user_id),
            None,
        )
        .await
}

/// POST /items/{item_id}/comment
pub async fn create_comment(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(item_id): Path<i64>,
    Json(body): Json<Value>,
) -> Result<Response, GatewayError> {
    let user_id = sharer_id(&headers)?;
    let dto: CreateCommentDto = parse(&body)?;
    dto.validate().map_err(GatewayError::Validation)?;
    state
        .client
        .forward(
            Method::POST,
            &format!("/items/{}/comment", item_id),
            Some(user_id),
            Some(&body),
        )
        .await
}

// =============================================================================
// Booking Engine
// =============================================================================

/// POST /bookings
pub async fn create_booking(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<Response, GatewayError> {
    let user_id = sharer_id(&headers)?;
    let dto: CreateBookingDto = parse(&body)?;
    dto.validate().map_err(GatewayError::Validation)?;
    state
        .client
        .forward(Method::POST, "/bookings", Some(user_id), Some(&body))
        .await
}

/// PATCH /bookings/{booking_id}?approved=
pub async fn approve_booking(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(booking_id): Path<i64>,
    RawQuery(query): RawQuery,
) -> Result<Response, GatewayError> {
    let user_id = sharer_id(&headers)?;
    state
        .client
        .forward(
            Method::PATCH,
            &with_query(&format!("/bookings/{}", booking_id), query),
            Some(user_id),
            None,
        )
        .await
}

/// GET /bookings/{booking_id}
pub async fn get_booking(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(booking_id): Path<i64>,
) -> Result<Response, GatewayError> {
    let user_id = sharer_id(&headers)?;
    state
        .client
        .forward(
            Method::GET,
            &format!("/bookings/{}", booking_id),
            Some(user_id),
            None,
        )
        .await
}

/// GET /bookings?state=
pub async fn get_bookings(
    State(state): State<AppState>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
) -> Result<Response, GatewayError> {
    let user_id = sharer_id(&headers)?;
    state
        .client
        .forward(Method::GET, &with_query("/bookings", query), Some(user_id), None)
        .await
}

/// GET /bookings/owner?state=
pub async fn get_owner_bookings(
    State(state): State<AppState>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
) -> Result<Response, GatewayError> {
    let user_id = sharer_id(&headers)?;
    state
        .client
        .forward(
            Method::GET,
            &with_query("/bookings/owner", query),
            Some(user_id),
            None,
        )
        .await
}

// =============================================================================
// Item Requests
// =============================================================================

/// POST /requests
pub async fn create_request(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<Response, GatewayError> {
    let user_id = sharer_id(&headers)?;
    let dto: CreateRequestDto = parse(&body)?;
    dto.validate().map_err(GatewayError::Validation)?;
    state
        .client
        .forward(Method::POST, "/requests", Some(user_id), Some(&body))
        .await
}

/// GET /requests
pub async fn get_user_requests(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, GatewayError> {
    let user_id = sharer_id(&headers)?;
    state.client.forward(Method::GET, "/requests", Some(user_id), None).await
}

/// GET /requests/all
pub async fn get_other_requests(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, GatewayError> {
    let user_id = sharer_id(&headers)?;
    state
        .client
        .forward(Method::GET, "/requests/all", Some(user_id), None)
        .await
}

/// GET /requests/{request_id}
pub async fn get_request(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(request_id): Path<i64>,
) -> Result<Response, GatewayError> {
    let user_id = sharer_id(&headers)?;
    state
        .client
        .forward(
            Method::GET,
            &format!("/requests/{}", request_id),
            Some(user_id),
            None,
        )
        .await
}
