//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the service
//! layer for business logic. The calling user is identified by the
//! `X-Sharer-User-Id` header on every endpoint that acts on behalf of a user.

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    Json,
};

use super::dto::{
    ApproveQuery, BookingView, CommentView, CreateBookingRequest, CreateCommentRequest,
    CreateItemRequest, CreateRequestRequest, CreateUserRequest, HealthResponse, ItemView,
    RequestView, SearchQuery, StateQuery, UpdateItemRequest, UpdateUserRequest, User,
};
use super::error::AppError;
use super::state::AppState;
use crate::models::{BookingId, ItemId, RequestId, UserId};
use crate::services::{bookings, items, requests, users};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// Header carrying the id of the user a request acts on behalf of.
pub const USER_ID_HEADER: &str = "X-Sharer-User-Id";

/// Extract and parse the `X-Sharer-User-Id` header.
fn sharer_id(headers: &HeaderMap) -> Result<UserId, AppError> {
    let value = headers.get(USER_ID_HEADER).ok_or_else(|| {
        AppError::BadRequest(format!("{} header is required", USER_ID_HEADER))
    })?;

    value
        .to_str()
        .ok()
        .and_then(|v| v.trim().parse::<i64>().ok())
        .map(UserId::new)
        .ok_or_else(|| {
            AppError::BadRequest(format!("{} header must be a numeric id", USER_ID_HEADER))
        })
}

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running and the store is
/// reachable.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let db_status = match state.repository.health_check().await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        database: db_status,
    }))
}

// =============================================================================
// User Directory
// =============================================================================

/// POST /users
pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let user = users::create_user(state.repository.as_ref(), request).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// GET /users
pub async fn list_users(State(state): State<AppState>) -> HandlerResult<Vec<User>> {
    let users = users::get_all_users(state.repository.as_ref()).await?;
    Ok(Json(users))
}

/// GET /users/{user_id}
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> HandlerResult<User> {
    let user = users::get_user(state.repository.as_ref(), UserId::new(user_id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User with id {} not found", user_id)))?;
    Ok(Json(user))
}

/// PATCH /users/{user_id}
pub async fn update_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Json(request): Json<UpdateUserRequest>,
) -> HandlerResult<User> {
    let user =
        users::update_user(state.repository.as_ref(), UserId::new(user_id), request).await?;
    Ok(Json(user))
}

/// DELETE /users/{user_id}
pub async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    users::delete_user(state.repository.as_ref(), UserId::new(user_id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Item Catalog
// =============================================================================

/// POST /items
pub async fn create_item(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<CreateItemRequest>,
) -> Result<(StatusCode, Json<ItemView>), AppError> {
    let user_id = sharer_id(&headers)?;
    let item = items::create_item(state.repository.as_ref(), user_id, request).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// PATCH /items/{item_id}
pub async fn update_item(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(item_id): Path<i64>,
    Json(request): Json<UpdateItemRequest>,
) -> HandlerResult<ItemView> {
    let user_id = sharer_id(&headers)?;
    let item = items::update_item(
        state.repository.as_ref(),
        user_id,
        ItemId::new(item_id),
        request,
    )
    .await?;
    Ok(Json(item))
}

/// GET /items/{item_id}
pub async fn get_item(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(item_id): Path<i64>,
) -> HandlerResult<ItemView> {
    let user_id = sharer_id(&headers)?;
    let item = items::get_item(state.repository.as_ref(), user_id, ItemId::new(item_id)).await?;
    Ok(Json(item))
}

/// GET /items
///
/// Items owned by the calling user, enriched with booking slots and comments.
pub async fn get_items(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> HandlerResult<Vec<ItemView>> {
    let user_id = sharer_id(&headers)?;
    let items = items::get_owner_items(state.repository.as_ref(), user_id).await?;
    Ok(Json(items))
}

/// GET /items/owner
///
/// Alias of GET /items: the calling user's items.
pub async fn get_owner_items(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> HandlerResult<Vec<ItemView>> {
    let user_id = sharer_id(&headers)?;
    let items = items::get_owner_items(state.repository.as_ref(), user_id).await?;
    Ok(Json(items))
}

/// GET /items/search?text=
pub async fn search_items(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<SearchQuery>,
) -> HandlerResult<Vec<ItemView>> {
    let user_id = sharer_id(&headers)?;
    let items = items::search_items(state.repository.as_ref(), user_id, &query.text).await?;
    Ok(Json(items))
}

/// POST /items/{item_id}/comment
pub async fn create_comment(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(item_id): Path<i64>,
    Json(request): Json<CreateCommentRequest>,
) -> Result<(StatusCode, Json<CommentView>), AppError> {
    let user_id = sharer_id(&headers)?;
    let comment = items::create_comment(
        state.repository.as_ref(),
        user_id,
        ItemId::new(item_id),
        request,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

// =============================================================================
// Booking Engine
// =============================================================================

/// POST /bookings
pub async fn create_booking(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<BookingView>), AppError> {
    let user_id = sharer_id(&headers)?;
    let booking = bookings::create_booking(state.repository.as_ref(), user_id, request).await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

/// PATCH /bookings/{booking_id}?approved=
pub async fn approve_booking(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(booking_id): Path<i64>,
    Query(query): Query<ApproveQuery>,
) -> HandlerResult<BookingView> {
    let user_id = sharer_id(&headers)?;
    let booking = bookings::approve_booking(
        state.repository.as_ref(),
        user_id,
        BookingId::new(booking_id),
        query.approved,
    )
    .await?;
    Ok(Json(booking))
}

/// GET /bookings/{booking_id}
///
/// Visible only to the booker and the item owner; everyone else gets 404.
pub async fn get_booking(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(booking_id): Path<i64>,
) -> HandlerResult<BookingView> {
    let user_id = sharer_id(&headers)?;
    let booking = bookings::get_booking(
        state.repository.as_ref(),
        user_id,
        BookingId::new(booking_id),
    )
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Booking with id {} not found", booking_id)))?;
    Ok(Json(booking))
}

/// GET /bookings?state=
pub async fn get_bookings(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<StateQuery>,
) -> HandlerResult<Vec<BookingView>> {
    let user_id = sharer_id(&headers)?;
    let found = bookings::get_bookings(state.repository.as_ref(), user_id, &query.state).await?;
    Ok(Json(found))
}

/// GET /bookings/owner?state=
pub async fn get_owner_bookings(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<StateQuery>,
) -> HandlerResult<Vec<BookingView>> {
    let user_id = sharer_id(&headers)?;
    let found =
        bookings::get_owner_bookings(state.repository.as_ref(), user_id, &query.state).await?;
    Ok(Json(found))
}

// =============================================================================
// Item Requests
// =============================================================================

/// POST /requests
pub async fn create_request(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<CreateRequestRequest>,
) -> Result<(StatusCode, Json<RequestView>), AppError> {
    let user_id = sharer_id(&headers)?;
    let view = requests::create_request(state.repository.as_ref(), user_id, request).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

/// GET /requests
pub async fn get_user_requests(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> HandlerResult<Vec<RequestView>> {
    let user_id = sharer_id(&headers)?;
    let views = requests::get_user_requests(state.repository.as_ref(), user_id).await?;
    Ok(Json(views))
}

/// GET /requests/all
///
/// Requests from every user except the caller.
pub async fn get_other_requests(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> HandlerResult<Vec<RequestView>> {
    let user_id = sharer_id(&headers)?;
    let views = requests::get_other_requests(state.repository.as_ref(), user_id).await?;
    Ok(Json(views))
}

/// GET /requests/{request_id}
pub async fn get_request(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(request_id): Path<i64>,
) -> HandlerResult<RequestView> {
    let user_id = sharer_id(&headers)?;
    let view = requests::get_request(
        state.repository.as_ref(),
        user_id,
        RequestId::new(request_id),
    )
    .await?;
    Ok(Json(view))
}
