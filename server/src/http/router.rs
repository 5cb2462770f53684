//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - permissive for development, should be restricted in production
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health_check))
        // User directory
        .route(
            "/users",
            post(handlers::create_user).get(handlers::list_users),
        )
        .route(
            "/users/{user_id}",
            get(handlers::get_user)
                .patch(handlers::update_user)
                .delete(handlers::delete_user),
        )
        // Item catalog
        .route("/items", post(handlers::create_item).get(handlers::get_items))
        .route("/items/owner", get(handlers::get_owner_items))
        .route("/items/search", get(handlers::search_items))
        .route(
            "/items/{item_id}",
            get(handlers::get_item).patch(handlers::update_item),
        )
        .route("/items/{item_id}/comment", post(handlers::create_comment))
        // Booking engine
        .route(
            "/bookings",
            post(handlers::create_booking).get(handlers::get_bookings),
        )
        .route("/bookings/owner", get(handlers::get_owner_bookings))
        .route(
            "/bookings/{booking_id}",
            get(handlers::get_booking).patch(handlers::approve_booking),
        )
        // Item requests
        .route(
            "/requests",
            post(handlers::create_request).get(handlers::get_user_requests),
        )
        .route("/requests/all", get(handlers::get_other_requests))
        .route("/requests/{request_id}", get(handlers::get_request))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
