//! Data Transfer Objects for the HTTP API.
//!
//! Request payloads and view types already live in [`crate::api`] and derive
//! Serialize/Deserialize; this module re-exports them and adds the query
//! parameter structs used by the handlers.

use serde::{Deserialize, Serialize};

// Re-export existing DTOs that are already serializable
pub use crate::api::{
    BookingView, CommentView, CreateBookingRequest, CreateCommentRequest, CreateItemRequest,
    CreateRequestRequest, CreateUserRequest, ItemView, RequestView, UpdateItemRequest,
    UpdateUserRequest,
};
pub use crate::models::User;

/// Query parameters for booking list endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateQuery {
    /// Booking state filter; defaults to ALL.
    #[serde(default = "default_state")]
    pub state: String,
}

fn default_state() -> String {
    "ALL".to_string()
}

/// Query parameters for the booking approval endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApproveQuery {
    pub approved: bool,
}

/// Query parameters for item search.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SearchQuery {
    #[serde(default)]
    pub text: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Database connection status
    pub database: String,
}
