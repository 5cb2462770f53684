//! Public API surface for the backend.
//!
//! This file consolidates the DTO types for the HTTP API: request payloads
//! accepted by the service layer and the enriched view types it returns.
//! All types derive Serialize/Deserialize for JSON serialization.

pub use crate::models::{
    Booking, BookingId, BookingStatus, Comment, CommentId, Item, ItemId, ItemRequest, RequestId,
    User, UserId,
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Booking list filter evaluated against the current time.
///
/// Parsed case-insensitively from the `state` query parameter; an
/// unrecognized value matches no bookings at all.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BookingState {
    /// start < now < end
    Current,
    /// end < now
    Past,
    /// start > now
    Future,
    /// status == WAITING
    Waiting,
    /// status == REJECTED
    Rejected,
    /// every booking
    All,
}

impl BookingState {
    /// Parse a state query value. Returns `None` for unknown states, which
    /// callers treat as a filter that matches nothing.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "CURRENT" => Some(BookingState::Current),
            "PAST" => Some(BookingState::Past),
            "FUTURE" => Some(BookingState::Future),
            "WAITING" => Some(BookingState::Waiting),
            "REJECTED" => Some(BookingState::Rejected),
            "ALL" => Some(BookingState::All),
            _ => None,
        }
    }

    /// Whether `booking` falls under this state at time `now`.
    pub fn matches(&self, booking: &Booking, now: DateTime<Utc>) -> bool {
        match self {
            BookingState::Current => booking.start < now && now < booking.end,
            BookingState::Past => booking.end < now,
            BookingState::Future => booking.start > now,
            BookingState::Waiting => booking.status == BookingStatus::Waiting,
            BookingState::Rejected => booking.status == BookingStatus::Rejected,
            BookingState::All => true,
        }
    }
}

// =============================================================================
// Request payloads
// =============================================================================

/// Payload for creating a user. Fields are optional so that the service layer
/// can report missing values as validation errors rather than parse failures.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Partial update for a user; absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Payload for creating an item.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateItemRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub available: Option<bool>,
    /// Links the item to the request it fulfills.
    #[serde(default)]
    pub request_id: Option<i64>,
}

/// Partial update for an item; absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateItemRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub available: Option<bool>,
}

/// Payload for creating a booking.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub item_id: Option<i64>,
}

/// Payload for creating a comment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateCommentRequest {
    pub text: Option<String>,
}

/// Payload for creating an item request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateRequestRequest {
    pub description: Option<String>,
}

// =============================================================================
// View types
// =============================================================================

/// A booking together with the referenced item and booker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingView {
    pub id: BookingId,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub status: BookingStatus,
    pub item: Item,
    pub booker: User,
}

impl BookingView {
    pub fn new(booking: Booking, item: Item, booker: User) -> Self {
        Self {
            id: booking.id,
            start: booking.start,
            end: booking.end,
            status: booking.status,
            item,
            booker,
        }
    }
}

/// A comment rendered with its author's name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    pub id: CommentId,
    pub text: String,
    pub author_name: String,
    pub created: DateTime<Utc>,
}

/// An item enriched with booking slots and comments.
///
/// `last_booking` / `next_booking` are only filled when the requesting user is
/// the item's owner; both stay `None` for everyone else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemView {
    pub id: ItemId,
    pub name: String,
    pub description: String,
    pub available: bool,
    pub owner_id: UserId,
    pub request_id: Option<RequestId>,
    pub rental_count: i32,
    /// End of the latest past APPROVED booking.
    pub last_booking: Option<DateTime<Utc>>,
    /// Start of the earliest future APPROVED booking.
    pub next_booking: Option<DateTime<Utc>>,
    pub comments: Vec<CommentView>,
}

impl ItemView {
    /// View of a bare item with no booking slots and no comments attached.
    pub fn from_item(item: Item) -> Self {
        Self {
            id: item.id,
            name: item.name,
            description: item.description,
            available: item.available,
            owner_id: item.owner_id,
            request_id: item.request_id,
            rental_count: item.rental_count,
            last_booking: None,
            next_booking: None,
            comments: Vec::new(),
        }
    }
}

/// An item request together with the items fulfilling it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestView {
    pub id: RequestId,
    pub description: String,
    pub requester_id: UserId,
    pub created: DateTime<Utc>,
    pub items: Vec<Item>,
}

impl RequestView {
    pub fn new(request: ItemRequest, items: Vec<Item>) -> Self {
        Self {
            id: request.id,
            description: request.description,
            requester_id: request.requester_id,
            created: request.created,
            items,
        }
    }
}
