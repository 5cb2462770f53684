//! Domain model types shared by the service and repository layers.
//!
//! All entities use typed identifier newtypes (see [`macros`]) over the
//! database primary key type `i64`, and serialize to the camelCase JSON shape
//! exposed by the HTTP API.

pub mod macros;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

crate::define_id_type!(i64, UserId);
crate::define_id_type!(i64, ItemId);
crate::define_id_type!(i64, BookingId);
crate::define_id_type!(i64, RequestId);
crate::define_id_type!(i64, CommentId);

/// Booking lifecycle status.
///
/// Bookings are created `Waiting` and transition exactly once to `Approved`
/// or `Rejected` by the item owner.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Waiting,
    Approved,
    Rejected,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Waiting => "WAITING",
            BookingStatus::Approved => "APPROVED",
            BookingStatus::Rejected => "REJECTED",
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "WAITING" => Ok(BookingStatus::Waiting),
            "APPROVED" => Ok(BookingStatus::Approved),
            "REJECTED" => Ok(BookingStatus::Rejected),
            other => Err(format!("Unknown booking status: {}", other)),
        }
    }
}

/// A registered user of the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    /// Unique across all users.
    pub email: String,
}

/// A shareable item owned by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub description: String,
    /// Whether the item can currently be booked.
    pub available: bool,
    pub owner_id: UserId,
    /// Set when the item was created to fulfill an item request.
    pub request_id: Option<RequestId>,
    pub rental_count: i32,
}

/// A booking of an item for a time period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: BookingId,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub item_id: ItemId,
    pub booker_id: UserId,
    pub status: BookingStatus,
}

/// A request for an item that is not in the catalog yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRequest {
    pub id: RequestId,
    pub description: String,
    pub requester_id: UserId,
    pub created: DateTime<Utc>,
}

/// A post-rental comment on an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: CommentId,
    pub text: String,
    pub item_id: ItemId,
    pub author_id: UserId,
    pub created: DateTime<Utc>,
}

/// Insert payload for a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}

/// Insert payload for a new item.
#[derive(Debug, Clone)]
pub struct NewItem {
    pub name: String,
    pub description: String,
    pub available: bool,
    pub owner_id: UserId,
    pub request_id: Option<RequestId>,
}

/// Insert payload for a new booking.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub item_id: ItemId,
    pub booker_id: UserId,
    pub status: BookingStatus,
}

/// Insert payload for a new item request.
#[derive(Debug, Clone)]
pub struct NewRequest {
    pub description: String,
    pub requester_id: UserId,
    pub created: DateTime<Utc>,
}

/// Insert payload for a new comment.
#[derive(Debug, Clone)]
pub struct NewComment {
    pub text: String,
    pub item_id: ItemId,
    pub author_id: UserId,
    pub created: DateTime<Utc>,
}
