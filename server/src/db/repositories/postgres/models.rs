use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::{bookings, comments, item_requests, items, users};
use crate::models::{
    Booking, BookingId, Comment, CommentId, Item, ItemId, ItemRequest, NewBooking, NewComment,
    NewItem, NewRequest, NewUser, RequestId, User, UserId,
};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    pub id: i64,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub struct NewUserRow {
    pub name: String,
    pub email: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: UserId::new(row.id),
            name: row.name,
            email: row.email,
        }
    }
}

impl From<NewUser> for NewUserRow {
    fn from(user: NewUser) -> Self {
        NewUserRow {
            name: user.name,
            email: user.email,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = items)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ItemRow {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub is_available: bool,
    pub owner_id: i64,
    pub rental_count: i32,
    pub request_id: Option<i64>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = items)]
pub struct NewItemRow {
    pub name: String,
    pub description: String,
    pub is_available: bool,
    pub owner_id: i64,
    pub rental_count: i32,
    pub request_id: Option<i64>,
}

impl From<ItemRow> for Item {
    fn from(row: ItemRow) -> Self {
        Item {
            id: ItemId::new(row.id),
            name: row.name,
            description: row.description,
            available: row.is_available,
            owner_id: UserId::new(row.owner_id),
            request_id: row.request_id.map(RequestId::new),
            rental_count: row.rental_count,
        }
    }
}

impl From<NewItem> for NewItemRow {
    fn from(item: NewItem) -> Self {
        NewItemRow {
            name: item.name,
            description: item.description,
            is_available: item.available,
            owner_id: item.owner_id.value(),
            rental_count: 0,
            request_id: item.request_id.map(|r| r.value()),
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = bookings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct BookingRow {
    pub id: i64,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub item_id: i64,
    pub booker_id: i64,
    pub status: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = bookings)]
pub struct NewBookingRow {
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub item_id: i64,
    pub booker_id: i64,
    pub status: String,
}

impl From<NewBooking> for NewBookingRow {
    fn from(booking: NewBooking) -> Self {
        NewBookingRow {
            start_date: booking.start,
            end_date: booking.end,
            item_id: booking.item_id.value(),
            booker_id: booking.booker_id.value(),
            status: booking.status.to_string(),
        }
    }
}

impl BookingRow {
    /// Convert a row into a domain booking, rejecting unknown status strings.
    pub fn into_booking(self) -> Result<Booking, String> {
        let status = self.status.parse()?;
        Ok(Booking {
            id: BookingId::new(self.id),
            start: self.start_date,
            end: self.end_date,
            item_id: ItemId::new(self.item_id),
            booker_id: UserId::new(self.booker_id),
            status,
        })
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = item_requests)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct RequestRow {
    pub id: i64,
    pub description: String,
    pub requester_id: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = item_requests)]
pub struct NewRequestRow {
    pub description: String,
    pub requester_id: i64,
    pub created_at: DateTime<Utc>,
}

impl From<RequestRow> for ItemRequest {
    fn from(row: RequestRow) -> Self {
        ItemRequest {
            id: RequestId::new(row.id),
            description: row.description,
            requester_id: UserId::new(row.requester_id),
            created: row.created_at,
        }
    }
}

impl From<NewRequest> for NewRequestRow {
    fn from(request: NewRequest) -> Self {
        NewRequestRow {
            description: request.description,
            requester_id: request.requester_id.value(),
            created_at: request.created,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = comments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CommentRow {
    pub id: i64,
    pub body: String,
    pub item_id: i64,
    pub author_id: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = comments)]
pub struct NewCommentRow {
    pub body: String,
    pub item_id: i64,
    pub author_id: i64,
    pub created_at: DateTime<Utc>,
}

impl From<CommentRow> for Comment {
    fn from(row: CommentRow) -> Self {
        Comment {
            id: CommentId::new(row.id),
            text: row.body,
            item_id: ItemId::new(row.item_id),
            author_id: UserId::new(row.author_id),
            created: row.created_at,
        }
    }
}

impl From<NewComment> for NewCommentRow {
    fn from(comment: NewComment) -> Self {
        NewCommentRow {
            body: comment.text,
            item_id: comment.item_id.value(),
            author_id: comment.author_id.value(),
            created_at: comment.created,
        }
    }
}
