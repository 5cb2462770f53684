//! Booking engine.
//!
//! The central coupling point of the service: creates bookings, drives the
//! one-shot WAITING -> APPROVED/REJECTED transition, and answers the filtered
//! booking queries used by the item catalog (last/next booking slots) and the
//! comment log (rental eligibility).

use chrono::Utc;
use log::debug;

use super::error::{ServiceError, ServiceResult};
use crate::api::{BookingState, BookingView, CreateBookingRequest};
use crate::db::repository::FullRepository;
use crate::models::{Booking, BookingId, BookingStatus, ItemId, NewBooking, UserId};

/// Create a booking of `item_id` for `user_id` over `[start, end)`.
///
/// The booking is persisted with status WAITING. Fails when the dates are
/// missing or out of order, the item is missing or unavailable, or the caller
/// owns the item.
pub async fn create_booking(
    repo: &dyn FullRepository,
    user_id: UserId,
    request: CreateBookingRequest,
) -> ServiceResult<BookingView> {
    let (start, end) = match (request.start, request.end) {
        (Some(start), Some(end)) if start < end => (start, end),
        _ => {
            return Err(ServiceError::Validation(
                "Booking start must be set and precede the end".to_string(),
            ))
        }
    };
    let item_id = request
        .item_id
        .ok_or_else(|| ServiceError::Validation("itemId must be provided".to_string()))?;

    let booker = repo
        .find_user(user_id)
        .await?
        .ok_or(ServiceError::UserNotFound(user_id.value()))?;
    let item = repo
        .find_item(ItemId::new(item_id))
        .await?
        .ok_or(ServiceError::ItemNotFound(item_id))?;

    if !item.available {
        return Err(ServiceError::Validation(format!(
            "Item {} is not available for booking",
            item_id
        )));
    }
    if item.owner_id == user_id {
        return Err(ServiceError::Validation(
            "The owner cannot book their own item".to_string(),
        ));
    }

    let booking = repo
        .create_booking(NewBooking {
            start,
            end,
            item_id: item.id,
            booker_id: user_id,
            status: BookingStatus::Waiting,
        })
        .await?;
    debug!("created booking {} for item {}", booking.id, item.id);

    Ok(BookingView::new(booking, item, booker))
}

/// Approve or reject a WAITING booking. Only the item owner may decide, and
/// the transition is terminal.
pub async fn approve_booking(
    repo: &dyn FullRepository,
    user_id: UserId,
    booking_id: BookingId,
    approved: bool,
) -> ServiceResult<BookingView> {
    let mut booking = repo
        .find_booking(booking_id)
        .await?
        .ok_or(ServiceError::BookingNotFound(booking_id.value()))?;
    let item = repo
        .find_item(booking.item_id)
        .await?
        .ok_or(ServiceError::ItemNotFound(booking.item_id.value()))?;

    if item.owner_id != user_id {
        return Err(ServiceError::Forbidden(
            "Only the item owner can approve a booking".to_string(),
        ));
    }
    if booking.status != BookingStatus::Waiting {
        return Err(ServiceError::Validation(
            "Booking status must be WAITING".to_string(),
        ));
    }

    booking.status = if approved {
        BookingStatus::Approved
    } else {
        BookingStatus::Rejected
    };
    let booking = repo.update_booking(booking).await?;

    let booker = repo
        .find_user(booking.booker_id)
        .await?
        .ok_or(ServiceError::UserNotFound(booking.booker_id.value()))?;

    Ok(BookingView::new(booking, item, booker))
}

/// Fetch a single booking, visible only to its booker or the item owner.
///
/// Returns `Ok(None)` both for unknown ids and for callers who are neither;
/// the HTTP layer renders that as 404.
pub async fn get_booking(
    repo: &dyn FullRepository,
    user_id: UserId,
    booking_id: BookingId,
) -> ServiceResult<Option<BookingView>> {
    let Some(booking) = repo.find_booking(booking_id).await? else {
        return Ok(None);
    };
    let Some(item) = repo.find_item(booking.item_id).await? else {
        return Ok(None);
    };
    if booking.booker_id != user_id && item.owner_id != user_id {
        return Ok(None);
    }

    let booker = repo
        .find_user(booking.booker_id)
        .await?
        .ok_or(ServiceError::UserNotFound(booking.booker_id.value()))?;
    Ok(Some(BookingView::new(booking, item, booker)))
}

/// Bookings created by `user_id`, filtered by `state` against the current
/// time and sorted by start time, newest first.
pub async fn get_bookings(
    repo: &dyn FullRepository,
    user_id: UserId,
    state: &str,
) -> ServiceResult<Vec<BookingView>> {
    let Some(state) = BookingState::parse(state) else {
        return Ok(Vec::new());
    };
    let now = Utc::now();

    let mut bookings: Vec<Booking> = repo
        .list_bookings_by_booker(user_id)
        .await?
        .into_iter()
        .filter(|b| state.matches(b, now))
        .collect();
    bookings.sort_by(|a, b| b.start.cmp(&a.start));

    to_views(repo, bookings).await
}

/// Bookings of items owned by `user_id`, filtered and sorted like
/// [`get_bookings`]. The owner must exist, and an empty result is reported as
/// not-found.
pub async fn get_owner_bookings(
    repo: &dyn FullRepository,
    user_id: UserId,
    state: &str,
) -> ServiceResult<Vec<BookingView>> {
    repo.find_user(user_id)
        .await?
        .ok_or(ServiceError::UserNotFound(user_id.value()))?;

    let now = Utc::now();
    let mut bookings: Vec<Booking> = match BookingState::parse(state) {
        Some(state) => repo
            .list_bookings_by_owner(user_id)
            .await?
            .into_iter()
            .filter(|b| state.matches(b, now))
            .collect(),
        None => Vec::new(),
    };
    bookings.sort_by(|a, b| b.start.cmp(&a.start));

    if bookings.is_empty() {
        return Err(ServiceError::NotFound(format!(
            "No bookings found for items of owner {}",
            user_id
        )));
    }

    to_views(repo, bookings).await
}

/// All bookings referencing `item_id`, unfiltered.
///
/// Internal collaborator for the item catalog (booking slots) and the comment
/// log (rental eligibility); not exposed over HTTP.
pub async fn get_bookings_for_item(
    repo: &dyn FullRepository,
    item_id: ItemId,
) -> ServiceResult<Vec<Booking>> {
    Ok(repo.list_bookings_for_item(item_id).await?)
}

async fn to_views(
    repo: &dyn FullRepository,
    bookings: Vec<Booking>,
) -> ServiceResult<Vec<BookingView>> {
    let mut views = Vec::with_capacity(bookings.len());
    for booking in bookings {
        let item = repo
            .find_item(booking.item_id)
            .await?
            .ok_or(ServiceError::ItemNotFound(booking.item_id.value()))?;
        let booker = repo
            .find_user(booking.booker_id)
            .await?
            .ok_or(ServiceError::UserNotFound(booking.booker_id.value()))?;
        views.push(BookingView::new(booking, item, booker));
    }
    Ok(views)
}
