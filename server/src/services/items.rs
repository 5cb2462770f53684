//! Item catalog.
//!
//! CRUD over items plus the booking-dependent parts: owner-only last/next
//! booking slots, attached comments, text search, and comment creation gated
//! on a completed APPROVED booking.

use chrono::Utc;
use log::debug;

use super::bookings;
use super::error::{ServiceError, ServiceResult};
use super::require_non_blank;
use crate::api::{
    CommentView, CreateCommentRequest, CreateItemRequest, ItemView, UpdateItemRequest,
};
use crate::db::repository::FullRepository;
use crate::models::{BookingStatus, Item, ItemId, NewComment, NewItem, RequestId, UserId};

/// Create an item owned by `user_id`.
pub async fn create_item(
    repo: &dyn FullRepository,
    user_id: UserId,
    request: CreateItemRequest,
) -> ServiceResult<ItemView> {
    let name = require_non_blank(request.name, "name")?;
    let description = require_non_blank(request.description, "description")?;
    let available = request
        .available
        .ok_or_else(|| ServiceError::Validation("available must be provided".to_string()))?;

    repo.find_user(user_id)
        .await?
        .ok_or(ServiceError::UserNotFound(user_id.value()))?;

    let item = repo
        .create_item(NewItem {
            name,
            description,
            available,
            owner_id: user_id,
            request_id: request.request_id.map(RequestId::new),
        })
        .await?;
    debug!("created item {} for owner {}", item.id, user_id);

    Ok(ItemView::from_item(item))
}

/// Apply a partial update to an item. Only the owner may update.
pub async fn update_item(
    repo: &dyn FullRepository,
    user_id: UserId,
    item_id: ItemId,
    request: UpdateItemRequest,
) -> ServiceResult<ItemView> {
    let mut item = repo
        .find_item(item_id)
        .await?
        .ok_or(ServiceError::ItemNotFound(item_id.value()))?;
    if item.owner_id != user_id {
        return Err(ServiceError::Forbidden(
            "Only the owner can update an item".to_string(),
        ));
    }

    if let Some(name) = request.name {
        item.name = name;
    }
    if let Some(description) = request.description {
        item.description = description;
    }
    if let Some(available) = request.available {
        item.available = available;
    }

    let item = repo.update_item(item).await?;
    Ok(ItemView::from_item(item))
}

/// Fetch a single item with comments and, for the owner, booking slots.
pub async fn get_item(
    repo: &dyn FullRepository,
    user_id: UserId,
    item_id: ItemId,
) -> ServiceResult<ItemView> {
    repo.find_user(user_id)
        .await?
        .ok_or(ServiceError::UserNotFound(user_id.value()))?;
    let item = repo
        .find_item(item_id)
        .await?
        .ok_or(ServiceError::ItemNotFound(item_id.value()))?;
    build_view(repo, item, user_id).await
}

/// All items owned by `user_id`, each enriched with comments and booking
/// slots (the requester is the owner, so slots are always filled here).
pub async fn get_owner_items(
    repo: &dyn FullRepository,
    user_id: UserId,
) -> ServiceResult<Vec<ItemView>> {
    repo.find_user(user_id)
        .await?
        .ok_or(ServiceError::UserNotFound(user_id.value()))?;

    let items = repo.list_items_by_owner(user_id).await?;
    let mut views = Vec::with_capacity(items.len());
    for item in items {
        views.push(build_view(repo, item, user_id).await?);
    }
    Ok(views)
}

/// Available items whose name or description contains `text`,
/// case-insensitively. Blank text yields an empty list.
pub async fn search_items(
    repo: &dyn FullRepository,
    user_id: UserId,
    text: &str,
) -> ServiceResult<Vec<ItemView>> {
    repo.find_user(user_id)
        .await?
        .ok_or(ServiceError::UserNotFound(user_id.value()))?;

    if text.trim().is_empty() {
        return Ok(Vec::new());
    }

    let items = repo.search_items(text).await?;
    Ok(items.into_iter().map(ItemView::from_item).collect())
}

/// Create a comment on an item.
///
/// Only users with at least one APPROVED booking of the item that already
/// ended may comment; the comment is stamped with the current time.
pub async fn create_comment(
    repo: &dyn FullRepository,
    user_id: UserId,
    item_id: ItemId,
    request: CreateCommentRequest,
) -> ServiceResult<CommentView> {
    let text = require_non_blank(request.text, "text")?;

    let item = repo
        .find_item(item_id)
        .await?
        .ok_or(ServiceError::ItemNotFound(item_id.value()))?;

    let now = Utc::now();
    let bookings = bookings::get_bookings_for_item(repo, item.id).await?;
    let has_rented = bookings.iter().any(|b| {
        b.booker_id == user_id && b.status == BookingStatus::Approved && b.end < now
    });
    if !has_rented {
        return Err(ServiceError::Validation(format!(
            "User {} has not rented item {}",
            user_id, item_id
        )));
    }

    let author = repo
        .find_user(user_id)
        .await?
        .ok_or(ServiceError::UserNotFound(user_id.value()))?;

    let comment = repo
        .create_comment(NewComment {
            text,
            item_id: item.id,
            author_id: user_id,
            created: now,
        })
        .await?;

    Ok(CommentView {
        id: comment.id,
        text: comment.text,
        author_name: author.name,
        created: comment.created,
    })
}

/// Assemble the enriched view of `item` as seen by `user_id`.
///
/// Booking slots are only computed for the owner; everyone gets the comments.
async fn build_view(
    repo: &dyn FullRepository,
    item: Item,
    user_id: UserId,
) -> ServiceResult<ItemView> {
    let is_owner = item.owner_id == user_id;
    let item_id = item.id;
    let mut view = ItemView::from_item(item);

    if is_owner {
        let now = Utc::now();
        let bookings = bookings::get_bookings_for_item(repo, item_id).await?;
        view.last_booking = bookings
            .iter()
            .filter(|b| b.status == BookingStatus::Approved && b.end < now)
            .max_by_key(|b| b.end)
            .map(|b| b.end);
        view.next_booking = bookings
            .iter()
            .filter(|b| b.status == BookingStatus::Approved && b.start > now)
            .min_by_key(|b| b.start)
            .map(|b| b.start);
    }

    let comments = repo.list_comments_for_item(item_id).await?;
    let mut comment_views = Vec::with_capacity(comments.len());
    for comment in comments {
        let author = repo
            .find_user(comment.author_id)
            .await?
            .ok_or(ServiceError::UserNotFound(comment.author_id.value()))?;
        comment_views.push(CommentView {
            id: comment.id,
            text: comment.text,
            author_name: author.name,
            created: comment.created,
        });
    }
    view.comments = comment_views;

    Ok(view)
}
