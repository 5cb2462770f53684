//! Item requests.
//!
//! Requests for items not yet in the catalog. Each request is rendered with
//! the catalog items that reference it as their fulfillment link.

use chrono::Utc;

use super::error::{ServiceError, ServiceResult};
use super::require_non_blank;
use crate::api::{CreateRequestRequest, RequestView};
use crate::db::repository::FullRepository;
use crate::models::{ItemRequest, NewRequest, RequestId, UserId};

/// Create an item request for `user_id`, stamped with the current time.
pub async fn create_request(
    repo: &dyn FullRepository,
    user_id: UserId,
    request: CreateRequestRequest,
) -> ServiceResult<RequestView> {
    repo.find_user(user_id)
        .await?
        .ok_or(ServiceError::UserNotFound(user_id.value()))?;
    let description = require_non_blank(request.description, "description")?;

    let created = repo
        .create_request(NewRequest {
            description,
            requester_id: user_id,
            created: Utc::now(),
        })
        .await?;

    Ok(RequestView::new(created, Vec::new()))
}

/// Requests created by `user_id`, newest first.
pub async fn get_user_requests(
    repo: &dyn FullRepository,
    user_id: UserId,
) -> ServiceResult<Vec<RequestView>> {
    repo.find_user(user_id)
        .await?
        .ok_or(ServiceError::UserNotFound(user_id.value()))?;

    let requests = repo.list_requests_by_requester(user_id).await?;
    to_views(repo, requests).await
}

/// Requests created by everyone except `user_id`, newest first.
pub async fn get_other_requests(
    repo: &dyn FullRepository,
    user_id: UserId,
) -> ServiceResult<Vec<RequestView>> {
    repo.find_user(user_id)
        .await?
        .ok_or(ServiceError::UserNotFound(user_id.value()))?;

    let requests = repo.list_requests_excluding(user_id).await?;
    to_views(repo, requests).await
}

/// Fetch a single request with its fulfilling items.
pub async fn get_request(
    repo: &dyn FullRepository,
    user_id: UserId,
    request_id: RequestId,
) -> ServiceResult<RequestView> {
    repo.find_user(user_id)
        .await?
        .ok_or(ServiceError::UserNotFound(user_id.value()))?;

    let request = repo
        .find_request(request_id)
        .await?
        .ok_or(ServiceError::RequestNotFound(request_id.value()))?;
    let items = repo.list_items_by_request(request.id).await?;
    Ok(RequestView::new(request, items))
}

async fn to_views(
    repo: &dyn FullRepository,
    requests: Vec<ItemRequest>,
) -> ServiceResult<Vec<RequestView>> {
    let mut views = Vec::with_capacity(requests.len());
    for request in requests {
        let items = repo.list_items_by_request(request.id).await?;
        views.push(RequestView::new(request, items));
    }
    Ok(views)
}
