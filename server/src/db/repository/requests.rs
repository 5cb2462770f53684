//! Repository trait for item request storage.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::models::{ItemRequest, NewRequest, RequestId, UserId};

/// Storage operations for item requests.
#[async_trait]
pub trait RequestRepository: Send + Sync {
    /// Persist a new item request and return it with its assigned id.
    async fn create_request(&self, request: NewRequest) -> RepositoryResult<ItemRequest>;

    /// Fetch a request by id.
    async fn find_request(&self, id: RequestId) -> RepositoryResult<Option<ItemRequest>>;

    /// Requests created by `requester`, newest first.
    async fn list_requests_by_requester(
        &self,
        requester: UserId,
    ) -> RepositoryResult<Vec<ItemRequest>>;

    /// Requests created by anyone except `requester`, newest first.
    async fn list_requests_excluding(
        &self,
        requester: UserId,
    ) -> RepositoryResult<Vec<ItemRequest>>;
}
