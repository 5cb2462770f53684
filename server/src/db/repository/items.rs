//! Repository trait for item catalog storage.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::models::{Item, ItemId, NewItem, RequestId, UserId};

/// Storage operations for catalog items.
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Persist a new item and return it with its assigned id.
    async fn create_item(&self, item: NewItem) -> RepositoryResult<Item>;

    /// Overwrite an existing item record.
    async fn update_item(&self, item: Item) -> RepositoryResult<Item>;

    /// Fetch an item by id.
    async fn find_item(&self, id: ItemId) -> RepositoryResult<Option<Item>>;

    /// All items owned by `owner`, ordered by id.
    async fn list_items_by_owner(&self, owner: UserId) -> RepositoryResult<Vec<Item>>;

    /// All items created to fulfill `request`.
    async fn list_items_by_request(&self, request: RequestId) -> RepositoryResult<Vec<Item>>;

    /// Available items whose name or description contains `text`,
    /// case-insensitively. Blank-text handling is up to the caller.
    async fn search_items(&self, text: &str) -> RepositoryResult<Vec<Item>>;
}
