//! Repository trait for the comment log.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::models::{Comment, ItemId, NewComment};

/// Storage operations for post-rental comments.
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Persist a new comment and return it with its assigned id.
    async fn create_comment(&self, comment: NewComment) -> RepositoryResult<Comment>;

    /// All comments on `item`, oldest first.
    async fn list_comments_for_item(&self, item: ItemId) -> RepositoryResult<Vec<Comment>>;
}
