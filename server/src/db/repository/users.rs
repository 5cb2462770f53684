//! Repository trait for user directory storage.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::models::{NewUser, User, UserId};

/// Storage operations for user records.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user and return it with its assigned id.
    async fn create_user(&self, user: NewUser) -> RepositoryResult<User>;

    /// Overwrite an existing user record.
    ///
    /// # Returns
    /// * `Ok(User)` - the stored record
    /// * `Err(RepositoryError::NotFound)` - if no user with that id exists
    async fn update_user(&self, user: User) -> RepositoryResult<User>;

    /// Fetch a user by id.
    async fn find_user(&self, id: UserId) -> RepositoryResult<Option<User>>;

    /// List all users.
    async fn list_users(&self) -> RepositoryResult<Vec<User>>;

    /// Delete a user by id. Returns whether a record was removed.
    async fn delete_user(&self, id: UserId) -> RepositoryResult<bool>;

    /// Whether `email` is already taken, optionally ignoring one user
    /// (used when a user updates their own email).
    async fn email_in_use(&self, email: &str, exclude: Option<UserId>) -> RepositoryResult<bool>;
}
