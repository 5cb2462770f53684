//! Abstract repository interface for the persistence layer.
//!
//! Each entity gets its own storage trait; [`FullRepository`] bundles them so
//! the service layer can hold a single `Arc<dyn FullRepository>` regardless of
//! which backend is active.

use async_trait::async_trait;

pub mod bookings;
pub mod comments;
pub mod error;
pub mod items;
pub mod requests;
pub mod users;

pub use bookings::BookingRepository;
pub use comments::CommentRepository;
pub use error::{ErrorContext, RepositoryError, RepositoryResult};
pub use items::ItemRepository;
pub use requests::RequestRepository;
pub use users::UserRepository;

/// Combined repository interface covering every entity store.
#[async_trait]
pub trait FullRepository:
    UserRepository + ItemRepository + BookingRepository + RequestRepository + CommentRepository
{
    /// Verify that the backing store is reachable.
    async fn health_check(&self) -> RepositoryResult<bool>;
}
