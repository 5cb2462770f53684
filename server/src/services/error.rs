//! Error type for the service layer.
//!
//! Business failures map 1:1 onto HTTP status codes in the HTTP layer:
//! not-found variants become 404, `EmailInUse` 409, `Validation` 400 and
//! `Forbidden` 403; repository errors pass through as 404/500.

use crate::db::repository::RepositoryError;

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Business-level failure reported by a service operation.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("User with id {0} not found")]
    UserNotFound(i64),

    #[error("Item with id {0} not found")]
    ItemNotFound(i64),

    #[error("Booking with id {0} not found")]
    BookingNotFound(i64),

    #[error("Item request with id {0} not found")]
    RequestNotFound(i64),

    /// Not-found conditions that are not tied to a single entity id.
    #[error("{0}")]
    NotFound(String),

    #[error("Email {0} is already in use")]
    EmailInUse(String),

    /// Invalid input: blank required fields, bad dates, unavailable item,
    /// owner self-booking, non-WAITING approval.
    #[error("{0}")]
    Validation(String),

    /// The caller is not allowed to perform the operation.
    #[error("{0}")]
    Forbidden(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
