//! Service layer for business logic and orchestration.
//!
//! Services sit between the HTTP handlers and the repository layer. They
//! validate input, enforce authorization rules (owner/booker checks) and
//! assemble the enriched view types returned to clients. All functions take
//! the repository as `&dyn FullRepository` so any backend can serve them.

pub mod bookings;
pub mod error;
pub mod items;
pub mod requests;
pub mod users;

pub use error::{ServiceError, ServiceResult};

#[cfg(test)]
#[path = "bookings_tests.rs"]
mod bookings_tests;
#[cfg(test)]
#[path = "requests_tests.rs"]
mod requests_tests;

/// Unwrap an optional string field, rejecting missing or blank values.
pub(crate) fn require_non_blank(
    value: Option<String>,
    field: &str,
) -> ServiceResult<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ServiceError::Validation(format!(
            "{} must not be blank",
            field
        ))),
    }
}
