//! Repository trait for booking storage.
//!
//! Bookings reference an item and a booker; the listing operations return
//! unfiltered sets — state filtering and sorting against the current time
//! happen in the booking service.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::models::{Booking, BookingId, ItemId, NewBooking, UserId};

/// Storage operations for bookings.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Persist a new booking and return it with its assigned id.
    async fn create_booking(&self, booking: NewBooking) -> RepositoryResult<Booking>;

    /// Overwrite an existing booking record (used for status transitions).
    ///
    /// # Returns
    /// * `Ok(Booking)` - the stored record
    /// * `Err(RepositoryError::NotFound)` - if no booking with that id exists
    async fn update_booking(&self, booking: Booking) -> RepositoryResult<Booking>;

    /// Fetch a booking by id.
    async fn find_booking(&self, id: BookingId) -> RepositoryResult<Option<Booking>>;

    /// All bookings created by `booker`.
    async fn list_bookings_by_booker(&self, booker: UserId) -> RepositoryResult<Vec<Booking>>;

    /// All bookings whose referenced item is owned by `owner`.
    async fn list_bookings_by_owner(&self, owner: UserId) -> RepositoryResult<Vec<Booking>>;

    /// All bookings referencing `item`, regardless of booker or status.
    async fn list_bookings_for_item(&self, item: ItemId) -> RepositoryResult<Vec<Booking>>;
}
