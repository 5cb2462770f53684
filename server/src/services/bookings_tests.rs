#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use crate::api::{BookingState, CreateBookingRequest, CreateItemRequest, CreateUserRequest};
    use crate::db::repositories::LocalRepository;
    use crate::models::{Booking, BookingId, BookingStatus, ItemId, NewBooking, UserId};
    use crate::services::{bookings, items, users, ServiceError};

    async fn seed_user(repo: &LocalRepository, name: &str, email: &str) -> UserId {
        users::create_user(
            repo,
            CreateUserRequest {
                name: Some(name.to_string()),
                email: Some(email.to_string()),
            },
        )
        .await
        .unwrap()
        .id
    }

    async fn seed_item(repo: &LocalRepository, owner: UserId, name: &str) -> ItemId {
        items::create_item(
            repo,
            owner,
            CreateItemRequest {
                name: Some(name.to_string()),
                description: Some(format!("{} description", name)),
                available: Some(true),
                request_id: None,
            },
        )
        .await
        .unwrap()
        .id
    }

    fn booking_request(
        item: ItemId,
        start_offset_days: i64,
        end_offset_days: i64,
    ) -> CreateBookingRequest {
        let now = Utc::now();
        CreateBookingRequest {
            start: Some(now + Duration::days(start_offset_days)),
            end: Some(now + Duration::days(end_offset_days)),
            item_id: Some(item.value()),
        }
    }

    /// Insert a booking directly, bypassing service validation, to control
    /// dates and status precisely.
    async fn raw_booking(
        repo: &LocalRepository,
        item: ItemId,
        booker: UserId,
        start_offset_days: i64,
        end_offset_days: i64,
        status: BookingStatus,
    ) -> Booking {
        use crate::db::repository::BookingRepository;

        let now = Utc::now();
        repo.create_booking(NewBooking {
            start: now + Duration::days(start_offset_days),
            end: now + Duration::days(end_offset_days),
            item_id: item,
            booker_id: booker,
            status,
        })
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_create_booking_starts_waiting() {
        let repo = LocalRepository::new();
        let owner = seed_user(&repo, "owner", "owner@example.com").await;
        let booker = seed_user(&repo, "booker", "booker@example.com").await;
        let item = seed_item(&repo, owner, "drill").await;

        let view = bookings::create_booking(&repo, booker, booking_request(item, 1, 2))
            .await
            .unwrap();

        assert_eq!(view.status, BookingStatus::Waiting);
        assert_eq!(view.item.id, item);
        assert_eq!(view.booker.id, booker);
    }

    #[tokio::test]
    async fn test_create_booking_rejects_missing_dates() {
        let repo = LocalRepository::new();
        let owner = seed_user(&repo, "owner", "owner@example.com").await;
        let booker = seed_user(&repo, "booker", "booker@example.com").await;
        let item = seed_item(&repo, owner, "drill").await;

        let request = CreateBookingRequest {
            start: None,
            end: Some(Utc::now() + Duration::days(1)),
            item_id: Some(item.value()),
        };
        let err = bookings::create_booking(&repo, booker, request)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn test_create_booking_rejects_inverted_and_equal_dates() {
        let repo = LocalRepository::new();
        let owner = seed_user(&repo, "owner", "owner@example.com").await;
        let booker = seed_user(&repo, "booker", "booker@example.com").await;
        let item = seed_item(&repo, owner, "drill").await;

        let err = bookings::create_booking(&repo, booker, booking_request(item, 2, 1))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));

        let start = Utc::now() + Duration::days(1);
        let request = CreateBookingRequest {
            start: Some(start),
            end: Some(start),
            item_id: Some(item.value()),
        };
        let err = bookings::create_booking(&repo, booker, request)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn test_create_booking_rejects_unknown_item() {
        let repo = LocalRepository::new();
        let booker = seed_user(&repo, "booker", "booker@example.com").await;

        let err = bookings::create_booking(&repo, booker, booking_request(ItemId::new(42), 1, 2))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::ItemNotFound(42)));
    }

    #[tokio::test]
    async fn test_create_booking_rejects_unavailable_item() {
        let repo = LocalRepository::new();
        let owner = seed_user(&repo, "owner", "owner@example.com").await;
        let booker = seed_user(&repo, "booker", "booker@example.com").await;
        let item = items::create_item(
            &repo,
            owner,
            CreateItemRequest {
                name: Some("broken drill".to_string()),
                description: Some("out of service".to_string()),
                available: Some(false),
                request_id: None,
            },
        )
        .await
        .unwrap()
        .id;

        let err = bookings::create_booking(&repo, booker, booking_request(item, 1, 2))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn test_owner_cannot_book_own_item() {
        let repo = LocalRepository::new();
        let owner = seed_user(&repo, "owner", "owner@example.com").await;
        let item = seed_item(&repo, owner, "drill").await;

        let err = bookings::create_booking(&repo, owner, booking_request(item, 1, 2))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn test_approve_booking_transitions_once() {
        let repo = LocalRepository::new();
        let owner = seed_user(&repo, "owner", "owner@example.com").await;
        let booker = seed_user(&repo, "booker", "booker@example.com").await;
        let item = seed_item(&repo, owner, "drill").await;

        let booking = bookings::create_booking(&repo, booker, booking_request(item, 1, 2))
            .await
            .unwrap();

        let approved = bookings::approve_booking(&repo, owner, booking.id, true)
            .await
            .unwrap();
        assert_eq!(approved.status, BookingStatus::Approved);

        // The transition is terminal.
        let err = bookings::approve_booking(&repo, owner, booking.id, false)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn test_reject_booking() {
        let repo = LocalRepository::new();
        let owner = seed_user(&repo, "owner", "owner@example.com").await;
        let booker = seed_user(&repo, "booker", "booker@example.com").await;
        let item = seed_item(&repo, owner, "drill").await;

        let booking = bookings::create_booking(&repo, booker, booking_request(item, 1, 2))
            .await
            .unwrap();
        let rejected = bookings::approve_booking(&repo, owner, booking.id, false)
            .await
            .unwrap();
        assert_eq!(rejected.status, BookingStatus::Rejected);
    }

    #[tokio::test]
    async fn test_only_owner_can_approve() {
        let repo = LocalRepository::new();
        let owner = seed_user(&repo, "owner", "owner@example.com").await;
        let booker = seed_user(&repo, "booker", "booker@example.com").await;
        let item = seed_item(&repo, owner, "drill").await;

        let booking = bookings::create_booking(&repo, booker, booking_request(item, 1, 2))
            .await
            .unwrap();

        let err = bookings::approve_booking(&repo, booker, booking.id, true)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_approve_unknown_booking() {
        let repo = LocalRepository::new();
        let owner = seed_user(&repo, "owner", "owner@example.com").await;

        let err = bookings::approve_booking(&repo, owner, BookingId::new(7), true)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::BookingNotFound(7)));
    }

    #[tokio::test]
    async fn test_get_booking_visible_to_booker_and_owner_only() {
        let repo = LocalRepository::new();
        let owner = seed_user(&repo, "owner", "owner@example.com").await;
        let booker = seed_user(&repo, "booker", "booker@example.com").await;
        let stranger = seed_user(&repo, "stranger", "stranger@example.com").await;
        let item = seed_item(&repo, owner, "drill").await;

        let booking = bookings::create_booking(&repo, booker, booking_request(item, 1, 2))
            .await
            .unwrap();

        assert!(bookings::get_booking(&repo, booker, booking.id)
            .await
            .unwrap()
            .is_some());
        assert!(bookings::get_booking(&repo, owner, booking.id)
            .await
            .unwrap()
            .is_some());
        assert!(bookings::get_booking(&repo, stranger, booking.id)
            .await
            .unwrap()
            .is_none());
        assert!(bookings::get_booking(&repo, booker, BookingId::new(99))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_get_bookings_state_filters() {
        let repo = LocalRepository::new();
        let owner = seed_user(&repo, "owner", "owner@example.com").await;
        let booker = seed_user(&repo, "booker", "booker@example.com").await;
        let item = seed_item(&repo, owner, "drill").await;

        let past = raw_booking(&repo, item, booker, -4, -2, BookingStatus::Approved).await;
        let current = raw_booking(&repo, item, booker, -1, 1, BookingStatus::Approved).await;
        let future = raw_booking(&repo, item, booker, 2, 3, BookingStatus::Waiting).await;
        let rejected = raw_booking(&repo, item, booker, 4, 5, BookingStatus::Rejected).await;

        let all = bookings::get_bookings(&repo, booker, "ALL").await.unwrap();
        assert_eq!(all.len(), 4);
        // Sorted by start time, newest first.
        assert_eq!(all[0].id, rejected.id);
        assert_eq!(all[3].id, past.id);

        let found = bookings::get_bookings(&repo, booker, "PAST").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, past.id);

        let found = bookings::get_bookings(&repo, booker, "CURRENT")
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, current.id);

        let found = bookings::get_bookings(&repo, booker, "FUTURE")
            .await
            .unwrap();
        assert_eq!(found.len(), 2);

        let found = bookings::get_bookings(&repo, booker, "WAITING")
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, future.id);

        let found = bookings::get_bookings(&repo, booker, "REJECTED")
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, rejected.id);
    }

    #[tokio::test]
    async fn test_get_bookings_state_is_case_insensitive() {
        let repo = LocalRepository::new();
        let owner = seed_user(&repo, "owner", "owner@example.com").await;
        let booker = seed_user(&repo, "booker", "booker@example.com").await;
        let item = seed_item(&repo, owner, "drill").await;
        raw_booking(&repo, item, booker, 1, 2, BookingStatus::Waiting).await;

        let found = bookings::get_bookings(&repo, booker, "waiting")
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
    }

    #[tokio::test]
    async fn test_get_bookings_unknown_state_matches_nothing() {
        let repo = LocalRepository::new();
        let owner = seed_user(&repo, "owner", "owner@example.com").await;
        let booker = seed_user(&repo, "booker", "booker@example.com").await;
        let item = seed_item(&repo, owner, "drill").await;
        raw_booking(&repo, item, booker, 1, 2, BookingStatus::Waiting).await;

        let found = bookings::get_bookings(&repo, booker, "SOMEDAY")
            .await
            .unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn test_get_owner_bookings() {
        let repo = LocalRepository::new();
        let owner = seed_user(&repo, "owner", "owner@example.com").await;
        let booker = seed_user(&repo, "booker", "booker@example.com").await;
        let item = seed_item(&repo, owner, "drill").await;
        raw_booking(&repo, item, booker, 1, 2, BookingStatus::Waiting).await;

        let found = bookings::get_owner_bookings(&repo, owner, "ALL")
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].booker.id, booker);

        // The booker owns no items, so the owner listing reports not-found.
        let err = bookings::get_owner_bookings(&repo, booker, "ALL")
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));

        let err = bookings::get_owner_bookings(&repo, UserId::new(99), "ALL")
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::UserNotFound(99)));
    }

    #[test]
    fn test_booking_state_parse() {
        assert_eq!(BookingState::parse("ALL"), Some(BookingState::All));
        assert_eq!(BookingState::parse("past"), Some(BookingState::Past));
        assert_eq!(BookingState::parse("Future"), Some(BookingState::Future));
        assert_eq!(BookingState::parse("SOMEDAY"), None);
        assert_eq!(BookingState::parse(""), None);
    }

    #[test]
    fn test_booking_state_matches_boundaries() {
        let now = Utc::now();
        let booking = Booking {
            id: BookingId::new(1),
            start: now - Duration::hours(1),
            end: now + Duration::hours(1),
            item_id: ItemId::new(1),
            booker_id: UserId::new(1),
            status: BookingStatus::Waiting,
        };

        assert!(BookingState::Current.matches(&booking, now));
        assert!(!BookingState::Past.matches(&booking, now));
        assert!(!BookingState::Future.matches(&booking, now));
        assert!(BookingState::Waiting.matches(&booking, now));
        assert!(!BookingState::Rejected.matches(&booking, now));
        assert!(BookingState::All.matches(&booking, now));

        // A booking ends exactly at `now`: neither past nor current.
        let ending = Booking {
            end: now,
            ..booking.clone()
        };
        assert!(!BookingState::Past.matches(&ending, now));
        assert!(!BookingState::Current.matches(&ending, now));
    }
}
