#[cfg(test)]
mod tests {
    use crate::api::{CreateItemRequest, CreateRequestRequest, CreateUserRequest};
    use crate::db::repositories::LocalRepository;
    use crate::models::{RequestId, UserId};
    use crate::services::{items, requests, users, ServiceError};

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

    async fn seed_request(repo: &LocalRepository, requester: UserId, description: &str) -> RequestId {
        requests::create_request(
            repo,
            requester,
            CreateRequestRequest {
                description: Some(description.to_string()),
            },
        )
        .await
        .unwrap()
        .id
    }

    #[tokio::test]
    async fn test_create_request_requires_description_and_user() {
        let repo = LocalRepository::new();
        let requester = seed_user(&repo, "alice", "alice@example.com").await;

        let err = requests::create_request(
            &repo,
            requester,
            CreateRequestRequest { description: None },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));

        let err = requests::create_request(
            &repo,
            UserId::new(42),
            CreateRequestRequest {
                description: Some("need a drill".to_string()),
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ServiceError::UserNotFound(42)));
    }

    #[tokio::test]
    async fn test_requests_split_by_requester() {
        let repo = LocalRepository::new();
        let alice = seed_user(&repo, "alice", "alice@example.com").await;
        let bob = seed_user(&repo, "bob", "bob@example.com").await;

        let first = seed_request(&repo, alice, "need a drill").await;
        let second = seed_request(&repo, alice, "need a saw").await;
        seed_request(&repo, bob, "need a ladder").await;

        let own = requests::get_user_requests(&repo, alice).await.unwrap();
        assert_eq!(own.len(), 2);
        // Newest first.
        assert_eq!(own[0].id, second);
        assert_eq!(own[1].id, first);

        let others = requests::get_other_requests(&repo, alice).await.unwrap();
        assert_eq!(others.len(), 1);
        assert_eq!(others[0].requester_id, bob);
    }

    #[tokio::test]
    async fn test_get_request_attaches_fulfilling_items() {
        let repo = LocalRepository::new();
        let alice = seed_user(&repo, "alice", "alice@example.com").await;
        let bob = seed_user(&repo, "bob", "bob@example.com").await;
        let request = seed_request(&repo, alice, "need a drill").await;

        let item = items::create_item(
            &repo,
            bob,
            CreateItemRequest {
                name: Some("drill".to_string()),
                description: Some("answers the request".to_string()),
                available: Some(true),
                request_id: Some(request.value()),
            },
        )
        .await
        .unwrap();

        let view = requests::get_request(&repo, alice, request).await.unwrap();
        assert_eq!(view.items.len(), 1);
        assert_eq!(view.items[0].id, item.id);
        assert_eq!(view.items[0].request_id, Some(request));
    }

    #[tokio::test]
    async fn test_get_unknown_request() {
        let repo = LocalRepository::new();
        let alice = seed_user(&repo, "alice", "alice@example.com").await;

        let err = requests::get_request(&repo, alice, RequestId::new(9))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::RequestNotFound(9)));
    }
}
