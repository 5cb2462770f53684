//! In-memory repository implementation.
//!
//! Backs the `local-repo` feature: a process-local store used by unit and
//! integration tests and for local development without a database. Data lives
//! in `HashMap`s behind a single `parking_lot::RwLock`; ids are assigned from
//! monotonically increasing counters, starting at 1 like a database sequence.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::db::repository::{
    BookingRepository, CommentRepository, ErrorContext, FullRepository, ItemRepository,
    RepositoryError, RepositoryResult, RequestRepository, UserRepository,
};
use crate::models::{
    Booking, BookingId, Comment, CommentId, Item, ItemId, ItemRequest, NewBooking, NewComment,
    NewItem, NewRequest, NewUser, RequestId, User, UserId,
};

#[derive(Debug, Default)]
struct Store {
    users: HashMap<i64, User>,
    items: HashMap<i64, Item>,
    bookings: HashMap<i64, Booking>,
    requests: HashMap<i64, ItemRequest>,
    comments: HashMap<i64, Comment>,
    next_user_id: i64,
    next_item_id: i64,
    next_booking_id: i64,
    next_request_id: i64,
    next_comment_id: i64,
}

impl Store {
    fn new() -> Self {
        Self {
            next_user_id: 1,
            next_item_id: 1,
            next_booking_id: 1,
            next_request_id: 1,
            next_comment_id: 1,
            ..Default::default()
        }
    }
}

/// In-memory repository for unit testing and local development.
#[derive(Debug)]
pub struct LocalRepository {
    store: RwLock<Store>,
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalRepository {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(Store::new()),
        }
    }
}

fn missing(entity: &str, id: i64, operation: &str) -> RepositoryError {
    RepositoryError::not_found_with_context(
        format!("{} {} not found", entity, id),
        ErrorContext::new(operation)
            .with_entity(entity)
            .with_entity_id(id),
    )
}

#[async_trait]
impl UserRepository for LocalRepository {
    async fn create_user(&self, user: NewUser) -> RepositoryResult<User> {
        let mut store = self.store.write();
        let id = store.next_user_id;
        store.next_user_id += 1;
        let user = User {
            id: UserId::new(id),
            name: user.name,
            email: user.email,
        };
        store.users.insert(id, user.clone());
        Ok(user)
    }

    async fn update_user(&self, user: User) -> RepositoryResult<User> {
        let mut store = self.store.write();
        let id = user.id.value();
        if !store.users.contains_key(&id) {
            return Err(missing("user", id, "update_user"));
        }
        store.users.insert(id, user.clone());
        Ok(user)
    }

    async fn find_user(&self, id: UserId) -> RepositoryResult<Option<User>> {
        Ok(self.store.read().users.get(&id.value()).cloned())
    }

    async fn list_users(&self) -> RepositoryResult<Vec<User>> {
        let mut users: Vec<User> = self.store.read().users.values().cloned().collect();
        users.sort_by_key(|u| u.id);
        Ok(users)
    }

    async fn delete_user(&self, id: UserId) -> RepositoryResult<bool> {
        Ok(self.store.write().users.remove(&id.value()).is_some())
    }

    async fn email_in_use(&self, email: &str, exclude: Option<UserId>) -> RepositoryResult<bool> {
        let store = self.store.read();
        Ok(store
            .users
            .values()
            .any(|u| u.email == email && Some(u.id) != exclude))
    }
}

#[async_trait]
impl ItemRepository for LocalRepository {
    async fn create_item(&self, item: NewItem) -> RepositoryResult<Item> {
        let mut store = self.store.write();
        let id = store.next_item_id;
        store.next_item_id += 1;
        let item = Item {
            id: ItemId::new(id),
            name: item.name,
            description: item.description,
            available: item.available,
            owner_id: item.owner_id,
            request_id: item.request_id,
            rental_count: 0,
        };
        store.items.insert(id, item.clone());
        Ok(item)
    }

    async fn update_item(&self, item: Item) -> RepositoryResult<Item> {
        let mut store = self.store.write();
        let id = item.id.value();
        if !store.items.contains_key(&id) {
            return Err(missing("item", id, "update_item"));
        }
        store.items.insert(id, item.clone());
        Ok(item)
    }

    async fn find_item(&self, id: ItemId) -> RepositoryResult<Option<Item>> {
        Ok(self.store.read().items.get(&id.value()).cloned())
    }

    async fn list_items_by_owner(&self, owner: UserId) -> RepositoryResult<Vec<Item>> {
        let mut items: Vec<Item> = self
            .store
            .read()
            .items
            .values()
            .filter(|i| i.owner_id == owner)
            .cloned()
            .collect();
        items.sort_by_key(|i| i.id);
        Ok(items)
    }

    async fn list_items_by_request(&self, request: RequestId) -> RepositoryResult<Vec<Item>> {
        let mut items: Vec<Item> = self
            .store
            .read()
            .items
            .values()
            .filter(|i| i.request_id == Some(request))
            .cloned()
            .collect();
        items.sort_by_key(|i| i.id);
        Ok(items)
    }

    async fn search_items(&self, text: &str) -> RepositoryResult<Vec<Item>> {
        let needle = text.to_lowercase();
        let mut items: Vec<Item> = self
            .store
            .read()
            .items
            .values()
            .filter(|i| {
                i.available
                    && (i.name.to_lowercase().contains(&needle)
                        || i.description.to_lowercase().contains(&needle))
            })
            .cloned()
            .collect();
        items.sort_by_key(|i| i.id);
        Ok(items)
    }
}

#[async_trait]
impl BookingRepository for LocalRepository {
    async fn create_booking(&self, booking: NewBooking) -> RepositoryResult<Booking> {
        let mut store = self.store.write();
        let id = store.next_booking_id;
        store.next_booking_id += 1;
        let booking = Booking {
            id: BookingId::new(id),
            start: booking.start,
            end: booking.end,
            item_id: booking.item_id,
            booker_id: booking.booker_id,
            status: booking.status,
        };
        store.bookings.insert(id, booking.clone());
        Ok(booking)
    }

    async fn update_booking(&self, booking: Booking) -> RepositoryResult<Booking> {
        let mut store = self.store.write();
        let id = booking.id.value();
        if !store.bookings.contains_key(&id) {
            return Err(missing("booking", id, "update_booking"));
        }
        store.bookings.insert(id, booking.clone());
        Ok(booking)
    }

    async fn find_booking(&self, id: BookingId) -> RepositoryResult<Option<Booking>> {
        Ok(self.store.read().bookings.get(&id.value()).cloned())
    }

    async fn list_bookings_by_booker(&self, booker: UserId) -> RepositoryResult<Vec<Booking>> {
        Ok(self
            .store
            .read()
            .bookings
            .values()
            .filter(|b| b.booker_id == booker)
            .cloned()
            .collect())
    }

    async fn list_bookings_by_owner(&self, owner: UserId) -> RepositoryResult<Vec<Booking>> {
        let store = self.store.read();
        Ok(store
            .bookings
            .values()
            .filter(|b| {
                store
                    .items
                    .get(&b.item_id.value())
                    .map(|i| i.owner_id == owner)
                    .unwrap_or(false)
            })
            .cloned()
            .collect())
    }

    async fn list_bookings_for_item(&self, item: ItemId) -> RepositoryResult<Vec<Booking>> {
        Ok(self
            .store
            .read()
            .bookings
            .values()
            .filter(|b| b.item_id == item)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl RequestRepository for LocalRepository {
    async fn create_request(&self, request: NewRequest) -> RepositoryResult<ItemRequest> {
        let mut store = self.store.write();
        let id = store.next_request_id;
        store.next_request_id += 1;
        let request = ItemRequest {
            id: RequestId::new(id),
            description: request.description,
            requester_id: request.requester_id,
            created: request.created,
        };
        store.requests.insert(id, request.clone());
        Ok(request)
    }

    async fn find_request(&self, id: RequestId) -> RepositoryResult<Option<ItemRequest>> {
        Ok(self.store.read().requests.get(&id.value()).cloned())
    }

    async fn list_requests_by_requester(
        &self,
        requester: UserId,
    ) -> RepositoryResult<Vec<ItemRequest>> {
        let mut requests: Vec<ItemRequest> = self
            .store
            .read()
            .requests
            .values()
            .filter(|r| r.requester_id == requester)
            .cloned()
            .collect();
        requests.sort_by(|a, b| b.created.cmp(&a.created));
        Ok(requests)
    }

    async fn list_requests_excluding(
        &self,
        requester: UserId,
    ) -> RepositoryResult<Vec<ItemRequest>> {
        let mut requests: Vec<ItemRequest> = self
            .store
            .read()
            .requests
            .values()
            .filter(|r| r.requester_id != requester)
            .cloned()
            .collect();
        requests.sort_by(|a, b| b.created.cmp(&a.created));
        Ok(requests)
    }
}

#[async_trait]
impl CommentRepository for LocalRepository {
    async fn create_comment(&self, comment: NewComment) -> RepositoryResult<Comment> {
        let mut store = self.store.write();
        let id = store.next_comment_id;
        store.next_comment_id += 1;
        let comment = Comment {
            id: CommentId::new(id),
            text: comment.text,
            item_id: comment.item_id,
            author_id: comment.author_id,
            created: comment.created,
        };
        store.comments.insert(id, comment.clone());
        Ok(comment)
    }

    async fn list_comments_for_item(&self, item: ItemId) -> RepositoryResult<Vec<Comment>> {
        let mut comments: Vec<Comment> = self
            .store
            .read()
            .comments
            .values()
            .filter(|c| c.item_id == item)
            .cloned()
            .collect();
        comments.sort_by_key(|c| c.id);
        Ok(comments)
    }
}

#[async_trait]
impl FullRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(true)
    }
}
