//! Postgres repository implementation using Diesel.
//!
//! Implements the repository traits against a PostgreSQL database.
//!
//! ## Features
//!
//! - Connection pooling with r2d2
//! - Automatic retry for transient failures
//! - Automatic migration execution on startup
//!
//! ## Configuration
//!
//! Environment variables:
//! - `DATABASE_URL` or `PG_DATABASE_URL`: Connection string (required)
//! - `PG_POOL_MAX`: Maximum pool size (default: 10)
//! - `PG_POOL_MIN`: Minimum pool size (default: 1)
//! - `PG_CONN_TIMEOUT_SEC`: Connection timeout in seconds (default: 30)
//! - `PG_IDLE_TIMEOUT_SEC`: Idle connection timeout in seconds (default: 600)
//! - `PG_MAX_RETRIES`: Maximum retry attempts for transient failures (default: 3)
//! - `PG_RETRY_DELAY_MS`: Initial retry delay in milliseconds (default: 100)

use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use std::time::Duration;
use tokio::task;

use crate::db::repository::{
    BookingRepository, CommentRepository, ErrorContext, FullRepository, ItemRepository,
    RepositoryError, RepositoryResult, RequestRepository, UserRepository,
};
use crate::models::{
    Booking, BookingId, Comment, Item, ItemId, ItemRequest, NewBooking, NewComment, NewItem,
    NewRequest, NewUser, RequestId, User, UserId,
};

mod models;
mod schema;

use models::*;
use schema::{bookings, comments, item_requests, items, users};

type PgPool = Pool<ConnectionManager<PgConnection>>;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("src/db/repositories/postgres/migrations");

/// Configuration for connecting to Postgres.
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    /// Database connection URL
    pub database_url: String,
    /// Maximum number of connections in the pool
    pub max_pool_size: u32,
    /// Minimum number of connections in the pool
    pub min_pool_size: u32,
    /// Connection timeout in seconds
    pub connection_timeout_sec: u64,
    /// Idle connection timeout in seconds
    pub idle_timeout_sec: u64,
    /// Maximum number of retry attempts for transient failures
    pub max_retries: u32,
    /// Initial retry delay in milliseconds (doubles with each retry)
    pub retry_delay_ms: u64,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            database_url: String::new(),
            max_pool_size: 10,
            min_pool_size: 1,
            connection_timeout_sec: 30,
            idle_timeout_sec: 600,
            max_retries: 3,
            retry_delay_ms: 100,
        }
    }
}

impl PostgresConfig {
    /// Create configuration from environment variables.
    ///
    /// `DATABASE_URL` (or `PG_DATABASE_URL`) is required; the `PG_*` pool
    /// tuning variables fall back to their defaults when unset.
    pub fn from_env() -> Result<Self, String> {
        let database_url = std::env::var("DATABASE_URL")
            .or_else(|_| std::env::var("PG_DATABASE_URL"))
            .map_err(|_| "DATABASE_URL or PG_DATABASE_URL must be set".to_string())?;

        Ok(Self {
            database_url,
            max_pool_size: env_parse("PG_POOL_MAX", 10),
            min_pool_size: env_parse("PG_POOL_MIN", 1),
            connection_timeout_sec: env_parse("PG_CONN_TIMEOUT_SEC", 30),
            idle_timeout_sec: env_parse("PG_IDLE_TIMEOUT_SEC", 600),
            max_retries: env_parse("PG_MAX_RETRIES", 3),
            retry_delay_ms: env_parse("PG_RETRY_DELAY_MS", 100),
        })
    }

    /// Create a new configuration with a database URL.
    pub fn with_url(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            ..Default::default()
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

/// Diesel-backed repository for Postgres.
#[derive(Clone, Debug)]
pub struct PostgresRepository {
    pool: PgPool,
    config: PostgresConfig,
}

impl PostgresRepository {
    /// Create a new repository and run pending migrations.
    pub fn new(config: PostgresConfig) -> RepositoryResult<Self> {
        let manager = ConnectionManager::<PgConnection>::new(&config.database_url);

        let pool = Pool::builder()
            .max_size(config.max_pool_size)
            .min_idle(Some(config.min_pool_size))
            .connection_timeout(Duration::from_secs(config.connection_timeout_sec))
            .idle_timeout(Some(Duration::from_secs(config.idle_timeout_sec)))
            .test_on_check_out(true)
            .build(manager)
            .map_err(|e| {
                RepositoryError::connection_with_context(
                    e.to_string(),
                    ErrorContext::new("create_pool")
                        .with_details(format!("max_size={}", config.max_pool_size)),
                )
            })?;

        // Run migrations once during initialization
        {
            let mut conn = pool.get().map_err(|e| {
                RepositoryError::connection_with_context(
                    e.to_string(),
                    ErrorContext::new("get_connection_for_migrations"),
                )
            })?;
            Self::run_migrations(&mut conn)?;
        }

        Ok(Self { pool, config })
    }

    fn run_migrations(conn: &mut PgConnection) -> RepositoryResult<()> {
        conn.run_pending_migrations(MIGRATIONS).map_err(|e| {
            RepositoryError::internal_with_context(
                format!("Migration failed: {}", e),
                ErrorContext::new("run_migrations"),
            )
        })?;

        Ok(())
    }

    /// Execute a database operation with automatic retry for transient failures.
    ///
    /// Retries up to `max_retries` times with exponential backoff when a
    /// retryable error occurs (connection loss, timeouts, serialization
    /// failures). Diesel is synchronous, so the operation runs on the blocking
    /// thread pool.
    async fn with_conn<T, F>(&self, f: F) -> RepositoryResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut PgConnection) -> RepositoryResult<T> + Send + 'static + Clone,
    {
        let pool = self.pool.clone();
        let max_retries = self.config.max_retries;
        let retry_delay_ms = self.config.retry_delay_ms;

        task::spawn_blocking(move || {
            let mut last_error = None;
            let mut retry_delay = Duration::from_millis(retry_delay_ms);

            for attempt in 0..=max_retries {
                if attempt > 0 {
                    std::thread::sleep(retry_delay);
                    retry_delay *= 2;
                }

                let mut conn = match pool.get() {
                    Ok(c) => c,
                    Err(e) => {
                        let err = RepositoryError::connection_with_context(
                            e.to_string(),
                            ErrorContext::new("get_connection")
                                .with_details(format!("attempt={}", attempt + 1))
                                .retryable(),
                        );
                        if attempt < max_retries {
                            last_error = Some(err);
                            continue;
                        }
                        return Err(err);
                    }
                };

                match f.clone()(&mut conn) {
                    Ok(result) => return Ok(result),
                    Err(e) if e.is_retryable() && attempt < max_retries => {
                        last_error = Some(e);
                        continue;
                    }
                    Err(e) => return Err(e),
                }
            }

            Err(last_error.unwrap_or_else(|| {
                RepositoryError::internal("Max retries exceeded with no error captured")
            }))
        })
        .await
        .map_err(|e| {
            RepositoryError::internal_with_context(
                format!("Task join error: {}", e),
                ErrorContext::new("spawn_blocking"),
            )
        })?
    }
}

fn rows_to_bookings(rows: Vec<BookingRow>) -> RepositoryResult<Vec<Booking>> {
    rows.into_iter()
        .map(|row| row.into_booking().map_err(RepositoryError::internal))
        .collect()
}

#[async_trait]
impl UserRepository for PostgresRepository {
    async fn create_user(&self, user: NewUser) -> RepositoryResult<User> {
        self.with_conn(move |conn| {
            let row: UserRow = diesel::insert_into(users::table)
                .values(NewUserRow::from(user.clone()))
                .get_result(conn)?;
            Ok(row.into())
        })
        .await
    }

    async fn update_user(&self, user: User) -> RepositoryResult<User> {
        self.with_conn(move |conn| {
            let row: UserRow = diesel::update(users::table.find(user.id.value()))
                .set((
                    users::name.eq(user.name.clone()),
                    users::email.eq(user.email.clone()),
                ))
                .get_result(conn)
                .map_err(|e| {
                    RepositoryError::from(e).with_operation("update_user")
                })?;
            Ok(row.into())
        })
        .await
    }

    async fn find_user(&self, id: UserId) -> RepositoryResult<Option<User>> {
        self.with_conn(move |conn| {
            let row = users::table
                .find(id.value())
                .first::<UserRow>(conn)
                .optional()?;
            Ok(row.map(User::from))
        })
        .await
    }

    async fn list_users(&self) -> RepositoryResult<Vec<User>> {
        self.with_conn(move |conn| {
            let rows = users::table.order(users::id.asc()).load::<UserRow>(conn)?;
            Ok(rows.into_iter().map(User::from).collect())
        })
        .await
    }

    async fn delete_user(&self, id: UserId) -> RepositoryResult<bool> {
        self.with_conn(move |conn| {
            let deleted = diesel::delete(users::table.find(id.value())).execute(conn)?;
            Ok(deleted > 0)
        })
        .await
    }

    async fn email_in_use(&self, email: &str, exclude: Option<UserId>) -> RepositoryResult<bool> {
        let email = email.to_string();
        self.with_conn(move |conn| {
            let count: i64 = match exclude {
                Some(id) => users::table
                    .filter(users::email.eq(email.clone()))
                    .filter(users::id.ne(id.value()))
                    .count()
                    .get_result(conn)?,
                None => users::table
                    .filter(users::email.eq(email.clone()))
                    .count()
                    .get_result(conn)?,
            };
            Ok(count > 0)
        })
        .await
    }
}

#[async_trait]
impl ItemRepository for PostgresRepository {
    async fn create_item(&self, item: NewItem) -> RepositoryResult<Item> {
        self.with_conn(move |conn| {
            let row: ItemRow = diesel::insert_into(items::table)
                .values(NewItemRow::from(item.clone()))
                .get_result(conn)?;
            Ok(row.into())
        })
        .await
    }

    async fn update_item(&self, item: Item) -> RepositoryResult<Item> {
        self.with_conn(move |conn| {
            let row: ItemRow = diesel::update(items::table.find(item.id.value()))
                .set((
                    items::name.eq(item.name.clone()),
                    items::description.eq(item.description.clone()),
                    items::is_available.eq(item.available),
                    items::rental_count.eq(item.rental_count),
                    items::request_id.eq(item.request_id.map(|r| r.value())),
                ))
                .get_result(conn)
                .map_err(|e| {
                    RepositoryError::from(e).with_operation("update_item")
                })?;
            Ok(row.into())
        })
        .await
    }

    async fn find_item(&self, id: ItemId) -> RepositoryResult<Option<Item>> {
        self.with_conn(move |conn| {
            let row = items::table
                .find(id.value())
                .first::<ItemRow>(conn)
                .optional()?;
            Ok(row.map(Item::from))
        })
        .await
    }

    async fn list_items_by_owner(&self, owner: UserId) -> RepositoryResult<Vec<Item>> {
        self.with_conn(move |conn| {
            let rows = items::table
                .filter(items::owner_id.eq(owner.value()))
                .order(items::id.asc())
                .load::<ItemRow>(conn)?;
            Ok(rows.into_iter().map(Item::from).collect())
        })
        .await
    }

    async fn list_items_by_request(&self, request: RequestId) -> RepositoryResult<Vec<Item>> {
        self.with_conn(move |conn| {
            let rows = items::table
                .filter(items::request_id.eq(request.value()))
                .order(items::id.asc())
                .load::<ItemRow>(conn)?;
            Ok(rows.into_iter().map(Item::from).collect())
        })
        .await
    }

    async fn search_items(&self, text: &str) -> RepositoryResult<Vec<Item>> {
        let pattern = format!("%{}%", text);
        self.with_conn(move |conn| {
            let rows = items::table
                .filter(items::is_available.eq(true))
                .filter(
                    items::name
                        .ilike(pattern.clone())
                        .or(items::description.ilike(pattern.clone())),
                )
                .order(items::id.asc())
                .load::<ItemRow>(conn)?;
            Ok(rows.into_iter().map(Item::from).collect())
        })
        .await
    }
}

#[async_trait]
impl BookingRepository for PostgresRepository {
    async fn create_booking(&self, booking: NewBooking) -> RepositoryResult<Booking> {
        self.with_conn(move |conn| {
            let row: BookingRow = diesel::insert_into(bookings::table)
                .values(NewBookingRow::from(booking.clone()))
                .get_result(conn)?;
            row.into_booking().map_err(RepositoryError::internal)
        })
        .await
    }

    async fn update_booking(&self, booking: Booking) -> RepositoryResult<Booking> {
        self.with_conn(move |conn| {
            let row: BookingRow = diesel::update(bookings::table.find(booking.id.value()))
                .set((
                    bookings::start_date.eq(booking.start),
                    bookings::end_date.eq(booking.end),
                    bookings::item_id.eq(booking.item_id.value()),
                    bookings::booker_id.eq(booking.booker_id.value()),
                    bookings::status.eq(booking.status.to_string()),
                ))
                .get_result(conn)
                .map_err(|e| {
                    RepositoryError::from(e).with_operation("update_booking")
                })?;
            row.into_booking().map_err(RepositoryError::internal)
        })
        .await
    }

    async fn find_booking(&self, id: BookingId) -> RepositoryResult<Option<Booking>> {
        self.with_conn(move |conn| {
            let row = bookings::table
                .find(id.value())
                .first::<BookingRow>(conn)
                .optional()?;
            row.map(|r| r.into_booking().map_err(RepositoryError::internal))
                .transpose()
        })
        .await
    }

    async fn list_bookings_by_booker(&self, booker: UserId) -> RepositoryResult<Vec<Booking>> {
        self.with_conn(move |conn| {
            let rows = bookings::table
                .filter(bookings::booker_id.eq(booker.value()))
                .load::<BookingRow>(conn)?;
            rows_to_bookings(rows)
        })
        .await
    }

    async fn list_bookings_by_owner(&self, owner: UserId) -> RepositoryResult<Vec<Booking>> {
        self.with_conn(move |conn| {
            let rows = bookings::table
                .inner_join(items::table)
                .filter(items::owner_id.eq(owner.value()))
                .select(BookingRow::as_select())
                .load::<BookingRow>(conn)?;
            rows_to_bookings(rows)
        })
        .await
    }

    async fn list_bookings_for_item(&self, item: ItemId) -> RepositoryResult<Vec<Booking>> {
        self.with_conn(move |conn| {
            let rows = bookings::table
                .filter(bookings::item_id.eq(item.value()))
                .load::<BookingRow>(conn)?;
            rows_to_bookings(rows)
        })
        .await
    }
}

#[async_trait]
impl RequestRepository for PostgresRepository {
    async fn create_request(&self, request: NewRequest) -> RepositoryResult<ItemRequest> {
        self.with_conn(move |conn| {
            let row: RequestRow = diesel::insert_into(item_requests::table)
                .values(NewRequestRow::from(request.clone()))
                .get_result(conn)?;
            Ok(row.into())
        })
        .await
    }

    async fn find_request(&self, id: RequestId) -> RepositoryResult<Option<ItemRequest>> {
        self.with_conn(move |conn| {
            let row = item_requests::table
                .find(id.value())
                .first::<RequestRow>(conn)
                .optional()?;
            Ok(row.map(ItemRequest::from))
        })
        .await
    }

    async fn list_requests_by_requester(
        &self,
        requester: UserId,
    ) -> RepositoryResult<Vec<ItemRequest>> {
        self.with_conn(move |conn| {
            let rows = item_requests::table
                .filter(item_requests::requester_id.eq(requester.value()))
                .order(item_requests::created_at.desc())
                .load::<RequestRow>(conn)?;
            Ok(rows.into_iter().map(ItemRequest::from).collect())
        })
        .await
    }

    async fn list_requests_excluding(
        &self,
        requester: UserId,
    ) -> RepositoryResult<Vec<ItemRequest>> {
        self.with_conn(move |conn| {
            let rows = item_requests::table
                .filter(item_requests::requester_id.ne(requester.value()))
                .order(item_requests::created_at.desc())
                .load::<RequestRow>(conn)?;
            Ok(rows.into_iter().map(ItemRequest::from).collect())
        })
        .await
    }
}

#[async_trait]
impl CommentRepository for PostgresRepository {
    async fn create_comment(&self, comment: NewComment) -> RepositoryResult<Comment> {
        self.with_conn(move |conn| {
            let row: CommentRow = diesel::insert_into(comments::table)
                .values(NewCommentRow::from(comment.clone()))
                .get_result(conn)?;
            Ok(row.into())
        })
        .await
    }

    async fn list_comments_for_item(&self, item: ItemId) -> RepositoryResult<Vec<Comment>> {
        self.with_conn(move |conn| {
            let rows = comments::table
                .filter(comments::item_id.eq(item.value()))
                .order(comments::id.asc())
                .load::<CommentRow>(conn)?;
            Ok(rows.into_iter().map(Comment::from).collect())
        })
        .await
    }
}

#[async_trait]
impl FullRepository for PostgresRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        self.with_conn(move |conn| {
            diesel::sql_query("SELECT 1").execute(conn)?;
            Ok(true)
        })
        .await
    }
}
