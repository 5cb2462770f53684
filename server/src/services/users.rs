//! User directory.
//!
//! Create/update/get/list/delete over user records with email format and
//! uniqueness enforcement.

use std::sync::OnceLock;

use log::debug;
use regex::Regex;

use super::error::{ServiceError, ServiceResult};
use super::require_non_blank;
use crate::api::{CreateUserRequest, UpdateUserRequest};
use crate::db::repository::FullRepository;
use crate::models::{NewUser, User, UserId};

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

/// Minimal `local@domain` shape check applied on user creation.
fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9+_.-]+@.+$").expect("email pattern is valid")
    })
}

/// Create a user. Name and email must be non-blank, the email well-formed
/// and not yet taken.
pub async fn create_user(
    repo: &dyn FullRepository,
    request: CreateUserRequest,
) -> ServiceResult<User> {
    let name = require_non_blank(request.name, "name")?;
    let email = require_non_blank(request.email, "email")?;

    if !email_regex().is_match(email.trim()) {
        return Err(ServiceError::Validation(format!(
            "Invalid email format: {}",
            email
        )));
    }

    if repo.email_in_use(&email, None).await? {
        return Err(ServiceError::EmailInUse(email));
    }

    let user = repo.create_user(NewUser { name, email }).await?;
    debug!("created user {}", user.id);
    Ok(user)
}

/// Apply a partial update; an email change re-checks uniqueness against
/// everyone but the user themselves.
pub async fn update_user(
    repo: &dyn FullRepository,
    user_id: UserId,
    request: UpdateUserRequest,
) -> ServiceResult<User> {
    let mut user = repo
        .find_user(user_id)
        .await?
        .ok_or(ServiceError::UserNotFound(user_id.value()))?;

    if let Some(name) = request.name {
        user.name = name;
    }
    if let Some(email) = request.email {
        if repo.email_in_use(&email, Some(user_id)).await? {
            return Err(ServiceError::EmailInUse(email));
        }
        user.email = email;
    }

    Ok(repo.update_user(user).await?)
}

/// Fetch a user by id; `None` when absent.
pub async fn get_user(repo: &dyn FullRepository, user_id: UserId) -> ServiceResult<Option<User>> {
    Ok(repo.find_user(user_id).await?)
}

/// List all users.
pub async fn get_all_users(repo: &dyn FullRepository) -> ServiceResult<Vec<User>> {
    Ok(repo.list_users().await?)
}

/// Delete a user by id.
pub async fn delete_user(repo: &dyn FullRepository, user_id: UserId) -> ServiceResult<()> {
    if !repo.delete_user(user_id).await? {
        return Err(ServiceError::UserNotFound(user_id.value()));
    }
    Ok(())
}
