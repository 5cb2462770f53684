//! Request shape validation for the gateway.
//!
//! These DTOs only check what the gateway is responsible for: presence and
//! format of required fields and date ordering. Everything that needs state
//! (uniqueness, ownership, availability) is the backend's job.

use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::Deserialize;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9+_.-]+@.+$").expect("email pattern is valid")
    })
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map(|v| v.trim().is_empty()).unwrap_or(true)
}

/// Body of POST /users.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserDto {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl CreateUserDto {
    pub fn validate(&self) -> Result<(), String> {
        if is_blank(&self.name) {
            return Err("name must not be blank".to_string());
        }
        match self.email.as_deref().map(str::trim) {
            None | Some("") => Err("email must not be blank".to_string()),
            Some(email) if !email_regex().is_match(email) => {
                Err(format!("Invalid email format: {}", email))
            }
            Some(_) => Ok(()),
        }
    }
}

/// Body of POST /items.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateItemDto {
    pub name: Option<String>,
    pub description: Option<String>,
    pub available: Option<bool>,
    #[serde(default)]
    pub request_id: Option<i64>,
}

impl CreateItemDto {
    pub fn validate(&self) -> Result<(), String> {
        if is_blank(&self.name) {
            return Err("name must not be blank".to_string());
        }
        if is_blank(&self.description) {
            return Err("description must not be blank".to_string());
        }
        if self.available.is_none() {
            return Err("available must be provided".to_string());
        }
        Ok(())
    }
}

/// Body of POST /bookings.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingDto {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub item_id: Option<i64>,
}

impl CreateBookingDto {
    pub fn validate(&self) -> Result<(), String> {
        let (start, end) = match (self.start, self.end) {
            (Some(start), Some(end)) => (start, end),
            _ => return Err("start and end must be provided".to_string()),
        };
        if start >= end {
            return Err("start must precede end".to_string());
        }
        if self.item_id.is_none() {
            return Err("itemId must be provided".to_string());
        }
        Ok(())
    }
}

/// Body of POST /items/{id}/comment.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCommentDto {
    pub text: Option<String>,
}

impl CreateCommentDto {
    pub fn validate(&self) -> Result<(), String> {
        if is_blank(&self.text) {
            return Err("text must not be blank".to_string());
        }
        Ok(())
    }
}

/// Body of POST /requests.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRequestDto {
    pub description: Option<String>,
}

impl CreateRequestDto {
    pub fn validate(&self) -> Result<(), String> {
        if is_blank(&self.description) {
            return Err("description must not be blank".to_string());
        }
        Ok(())
    }
}
