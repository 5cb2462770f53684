//! # ShareIt Backend
//!
//! Backend server for the ShareIt item-sharing service.
//!
//! The crate exposes CRUD operations over four entities (users, items,
//! bookings, item requests) plus a comment log, persisted behind a repository
//! abstraction with interchangeable backends. A thin gateway binary (separate
//! crate) validates request shape and forwards to this server.
//!
//! ## Architecture
//!
//! - [`models`]: typed identifiers and domain entities
//! - [`api`]: view types returned by the service layer
//! - [`db`]: repository traits, error types, and storage backends
//! - [`services`]: business logic (booking engine, catalog, directory, requests)
//! - [`http`]: axum-based HTTP server and request handlers
//!
//! ## Storage backends
//!
//! The repository backend is selected by feature flag and runtime
//! configuration: `local-repo` provides an in-memory store for tests and local
//! development, `postgres-repo` a Diesel-backed PostgreSQL store with embedded
//! migrations.

pub mod api;

pub mod db;
pub mod models;

pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
