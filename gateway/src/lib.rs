//! # ShareIt Gateway
//!
//! Thin validating front for the ShareIt backend. The gateway checks request
//! shape — presence and format of required fields, date ordering, the
//! `X-Sharer-User-Id` header — and forwards everything that passes to the
//! backend server unchanged, returning the backend's status code and body
//! verbatim.
//!
//! No business logic lives here: ownership checks, state filtering and
//! persistence all happen in the backend.

pub mod client;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use client::ForwardClient;
pub use router::create_router;
pub use state::AppState;
