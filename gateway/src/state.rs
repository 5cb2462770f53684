//! Application state for the gateway.

use crate::client::ForwardClient;

/// Shared state passed to all gateway handlers.
#[derive(Clone)]
pub struct AppState {
    /// Client for the backend server
    pub client: ForwardClient,
}

impl AppState {
    /// Create a new application state with the given backend client.
    pub fn new(client: ForwardClient) -> Self {
        Self { client }
    }
}
