//! HTTP client forwarding validated requests to the backend server.

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use reqwest::Method;
use serde_json::Value;
use tracing::debug;

use crate::error::GatewayError;

/// Header carrying the id of the user a request acts on behalf of.
pub const USER_ID_HEADER: &str = "X-Sharer-User-Id";

/// Client for the backend server.
///
/// Forwards method, path, query string, JSON body and the user header, and
/// hands the backend's status code and body back verbatim.
#[derive(Debug, Clone)]
pub struct ForwardClient {
    http: reqwest::Client,
    base_url: String,
}

impl ForwardClient {
    /// Create a client targeting `base_url` (e.g. `http://localhost:9090`).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Forward a request to the backend and convert the answer into an axum
    /// response without interpreting it.
    pub async fn forward(
        &self,
        method: Method,
        path_and_query: &str,
        user_id: Option<i64>,
        body: Option<&Value>,
    ) -> Result<Response, GatewayError> {
        let url = format!("{}{}", self.base_url, path_and_query);
        debug!("forwarding {} {}", method, url);

        let mut request = self.http.request(method, &url);
        if let Some(id) = user_id {
            request = request.header(USER_ID_HEADER, id.to_string());
        }
        if let Some(json) = body {
            request = request.json(json);
        }

        let upstream = request.send().await?;
        let status = StatusCode::from_u16(upstream.status().as_u16())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let content_type = upstream
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| {
                HeaderValue::from_str(v)
                    .unwrap_or_else(|_| HeaderValue::from_static("application/json"))
            });
        let bytes = upstream.bytes().await?;

        let mut response = (status, bytes).into_response();
        if let Some(content_type) = content_type {
            response
                .headers_mut()
                .insert(header::CONTENT_TYPE, content_type);
        }
        Ok(response)
    }
}
