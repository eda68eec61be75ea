//! Transport trait and response type

use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;

use crate::common::Result;

/// Bounded excerpt length for response bodies quoted in failure reasons
pub const BODY_EXCERPT_CHARS: usize = 200;

/// A completed HTTP exchange, status and raw body.
///
/// Transport-level problems (timeouts, refused connections) never produce
/// one of these; they surface as [`crate::common::Error::Transport`].
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// A bounded, trimmed slice of the body for error messages
    pub fn excerpt(&self) -> String {
        let trimmed = self.body.trim();
        if trimmed.chars().count() <= BODY_EXCERPT_CHARS {
            trimmed.to_string()
        } else {
            let mut out: String = trimmed.chars().take(BODY_EXCERPT_CHARS).collect();
            out.push('…');
            out
        }
    }
}

/// Transport used by step actions to reach the backend
#[async_trait]
pub trait ApiTransport: Send + Sync {
    /// Issue one request. `path` is relative to the configured base URL;
    /// `token` is sent as a bearer credential when present.
    async fn send(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: Option<&Value>,
    ) -> Result<ApiResponse>;

    async fn get(&self, path: &str, token: Option<&str>) -> Result<ApiResponse> {
        self.send(Method::GET, path, token, None).await
    }

    async fn post(&self, path: &str, token: Option<&str>, body: &Value) -> Result<ApiResponse> {
        self.send(Method::POST, path, token, Some(body)).await
    }

    async fn patch(
        &self,
        path: &str,
        token: Option<&str>,
        body: Option<&Value>,
    ) -> Result<ApiResponse> {
        self.send(Method::PATCH, path, token, body).await
    }

    async fn delete(&self, path: &str, token: Option<&str>) -> Result<ApiResponse> {
        self.send(Method::DELETE, path, token, None).await
    }
}
