//! reqwest-backed transport
//!
//! Applies the per-request timeout at the client boundary, so a hung backend
//! surfaces as a transport failure on the step that hit it instead of
//! wedging the whole run.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;

use super::transport::{ApiResponse, ApiTransport};
use crate::common::{Error, Result};

pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl ApiTransport for HttpTransport {
    async fn send(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: Option<&Value>,
    ) -> Result<ApiResponse> {
        let mut request = self.client.request(method, self.url(path));
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| Error::Transport {
            path: path.to_string(),
            source: e,
        })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| Error::Transport {
            path: path.to_string(),
            source: e,
        })?;

        Ok(ApiResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_without_double_slash() {
        let transport =
            HttpTransport::new("http://localhost:3001/api/", Duration::from_secs(5)).unwrap();
        assert_eq!(
            transport.url("/auth/login"),
            "http://localhost:3001/api/auth/login"
        );
        assert_eq!(
            transport.url("productos"),
            "http://localhost:3001/api/productos"
        );
    }
}
