//! HTTP client utilities for Cartwheel.
//!
//! A small builder over `reqwest` for the read-only JSON endpoints the cart
//! talks to. Requests are buffered into a [`Response`] so callers can check
//! the status before decoding.
//!
//! # Example
//!
//! ```rust,ignore
//! use cartwheel_data::FetchClient;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Stock {
//!     amount: i64,
//! }
//!
//! let client = FetchClient::new().with_base_url("http://localhost:3333");
//!
//! let stock: Stock = client
//!     .get("/stock/1")
//!     .send()
//!     .await?
//!     .error_for_status()?
//!     .json()?;
//! ```

mod error;
mod request;
mod response;

use std::collections::HashMap;
use std::time::Duration;

pub use error::FetchError;
pub use request::RequestBuilder;
pub use response::Response;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for outbound GET requests.
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct FetchClient {
    http: reqwest::Client,
    base_url: Option<String>,
    default_headers: HashMap<String, String>,
    timeout: Duration,
}

impl Default for FetchClient {
    fn default() -> Self {
        Self::new()
    }
}

impl FetchClient {
    /// Create a new HTTP client.
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: None,
            default_headers: HashMap::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Create a client with a base URL that will be prepended to relative paths.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Add a default header that will be included in all requests.
    pub fn with_default_header(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Create a GET request.
    pub fn get(&self, url: impl Into<String>) -> ClientRequestBuilder {
        let url = url.into();
        let full_url = match &self.base_url {
            Some(base) if !is_absolute(&url) => {
                format!(
                    "{}/{}",
                    base.trim_end_matches('/'),
                    url.trim_start_matches('/')
                )
            }
            _ => url,
        };

        let mut builder = RequestBuilder::new(full_url);
        for (key, value) in &self.default_headers {
            builder = builder.header(key.clone(), value.clone());
        }

        ClientRequestBuilder {
            http: self.http.clone(),
            timeout: self.timeout,
            builder,
        }
    }
}

fn is_absolute(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// A request builder bound to a client.
pub struct ClientRequestBuilder {
    http: reqwest::Client,
    timeout: Duration,
    builder: RequestBuilder,
}

impl ClientRequestBuilder {
    /// Add a header to the request.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.builder = self.builder.header(key, value);
        self
    }

    /// Set the Accept header.
    pub fn accept(mut self, content_type: impl Into<String>) -> Self {
        self.builder = self.builder.accept(content_type);
        self
    }

    /// The resolved request.
    pub fn request(&self) -> &RequestBuilder {
        &self.builder
    }

    /// Send the request and buffer the response.
    pub async fn send(self) -> Result<Response, FetchError> {
        let url = reqwest::Url::parse(&self.builder.url)
            .map_err(|e| FetchError::InvalidUrl(format!("{}: {}", self.builder.url, e)))?;

        tracing::debug!(url = %url, "sending GET request");

        let mut request = self.http.get(url).timeout(self.timeout);
        for (key, value) in &self.builder.headers {
            request = request.header(key.as_str(), value.as_str());
        }

        let response = request.send().await?;

        let status = response.status().as_u16();
        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_string()))
            .collect();
        let body = response.bytes().await?.to_vec();

        tracing::debug!(status, bytes = body.len(), "received response");

        Ok(Response::new(status, headers, body))
    }
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{FetchClient, FetchError, Response};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_path_joined_to_base() {
        let client = FetchClient::new().with_base_url("http://localhost:3333/");
        let req = client.get("/stock/4");
        assert_eq!(req.request().url(), "http://localhost:3333/stock/4");

        let req = client.get("products/4");
        assert_eq!(req.request().url(), "http://localhost:3333/products/4");
    }

    #[test]
    fn test_absolute_url_ignores_base() {
        let client = FetchClient::new().with_base_url("http://localhost:3333");
        let req = client.get("https://api.example.com/stock/1");
        assert_eq!(req.request().url(), "https://api.example.com/stock/1");
    }

    #[test]
    fn test_no_base_url() {
        let client = FetchClient::new();
        let req = client.get("/stock/1");
        assert_eq!(req.request().url(), "/stock/1");
    }

    #[test]
    fn test_default_headers_applied() {
        let client = FetchClient::new()
            .with_default_header("X-Client", "cartwheel")
            .with_timeout(Duration::from_secs(2));
        let req = client.get("http://localhost/stock/1").accept("application/json");

        assert_eq!(req.request().header_value("X-Client"), Some("cartwheel"));
        assert_eq!(req.request().header_value("Accept"), Some("application/json"));
    }

    #[tokio::test]
    async fn test_send_rejects_relative_url_without_base() {
        let result = FetchClient::new().get("/stock/1").send().await;
        assert!(matches!(result, Err(FetchError::InvalidUrl(_))));
    }
}
