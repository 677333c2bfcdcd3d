//! HTTP request builder.

use std::collections::HashMap;

/// A builder for constructing GET requests.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    pub(crate) url: String,
    pub(crate) headers: HashMap<String, String>,
}

impl RequestBuilder {
    /// Create a new request builder.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: HashMap::new(),
        }
    }

    /// Add a header to the request.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Set the Accept header.
    pub fn accept(self, content_type: impl Into<String>) -> Self {
        self.header("Accept", content_type)
    }

    /// The target URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Look up a header that will be sent with the request.
    pub fn header_value(&self, key: &str) -> Option<&str> {
        self.headers.get(key).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_overrides_previous_value() {
        let builder = RequestBuilder::new("http://localhost/stock/1")
            .header("X-Store", "one")
            .header("X-Store", "two");
        assert_eq!(builder.header_value("X-Store"), Some("two"));
    }

    #[test]
    fn test_accept() {
        let builder = RequestBuilder::new("http://localhost").accept("application/json");
        assert_eq!(builder.header_value("Accept"), Some("application/json"));
    }
}
