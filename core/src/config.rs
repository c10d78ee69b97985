//! Client configuration.
//!
//! The SDK reads no environment variables; everything comes through
//! `ClientConfig`.

/// Base URL used when none is supplied.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Header carrying the API key on every request.
pub const API_KEY_HEADER: &str = "X-API-Key";

/// Immutable client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    api_key: String,
    base_url: String,
}

impl ClientConfig {
    /// Creates a configuration pointing at [`DEFAULT_BASE_URL`].
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Sets the base URL, stripping exactly one trailing `/`.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = normalize_base_url(base_url.into());
        self
    }

    /// Opaque API key forwarded in `X-API-Key`. Not validated.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Normalized base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

fn normalize_base_url(mut url: String) -> String {
    if url.ends_with('/') {
        url.pop();
    }
    url
}
