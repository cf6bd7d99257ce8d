//! HTTP configuration for the remote transaction store.
//!
//! The endpoint is injected here at construction time; nothing in the client
//! reads a process-wide base URL.

use std::time::Duration;

// ============================================================================
// Constants
// ============================================================================

/// Default timeout for HTTP requests in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Default timeout for health check requests in seconds
pub const HEALTH_CHECK_TIMEOUT_SECS: u64 = 2;

/// Base URL used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5001/api";

// ============================================================================
// Configuration
// ============================================================================

/// HTTP client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpConfig {
    /// Base URL of the transaction API, e.g. `https://host/api`
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// Timeout for `GET /health`
    pub health_timeout: Duration,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl HttpConfig {
    /// Create config for the given base URL with default timeouts
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            health_timeout: Duration::from_secs(HEALTH_CHECK_TIMEOUT_SECS),
        }
    }

    /// Replace the request timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
