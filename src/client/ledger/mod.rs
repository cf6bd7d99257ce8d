//! HTTP client for the remote transaction store.
//!
//! # Example
//!
//! ```ignore
//! use wallet_sync::client::{HttpConfig, LedgerClient};
//!
//! let client = LedgerClient::new(HttpConfig::new("http://localhost:5001/api"))?;
//! let summary = client.fetch_summary("user_123").await?;
//! ```

use std::time::Duration;

use reqwest::{Client, Method, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::{HttpConfig, TransactionApi};
use crate::domain::{
    NewTransaction, Summary, SyncError, SyncResult, Transaction, TransactionId, ValidationError,
};

mod summary;
mod transactions;


// ============================================================================
// Ledger Client
// ============================================================================

#[derive(Debug, Clone)]
pub struct LedgerClient {
    /// Parsed base URL; request paths are appended segment by segment.
    base_url: Url,
    /// The configuration this client was built from.
    config: HttpConfig,
    /// HTTP client for requests.
    client: Client,
}

impl LedgerClient {
    /// Creates a client for the configured endpoint.
    ///
    /// # Errors
    ///
    /// Returns `SyncError::ClientInit` if the base URL is not a usable HTTP
    /// base or the HTTP client fails to initialize.
    pub fn new(config: HttpConfig) -> SyncResult<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            SyncError::client_init(format!("invalid base URL '{}': {e}", config.base_url))
        })?;
        if base_url.cannot_be_a_base() || !matches!(base_url.scheme(), "http" | "https") {
            return Err(SyncError::client_init(format!(
                "base URL '{}' must be an http(s) URL",
                config.base_url
            )));
        }

        let client = Self::build_http_client(config.timeout)?;

        Ok(Self {
            base_url,
            config,
            client,
        })
    }

    /// Build the HTTP client with connection pooling.
    fn build_http_client(timeout: Duration) -> SyncResult<Client> {
        Client::builder()
            .pool_max_idle_per_host(4)
            .pool_idle_timeout(Duration::from_secs(30))
            .timeout(timeout)
            .build()
            .map_err(|e| SyncError::client_init(e.to_string()))
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends `segments` to the base URL, percent-encoding each one so an
    /// opaque id can never add path components of its own.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // `new` rejected cannot-be-a-base URLs, so path segments are always available.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    pub(crate) fn build_request(&self, method: Method, url: Url) -> reqwest::RequestBuilder {
        self.client
            .request(method, url)
            .header("accept", "application/json")
    }

    /// Sends a request, mapping transport failures to `SyncError::Network`.
    pub(crate) async fn send(&self, request: reqwest::RequestBuilder) -> SyncResult<Response> {
        let response = request.send().await.map_err(SyncError::Network)?;
        debug!("{} -> {}", response.url(), response.status());
        Ok(response)
    }

    /// Check that the transaction API answers its health endpoint.
    ///
    /// # Errors
    ///
    /// Returns `Network` if the server is unreachable and `Server` if it
    /// answers with a non-success status.
    pub async fn check_health(&self) -> SyncResult<()> {
        let request = self
            .build_request(Method::GET, self.endpoint(&["health"]))
            .timeout(self.config.health_timeout);
        let response = self.send(request).await?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(status_error(response).await)
        }
    }
}

impl TransactionApi for LedgerClient {
    async fn list_transactions(&self, user_id: &str) -> SyncResult<Vec<Transaction>> {
        self.fetch_transactions(user_id).await
    }

    async fn get_summary(&self, user_id: &str) -> SyncResult<Summary> {
        self.fetch_summary(user_id).await
    }

    async fn create_transaction(&self, payload: &NewTransaction) -> SyncResult<Transaction> {
        self.submit_transaction(payload).await
    }

    async fn delete_transaction(&self, id: &TransactionId) -> SyncResult<()> {
        self.remove_transaction(id).await
    }
}

// ============================================================================
// Response Helpers
// ============================================================================

/// Decode a JSON body, reporting contract mismatches as `SyncError::Parse`.
pub(crate) async fn read_json<T: DeserializeOwned>(response: Response, what: &str) -> SyncResult<T> {
    let body = response.text().await.map_err(SyncError::Network)?;
    parse_body(&body, what)
}

pub(crate) fn parse_body<T: DeserializeOwned>(body: &str, what: &str) -> SyncResult<T> {
    serde_json::from_str(body).map_err(|e| SyncError::parse(format!("Failed to parse {what}: {e}")))
}

/// Consume a non-success response into a `SyncError::Server`.
pub(crate) async fn status_error(response: Response) -> SyncError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    server_error(status, &body)
}

pub(crate) fn server_error(status: StatusCode, body: &str) -> SyncError {
    SyncError::server(status.as_u16(), error_message(body))
}

/// Map a failed create: rejected payloads become validation errors.
pub(crate) fn create_error(status: StatusCode, body: &str) -> SyncError {
    match status {
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            let message = error_message(body).unwrap_or_else(|| "payload rejected".to_string());
            ValidationError::Rejected(message).into()
        }
        _ => server_error(status, body),
    }
}

/// Map a failed delete: a missing target is reported as `NotFound`.
pub(crate) fn delete_error(status: StatusCode, body: &str, id: &TransactionId) -> SyncError {
    match status {
        StatusCode::NOT_FOUND => SyncError::not_found("transaction", id.as_str()),
        _ => server_error(status, body),
    }
}

/// Pull `message` (or `error`) out of a JSON error body.
fn error_message(body: &str) -> Option<String> {
    let json: serde_json::Value = serde_json::from_str(body).ok()?;
    ["message", "error"]
        .into_iter()
        .find_map(|key| json.get(key).and_then(|v| v.as_str()))
        .map(str::to_string)
}
