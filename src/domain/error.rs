//! Error types for transaction synchronization.
//!
//! The store forwards these unchanged to the presentation layer, which is the
//! only place that turns them into user-facing messages.

use thiserror::Error;

// ============================================================================
// Result Alias
// ============================================================================

/// Result type used by the API client and the transaction store.
pub type SyncResult<T> = std::result::Result<T, SyncError>;

// ============================================================================
// Validation Errors
// ============================================================================

/// Input problems, either caught before submission or reported by the
/// remote store when it rejects a payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Title was empty or whitespace-only.
    #[error("title required")]
    TitleRequired,

    /// Amount did not parse, or was not strictly positive before sign application.
    #[error("invalid amount")]
    InvalidAmount,

    /// No category was selected.
    #[error("category required")]
    CategoryRequired,

    /// The remote store refused the payload.
    #[error("rejected by server: {0}")]
    Rejected(String),
}

// ============================================================================
// Sync Errors
// ============================================================================

/// Failure modes of the API client and the transaction store.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Invalid input; recoverable by correcting it.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Transport failure; recoverable by retrying.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-success HTTP status from the remote store.
    #[error("Server error: HTTP {status}{}", detail_suffix(.message))]
    Server {
        /// The HTTP status code.
        status: u16,
        /// The server's own message, when the body carried one.
        message: Option<String>,
    },

    /// The target of a delete does not exist on the remote store.
    #[error("{entity} '{id}' not found")]
    NotFound {
        /// The type of entity that was not found.
        entity: &'static str,
        /// The identifier that was looked up.
        id: String,
    },

    /// The response body did not match the HTTP contract.
    #[error("Parse error: {message}")]
    Parse {
        /// Description of what failed to parse.
        message: String,
    },

    /// The HTTP client could not be constructed.
    #[error("Failed to initialize HTTP client: {0}")]
    ClientInit(String),
}

fn detail_suffix(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(" ({m})"))
        .unwrap_or_default()
}

impl SyncError {
    /// Create a new parse error with the given message.
    #[must_use]
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Create a new not found error.
    #[must_use]
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    /// Create a new server error for a non-success status.
    #[must_use]
    pub fn server(status: u16, message: Option<String>) -> Self {
        Self::Server { status, message }
    }

    /// Create a new client initialization error.
    #[must_use]
    pub fn client_init(message: impl Into<String>) -> Self {
        Self::ClientInit(message.into())
    }

    /// Returns `true` for `NotFound`, which callers of delete treat as success.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns `true` for failures a plain retry may fix.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) => true,
            Self::Server { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
