//! Typed access to the remote transaction store.
//!
//! [`TransactionApi`] is the contract the store is written against.
//! [`LedgerClient`] implements it over HTTP/JSON; tests substitute an
//! in-memory remote.
//!
//! # Example
//!
//! ```ignore
//! use wallet_sync::client::{HttpConfig, LedgerClient, TransactionApi};
//!
//! let client = LedgerClient::new(HttpConfig::new("https://wallet.example/api"))?;
//! let transactions = client.list_transactions("user_123").await?;
//! ```

use std::future::Future;

use crate::domain::{NewTransaction, Summary, SyncResult, Transaction, TransactionId};

pub mod http;
pub mod ledger;

// ============================================================================
// Re-exports
// ============================================================================

pub use http::HttpConfig;
pub use ledger::LedgerClient;

// ============================================================================
// Transaction API
// ============================================================================

/// Operations offered by the remote transaction store.
///
/// Implementations hold no state and never retry. Dropping a returned future
/// abandons the call.
pub trait TransactionApi: Send + Sync {
    /// Lists a user's transactions, most recent first.
    fn list_transactions(
        &self,
        user_id: &str,
    ) -> impl Future<Output = SyncResult<Vec<Transaction>>> + Send;

    /// Fetches the server-computed balance, income and expense for a user.
    fn get_summary(&self, user_id: &str) -> impl Future<Output = SyncResult<Summary>> + Send;

    /// Persists a sign-normalized transaction and returns the stored record.
    fn create_transaction(
        &self,
        payload: &NewTransaction,
    ) -> impl Future<Output = SyncResult<Transaction>> + Send;

    /// Deletes a transaction; fails with `NotFound` when it does not exist.
    fn delete_transaction(&self, id: &TransactionId)
    -> impl Future<Output = SyncResult<()>> + Send;
}
