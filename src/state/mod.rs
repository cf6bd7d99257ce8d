//! Client-side transaction state and its synchronization with the remote store.
//!
//! - [`TransactionStore`] - single source of truth for one user's list,
//!   summary and load status
//! - [`TransactionEntry`] - validation of user-entered transactions
//! - [`AppConfig`] - persisted endpoint and user configuration
//!
//! # Consistency Model
//!
//! ```text
//! intent ──► TransactionStore ──► TransactionApi ──► remote store
//!                  │
//!                  └── watch::Sender<StoreState> ──► observers
//! ```
//!
//! Every state change is a single `watch` transition, so observers never see
//! a list from one fetch next to a summary from another. Each `load` takes a
//! sequence token and only the most recently issued load may commit; results
//! from superseded loads, successful or not, are dropped. Mutations are never
//! applied locally: a successful create or delete is followed by a full reload,
//! leaving all arithmetic to the server.
//!
//! # Example
//!
//! ```ignore
//! use wallet_sync::client::{HttpConfig, LedgerClient};
//! use wallet_sync::state::TransactionStore;
//!
//! let client = LedgerClient::new(HttpConfig::default())?;
//! let store = TransactionStore::new(client, "user_123");
//! store.load().await?;
//! println!("{:?}", store.snapshot().summary);
//! ```

use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::client::TransactionApi;
use crate::domain::{Summary, SyncError, SyncResult, Transaction, TransactionId};

// ============================================================================
// Module Declarations
// ============================================================================

pub mod config;
pub mod entry;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::AppConfig;
pub use entry::TransactionEntry;

// ============================================================================
// Store State
// ============================================================================

/// Progress of the most recent load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    /// The last load failed; the message is for display only.
    Error(String),
}

/// Everything a screen renders from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreState {
    /// Server order, most recent first.
    pub transactions: Vec<Transaction>,
    pub summary: Summary,
    pub status: LoadStatus,
}

impl StoreState {
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.status == LoadStatus::Loading
    }

    /// The failure message of the last load, if it failed.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match &self.status {
            LoadStatus::Error(message) => Some(message),
            _ => None,
        }
    }

    fn failed(error: &SyncError) -> Self {
        Self {
            status: LoadStatus::Error(error.to_string()),
            ..Self::default()
        }
    }
}

/// What happened to the result of a `load`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The fetched list and summary are now the current state.
    Applied,
    /// A newer load was issued before this one finished; its result was dropped.
    Superseded,
}

// ============================================================================
// Transaction Store
// ============================================================================

/// State container for one user's transactions.
///
/// Methods take `&self`, so a store shared behind an `Arc` can serve
/// overlapping intents (refresh while loading, delete while loading).
#[derive(Debug)]
pub struct TransactionStore<A> {
    api: A,
    user_id: String,
    state: watch::Sender<StoreState>,
    /// Token of the most recently issued load.
    latest_load: AtomicU64,
}

impl<A: TransactionApi> TransactionStore<A> {
    /// Creates an empty, idle store bound to `user_id`.
    pub fn new(api: A, user_id: impl Into<String>) -> Self {
        let (state, _) = watch::channel(StoreState::default());
        Self {
            api,
            user_id: user_id.into(),
            state,
            latest_load: AtomicU64::new(0),
        }
    }

    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    #[must_use]
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Returns a copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> StoreState {
        self.state.borrow().clone()
    }

    /// Subscribes to state transitions.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<StoreState> {
        self.state.subscribe()
    }

    /// Fetches the list and the summary together and commits them as one
    /// transition.
    ///
    /// Either fetch failing resets the state to empty with an error status:
    /// a list next to a summary it was not computed from is never shown.
    ///
    /// # Errors
    ///
    /// Returns the error of the failed fetch (the list's if both failed). A
    /// superseded load returns `Ok(LoadOutcome::Superseded)` even if it
    /// failed, since its outcome no longer describes the current state.
    pub async fn load(&self) -> SyncResult<LoadOutcome> {
        // Issue the token under the state lock so a superseded load can never
        // flip the status back to Loading after a newer load has committed.
        let mut token = 0;
        self.state.send_modify(|state| {
            token = self.latest_load.fetch_add(1, Ordering::SeqCst) + 1;
            state.status = LoadStatus::Loading;
        });
        debug!(user_id = %self.user_id, token, "Loading transactions");

        let (list, summary) = tokio::join!(
            self.api.list_transactions(&self.user_id),
            self.api.get_summary(&self.user_id),
        );

        let (next, error) = match (list, summary) {
            (Ok(transactions), Ok(summary)) => (
                StoreState {
                    transactions,
                    summary,
                    status: LoadStatus::Idle,
                },
                None,
            ),
            (Err(e), _) | (_, Err(e)) => (StoreState::failed(&e), Some(e)),
        };

        if !self.commit(token, next) {
            debug!(token, "Discarding superseded load");
            return Ok(LoadOutcome::Superseded);
        }

        match error {
            Some(e) => {
                warn!(user_id = %self.user_id, "Load failed: {e}");
                Err(e)
            }
            None => Ok(LoadOutcome::Applied),
        }
    }

    /// Validates `entry`, submits it, then reloads.
    ///
    /// The new transaction is not spliced into local state; the reload brings
    /// it in together with a summary that accounts for it. If the reload
    /// fails, the created transaction is still returned (the server holds it)
    /// and the failure shows up as an error status.
    ///
    /// # Errors
    ///
    /// Returns `Validation` for rejected input, or the API error of the create
    /// call. State is unchanged in both cases.
    pub async fn create(&self, entry: &TransactionEntry) -> SyncResult<Transaction> {
        let payload = entry.build(&self.user_id)?;
        let created = self.api.create_transaction(&payload).await?;
        info!(id = %created.id, "Transaction created");

        if let Err(e) = self.load().await {
            warn!("Reload after create failed: {e}");
        }
        Ok(created)
    }

    /// Deletes a transaction, then reloads.
    ///
    /// A transaction that is already gone counts as deleted.
    ///
    /// # Errors
    ///
    /// Returns any API error other than `NotFound`; state is unchanged.
    pub async fn remove(&self, id: &TransactionId) -> SyncResult<()> {
        match self.api.delete_transaction(id).await {
            Ok(()) => info!(%id, "Transaction deleted"),
            Err(e) if e.is_not_found() => debug!(%id, "Transaction already absent"),
            Err(e) => return Err(e),
        }

        if let Err(e) = self.load().await {
            warn!("Reload after delete failed: {e}");
        }
        Ok(())
    }

    /// Resets to the initial empty state, e.g. on sign-out. Loads still in
    /// flight are superseded and will not commit.
    pub fn clear(&self) {
        self.state.send_modify(|state| {
            self.latest_load.fetch_add(1, Ordering::SeqCst);
            *state = StoreState::default();
        });
    }

    /// Replaces the state with `next` if `token` is still the latest load.
    fn commit(&self, token: u64, next: StoreState) -> bool {
        self.state.send_if_modified(|state| {
            if self.latest_load.load(Ordering::SeqCst) != token {
                return false;
            }
            *state = next;
            true
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
