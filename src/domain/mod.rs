//! Domain types for the wallet transaction tracker.
//!
//! # Module Organization
//!
//! - [`error`] - Error taxonomy shared by the client and the store
//! - [`transaction`] - Transactions, summaries and the create payload
//! - [`category`] - The built-in category picker
//! - [`format`] - Amount and date display helpers

// ============================================================================
// Module Declarations
// ============================================================================

pub mod category;
pub mod error;
pub mod format;
pub mod transaction;

// ============================================================================
// Re-exports
// ============================================================================

pub use category::Category;
pub use error::{SyncError, SyncResult, ValidationError};
pub use format::{format_amount, format_date, format_money};
pub use transaction::{
    Direction, NewTransaction, Summary, Transaction, TransactionId, parse_timestamp,
};
