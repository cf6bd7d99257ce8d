//! Transaction synchronization for the wallet personal finance tracker.
//!
//! - [`client`] - typed HTTP access to the remote transaction store
//! - [`state`] - the client-side store that keeps a screen's transaction
//!   list and summary consistent with the server
//! - [`domain`] - transactions, summaries, categories and errors

pub mod client;
pub mod domain;
pub mod state;

#[cfg(test)]
mod test_utils;
