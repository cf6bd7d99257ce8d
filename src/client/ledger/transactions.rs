//! Transaction list, create and delete calls for LedgerClient.

use reqwest::Method;
use tracing::debug;

use super::{LedgerClient, create_error, delete_error, read_json, status_error};
use crate::domain::{NewTransaction, SyncResult, Transaction, TransactionId};

impl LedgerClient {
    /// Fetch every transaction for `user_id`, in server order.
    ///
    /// # Errors
    ///
    /// Returns `Network`, `Server` or `Parse` errors.
    pub async fn fetch_transactions(&self, user_id: &str) -> SyncResult<Vec<Transaction>> {
        let url = self.endpoint(&["transactions", user_id]);
        let response = self.send(self.build_request(Method::GET, url)).await?;

        if !response.status().is_success() {
            return Err(status_error(response).await);
        }

        let transactions: Vec<Transaction> = read_json(response, "transaction list").await?;
        debug!("Fetched {} transactions", transactions.len());
        Ok(transactions)
    }

    /// Submit a sign-normalized transaction.
    ///
    /// # Errors
    ///
    /// Returns `Validation` when the store rejects the payload, otherwise
    /// `Network`, `Server` or `Parse` errors.
    pub async fn submit_transaction(&self, payload: &NewTransaction) -> SyncResult<Transaction> {
        let url = self.endpoint(&["transactions"]);
        let request = self.build_request(Method::POST, url).json(payload);
        let response = self.send(request).await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(create_error(status, &body));
        }

        let created: Transaction = read_json(response, "created transaction").await?;
        debug!("Created transaction {}", created.id);
        Ok(created)
    }

    /// Delete a transaction by id.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the store has no such transaction, otherwise
    /// `Network` or `Server` errors.
    pub async fn remove_transaction(&self, id: &TransactionId) -> SyncResult<()> {
        let url = self.endpoint(&["transactions", id.as_str()]);
        let response = self.send(self.build_request(Method::DELETE, url)).await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(delete_error(status, &body, id));
        }

        debug!("Deleted transaction {id}");
        Ok(())
    }
}
