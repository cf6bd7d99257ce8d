//! Summary fetching for LedgerClient.

use reqwest::Method;

use super::{LedgerClient, read_json, status_error};
use crate::domain::{Summary, SyncResult};

impl LedgerClient {
    /// Fetch the server-computed summary for `user_id`.
    ///
    /// # Errors
    ///
    /// Returns `Network`, `Server` or `Parse` errors.
    pub async fn fetch_summary(&self, user_id: &str) -> SyncResult<Summary> {
        let url = self.endpoint(&["transactions", "summary", user_id]);
        let response = self.send(self.build_request(Method::GET, url)).await?;

        if !response.status().is_success() {
            return Err(status_error(response).await);
        }

        read_json(response, "summary").await
    }
}
