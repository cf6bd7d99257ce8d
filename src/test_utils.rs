//! Shared test utilities and Mother pattern factories.
//!
//! [`FakeRemote`] stands in for the remote transaction store: it keeps
//! transactions in memory, computes summaries the way the server does, and
//! can be told to fail or to hold list responses so tests control the order
//! in which concurrent loads resolve.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use chrono::{DateTime, Duration, TimeZone, Utc};
use rust_decimal::Decimal;
use tokio::sync::oneshot;

use crate::client::TransactionApi;
use crate::domain::{
    NewTransaction, Summary, SyncError, SyncResult, Transaction, TransactionId, ValidationError,
};

// ============================================================================
// Mother Pattern Factories
// ============================================================================

pub struct TransactionMother;

impl TransactionMother {
    #[must_use]
    pub fn created_at(day: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap() + Duration::days(day)
    }

    #[must_use]
    pub fn with(id: i64, user_id: &str, title: &str, amount: Decimal, category: &str) -> Transaction {
        Transaction {
            id: TransactionId::from(id),
            user_id: user_id.to_string(),
            title: title.to_string(),
            amount,
            category: category.to_string(),
            created_at: Self::created_at(id),
        }
    }

    #[must_use]
    pub fn lunch(id: i64) -> Transaction {
        Self::with(id, "u1", "Lunch", Decimal::new(-20, 0), "Food & Drinks")
    }

    #[must_use]
    pub fn paycheck(id: i64) -> Transaction {
        Self::with(id, "u1", "Paycheck", Decimal::new(1000, 0), "Income")
    }
}

pub struct JsonMother;

impl JsonMother {
    /// Two transactions the way the server sends them: one amount as a
    /// numeric string, one as a number.
    #[must_use]
    pub fn transaction_list() -> String {
        r#"[
            {"id":2,"user_id":"u1","title":"Paycheck","amount":"1000.00","category":"Income","created_at":"2025-01-06T09:00:00.000Z"},
            {"id":1,"user_id":"u1","title":"Lunch","amount":-20,"category":"Food & Drinks","created_at":"2025-01-05"}
        ]"#
        .to_string()
    }

    #[must_use]
    pub fn transaction_with_category(category: &str) -> String {
        serde_json::json!({
            "id": 7,
            "user_id": "u1",
            "title": "Vet",
            "amount": "-45.50",
            "category": category,
            "created_at": "2025-02-01T10:00:00Z",
        })
        .to_string()
    }

    #[must_use]
    pub fn summary(balance: &str, income: &str, expense: &str) -> String {
        serde_json::json!({
            "balance": balance,
            "income": income,
            "expense": expense,
        })
        .to_string()
    }
}

// ============================================================================
// Fake Remote Store
// ============================================================================

#[derive(Default)]
struct RemoteData {
    /// Most recent first, like the server's ORDER BY created_at DESC.
    transactions: Vec<Transaction>,
    next_id: i64,
    fail_list: Option<u16>,
    fail_summary: Option<u16>,
    fail_create: Option<u16>,
    fail_delete: Option<u16>,
    reject_create: Option<String>,
    list_gates: VecDeque<oneshot::Receiver<()>>,
    list_calls: usize,
    create_calls: usize,
    delete_calls: usize,
}

/// In-memory implementation of [`TransactionApi`].
#[derive(Default)]
pub struct FakeRemote {
    data: Mutex<RemoteData>,
}

impl FakeRemote {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A remote seeded with `transactions`, given most recent first.
    #[must_use]
    pub fn with_transactions(transactions: Vec<Transaction>) -> Self {
        let remote = Self::new();
        {
            let mut data = remote.data.lock().unwrap();
            data.next_id = transactions
                .iter()
                .filter_map(|t| t.id.as_str().parse::<i64>().ok())
                .max()
                .unwrap_or(0);
            data.transactions = transactions;
        }
        remote
    }

    /// Inserts a transaction directly on the server side, bypassing the client.
    pub fn insert(&self, user_id: &str, title: &str, amount: Decimal, category: &str) -> Transaction {
        let mut data = self.data.lock().unwrap();
        data.next_id += 1;
        let transaction = TransactionMother::with(data.next_id, user_id, title, amount, category);
        data.transactions.insert(0, transaction.clone());
        transaction
    }

    pub fn fail_list(&self, status: Option<u16>) {
        self.data.lock().unwrap().fail_list = status;
    }

    pub fn fail_summary(&self, status: Option<u16>) {
        self.data.lock().unwrap().fail_summary = status;
    }

    pub fn fail_create(&self, status: Option<u16>) {
        self.data.lock().unwrap().fail_create = status;
    }

    pub fn fail_delete(&self, status: Option<u16>) {
        self.data.lock().unwrap().fail_delete = status;
    }

    pub fn reject_create(&self, message: &str) {
        self.data.lock().unwrap().reject_create = Some(message.to_string());
    }

    /// Makes the next list call wait until the returned sender fires (or is
    /// dropped). The response is still captured when the call is made.
    #[must_use]
    pub fn hold_next_list(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.data.lock().unwrap().list_gates.push_back(rx);
        tx
    }

    #[must_use]
    pub fn list_calls(&self) -> usize {
        self.data.lock().unwrap().list_calls
    }

    #[must_use]
    pub fn create_calls(&self) -> usize {
        self.data.lock().unwrap().create_calls
    }

    #[must_use]
    pub fn delete_calls(&self) -> usize {
        self.data.lock().unwrap().delete_calls
    }

    #[must_use]
    pub fn contains(&self, id: &TransactionId) -> bool {
        self.data
            .lock()
            .unwrap()
            .transactions
            .iter()
            .any(|t| &t.id == id)
    }

    fn summary_of<'a>(transactions: impl Iterator<Item = &'a Transaction>) -> Summary {
        let mut summary = Summary::default();
        for transaction in transactions {
            if transaction.amount > Decimal::ZERO {
                summary.income += transaction.amount;
            } else {
                summary.expense += transaction.amount;
            }
            summary.balance += transaction.amount;
        }
        summary
    }
}

/// Polls until the remote has seen `count` list calls.
pub async fn wait_for_list_calls(remote: &FakeRemote, count: usize) {
    for _ in 0..1_000 {
        if remote.list_calls() >= count {
            return;
        }
        tokio::task::yield_now().await;
    }
    panic!("remote never received {count} list calls");
}

impl TransactionApi for FakeRemote {
    async fn list_transactions(&self, user_id: &str) -> SyncResult<Vec<Transaction>> {
        let (result, gate) = {
            let mut data = self.data.lock().unwrap();
            data.list_calls += 1;
            let result = match data.fail_list {
                Some(status) => Err(SyncError::server(status, None)),
                None => Ok(data
                    .transactions
                    .iter()
                    .filter(|t| t.user_id == user_id)
                    .cloned()
                    .collect()),
            };
            (result, data.list_gates.pop_front())
        };

        if let Some(gate) = gate {
            let _ = gate.await;
        }
        result
    }

    async fn get_summary(&self, user_id: &str) -> SyncResult<Summary> {
        let data = self.data.lock().unwrap();
        if let Some(status) = data.fail_summary {
            return Err(SyncError::server(status, None));
        }
        Ok(Self::summary_of(
            data.transactions.iter().filter(|t| t.user_id == user_id),
        ))
    }

    async fn create_transaction(&self, payload: &NewTransaction) -> SyncResult<Transaction> {
        let mut data = self.data.lock().unwrap();
        data.create_calls += 1;
        if let Some(status) = data.fail_create {
            return Err(SyncError::server(status, None));
        }
        if let Some(message) = data.reject_create.clone() {
            return Err(ValidationError::Rejected(message).into());
        }

        data.next_id += 1;
        let transaction = Transaction {
            id: TransactionId::from(data.next_id),
            user_id: payload.user_id.clone(),
            title: payload.title.clone(),
            amount: payload.amount,
            category: payload.category.clone(),
            created_at: TransactionMother::created_at(data.next_id),
        };
        data.transactions.insert(0, transaction.clone());
        Ok(transaction)
    }

    async fn delete_transaction(&self, id: &TransactionId) -> SyncResult<()> {
        let mut data = self.data.lock().unwrap();
        data.delete_calls += 1;
        if let Some(status) = data.fail_delete {
            return Err(SyncError::server(status, None));
        }

        let before = data.transactions.len();
        data.transactions.retain(|t| &t.id != id);
        if data.transactions.len() == before {
            return Err(SyncError::not_found("transaction", id.as_str()));
        }
        Ok(())
    }
}
