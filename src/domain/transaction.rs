//! Transaction and summary types exchanged with the remote transaction store.
//!
//! Direction is never a separate field: a negative amount is an expense and a
//! positive amount is income, both on the wire and in memory.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

// ============================================================================
// Transaction Identifier
// ============================================================================

/// Opaque identifier assigned by the remote store.
///
/// The store currently hands out integers, but nothing on this side relies
/// on that; numbers and strings are both accepted and kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TransactionId(String);

impl TransactionId {
    /// Returns the identifier as it appears in request paths.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TransactionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for TransactionId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<i64> for TransactionId {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

impl<'de> Deserialize<'de> for TransactionId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Int(i64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Int(n) => Self::from(n),
            RawId::Text(s) => Self(s),
        })
    }
}

// ============================================================================
// Direction
// ============================================================================

/// Whether money left or entered the account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    /// Money spent; stored as a negative amount.
    #[default]
    Expense,
    /// Money received; stored as a positive amount.
    Income,
}

impl Direction {
    /// Applies this direction's sign to `amount`, ignoring the sign it came with.
    #[must_use]
    pub fn apply(self, amount: Decimal) -> Decimal {
        match self {
            Self::Expense => -amount.abs(),
            Self::Income => amount.abs(),
        }
    }

    /// Reads the direction back from a signed amount.
    #[must_use]
    pub fn of(amount: Decimal) -> Self {
        if amount > Decimal::ZERO {
            Self::Income
        } else {
            Self::Expense
        }
    }
}

// ============================================================================
// Transaction
// ============================================================================

/// A transaction as persisted by the remote store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub user_id: String,
    pub title: String,
    /// Signed amount: negative for expenses, positive for income.
    pub amount: Decimal,
    /// Free text so categories unknown to this client still round-trip.
    pub category: String,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    #[must_use]
    pub fn direction(&self) -> Direction {
        Direction::of(self.amount)
    }

    #[must_use]
    pub fn is_income(&self) -> bool {
        self.direction() == Direction::Income
    }
}

// ============================================================================
// Summary
// ============================================================================

/// Aggregated figures for one user, computed by the remote store.
///
/// `expense` accumulates non-positive amounts and `income` non-negative ones,
/// so `balance == income + expense`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Summary {
    pub balance: Decimal,
    pub income: Decimal,
    pub expense: Decimal,
}

// ============================================================================
// Create Payload
// ============================================================================

/// Body of `POST /transactions`. The amount is already sign-normalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewTransaction {
    pub user_id: String,
    pub title: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub category: String,
}

// ============================================================================
// Timestamp Parsing
// ============================================================================

/// Parses the timestamp shapes the remote store is known to emit.
///
/// Accepts RFC 3339 (`2025-01-05T10:30:00.000Z`), naive date-times
/// (`2025-01-05T10:30:00`, `2025-01-05 10:30:00`) taken as UTC, and plain
/// dates (`2025-01-05`) taken as midnight UTC.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("unrecognized timestamp '{raw}'")))
}

// ============================================================================
// Tests
// ============================================================================
