//! Validation and normalization of user-entered transactions.
//!
//! Rules are checked in a fixed order (title, amount, category) and the first
//! violation is returned, so a form always reports the topmost bad field.

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::domain::{Category, Direction, NewTransaction, ValidationError};

// ============================================================================
// Transaction Entry
// ============================================================================

/// Raw input from an "add transaction" form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionEntry {
    pub title: String,
    /// Amount as typed; the sign is ignored and replaced by `direction`.
    pub amount: String,
    /// A picker identifier (`food`) or free-text category name.
    pub category: String,
    pub direction: Direction,
}

impl TransactionEntry {
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        amount: impl Into<String>,
        category: impl Into<String>,
        direction: Direction,
    ) -> Self {
        Self {
            title: title.into(),
            amount: amount.into(),
            category: category.into(),
            direction,
        }
    }

    /// Validates the entry and produces the payload for `user_id`.
    ///
    /// # Errors
    ///
    /// Returns the first violated rule in title, amount, category order.
    pub fn build(&self, user_id: &str) -> Result<NewTransaction, ValidationError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ValidationError::TitleRequired);
        }

        let amount = parse_amount(&self.amount)?;
        let category = resolve_category(&self.category)?;

        Ok(NewTransaction {
            user_id: user_id.to_string(),
            title: title.to_string(),
            amount: self.direction.apply(amount),
            category,
        })
    }
}

// ============================================================================
// Field Rules
// ============================================================================

/// Parses a typed amount that must be strictly positive before the
/// direction's sign is applied.
///
/// # Errors
///
/// Returns `InvalidAmount` for text that is not a decimal number, or for a
/// value that is zero or negative.
pub fn parse_amount(raw: &str) -> Result<Decimal, ValidationError> {
    let raw = raw.trim();
    let amount = Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .map_err(|_| ValidationError::InvalidAmount)?;

    if amount <= Decimal::ZERO {
        return Err(ValidationError::InvalidAmount);
    }
    Ok(amount.normalize())
}

/// Maps a picker identifier to its display name; any other non-empty text is
/// kept as a free-text category.
///
/// # Errors
///
/// Returns `CategoryRequired` for empty or whitespace-only input.
pub fn resolve_category(raw: &str) -> Result<String, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::CategoryRequired);
    }

    Ok(Category::from_id(raw)
        .map(|c| c.name().to_string())
        .unwrap_or_else(|| raw.to_string()))
}

// ============================================================================
// Tests
// ============================================================================
