//! Display formatting for amounts and dates.

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};

/// Formats a signed amount as `+$1000.00` (income) or `-$20.00` (expense).
#[must_use]
pub fn format_amount(amount: Decimal) -> String {
    let sign = if amount > Decimal::ZERO { "+" } else { "-" };
    format!("{sign}{}", format_money(amount.abs()))
}

/// Formats an amount as `$12.30` / `-$12.30`, keeping its own sign.
#[must_use]
pub fn format_money(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if rounded < Decimal::ZERO {
        format!("-${:.2}", rounded.abs())
    } else {
        format!("${rounded:.2}")
    }
}

/// Formats a creation timestamp as `Jan 5, 2025`.
#[must_use]
pub fn format_date(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%b %-d, %Y").to_string()
}
