//! Conversion between user-entered major units and wire minor units
//!
//! Amounts travel as integer minor units (kopecks, cents). Input text is
//! parsed as a decimal so `0.29` is exactly 29, never 28.999...

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

/// Minor units in one major unit
pub const MINOR_PER_MAJOR: i64 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyError {
    #[error("amount is empty")]
    Empty,
    #[error("'{0}' is not a number")]
    Invalid(String),
    #[error("'{0}' is out of range")]
    OutOfRange(String),
}

/// Parse an amount in major units into minor units, rounding half away from zero.
///
/// Accepts `.` or `,` as the decimal separator and surrounding whitespace.
pub fn parse_major_units(input: &str) -> Result<i64, MoneyError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(MoneyError::Empty);
    }

    let normalized = trimmed.replace(',', ".");
    let major: Decimal = normalized
        .parse()
        .map_err(|_| MoneyError::Invalid(trimmed.to_string()))?;

    to_minor_units(major).ok_or_else(|| MoneyError::OutOfRange(trimmed.to_string()))
}

/// Scale a major-unit decimal to whole minor units
pub fn to_minor_units(major: Decimal) -> Option<i64> {
    major
        .checked_mul(Decimal::from(MINOR_PER_MAJOR))?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
}

/// Format minor units as major units with two decimals (`1050` -> `10.50`)
pub fn format_minor_units(minor: i64) -> String {
    let sign = if minor < 0 { "-" } else { "" };
    let abs = minor.unsigned_abs();
    let per = MINOR_PER_MAJOR as u64;
    format!("{}{}.{:02}", sign, abs / per, abs % per)
}
