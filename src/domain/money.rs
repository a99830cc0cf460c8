use thiserror::Error;

/// Amounts are integer cents, so 150.25 is stored as 15025.
pub type Cents = i64;

/// Symbols accepted in front of a typed amount
const CURRENCY_SYMBOLS: [char; 4] = ['₹', '$', '€', '£'];

/// Format cents with two decimals and an optional currency symbol.
/// Example: (15025, "₹") -> "₹150.25", (-5, "") -> "-0.05"
pub fn format_amount(cents: Cents, symbol: &str) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{sign}{symbol}{}.{:02}", abs / 100, abs % 100)
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseAmountError {
    #[error("amount is empty")]
    Empty,

    #[error("invalid amount '{0}', expected a number like 12.50")]
    InvalidFormat(String),

    #[error("amount cannot be negative: {0}")]
    Negative(String),

    #[error("amount '{0}' has more than two decimal places")]
    TooPrecise(String),
}

/// Parse a user-entered amount into cents.
///
/// Accepts whole units ("50"), one or two decimals ("12.5", "12.50", ".75") and
/// an optional leading currency symbol (₹, $, € or £). Negative values are
/// rejected, matching an input that only allows amounts of zero or more.
pub fn parse_amount(input: &str) -> Result<Cents, ParseAmountError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ParseAmountError::Empty);
    }
    let trimmed = input
        .strip_prefix(|c: char| CURRENCY_SYMBOLS.contains(&c))
        .unwrap_or(input);
    if trimmed.starts_with('-') {
        return Err(ParseAmountError::Negative(input.to_string()));
    }

    let invalid = || ParseAmountError::InvalidFormat(input.to_string());
    let (units, fraction) = trimmed.split_once('.').unwrap_or((trimmed, ""));

    if !units.chars().all(|c| c.is_ascii_digit()) || !fraction.chars().all(|c| c.is_ascii_digit())
    {
        return Err(invalid());
    }
    if units.is_empty() && fraction.is_empty() {
        return Err(invalid());
    }
    if fraction.len() > 2 {
        return Err(ParseAmountError::TooPrecise(input.to_string()));
    }

    let units: i64 = if units.is_empty() {
        0
    } else {
        units.parse().map_err(|_| invalid())?
    };
    let fraction: i64 = match fraction.len() {
        0 => 0,
        1 => fraction.parse::<i64>().map_err(|_| invalid())? * 10,
        _ => fraction.parse().map_err(|_| invalid())?,
    };

    units
        .checked_mul(100)
        .and_then(|c| c.checked_add(fraction))
        .ok_or_else(invalid)
}
