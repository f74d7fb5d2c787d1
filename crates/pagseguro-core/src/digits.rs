//! # Amount Digits
//!
//! The gateway takes every monetary value as a plain decimal string with
//! exactly two fractional digits (`"24300.00"`). These helpers parse the
//! loosely typed strings callers hand us and render them in that form.

use rust_decimal::Decimal;
use std::str::FromStr;

/// Fractional digits the gateway expects on every amount
pub const AMOUNT_SCALE: u32 = 2;

/// Parse an amount string (`"10"`, `"10.5"`, `"-0.01"`)
pub fn parse_amount(value: &str) -> Option<Decimal> {
    let value = value.trim();
    let body = value.strip_prefix('-').unwrap_or(value);
    if body.is_empty() || body.starts_with('.') {
        return None;
    }
    if !body.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return None;
    }
    Decimal::from_str(value).ok()
}

/// Render a decimal with exactly two fractional digits.
///
/// Extra precision is rounded half-to-even.
pub fn format_decimal(value: Decimal) -> String {
    let mut rounded = value.round_dp(AMOUNT_SCALE);
    rounded.rescale(AMOUNT_SCALE);
    rounded.to_string()
}

/// Parse and re-render an amount string, `None` if it is not a number
pub fn format_amount(value: &str) -> Option<String> {
    parse_amount(value).map(format_decimal)
}

/// A non-negative decimal with at most two fractional digits
pub fn is_valid_amount(value: &str) -> bool {
    if value.starts_with('-') || value.trim() != value {
        return false;
    }
    parse_amount(value)
        .map(|amount| amount.scale() <= AMOUNT_SCALE)
        .unwrap_or(false)
}

/// Render an amount for the wire, falling back to the raw text when it
/// does not parse (the gateway then reports the field back as invalid)
pub(crate) fn render_amount(value: &str) -> String {
    format_amount(value).unwrap_or_else(|| value.to_string())
}
