//! Numeric normalization utilities.

use super::categorical::is_null_token;

const CURRENCY_SYMBOLS: [char; 5] = ['$', '€', '£', '¥', '₹'];

/// Result of coercing one raw value to a number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericOutcome {
    /// Empty or a null token such as `n/a`.
    Missing,
    Value(f64),
    /// Present but not a usable finite number.
    Invalid,
}

/// Strips whitespace, currency symbols, thousands separators and a trailing `%`.
fn clean_numeric(raw: &str) -> String {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_suffix('%').unwrap_or(trimmed);
    trimmed
        .chars()
        .filter(|ch| !ch.is_whitespace() && *ch != ',' && !CURRENCY_SYMBOLS.contains(ch))
        .collect()
}

fn parse_finite(value: &str) -> Option<f64> {
    value.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// `26-35` becomes the midpoint, `55+` the lower bound.
fn parse_range(value: &str) -> Option<f64> {
    if let Some(lower) = value.strip_suffix('+') {
        return parse_finite(lower);
    }
    let (low, high) = value.split_once('-')?;
    let low = parse_finite(low)?;
    let high = parse_finite(high)?;
    (low <= high).then_some((low + high) / 2.0)
}

/// Parses a raw value permissively; `allow_ranges` enables age-style ranges.
pub fn parse_numeric(raw: &str, allow_ranges: bool) -> NumericOutcome {
    if raw.trim().is_empty() || is_null_token(raw) {
        return NumericOutcome::Missing;
    }
    let cleaned = clean_numeric(raw);
    let parsed = parse_finite(&cleaned).or_else(|| {
        if allow_ranges && !cleaned.starts_with('-') {
            parse_range(&cleaned)
        } else {
            None
        }
    });
    parsed.map_or(NumericOutcome::Invalid, NumericOutcome::Value)
}
