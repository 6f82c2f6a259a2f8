use crate::error::KasseError;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse a price cell from a receipt table.
///
/// Handles formats like:
/// - "1,50 EUR" -> 1.50
/// - "1,50" -> 1.50
/// - "1.234,56 EUR" -> 1234.56 (thousands dot dropped when a decimal comma is present)
/// - "0,99 €" -> 0.99
///
/// Negative prices are rejected.
pub fn parse_price(s: &str, currency_marker: &str) -> Result<Decimal, KasseError> {
    let mut cleaned = s.trim().to_string();
    if !currency_marker.is_empty() {
        cleaned = cleaned.replace(currency_marker, "");
    }
    let cleaned = cleaned.replace('€', "");
    let cleaned = cleaned.trim();

    let normalized = if cleaned.contains(',') {
        cleaned.replace('.', "").replace(',', ".")
    } else {
        cleaned.to_string()
    };

    let value = Decimal::from_str(&normalized)
        .map_err(|e| KasseError::ParseError(format!("invalid price '{}': {}", s.trim(), e)))?;
    if value.is_sign_negative() && !value.is_zero() {
        return Err(KasseError::ParseError(format!(
            "negative price '{}'",
            s.trim()
        )));
    }
    Ok(value)
}

/// Parse a quantity cell as a non-negative integer.
pub fn parse_quantity(s: &str) -> Result<u32, KasseError> {
    let s = s.trim();
    s.parse::<u32>()
        .map_err(|e| KasseError::ParseError(format!("invalid quantity '{}': {}", s, e)))
}
