//! Input validation for create and update requests.
//!
//! Every check names the offending field in the returned error.

use rust_decimal::Decimal;

use repairdesk_query::{QueryError, QueryResult};

/// Earliest model year accepted.
pub const MIN_YEAR: i32 = 1950;
/// Latest model year accepted.
pub const MAX_YEAR: i32 = 2100;

const PHONE_LEN: std::ops::RangeInclusive<usize> = 6..=20;

/// Require non-blank text.
pub fn required(field: &str, value: &str) -> QueryResult<()> {
    if value.trim().is_empty() {
        return Err(QueryError::required_field(field));
    }
    Ok(())
}

/// Phone numbers: digits, spaces and `+ - ( )`, 6 to 20 characters.
pub fn phone(field: &str, value: &str) -> QueryResult<()> {
    required(field, value)?;
    let value = value.trim();
    if !PHONE_LEN.contains(&value.chars().count()) {
        return Err(QueryError::invalid_input(
            field,
            format!("must be {} to {} characters", PHONE_LEN.start(), PHONE_LEN.end()),
        ));
    }
    if !value
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '+' | '-' | '(' | ')'))
    {
        return Err(QueryError::invalid_input(field, "contains invalid characters"));
    }
    Ok(())
}

/// Email addresses: exactly one `@` with text on both sides.
pub fn email(field: &str, value: &str) -> QueryResult<()> {
    let value = value.trim();
    let mut parts = value.split('@');
    let valid = match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => {
            !local.is_empty() && !domain.is_empty() && !value.contains(char::is_whitespace)
        }
        _ => false,
    };
    if !valid {
        return Err(QueryError::invalid_input(field, "is not a valid email address"));
    }
    Ok(())
}

/// Model years between [`MIN_YEAR`] and [`MAX_YEAR`].
pub fn year(field: &str, value: i32) -> QueryResult<()> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&value) {
        return Err(QueryError::invalid_input(
            field,
            format!("must be between {} and {}", MIN_YEAR, MAX_YEAR),
        ));
    }
    Ok(())
}

/// Counts that cannot go below zero.
pub fn non_negative(field: &str, value: i64) -> QueryResult<()> {
    if value < 0 {
        return Err(QueryError::invalid_input(field, "must not be negative"));
    }
    Ok(())
}

/// Money amounts that cannot go below zero.
pub fn non_negative_amount(field: &str, value: Decimal) -> QueryResult<()> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(QueryError::invalid_input(field, "must not be negative"));
    }
    Ok(())
}
