//! Field validators
//!
//! Pure functions checking the shape of every customer field. Each validator
//! fails fast on the first violated rule and never aggregates several
//! violations into one error.
//!
//! The national ID validator recomputes a modulo-11 check character:
//! digits of the numeric body are weighted 2, 3, 4, 5, 6, 7, 2, 3, ... starting
//! from the least-significant digit, and `11 - (sum % 11)` maps to the check
//! character (11 becomes `0`, 10 becomes `K`).

use crate::types::RegistryError;
use chrono::NaiveDate;
use regex::Regex;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::LazyLock;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid email regex")
});

static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?56[9]?\d{8}$|^0?9\d{8}$").expect("valid phone regex"));

static NATIONAL_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{7,8}-[\dK]$").expect("valid national id regex"));

/// Date format used for membership dates in files and on screen
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Cyclic weights applied from the least-significant digit
const CHECKSUM_WEIGHTS: [u64; 6] = [2, 3, 4, 5, 6, 7];

/// Fail with DataInvalid when `value` is empty or only whitespace
pub fn validate_non_empty_text(value: &str, field: &str) -> Result<(), RegistryError> {
    if value.trim().is_empty() {
        return Err(RegistryError::data_invalid(field, "must not be empty"));
    }
    Ok(())
}

/// Parse `value` as a number and require it to be positive
///
/// With `allow_zero` the lower bound becomes inclusive (`>= 0`), otherwise
/// the value must be strictly greater than zero.
///
/// # Returns
///
/// The parsed number on success.
pub fn validate_positive_number(
    value: &str,
    field: &str,
    allow_zero: bool,
) -> Result<Decimal, RegistryError> {
    let number = parse_number(value)
        .ok_or_else(|| RegistryError::data_invalid(field, positivity_rule(allow_zero)))?;
    check_positive(number, field, allow_zero)?;

    Ok(number)
}

/// Parse `value` as a number and require it to lie in `[min, max]`
pub fn validate_number_in_range(
    value: &str,
    field: &str,
    min: Decimal,
    max: Decimal,
) -> Result<Decimal, RegistryError> {
    let number = parse_number(value).ok_or_else(|| range_error(field, min, max))?;
    check_in_range(number, field, min, max)
}

/// Range check for an already-parsed number
pub fn check_in_range(
    number: Decimal,
    field: &str,
    min: Decimal,
    max: Decimal,
) -> Result<Decimal, RegistryError> {
    if number < min || number > max {
        return Err(range_error(field, min, max));
    }
    Ok(number)
}

/// Positivity check for an already-parsed number
pub fn check_positive(number: Decimal, field: &str, allow_zero: bool) -> Result<(), RegistryError> {
    let rejected = if allow_zero {
        number < Decimal::ZERO
    } else {
        number <= Decimal::ZERO
    };

    if rejected {
        return Err(RegistryError::data_invalid(field, positivity_rule(allow_zero)));
    }
    Ok(())
}

/// Fail with InvalidEmail unless `value` looks like `local@domain.tld`
///
/// The match is case-sensitive over ASCII letters; callers lowercase the
/// address after it passes.
pub fn validate_email(value: &str) -> Result<(), RegistryError> {
    if !EMAIL_PATTERN.is_match(value) {
        return Err(RegistryError::invalid_email(value));
    }
    Ok(())
}

/// Fail with InvalidPhone unless `value` is a national mobile number
///
/// Spaces and hyphens are ignored. Accepted shapes are the international
/// `+56912345678` form and the local `0912345678` form.
pub fn validate_phone(value: &str) -> Result<(), RegistryError> {
    let cleaned: String = value.chars().filter(|c| *c != ' ' && *c != '-').collect();

    if !PHONE_PATTERN.is_match(&cleaned) {
        return Err(RegistryError::invalid_phone(value));
    }
    Ok(())
}

/// Fail with InvalidId unless `value` is a well-formed, checksum-valid national ID
pub fn validate_national_id(value: &str) -> Result<(), RegistryError> {
    let cleaned = normalize_national_id(value);

    if !NATIONAL_ID_PATTERN.is_match(&cleaned) {
        return Err(RegistryError::invalid_id(value, "expected format 12.345.678-9"));
    }

    let Some((body, supplied)) = cleaned.split_once('-') else {
        return Err(RegistryError::invalid_id(value, "missing check character"));
    };
    let expected = check_character(body);

    if supplied.chars().ne(std::iter::once(expected)) {
        return Err(RegistryError::invalid_id(
            value,
            format!("wrong check character, expected {expected}, got {supplied}"),
        ));
    }

    Ok(())
}

/// Strip dots and spaces and uppercase the check character
pub fn normalize_national_id(value: &str) -> String {
    value
        .chars()
        .filter(|c| *c != '.' && *c != ' ')
        .collect::<String>()
        .to_uppercase()
}

/// Compute the modulo-11 check character for a numeric body
///
/// Non-digit characters are ignored. The weight cycle restarts at 2 after
/// reaching 7.
pub fn check_character(body: &str) -> char {
    let sum: u64 = body
        .bytes()
        .rev()
        .filter(u8::is_ascii_digit)
        .map(|digit| u64::from(digit - b'0'))
        .zip(CHECKSUM_WEIGHTS.iter().cycle())
        .map(|(digit, weight)| digit * weight)
        .sum();

    match 11 - (sum % 11) {
        11 => '0',
        10 => 'K',
        // 1..=9
        digit => char::from(b'0' + digit as u8),
    }
}

/// Render a normalized national ID as `12.345.678-9`
///
/// Dots are inserted every three digits from the right regardless of how many
/// digits the body has. Inputs shorter than two characters come back unchanged.
pub fn format_national_id(normalized: &str) -> String {
    let compact: Vec<char> = normalized
        .chars()
        .filter(|c| *c != '-' && *c != '.')
        .collect();

    if compact.len() < 2 {
        return normalized.to_string();
    }

    let (body, check) = compact.split_at(compact.len() - 1);
    let mut grouped = String::with_capacity(body.len() + body.len() / 3 + 2);

    for (index, digit) in body.iter().enumerate() {
        let remaining = body.len() - index;
        if index > 0 && remaining % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(*digit);
    }

    grouped.push('-');
    grouped.push(check[0]);
    grouped
}

/// Parse a non-negative whole number of loyalty points
///
/// # Errors
///
/// `DataInvalid` when the text is not a number, is negative or has a
/// fractional part.
pub fn parse_loyalty_points(value: &str, field: &str) -> Result<u64, RegistryError> {
    let number = validate_positive_number(value, field, true)?;

    if !number.fract().is_zero() {
        return Err(RegistryError::data_invalid(field, "must be a whole number"));
    }

    number
        .to_u64()
        .ok_or_else(|| RegistryError::data_invalid(field, "is too large"))
}

/// Parse a `YYYY-MM-DD` calendar date
pub fn parse_date(value: &str, field: &str) -> Result<NaiveDate, RegistryError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|_| RegistryError::data_invalid(field, "expected a date as YYYY-MM-DD"))
}

fn parse_number(value: &str) -> Option<Decimal> {
    Decimal::from_str(value.trim()).ok()
}

fn positivity_rule(allow_zero: bool) -> &'static str {
    if allow_zero {
        "must be a number >= 0"
    } else {
        "must be a number > 0"
    }
}

fn range_error(field: &str, min: Decimal, max: Decimal) -> RegistryError {
    RegistryError::data_invalid(field, format!("must be between {min} and {max}"))
}
