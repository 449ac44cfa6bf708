//! Fixed-point parsing of `time` attributes
//!
//! Durations arrive as decimal seconds ("0.1", "1.234", "12"). They are
//! scaled to whole milliseconds on the digits themselves so no binary
//! floating-point rounding can creep in; digits past the third fractional
//! place are truncated.

use thiserror::Error;

const MILLIS_PER_SECOND: u64 = 1000;
const MILLI_DIGITS: usize = 3;

/// Why a duration string was rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DurationError {
    #[error("duration is empty")]
    Empty,
    #[error("duration '{0}' is negative")]
    Negative(String),
    #[error("duration '{0}' is not a decimal number")]
    Invalid(String),
    #[error("duration '{0}' is too large")]
    Overflow(String),
}

/// Converts a decimal seconds string into whole milliseconds
pub fn parse_duration_millis(value: &str) -> Result<u64, DurationError> {
    if value.is_empty() {
        return Err(DurationError::Empty);
    }
    if value.starts_with('-') {
        return Err(DurationError::Negative(value.to_string()));
    }

    let (whole, fraction) = value.split_once('.').unwrap_or((value, ""));
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if (whole.is_empty() && fraction.is_empty()) || !all_digits(whole) || !all_digits(fraction) {
        return Err(DurationError::Invalid(value.to_string()));
    }

    let overflow = || DurationError::Overflow(value.to_string());

    let mut seconds: u64 = 0;
    for digit in whole.bytes() {
        seconds = seconds
            .checked_mul(10)
            .and_then(|s| s.checked_add(u64::from(digit - b'0')))
            .ok_or_else(overflow)?;
    }

    // Right-pad the fraction to exactly three digits, dropping the rest.
    let mut millis: u64 = 0;
    let mut fraction_digits = fraction.bytes();
    for _ in 0..MILLI_DIGITS {
        let digit = fraction_digits.next().map_or(0, |d| u64::from(d - b'0'));
        millis = millis * 10 + digit;
    }

    seconds
        .checked_mul(MILLIS_PER_SECOND)
        .and_then(|ms| ms.checked_add(millis))
        .ok_or_else(overflow)
}
