use chrono::{Local, NaiveDate};

use crate::types::{Apod, RecordError};

/// Human readable form of the canonical date pattern.
pub const DATE_FORMAT: &str = "YYYY-MM-DD";

/// chrono format string matching [`DATE_FORMAT`].
pub const DATE_FORMATTER: &str = "%Y-%m-%d";

/// Returns `true` when `value` has the shape `dddd-dd-dd`.
///
/// Only the shape is checked. Use [`parse_canonical_date`] to also reject
/// impossible calendar days such as `2024-13-40`.
pub fn is_canonical_date_shape(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

/// Parses a canonical `YYYY-MM-DD` date.
///
/// # Errors
///
/// Returns [`RecordError::DateFormat`] if `value` does not have the canonical
/// shape or names a day that does not exist.
///
/// # Example
///
/// ```
/// let date = parse_canonical_date("1995-06-16")?;
/// assert!(parse_canonical_date("2023-02-29").is_err());
/// ```
pub fn parse_canonical_date(value: &str) -> Result<NaiveDate, RecordError> {
    if !is_canonical_date_shape(value) {
        return Err(RecordError::DateFormat(value.to_string()));
    }

    NaiveDate::parse_from_str(value, DATE_FORMATTER)
        .map_err(|_| RecordError::DateFormat(value.to_string()))
}

/// Formats `date` as `YYYY-MM-DD`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMATTER).to_string()
}

/// The current date in the local time zone.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// A date handed to the fetch layer, either already formatted or structured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateArg {
    Text(String),
    Calendar(NaiveDate),
}

impl DateArg {
    /// Canonical `YYYY-MM-DD` text, validated.
    pub fn normalize(&self) -> Result<String, RecordError> {
        match self {
            DateArg::Text(value) => parse_canonical_date(value).map(|_| value.clone()),
            DateArg::Calendar(date) => Ok(format_date(*date)),
        }
    }
}

impl From<&str> for DateArg {
    fn from(value: &str) -> Self {
        DateArg::Text(value.to_string())
    }
}

impl From<String> for DateArg {
    fn from(value: String) -> Self {
        DateArg::Text(value)
    }
}

impl From<NaiveDate> for DateArg {
    fn from(value: NaiveDate) -> Self {
        DateArg::Calendar(value)
    }
}

/// Resolves a command line date argument; `today` maps to the local date.
pub fn resolve_date_arg(value: &str) -> DateArg {
    if value.eq_ignore_ascii_case("today") {
        DateArg::Calendar(today())
    } else {
        DateArg::Text(value.to_string())
    }
}

/// Sorts records oldest first by their calendar date.
pub fn sort_by_calendar(apods: &mut [Apod]) {
    apods.sort_by_key(|apod| apod.calendar_value());
}
