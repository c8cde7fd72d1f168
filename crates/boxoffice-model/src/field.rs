//! Rules for field values that must survive the line encoding.

use chrono::{Datelike, NaiveDate};
use thiserror::Error;

use crate::codec::DELIMITER;

/// Calendar format used for every persisted date.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A value that cannot be stored without corrupting its line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("{field} may not contain '|'")]
    Delimiter { field: &'static str },
    #[error("{field} may not contain line breaks")]
    LineBreak { field: &'static str },
    #[error("{field} year {year} is outside 1-9999")]
    YearOutOfRange { field: &'static str, year: i32 },
}

/// Accept `value` as the text of `field`, or say why it cannot be stored.
///
/// # Errors
///
/// Returns [`FieldError::Delimiter`] or [`FieldError::LineBreak`] when the value
/// contains a character the line encoding reserves.
pub fn text(field: &'static str, value: impl Into<String>) -> Result<String, FieldError> {
    let value = value.into();
    if value.contains(DELIMITER) {
        return Err(FieldError::Delimiter { field });
    }
    if value.contains(['\n', '\r']) {
        return Err(FieldError::LineBreak { field });
    }
    Ok(value)
}

/// Accept `date` for `field` if it encodes as a four-digit year.
///
/// # Errors
///
/// Returns [`FieldError::YearOutOfRange`] for years before 1 or after 9999.
pub fn date(field: &'static str, date: NaiveDate) -> Result<NaiveDate, FieldError> {
    let year = date.year();
    if (1..=9999).contains(&year) {
        Ok(date)
    } else {
        Err(FieldError::YearOutOfRange { field, year })
    }
}

/// Strictly parse a `YYYY-MM-DD` date.
///
/// Unpadded components, signs and impossible calendar dates are rejected
/// rather than normalized.
#[must_use]
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let bytes = raw.as_bytes();
    let shaped = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !shaped {
        return None;
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT).ok()
}

/// Render a date the way it is persisted.
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}
