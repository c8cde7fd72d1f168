//! Positional `|`-separated line encoding shared by every record kind.

use chrono::NaiveDate;
use thiserror::Error;

use crate::Id;
use crate::field::{self, FieldError, format_date, parse_date};

/// Separator between fields of a persisted line.
pub const DELIMITER: char = '|';

/// A persisted line that cannot be turned back into a record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("expected {expected} fields, found {found} in line {line:?}")]
    FieldCount {
        expected: usize,
        found: usize,
        line: String,
    },
    #[error("{field} is not a valid identifier: {value:?} in line {line:?}")]
    Integer {
        field: &'static str,
        value: String,
        line: String,
    },
    #[error("{field} is not a YYYY-MM-DD date: {value:?} in line {line:?}")]
    Date {
        field: &'static str,
        value: String,
        line: String,
    },
    #[error("unknown event type {value:?} in line {line:?}")]
    EventKind { value: String, line: String },
    #[error("{source} in line {line:?}")]
    Text { source: FieldError, line: String },
}

/// The fields of one line, split positionally.
pub(crate) struct Fields<'a> {
    line: &'a str,
    parts: Vec<&'a str>,
}

impl<'a> Fields<'a> {
    /// Split `line` and require exactly `expected` fields.
    pub(crate) fn split(line: &'a str, expected: usize) -> Result<Self, DecodeError> {
        let parts: Vec<&str> = line.split(DELIMITER).collect();
        if parts.len() != expected {
            return Err(DecodeError::FieldCount {
                expected,
                found: parts.len(),
                line: line.to_string(),
            });
        }
        Ok(Self { line, parts })
    }

    /// A text field, held to the same rules as text set in memory.
    pub(crate) fn text(&self, index: usize, name: &'static str) -> Result<String, DecodeError> {
        field::text(name, self.parts[index]).map_err(|source| DecodeError::Text {
            source,
            line: self.line(),
        })
    }

    pub(crate) fn raw(&self, index: usize) -> &'a str {
        self.parts[index]
    }

    pub(crate) fn line(&self) -> String {
        self.line.to_string()
    }

    pub(crate) fn id(&self, index: usize, field: &'static str) -> Result<Id, DecodeError> {
        let value = self.parts[index];
        // `u32::from_str` tolerates a leading '+'; identifiers are digits only.
        if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(self.bad_integer(field, value));
        }
        value.parse().map_err(|_| self.bad_integer(field, value))
    }

    pub(crate) fn date(&self, index: usize, field: &'static str) -> Result<NaiveDate, DecodeError> {
        let value = self.parts[index];
        parse_date(value)
            .filter(|d| crate::field::date(field, *d).is_ok())
            .ok_or_else(|| DecodeError::Date {
                field,
                value: value.to_string(),
                line: self.line(),
            })
    }

    fn bad_integer(&self, field: &'static str, value: &str) -> DecodeError {
        DecodeError::Integer {
            field,
            value: value.to_string(),
            line: self.line(),
        }
    }
}

/// Builder for an encoded line.
#[derive(Default)]
pub(crate) struct Line {
    out: String,
}

impl Line {
    pub(crate) fn push(mut self, value: impl std::fmt::Display) -> Self {
        if !self.out.is_empty() {
            self.out.push(DELIMITER);
        }
        self.out.push_str(&value.to_string());
        self
    }

    pub(crate) fn push_date(self, date: NaiveDate) -> Self {
        self.push(format_date(date))
    }

    pub(crate) fn finish(self) -> String {
        self.out
    }
}
