//! Date literals accepted by the `$`-prefixed operators.

use chrono::NaiveDate;

use crate::filter::{FilterError, FilterResult};

/// How much of a date a literal specifies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatePrecision {
    /// `YYYY`
    Year,
    /// `YYYY-MM`
    Month,
    /// `YYYY-MM-DD`
    Day,
}

/// A validated `YYYY`, `YYYY-MM` or `YYYY-MM-DD` literal.
///
/// The literal keeps its source text (AQL's `DATE_ISO8601` accepts the
/// partial forms as written) along with the first calendar day it denotes,
/// for backends that need a full date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateLiteral {
    text: String,
    date: NaiveDate,
    precision: DatePrecision,
}

impl DateLiteral {
    /// Validates `value` as a date literal.
    ///
    /// The year must be four digits, the month `01`-`12`, and the day must
    /// exist in that month (`2021-02-29` is rejected).
    ///
    /// # Errors
    ///
    /// Returns `FilterError::InvalidDateLiteral` for any other shape.
    ///
    /// # Example
    ///
    /// ```
    /// use aphfilter::{DateLiteral, DatePrecision};
    ///
    /// let date = DateLiteral::parse("2020-01").unwrap();
    /// assert_eq!(date.precision(), DatePrecision::Month);
    /// assert_eq!(date.iso_date(), "2020-01-01");
    /// assert!(DateLiteral::parse("2020-13").is_err());
    /// ```
    pub fn parse(value: &str) -> FilterResult<Self> {
        let invalid = || FilterError::invalid_date(value);

        let parts: Vec<&str> = value.split('-').collect();
        if parts.len() > 3 {
            return Err(invalid());
        }

        let year = digits(parts[0], 4).ok_or_else(invalid)? as i32;
        let month = match parts.get(1) {
            Some(part) => Some(digits(part, 2).ok_or_else(invalid)?),
            None => None,
        };
        let day = match parts.get(2) {
            Some(part) => Some(digits(part, 2).ok_or_else(invalid)?),
            None => None,
        };

        let date = NaiveDate::from_ymd_opt(year, month.unwrap_or(1), day.unwrap_or(1))
            .ok_or_else(invalid)?;
        let precision = match (month, day) {
            (None, _) => DatePrecision::Year,
            (Some(_), None) => DatePrecision::Month,
            (Some(_), Some(_)) => DatePrecision::Day,
        };

        Ok(Self {
            text: value.to_string(),
            date,
            precision,
        })
    }

    /// The literal as written.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The first day the literal denotes.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn precision(&self) -> DatePrecision {
        self.precision
    }

    /// The first day the literal denotes, formatted as `YYYY-MM-DD`.
    pub fn iso_date(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

/// Parses exactly `len` ASCII digits.
fn digits(part: &str, len: usize) -> Option<u32> {
    if part.len() != len || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}
