//! Error types for filter parsing, validation and compilation.

use thiserror::Error;

/// A specialized Result type for filter operations.
pub type FilterResult<T> = Result<T, FilterError>;

/// Errors that can occur while turning a filter string into a query fragment.
///
/// Every variant is a caller-input error: the same input always fails the
/// same way, so none of them are worth retrying.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FilterError {
    /// The filter used an operator symbol the active dialect does not support.
    #[error("filter operator '{operator}' is not allowed")]
    UnsupportedOperator {
        /// The offending operator symbol, as written.
        operator: String,
    },

    /// The filter referenced a field that is not in the resource's allow-list.
    #[error("{}", disallowed_field_message(.field, .suggestion.as_deref()))]
    DisallowedField {
        /// The rejected field name.
        field: String,
        /// The closest allowed field name, if one is close enough.
        suggestion: Option<String>,
    },

    /// A date-qualified operator was given a value that is not a date literal.
    #[error("invalid date '{value}' (expected YYYY, YYYY-MM or YYYY-MM-DD)")]
    InvalidDateLiteral {
        /// The rejected value.
        value: String,
    },

    /// The input could not be tokenized into `field operator value` terms.
    #[error("malformed filter at position {position}: expected {expected}, found {found}")]
    MalformedSyntax {
        /// Byte offset of the offending token (0-indexed).
        position: usize,
        /// What the parser was looking for.
        expected: &'static str,
        /// What it found instead.
        found: String,
    },

    /// An allowed field has no storage column in the field map.
    #[error("filter field '{field}' has no column mapping")]
    UnmappedField {
        /// The field without a column.
        field: String,
    },
}

fn disallowed_field_message(field: &str, suggestion: Option<&str>) -> String {
    let base = format!("filter field '{}' is not allowed", field);
    match suggestion {
        Some(s) => format!("{}. Did you mean '{}'?", base, s),
        None => base,
    }
}

impl FilterError {
    /// Creates an unsupported operator error.
    pub fn unsupported_operator(operator: impl Into<String>) -> Self {
        FilterError::UnsupportedOperator {
            operator: operator.into(),
        }
    }

    /// Creates a disallowed field error.
    pub fn disallowed_field(field: impl Into<String>, suggestion: Option<String>) -> Self {
        FilterError::DisallowedField {
            field: field.into(),
            suggestion,
        }
    }

    /// Creates an invalid date literal error.
    pub fn invalid_date(value: impl Into<String>) -> Self {
        FilterError::InvalidDateLiteral {
            value: value.into(),
        }
    }

    /// Creates a malformed syntax error.
    pub fn malformed(position: usize, expected: &'static str, found: impl Into<String>) -> Self {
        FilterError::MalformedSyntax {
            position,
            expected,
            found: found.into(),
        }
    }

    /// Creates an unmapped field error.
    pub fn unmapped_field(field: impl Into<String>) -> Self {
        FilterError::UnmappedField {
            field: field.into(),
        }
    }

    /// Returns a stable, machine-readable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            FilterError::UnsupportedOperator { .. } => "UNSUPPORTED_OPERATOR",
            FilterError::DisallowedField { .. } => "DISALLOWED_FIELD",
            FilterError::InvalidDateLiteral { .. } => "INVALID_DATE_LITERAL",
            FilterError::MalformedSyntax { .. } => "MALFORMED_FILTER_SYNTAX",
            FilterError::UnmappedField { .. } => "UNMAPPED_FIELD",
        }
    }
}
