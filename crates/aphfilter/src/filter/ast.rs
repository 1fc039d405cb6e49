//! Parsed filter clauses.

use std::fmt;

use serde::Serialize;

use super::operator::Operator;

/// Boolean combinator joining a clause to the next one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Logic {
    /// Written as `,`.
    Or,
    /// Written as `;`.
    And,
}

impl Logic {
    /// Maps a combinator character to its logic, if it is one.
    pub fn from_char(c: char) -> Option<Logic> {
        match c {
            ',' => Some(Logic::Or),
            ';' => Some(Logic::And),
            _ => None,
        }
    }

    /// Returns the combinator character as written in a filter string.
    pub fn symbol(self) -> char {
        match self {
            Logic::Or => ',',
            Logic::And => ';',
        }
    }

    /// Returns the boolean keyword emitted between compiled clauses.
    pub fn keyword(self) -> &'static str {
        match self {
            Logic::Or => "OR",
            Logic::And => "AND",
        }
    }
}

/// One `field operator value [combinator]` term of a filter expression.
///
/// `field` is the logical attribute name, not yet resolved to a column, and
/// `value` is the raw operand exactly as written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterClause {
    /// Logical attribute the clause applies to.
    pub field: String,
    /// Operator symbol.
    pub operator: Operator,
    /// Raw operand.
    pub value: String,
    /// Combinator to the next clause.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logic: Option<Logic>,
}

impl FilterClause {
    /// Creates a clause without a trailing combinator.
    pub fn new(field: impl Into<String>, operator: Operator, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            operator,
            value: value.into(),
            logic: None,
        }
    }

    /// Sets the combinator joining this clause to the next.
    pub fn with_logic(mut self, logic: Logic) -> Self {
        self.logic = Some(logic);
        self
    }
}

impl fmt::Display for FilterClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.field, self.operator, self.value)?;
        if let Some(logic) = self.logic {
            write!(f, "{}", logic.symbol())?;
        }
        Ok(())
    }
}
