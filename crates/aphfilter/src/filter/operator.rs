//! The canonical filter operator set.

use std::fmt;

use serde::{Serialize, Serializer};

/// How an operator treats its operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorKind {
    /// Plain comparison; the operand may be numeric and is left unquoted inline.
    Comparison,
    /// Strict string comparison; the operand is always quoted inline.
    StringComparison,
    /// Pattern match; the operand is wrapped into a pattern and quoted.
    Pattern,
    /// Date comparison; the operand must be a date literal.
    Date,
}

/// A filter operator symbol.
///
/// Which of these a backend understands, and what it translates them to,
/// is decided by a [`Dialect`](crate::Dialect).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Operator {
    /// `==`
    Equal,
    /// `===`
    StrictEqual,
    /// `!=`
    NotEqual,
    /// `!==`
    StrictNotEqual,
    /// `>`
    Greater,
    /// `<`
    Less,
    /// `>=`
    GreaterOrEqual,
    /// `<=`
    LessOrEqual,
    /// `~`
    Match,
    /// `!~`
    NotMatch,
    /// `=@`
    Contains,
    /// `!@`
    NotContains,
    /// `$==`
    DateEqual,
    /// `$>`
    DateGreater,
    /// `$<`
    DateLess,
    /// `$>=`
    DateGreaterOrEqual,
    /// `$<=`
    DateLessOrEqual,
}

impl Operator {
    /// Every operator, in table order.
    pub const ALL: [Operator; 17] = [
        Operator::Equal,
        Operator::StrictEqual,
        Operator::NotEqual,
        Operator::StrictNotEqual,
        Operator::Greater,
        Operator::Less,
        Operator::GreaterOrEqual,
        Operator::LessOrEqual,
        Operator::Match,
        Operator::NotMatch,
        Operator::Contains,
        Operator::NotContains,
        Operator::DateEqual,
        Operator::DateGreater,
        Operator::DateLess,
        Operator::DateGreaterOrEqual,
        Operator::DateLessOrEqual,
    ];

    /// Returns the symbol as written in a filter string.
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Equal => "==",
            Operator::StrictEqual => "===",
            Operator::NotEqual => "!=",
            Operator::StrictNotEqual => "!==",
            Operator::Greater => ">",
            Operator::Less => "<",
            Operator::GreaterOrEqual => ">=",
            Operator::LessOrEqual => "<=",
            Operator::Match => "~",
            Operator::NotMatch => "!~",
            Operator::Contains => "=@",
            Operator::NotContains => "!@",
            Operator::DateEqual => "$==",
            Operator::DateGreater => "$>",
            Operator::DateLess => "$<",
            Operator::DateGreaterOrEqual => "$>=",
            Operator::DateLessOrEqual => "$<=",
        }
    }

    /// Looks up an operator by its exact symbol.
    pub fn from_symbol(symbol: &str) -> Option<Operator> {
        Operator::ALL.into_iter().find(|op| op.symbol() == symbol)
    }

    /// Returns how this operator treats its operand.
    pub fn kind(self) -> OperatorKind {
        match self {
            Operator::StrictEqual | Operator::StrictNotEqual => OperatorKind::StringComparison,
            Operator::Match | Operator::NotMatch | Operator::Contains | Operator::NotContains => {
                OperatorKind::Pattern
            }
            Operator::DateEqual
            | Operator::DateGreater
            | Operator::DateLess
            | Operator::DateGreaterOrEqual
            | Operator::DateLessOrEqual => OperatorKind::Date,
            _ => OperatorKind::Comparison,
        }
    }

    /// Returns true for the `$`-prefixed date operators.
    pub fn is_date(self) -> bool {
        self.kind() == OperatorKind::Date
    }

    /// Returns true for the pattern-match operators.
    pub fn is_pattern(self) -> bool {
        self.kind() == OperatorKind::Pattern
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl Serialize for Operator {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.symbol())
    }
}
