//! Filter expression parser.
//!
//! A filter expression is a run of `field operator value` terms joined by
//! combinators, as sent in the `filter` parameter of a JSONAPI list request.
//!
//! # Supported Syntax
//!
//! ## Comparison
//! - `==`, `!=` - equality
//! - `===`, `!==` - strict (string) equality
//! - `>`, `<`, `>=`, `<=` - ordering
//!
//! ## Pattern Match
//! - `~`, `!~` - match / no match
//! - `=@`, `!@` - contains / does not contain
//!
//! ## Dates
//! - `$==`, `$>`, `$<`, `$>=`, `$<=` - the value is a date literal
//!   (`YYYY`, `YYYY-MM` or `YYYY-MM-DD`)
//!
//! ## Combinators
//! - `,` - OR
//! - `;` - AND
//!
//! Combinators apply strictly left to right; there is no grouping.
//!
//! # Example
//!
//! ```
//! use aphfilter::filter::{FilterParser, Logic, Operator};
//! use aphfilter::Dialect;
//!
//! let clauses = FilterParser::parse("status=@active,created$>=2020-01", Dialect::aql()).unwrap();
//! assert_eq!(clauses[0].field, "status");
//! assert_eq!(clauses[0].operator, Operator::Contains);
//! assert_eq!(clauses[0].logic, Some(Logic::Or));
//! assert_eq!(clauses[1].operator, Operator::DateGreaterOrEqual);
//! ```

mod ast;
mod error;
mod lexer;
mod operator;
mod parser;

pub use ast::{FilterClause, Logic};
pub use error::{FilterError, FilterResult};
pub use operator::{Operator, OperatorKind};
pub use parser::FilterParser;

pub(crate) use lexer::is_word_char;
