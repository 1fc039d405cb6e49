//! Filter expression parser and query clause compiler.
//!
//! This crate turns the compact `filter` parameter of a JSONAPI list request
//! (for example `name==bob;age>30`) into a query fragment for a storage
//! backend: a `WHERE` clause with positional bind values for PostgreSQL, or
//! an AQL `FILTER` clause with inline literals for ArangoDB.
//!
//! The work happens in three pure stages:
//!
//! 1. [`FilterParser::parse`] tokenizes the string into [`FilterClause`]s.
//! 2. [`validate`] checks every field against the resource's allow-list.
//! 3. [`Compiler::compile`] maps fields to columns and operators to backend
//!    tokens, and renders operands per the target [`Dialect`].
//!
//! [`FilterQuery::build`] runs all three against a [`ResourceSchema`].
//!
//! # Example
//!
//! ```
//! use aphfilter::{Dialect, FilterQuery, ResourceSchema};
//!
//! let schema = ResourceSchema::new()
//!     .mapped_field("name", "full_name")
//!     .field("age");
//!
//! let compiled = FilterQuery::build("name==bob;age>30", &schema, Dialect::postgres()).unwrap();
//! assert_eq!(compiled.fragment, "WHERE full_name = $1 AND age > $2");
//! assert_eq!(compiled.binds, vec!["bob", "30"]);
//!
//! let compiled = FilterQuery::build("name=@bob", &schema, Dialect::aql()).unwrap();
//! assert_eq!(compiled.fragment, "FILTER full_name =~ '.*bob.*'");
//! ```

pub mod compiler;
pub mod date;
pub mod dialect;
pub mod filter;
pub mod schema;
pub mod validate;

pub use compiler::{CompiledFilter, Compiler};
pub use date::{DateLiteral, DatePrecision};
pub use dialect::{CompileMode, DateStyle, Dialect, PatternStyle, PlaceholderStyle, QuoteStyle};
pub use filter::{FilterClause, FilterError, FilterParser, FilterResult, Logic, Operator, OperatorKind};
pub use schema::{FieldMap, ResourceSchema};
pub use validate::validate;

/// Parses `raw` with `dialect`'s operator table.
///
/// Shorthand for [`FilterParser::parse`].
pub fn parse(raw: &str, dialect: &Dialect) -> FilterResult<Vec<FilterClause>> {
    FilterParser::parse(raw, dialect)
}

/// Parse, validate and compile in one call.
pub struct FilterQuery;

impl FilterQuery {
    /// Compiles `raw` for `dialect`, allowing only the schema's fields.
    ///
    /// Empty input compiles to an empty [`CompiledFilter`].
    ///
    /// # Errors
    ///
    /// Returns the first [`FilterError`] from parsing, validation or
    /// compilation; later stages never see input an earlier stage rejected.
    pub fn build(raw: &str, schema: &ResourceSchema, dialect: &Dialect) -> FilterResult<CompiledFilter> {
        let clauses = FilterParser::parse(raw, dialect)?;
        validate(&clauses, schema.allowed_fields())?;
        Compiler::new(dialect).compile(&clauses, &schema.column_map())
    }
}
