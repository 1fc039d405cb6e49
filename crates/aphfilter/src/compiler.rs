//! Compilation of parsed filter clauses into backend query fragments.

use serde::Serialize;

use crate::date::DateLiteral;
use crate::dialect::{CompileMode, DateStyle, Dialect};
use crate::filter::{is_word_char, FilterClause, FilterError, FilterResult, Logic, OperatorKind};
use crate::schema::FieldMap;

/// A compiled filter: the fragment to append to a query, and the values
/// bound to its placeholders (empty in inline mode).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CompiledFilter {
    /// `WHERE ...` / `FILTER ...`, or empty when there were no clauses.
    pub fragment: String,
    /// Bind values, in placeholder order.
    pub binds: Vec<String>,
}

impl CompiledFilter {
    /// Returns true if no clauses were compiled.
    pub fn is_empty(&self) -> bool {
        self.fragment.is_empty()
    }
}

/// Compiles clauses for one dialect.
///
/// The compiler keeps clause order exactly. Each clause's own combinator
/// joins it to the next clause (`AND` when absent); the target language's
/// left-to-right evaluation decides precedence.
///
/// # Example
///
/// ```
/// use aphfilter::{Compiler, Dialect, FieldMap, FilterParser};
///
/// let dialect = Dialect::postgres();
/// let clauses = FilterParser::parse("name==bob;age>30", dialect).unwrap();
/// let columns: FieldMap = [("name", "full_name"), ("age", "age")].into_iter().collect();
///
/// let compiled = Compiler::new(dialect).compile(&clauses, &columns).unwrap();
/// assert_eq!(compiled.fragment, "WHERE full_name = $1 AND age > $2");
/// assert_eq!(compiled.binds, vec!["bob", "30"]);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Compiler<'d> {
    dialect: &'d Dialect,
    mode: CompileMode,
}

impl<'d> Compiler<'d> {
    /// Creates a compiler using the dialect's default mode.
    pub fn new(dialect: &'d Dialect) -> Self {
        Self {
            dialect,
            mode: dialect.mode(),
        }
    }

    /// Overrides the compile mode.
    pub fn with_mode(mut self, mode: CompileMode) -> Self {
        self.mode = mode;
        self
    }

    /// The target dialect.
    pub fn dialect(&self) -> &'d Dialect {
        self.dialect
    }

    /// The compile mode in effect.
    pub fn mode(&self) -> CompileMode {
        self.mode
    }

    /// Compiles `clauses` into a fragment.
    ///
    /// Clauses must already have passed [`validate`](crate::validate).
    ///
    /// # Errors
    ///
    /// Returns `FilterError::UnmappedField` if a field has no column in
    /// `columns`, `FilterError::UnsupportedOperator` if the dialect has no
    /// token for an operator, and `FilterError::InvalidDateLiteral` if a date
    /// operator's value is not a date.
    pub fn compile(&self, clauses: &[FilterClause], columns: &FieldMap) -> FilterResult<CompiledFilter> {
        if clauses.is_empty() {
            return Ok(CompiledFilter::default());
        }

        let mut body = String::new();
        let mut binds = Vec::new();

        for (i, clause) in clauses.iter().enumerate() {
            let column = columns
                .column(&clause.field)
                .ok_or_else(|| FilterError::unmapped_field(&clause.field))?;
            let token = self
                .dialect
                .token(clause.operator)
                .ok_or_else(|| FilterError::unsupported_operator(clause.operator.symbol()))?;
            let operand = self.operand(clause, &mut binds)?;

            body.push_str(&format!("{} {} {}", column, token, operand));

            if i + 1 < clauses.len() {
                // Hand-built clause lists may leave a gap; parsed ones never do.
                let logic = clause.logic.unwrap_or(Logic::And);
                body.push_str(&format!(" {} ", logic.keyword()));
            }
        }

        tracing::debug!(
            dialect = self.dialect.name(),
            clauses = clauses.len(),
            binds = binds.len(),
            "compiled filter"
        );

        Ok(CompiledFilter {
            fragment: format!("{} {}", self.dialect.keyword(), body),
            binds,
        })
    }

    /// Renders the right-hand side of a clause.
    fn operand(&self, clause: &FilterClause, binds: &mut Vec<String>) -> FilterResult<String> {
        let rendered = match clause.operator.kind() {
            OperatorKind::Comparison => self.literal(clause.value.clone(), false, binds),
            OperatorKind::StringComparison => self.literal(clause.value.clone(), true, binds),
            OperatorKind::Pattern => {
                let pattern = self.dialect.pattern_style().wrap(&clause.value);
                self.literal(pattern, true, binds)
            }
            OperatorKind::Date => {
                let date = DateLiteral::parse(&clause.value)?;
                self.date(&date, binds)
            }
        };
        Ok(rendered)
    }

    /// Inlines `value` (quoted if `quoted`) or binds it to the next placeholder.
    ///
    /// An unquoted operand that is not a bare word is quoted anyway, so a
    /// hand-built value can never extend the fragment.
    fn literal(&self, value: String, quoted: bool, binds: &mut Vec<String>) -> String {
        match self.mode {
            CompileMode::Inline if quoted || !is_bare_word(&value) => {
                self.dialect.quote_style().quote(&value)
            }
            CompileMode::Inline => value,
            CompileMode::Placeholder => self.bind(value, binds),
        }
    }

    fn date(&self, date: &DateLiteral, binds: &mut Vec<String>) -> String {
        match self.dialect.date_style() {
            DateStyle::Function(function) => {
                let arg = self.literal(date.as_str().to_string(), true, binds);
                format!("{}({})", function, arg)
            }
            DateStyle::Cast(ty) => {
                let arg = self.literal(date.iso_date(), true, binds);
                format!("{}::{}", arg, ty)
            }
        }
    }

    fn bind(&self, value: String, binds: &mut Vec<String>) -> String {
        binds.push(value);
        self.dialect.placeholder_style().placeholder(binds.len())
    }
}

/// True for a non-empty run of the characters a parsed value may contain.
fn is_bare_word(value: &str) -> bool {
    !value.is_empty() && value.chars().all(is_word_char)
}

#[cfg(test)]
#[path = "compiler_tests.rs"]
mod tests;
