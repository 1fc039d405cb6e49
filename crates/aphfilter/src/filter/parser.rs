//! Parser turning a token stream into an ordered list of filter clauses.

use super::ast::FilterClause;
use super::error::{FilterError, FilterResult};
use super::lexer::{FilterToken, Lexer, PositionedToken};
use super::operator::Operator;
use crate::dialect::Dialect;

/// Parser for compact filter expressions.
///
/// # Grammar
///
/// ```text
/// filter     ::= ( term combinator? )*
/// term       ::= field operator value
/// field      ::= [A-Za-z0-9_]+
/// operator   ::= one of the dialect's symbols
/// value      ::= [A-Za-z0-9_-]+
/// combinator ::= "," | ";"
/// ```
///
/// Terms are concatenated directly; there is no grouping and no precedence.
/// A combinator after the last term is kept on the clause and otherwise
/// ignored.
///
/// # Example
///
/// ```
/// use aphfilter::{Dialect, FilterParser, Logic, Operator};
///
/// let clauses = FilterParser::parse("name==bob;age>30", Dialect::postgres()).unwrap();
/// assert_eq!(clauses.len(), 2);
/// assert_eq!(clauses[0].operator, Operator::Equal);
/// assert_eq!(clauses[0].logic, Some(Logic::And));
/// assert_eq!(clauses[1].logic, None);
/// ```
pub struct FilterParser<'d> {
    tokens: Vec<PositionedToken>,
    position: usize,
    /// Byte length of the input, reported when the input ends early.
    end: usize,
    dialect: &'d Dialect,
}

impl<'d> FilterParser<'d> {
    /// Parses a filter string into clauses, in source order.
    ///
    /// Empty or whitespace-only input yields no clauses and no error.
    ///
    /// # Errors
    ///
    /// Returns `FilterError::UnsupportedOperator` if a term uses a symbol the
    /// dialect does not register.
    ///
    /// Returns `FilterError::MalformedSyntax` if the input does not tokenize
    /// into terms.
    pub fn parse(input: &str, dialect: &'d Dialect) -> FilterResult<Vec<FilterClause>> {
        let result = Lexer::new(input).tokenize_with_errors();
        if let Some(err) = result.errors.first() {
            return Err(FilterError::malformed(
                err.position,
                "a field, operator, value or combinator",
                format!("'{}'", err.character),
            ));
        }

        let mut parser = Self {
            tokens: result.tokens,
            position: 0,
            end: input.len(),
            dialect,
        };
        let clauses = parser.parse_clauses()?;

        tracing::debug!(
            dialect = dialect.name(),
            clauses = clauses.len(),
            "parsed filter expression"
        );
        Ok(clauses)
    }

    fn peek(&self) -> Option<&PositionedToken> {
        self.tokens.get(self.position)
    }

    fn advance(&mut self) -> Option<PositionedToken> {
        let token = self.tokens.get(self.position).cloned();
        if token.is_some() {
            self.position += 1;
        }
        token
    }

    /// Builds the error for a missing or wrong token.
    fn unexpected(&self, token: Option<PositionedToken>, expected: &'static str) -> FilterError {
        match token {
            Some(t) => FilterError::malformed(t.position, expected, t.token.to_string()),
            None => FilterError::malformed(self.end, expected, "end of input"),
        }
    }

    fn parse_clauses(&mut self) -> FilterResult<Vec<FilterClause>> {
        let mut clauses = Vec::new();
        while self.peek().is_some() {
            clauses.push(self.parse_clause()?);
        }
        Ok(clauses)
    }

    /// Parses `field operator value [combinator]`.
    fn parse_clause(&mut self) -> FilterResult<FilterClause> {
        let field = self.expect_field()?;
        let operator = self.expect_operator()?;
        let value = self.expect_value()?;

        let logic = match self.peek().map(|t| t.token.clone()) {
            Some(FilterToken::Combinator(logic)) => {
                self.advance();
                Some(logic)
            }
            None => None,
            Some(_) => {
                let token = self.advance();
                return Err(self.unexpected(token, "',' or ';'"));
            }
        };

        Ok(FilterClause {
            field,
            operator,
            value,
            logic,
        })
    }

    fn expect_field(&mut self) -> FilterResult<String> {
        match self.advance() {
            Some(PositionedToken {
                token: FilterToken::Word(word),
                ..
            }) if !word.contains('-') => Ok(word),
            other => Err(self.unexpected(other, "a field name")),
        }
    }

    fn expect_operator(&mut self) -> FilterResult<Operator> {
        match self.advance() {
            Some(PositionedToken {
                token: FilterToken::Operator(symbol),
                ..
            }) => self
                .dialect
                .lookup(&symbol)
                .ok_or_else(|| FilterError::unsupported_operator(symbol)),
            other => Err(self.unexpected(other, "an operator")),
        }
    }

    fn expect_value(&mut self) -> FilterResult<String> {
        match self.advance() {
            Some(PositionedToken {
                token: FilterToken::Word(word),
                ..
            }) => Ok(word),
            other => Err(self.unexpected(other, "a value")),
        }
    }
}
