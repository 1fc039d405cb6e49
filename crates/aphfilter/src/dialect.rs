//! Backend dialects: operator tables and literal rendering rules.

use std::borrow::Cow;
use std::fmt;

use crate::filter::Operator;

/// How compiled clauses carry their operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompileMode {
    /// Operands are written into the fragment text.
    Inline,
    /// Operands are replaced by positional placeholders and returned as binds.
    Placeholder,
}

/// Placeholder syntax of a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaceholderStyle {
    /// `$1`, `$2`, ...
    Dollar,
    /// AQL bind parameters `@v1`, `@v2`, ...
    AqlBind,
}

impl PlaceholderStyle {
    /// Returns the placeholder for the 1-based bind position `index`.
    pub fn placeholder(self, index: usize) -> String {
        match self {
            Self::Dollar => format!("${}", index),
            Self::AqlBind => format!("@v{}", index),
        }
    }
}

/// How pattern operators turn a plain value into a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternStyle {
    /// Regular expression: `.*value.*`.
    Regex,
    /// SQL wildcard: `%value%`.
    SqlWildcard,
}

impl PatternStyle {
    /// Wraps `value` so that it matches as a literal substring.
    ///
    /// Characters the pattern language treats specially are escaped with `\`,
    /// so `foo_bar` never matches `fooXbar`.
    pub fn wrap(self, value: &str) -> String {
        let special: &[char] = match self {
            Self::Regex => &['\\', '.', '*', '+', '?', '(', ')', '[', ']', '{', '}', '|', '^', '$'],
            Self::SqlWildcard => &['\\', '_', '%', '*', '+', '?', '(', ')', '[', ']', '{', '}', '|'],
        };
        let mut escaped = String::with_capacity(value.len());
        for c in value.chars() {
            if special.contains(&c) {
                escaped.push('\\');
            }
            escaped.push(c);
        }
        match self {
            Self::Regex => format!(".*{}.*", escaped),
            Self::SqlWildcard => format!("%{}%", escaped),
        }
    }
}

/// How a validated date literal is turned into a backend date value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateStyle {
    /// Call a date function on the literal as written, e.g. `DATE_ISO8601('2020-01')`.
    Function(&'static str),
    /// Cast the normalized `YYYY-MM-DD` form, e.g. `'2020-01-01'::date`.
    Cast(&'static str),
}

/// String quoting rules of a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuoteStyle {
    /// `'...'` with `\` escapes (AQL).
    Backslash,
    /// `'...'` with doubled `''` (SQL).
    Doubled,
}

impl QuoteStyle {
    /// Quotes `value` as a single-quoted string literal.
    pub fn quote(self, value: &str) -> String {
        let escaped = match self {
            Self::Backslash => value.replace('\\', "\\\\").replace('\'', "\\'"),
            Self::Doubled => value.replace('\'', "''"),
        };
        format!("'{}'", escaped)
    }
}

type OperatorTable = Cow<'static, [(Operator, &'static str)]>;

/// A query backend the compiler can target.
///
/// A dialect bundles everything backend specific: the clause keyword, the
/// operator translation table, placeholder and quoting syntax, how pattern
/// values are wrapped and how dates are constructed. The built-in dialects
/// are process-wide statics; derived dialects are built with
/// [`Dialect::without`] and [`Dialect::with_mode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dialect {
    name: &'static str,
    keyword: &'static str,
    operators: OperatorTable,
    mode: CompileMode,
    placeholder: PlaceholderStyle,
    pattern: PatternStyle,
    date: DateStyle,
    quote: QuoteStyle,
}

const AQL_OPERATORS: &[(Operator, &str)] = &[
    (Operator::Equal, "=="),
    (Operator::StrictEqual, "=="),
    (Operator::NotEqual, "!="),
    (Operator::StrictNotEqual, "!="),
    (Operator::Greater, ">"),
    (Operator::Less, "<"),
    (Operator::GreaterOrEqual, ">="),
    (Operator::LessOrEqual, "<="),
    (Operator::Match, "=~"),
    (Operator::NotMatch, "!~"),
    (Operator::Contains, "=~"),
    (Operator::NotContains, "!~"),
    (Operator::DateEqual, "=="),
    (Operator::DateGreater, ">"),
    (Operator::DateLess, "<"),
    (Operator::DateGreaterOrEqual, ">="),
    (Operator::DateLessOrEqual, "<="),
];

const POSTGRES_OPERATORS: &[(Operator, &str)] = &[
    (Operator::Equal, "="),
    (Operator::StrictEqual, "="),
    (Operator::NotEqual, "!="),
    (Operator::StrictNotEqual, "!="),
    (Operator::Greater, ">"),
    (Operator::Less, "<"),
    (Operator::GreaterOrEqual, ">="),
    (Operator::LessOrEqual, "<="),
    (Operator::Match, "SIMILAR TO"),
    (Operator::NotMatch, "NOT SIMILAR TO"),
    (Operator::Contains, "SIMILAR TO"),
    (Operator::NotContains, "NOT SIMILAR TO"),
    (Operator::DateEqual, "="),
    (Operator::DateGreater, ">"),
    (Operator::DateLess, "<"),
    (Operator::DateGreaterOrEqual, ">="),
    (Operator::DateLessOrEqual, "<="),
];

static AQL: Dialect = Dialect {
    name: "aql",
    keyword: "FILTER",
    operators: Cow::Borrowed(AQL_OPERATORS),
    mode: CompileMode::Inline,
    placeholder: PlaceholderStyle::AqlBind,
    pattern: PatternStyle::Regex,
    date: DateStyle::Function("DATE_ISO8601"),
    quote: QuoteStyle::Backslash,
};

static POSTGRES: Dialect = Dialect {
    name: "postgres",
    keyword: "WHERE",
    operators: Cow::Borrowed(POSTGRES_OPERATORS),
    mode: CompileMode::Placeholder,
    placeholder: PlaceholderStyle::Dollar,
    pattern: PatternStyle::SqlWildcard,
    date: DateStyle::Cast("date"),
    quote: QuoteStyle::Doubled,
};

impl Dialect {
    /// ArangoDB AQL: `FILTER` clauses with inline literals.
    pub fn aql() -> &'static Dialect {
        &AQL
    }

    /// PostgreSQL: `WHERE` clauses with `$n` placeholders.
    pub fn postgres() -> &'static Dialect {
        &POSTGRES
    }

    /// Every built-in dialect.
    pub fn builtin() -> [&'static Dialect; 2] {
        [&AQL, &POSTGRES]
    }

    /// Looks up a built-in dialect by name (case-insensitive).
    ///
    /// `arangodb` and `postgresql`/`pg` are accepted as aliases.
    pub fn by_name(name: &str) -> Option<&'static Dialect> {
        match name.to_ascii_lowercase().as_str() {
            "aql" | "arangodb" => Some(&AQL),
            "postgres" | "postgresql" | "pg" => Some(&POSTGRES),
            _ => None,
        }
    }

    /// The dialect's name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The keyword that starts a compiled fragment (`FILTER`, `WHERE`).
    pub fn keyword(&self) -> &'static str {
        self.keyword
    }

    /// The compile mode used unless the compiler overrides it.
    pub fn mode(&self) -> CompileMode {
        self.mode
    }

    /// Placeholder syntax used in placeholder mode.
    pub fn placeholder_style(&self) -> PlaceholderStyle {
        self.placeholder
    }

    /// How pattern operands are wrapped.
    pub fn pattern_style(&self) -> PatternStyle {
        self.pattern
    }

    /// How date operands are constructed.
    pub fn date_style(&self) -> DateStyle {
        self.date
    }

    /// How inline string literals are quoted.
    pub fn quote_style(&self) -> QuoteStyle {
        self.quote
    }

    /// Iterates over `(operator, backend token)` pairs in table order.
    pub fn operators(&self) -> impl Iterator<Item = (Operator, &'static str)> + '_ {
        self.operators.iter().copied()
    }

    /// Returns the backend token for `operator`, if the dialect supports it.
    pub fn token(&self, operator: Operator) -> Option<&'static str> {
        self.operators
            .iter()
            .find(|(op, _)| *op == operator)
            .map(|(_, token)| *token)
    }

    /// Returns true if the dialect registers `operator`.
    pub fn supports(&self, operator: Operator) -> bool {
        self.token(operator).is_some()
    }

    /// Resolves a symbol as written in a filter string.
    pub fn lookup(&self, symbol: &str) -> Option<Operator> {
        Operator::from_symbol(symbol).filter(|op| self.supports(*op))
    }

    /// Returns a copy of this dialect with `operators` removed from its table.
    ///
    /// # Example
    ///
    /// ```
    /// use aphfilter::{Dialect, Operator};
    ///
    /// let strict = Dialect::aql().without(&[Operator::Match, Operator::NotMatch]);
    /// assert!(!strict.supports(Operator::Match));
    /// assert!(strict.supports(Operator::Contains));
    /// ```
    pub fn without(&self, operators: &[Operator]) -> Dialect {
        let table: Vec<_> = self
            .operators
            .iter()
            .copied()
            .filter(|(op, _)| !operators.contains(op))
            .collect();
        Dialect {
            operators: Cow::Owned(table),
            ..self.clone()
        }
    }

    /// Returns a copy of this dialect with a different default compile mode.
    pub fn with_mode(&self, mode: CompileMode) -> Dialect {
        Dialect {
            mode,
            ..self.clone()
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_tables_cover_every_operator() {
        for dialect in Dialect::builtin() {
            for op in Operator::ALL {
                assert!(
                    dialect.supports(op),
                    "{} is missing {}",
                    dialect.name(),
                    op
                );
            }
        }
    }

    #[test]
    fn test_aql_tokens() {
        let aql = Dialect::aql();
        assert_eq!(aql.token(Operator::Equal), Some("=="));
        assert_eq!(aql.token(Operator::StrictEqual), Some("=="));
        assert_eq!(aql.token(Operator::Contains), Some("=~"));
        assert_eq!(aql.token(Operator::NotContains), Some("!~"));
        assert_eq!(aql.token(Operator::DateGreater), Some(">"));
    }

    #[test]
    fn test_postgres_tokens() {
        let pg = Dialect::postgres();
        assert_eq!(pg.token(Operator::Equal), Some("="));
        assert_eq!(pg.token(Operator::Contains), Some("SIMILAR TO"));
        assert_eq!(pg.token(Operator::NotMatch), Some("NOT SIMILAR TO"));
        assert_eq!(pg.token(Operator::DateLessOrEqual), Some("<="));
    }

    #[test]
    fn test_by_name() {
        assert_eq!(Dialect::by_name("aql"), Some(Dialect::aql()));
        assert_eq!(Dialect::by_name("ArangoDB"), Some(Dialect::aql()));
        assert_eq!(Dialect::by_name("PG"), Some(Dialect::postgres()));
        assert_eq!(Dialect::by_name("mysql"), None);
    }

    #[test]
    fn test_lookup_respects_table() {
        let limited = Dialect::postgres().without(&[Operator::Greater]);
        assert_eq!(limited.lookup(">"), None);
        assert_eq!(limited.lookup(">="), Some(Operator::GreaterOrEqual));
        assert_eq!(limited.lookup("%"), None);
        assert_eq!(limited.name(), "postgres");
    }

    #[test]
    fn test_with_mode_keeps_table() {
        let aql = Dialect::aql().with_mode(CompileMode::Placeholder);
        assert_eq!(aql.mode(), CompileMode::Placeholder);
        assert_eq!(aql.operators().count(), Operator::ALL.len());
        assert_eq!(Dialect::aql().mode(), CompileMode::Inline);
    }

    #[test]
    fn test_placeholders() {
        assert_eq!(PlaceholderStyle::Dollar.placeholder(3), "$3");
        assert_eq!(PlaceholderStyle::AqlBind.placeholder(1), "@v1");
    }

    #[test]
    fn test_pattern_wrapping() {
        assert_eq!(PatternStyle::Regex.wrap("foo"), ".*foo.*");
        assert_eq!(PatternStyle::SqlWildcard.wrap("foo"), "%foo%");
    }

    #[test]
    fn test_pattern_wrapping_escapes_special_characters() {
        assert_eq!(PatternStyle::SqlWildcard.wrap("foo_bar"), "%foo\\_bar%");
        assert_eq!(PatternStyle::SqlWildcard.wrap("50%|a"), "%50\\%\\|a%");
        assert_eq!(PatternStyle::SqlWildcard.wrap("a-b"), "%a-b%");
        assert_eq!(PatternStyle::Regex.wrap("a.b"), ".*a\\.b.*");
        assert_eq!(PatternStyle::Regex.wrap("foo_bar"), ".*foo_bar.*");
    }

    #[test]
    fn test_quoting() {
        assert_eq!(QuoteStyle::Doubled.quote("o'neil"), "'o''neil'");
        assert_eq!(QuoteStyle::Backslash.quote("o'neil"), "'o\\'neil'");
        assert_eq!(QuoteStyle::Backslash.quote("bob"), "'bob'");
    }
}
