//! Lexer (tokenizer) for filter expressions.

use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

use super::ast::Logic;

/// Error encountered during lexical analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexerError {
    /// The character that could not be tokenized.
    pub character: char,
    /// The position (0-indexed byte offset) where the error occurred.
    pub position: usize,
}

impl fmt::Display for LexerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unexpected character '{}' at position {}",
            self.character, self.position
        )
    }
}

impl std::error::Error for LexerError {}

/// Result of tokenizing a filter expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexerResult {
    /// The tokens successfully read, with their positions.
    pub tokens: Vec<PositionedToken>,
    /// Any characters that belong to no token.
    pub errors: Vec<LexerError>,
}

/// A token with its position in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionedToken {
    /// The token.
    pub token: FilterToken,
    /// The byte position where the token starts (0-indexed).
    pub position: usize,
}

/// A token in a filter expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterToken {
    /// A run of word characters (`[A-Za-z0-9_-]`). Fields and values are both words.
    Word(String),

    /// A run of operator characters, not yet checked against any table.
    Operator(String),

    /// `,` or `;`.
    Combinator(Logic),
}

impl fmt::Display for FilterToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterToken::Word(word) => write!(f, "'{}'", word),
            FilterToken::Operator(symbol) => write!(f, "'{}'", symbol),
            FilterToken::Combinator(logic) => write!(f, "'{}'", logic.symbol()),
        }
    }
}

/// Returns true for characters that may appear in a field or value.
pub(crate) fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

/// Returns true for characters that may appear in an operator symbol.
///
/// This is deliberately wider than the registered symbols so that an unknown
/// operator such as `%` is read as one token and reported by name.
pub(crate) fn is_operator_char(c: char) -> bool {
    c.is_ascii_punctuation() && !matches!(c, ',' | ';' | '-' | '_')
}

/// Lexer for tokenizing filter expressions.
pub struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    /// Current byte position in the input string.
    position: usize,
    /// Errors encountered during tokenization.
    errors: Vec<LexerError>,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input string.
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
            position: 0,
            errors: Vec::new(),
        }
    }

    fn peek(&mut self) -> Option<&char> {
        self.chars.peek()
    }

    /// Consumes and returns the next character, updating position.
    fn next_char(&mut self) -> Option<char> {
        let c = self.chars.next();
        if let Some(ch) = c {
            self.position += ch.len_utf8();
        }
        c
    }

    fn skip_whitespace(&mut self) {
        while let Some(&c) = self.peek() {
            if c.is_whitespace() {
                self.next_char();
            } else {
                break;
            }
        }
    }

    /// Reads the longest run of characters matching `accept`.
    fn read_while(&mut self, accept: fn(char) -> bool) -> String {
        let mut run = String::new();
        while let Some(&c) = self.peek() {
            if !accept(c) {
                break;
            }
            run.push(c);
            self.next_char();
        }
        run
    }

    /// Returns the next token with its position, or None if at end of input.
    pub fn next_token(&mut self) -> Option<PositionedToken> {
        self.skip_whitespace();

        let c = *self.peek()?;
        let token_start = self.position;

        let token = if let Some(logic) = Logic::from_char(c) {
            self.next_char();
            FilterToken::Combinator(logic)
        } else if is_word_char(c) {
            FilterToken::Word(self.read_while(is_word_char))
        } else if is_operator_char(c) {
            // Maximal munch: `<=` is one symbol, never `<` followed by `=`.
            FilterToken::Operator(self.read_while(is_operator_char))
        } else {
            self.next_char();
            self.errors.push(LexerError {
                character: c,
                position: token_start,
            });
            return self.next_token();
        };

        Some(PositionedToken {
            token,
            position: token_start,
        })
    }

    /// Collects all tokens into a vector (without positions).
    #[cfg(test)]
    pub fn tokenize(self) -> Vec<FilterToken> {
        self.tokenize_with_errors()
            .tokens
            .into_iter()
            .map(|pt| pt.token)
            .collect()
    }

    /// Collects all tokens and any errors encountered.
    pub fn tokenize_with_errors(mut self) -> LexerResult {
        let mut tokens = Vec::new();
        while let Some(positioned_token) = self.next_token() {
            tokens.push(positioned_token);
        }
        LexerResult {
            tokens,
            errors: self.errors,
        }
    }
}
