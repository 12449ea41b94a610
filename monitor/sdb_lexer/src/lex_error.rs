//! Tokenizer errors.

use std::fmt;

use sdb_ir::{Span, MAX_TOKENS, MAX_TOKEN_LEN};

/// A tokenizer failure at a byte offset of the input line.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct TokenizeError {
    /// Byte offset where scanning stopped.
    pub position: usize,
    pub kind: TokenizeErrorKind,
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum TokenizeErrorKind {
    /// No rule matches at `position`.
    NoMatch,
    /// A literal or register reference longer than [`MAX_TOKEN_LEN`].
    TokenTooLong { len: usize },
    /// The line would produce more than [`MAX_TOKENS`] tokens.
    TooManyTokens,
}

impl TokenizeError {
    pub fn no_match(position: usize) -> Self {
        TokenizeError {
            position,
            kind: TokenizeErrorKind::NoMatch,
        }
    }

    /// Span to underline in diagnostics.
    pub fn span(&self) -> Span {
        match self.kind {
            TokenizeErrorKind::TokenTooLong { len } => {
                Span::from_offsets(self.position, self.position + len)
            }
            TokenizeErrorKind::NoMatch | TokenizeErrorKind::TooManyTokens => {
                Span::from_offsets(self.position, self.position + 1)
            }
        }
    }
}

impl fmt::Display for TokenizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenizeErrorKind::NoMatch => write!(f, "no match at position {}", self.position),
            TokenizeErrorKind::TokenTooLong { len } => write!(
                f,
                "token at position {} is {len} bytes long (limit {MAX_TOKEN_LEN})",
                self.position
            ),
            TokenizeErrorKind::TooManyTokens => write!(
                f,
                "too many tokens: limit of {MAX_TOKENS} reached at position {}",
                self.position
            ),
        }
    }
}

impl std::error::Error for TokenizeError {}
