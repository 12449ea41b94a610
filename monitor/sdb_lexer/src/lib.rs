//! Tokenizer for monitor expressions.
//!
//! [`tokenize`] walks the input once. At every position it tries the
//! [`rules::RULES`] table in declaration order and takes the first rule that
//! matches there (first match, not longest match). Whitespace rules advance
//! without emitting. Literal and register text is kept verbatim; numbers are
//! parsed later by the evaluator.
//!
//! Each call returns a fresh, owned [`TokenList`], so a failed call leaves
//! nothing behind for the next one.

mod lex_error;
pub mod rules;

pub use lex_error::{TokenizeError, TokenizeErrorKind};

use sdb_ir::{Span, Token, TokenList, MAX_TOKENS, MAX_TOKEN_LEN};
use tracing::trace;

/// Tokenize one expression line.
pub fn tokenize(input: &str) -> Result<TokenList, TokenizeError> {
    let bytes = input.as_bytes();
    let mut tokens = TokenList::new();
    let mut position = 0;

    while position < bytes.len() {
        let Some((index, rule, len)) = rules::first_match(&bytes[position..]) else {
            return Err(TokenizeError::no_match(position));
        };

        trace!(
            rule = index,
            name = rule.name,
            position,
            len,
            "match rules[{index}] at position {position} with len {len}"
        );

        if let Some(kind) = rule.emit {
            if len > MAX_TOKEN_LEN {
                return Err(TokenizeError {
                    position,
                    kind: TokenizeErrorKind::TokenTooLong { len },
                });
            }
            if tokens.len() >= MAX_TOKENS {
                return Err(TokenizeError {
                    position,
                    kind: TokenizeErrorKind::TooManyTokens,
                });
            }
            // Every rule matches ASCII only, so these offsets are char boundaries.
            let text = &input[position..position + len];
            tokens.push(Token::new(
                kind,
                text,
                Span::from_offsets(position, position + len),
            ));
        }

        position += len;
    }

    Ok(tokens)
}
