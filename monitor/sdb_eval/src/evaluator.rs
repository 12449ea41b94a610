//! Range evaluation over a flat token list.
//!
//! Ranges are half-open `start..end` indices into the token list. The
//! recursion strictly shrinks the range on every call, so evaluation always
//! terminates; [`ensure_sufficient_stack`] keeps deep nesting from
//! overflowing the thread stack.
//!
//! Parenthesis pairs are matched once up front, so unwrapping `(...)` is a
//! table lookup. Finding the main operator still scans the range, which
//! makes a left-leaning chain of `n` operators quadratic; the token limit
//! bounds that.

use sdb_ir::{Token, TokenKind, TokenList, Word};
use sdb_stack::ensure_sufficient_stack;
use tracing::trace;

use crate::operators::{evaluate_binary, BinaryOp};
use crate::{EvalError, RegisterResolver};

/// Evaluate a whole token list.
pub fn evaluate(tokens: &TokenList, regs: &dyn RegisterResolver) -> Result<Word, EvalError> {
    let closers = match_parens(tokens.as_slice());
    Evaluator {
        tokens,
        regs,
        closers,
    }
    .eval_range(0, tokens.len())
}

struct Evaluator<'a> {
    tokens: &'a TokenList,
    regs: &'a dyn RegisterResolver,
    /// For each `(`, the index of its matching `)`; `None` elsewhere and for
    /// unbalanced openers.
    closers: Vec<Option<usize>>,
}

/// Pair every `(` with the `)` that closes it, in one left-to-right pass.
///
/// A `)` without an opener is left alone; it stays a syntax problem for
/// whichever range ends up containing it.
fn match_parens(tokens: &[Token]) -> Vec<Option<usize>> {
    let mut closers = vec![None; tokens.len()];
    let mut open = Vec::new();
    for (index, token) in tokens.iter().enumerate() {
        match token.kind {
            TokenKind::LParen => open.push(index),
            TokenKind::RParen => {
                if let Some(opener) = open.pop() {
                    closers[opener] = Some(index);
                }
            }
            _ => {}
        }
    }
    closers
}

impl Evaluator<'_> {
    #[inline]
    fn token(&self, index: usize) -> &Token {
        &self.tokens.as_slice()[index]
    }

    fn eval_range(&self, start: usize, end: usize) -> Result<Word, EvalError> {
        ensure_sufficient_stack(|| {
            trace!(start, end, "eval");

            if start >= end {
                return Err(EvalError::Empty {
                    span: self.tokens.span_of(start..end),
                });
            }
            if end - start == 1 {
                return self.eval_single(start);
            }
            if self.is_wrapped(start, end) {
                return self.eval_range(start + 1, end - 1);
            }

            let Some((split, op)) = self.main_operator(start, end) else {
                return Err(EvalError::NoMainOperator {
                    text: self.tokens.render(start..end),
                    span: self.tokens.span_of(start..end),
                });
            };

            let lhs = self.eval_range(start, split)?;
            let rhs = self.eval_range(split + 1, end)?;
            let value = evaluate_binary(op, lhs, rhs).ok_or_else(|| EvalError::DivisionByZero {
                span: self.tokens.span_of(split + 1..end),
                dividend: self.tokens.span_of(start..split),
            })?;
            trace!(op = op.symbol(), lhs, rhs, value, "combined");
            Ok(value)
        })
    }

    /// A lone token: literal, register, or a stray operator/parenthesis.
    fn eval_single(&self, index: usize) -> Result<Word, EvalError> {
        let token = self.token(index);
        match token.kind {
            TokenKind::RegisterRef => {
                let name = token.text.strip_prefix('$').unwrap_or(&token.text);
                self.regs
                    .resolve(name)
                    .ok_or_else(|| EvalError::UnknownRegister {
                        name: name.to_owned(),
                        span: token.span,
                    })
            }
            TokenKind::DecimalLiteral | TokenKind::HexLiteral => {
                parse_literal(&token.text).ok_or_else(|| EvalError::MalformedLiteral {
                    text: token.text.clone(),
                    span: token.span,
                })
            }
            TokenKind::Plus
            | TokenKind::Minus
            | TokenKind::Star
            | TokenKind::Slash
            | TokenKind::Eq
            | TokenKind::LParen
            | TokenKind::RParen => Err(EvalError::NoMainOperator {
                text: token.text.clone(),
                span: token.span,
            }),
        }
    }

    /// Whether `(` at `start` and `)` at `end - 1` enclose the whole range.
    ///
    /// `(1+2)*(3+4)` starts and ends with parentheses, but the first `(`
    /// closes after `2`, so the outer pair does not wrap it.
    #[inline]
    fn is_wrapped(&self, start: usize, end: usize) -> bool {
        self.closers[start] == Some(end - 1)
    }

    /// The operator to split on: lowest precedence at depth zero, rightmost
    /// among equals, which makes same-precedence chains left-associative.
    fn main_operator(&self, start: usize, end: usize) -> Option<(usize, BinaryOp)> {
        let mut depth: i64 = 0;
        let mut best: Option<(usize, BinaryOp)> = None;

        for (index, token) in self.tokens.as_slice()[start..end].iter().enumerate() {
            match token.kind {
                TokenKind::LParen => depth += 1,
                TokenKind::RParen => depth -= 1,
                _ => {}
            }
            if depth != 0 {
                continue;
            }
            let Some(op) = BinaryOp::from_token(token.kind) else {
                continue;
            };
            if best.map_or(true, |(_, current)| op.precedence() <= current.precedence()) {
                best = Some((start + index, op));
            }
        }

        best
    }
}

/// Parse a literal with C-style base detection: `0x`/`0X` selects base 16,
/// anything else is decimal. Values beyond a machine word are rejected.
fn parse_literal(text: &str) -> Option<Word> {
    let hex = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"));
    match hex {
        Some(digits) => Word::from_str_radix(digits, 16).ok(),
        None => text.parse::<Word>().ok(),
    }
}
