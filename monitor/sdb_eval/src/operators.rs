//! Binary operators: precedence and arithmetic.
//!
//! The operator set is closed, so dispatch is a plain `match`.

use sdb_ir::{SWord, TokenKind, Word};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Eq,
}

impl BinaryOp {
    /// Operator denoted by a token, if it is one.
    #[inline]
    pub fn from_token(kind: TokenKind) -> Option<BinaryOp> {
        match kind {
            TokenKind::Plus => Some(BinaryOp::Add),
            TokenKind::Minus => Some(BinaryOp::Sub),
            TokenKind::Star => Some(BinaryOp::Mul),
            TokenKind::Slash => Some(BinaryOp::Div),
            TokenKind::Eq => Some(BinaryOp::Eq),
            TokenKind::LParen
            | TokenKind::RParen
            | TokenKind::DecimalLiteral
            | TokenKind::HexLiteral
            | TokenKind::RegisterRef => None,
        }
    }

    /// Binding strength; lower binds looser and is split on first.
    #[inline]
    pub fn precedence(self) -> u8 {
        match self {
            BinaryOp::Eq => 0,
            BinaryOp::Add | BinaryOp::Sub => 1,
            BinaryOp::Mul | BinaryOp::Div => 2,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Eq => "==",
        }
    }
}

/// Apply `op` to two machine words.
///
/// `+ - *` wrap. `/` divides the signed reinterpretations (wrapping, so
/// `i32::MIN / -1` yields `i32::MIN`). `==` yields 1 or 0. Returns `None`
/// only for division by zero.
pub fn evaluate_binary(op: BinaryOp, lhs: Word, rhs: Word) -> Option<Word> {
    match op {
        BinaryOp::Add => Some(lhs.wrapping_add(rhs)),
        BinaryOp::Sub => Some(lhs.wrapping_sub(rhs)),
        BinaryOp::Mul => Some(lhs.wrapping_mul(rhs)),
        BinaryOp::Div => {
            if rhs == 0 {
                return None;
            }
            let quotient = as_signed(lhs).wrapping_div(as_signed(rhs));
            Some(as_unsigned(quotient))
        }
        BinaryOp::Eq => Some(Word::from(lhs == rhs)),
    }
}

#[inline]
fn as_signed(word: Word) -> SWord {
    SWord::from_ne_bytes(word.to_ne_bytes())
}

#[inline]
fn as_unsigned(word: SWord) -> Word {
    Word::from_ne_bytes(word.to_ne_bytes())
}

#[cfg(test)]
mod tests;
