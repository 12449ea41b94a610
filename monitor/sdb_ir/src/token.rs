//! Token types produced by the tokenizer.

use std::fmt;
use std::ops::Range;

use crate::Span;

/// Maximum number of tokens in one expression.
///
/// Longer inputs fail tokenization instead of growing without bound.
pub const MAX_TOKENS: usize = 65536;

/// Maximum length of a single token's text, in bytes.
pub const MAX_TOKEN_LEN: usize = 31;

/// Token kinds understood by the expression evaluator.
///
/// Closed set: there is no identifier, string, or unary token.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum TokenKind {
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
    /// `==`
    Eq,
    /// `[0-9]+`
    DecimalLiteral,
    /// `0x` / `0X` followed by hex digits.
    HexLiteral,
    /// `$` followed by a register name; the sigil stays in the text.
    RegisterRef,
}

impl TokenKind {
    /// Human-readable name for diagnostics.
    pub fn display_name(self) -> &'static str {
        match self {
            TokenKind::Plus => "`+`",
            TokenKind::Minus => "`-`",
            TokenKind::Star => "`*`",
            TokenKind::Slash => "`/`",
            TokenKind::LParen => "`(`",
            TokenKind::RParen => "`)`",
            TokenKind::Eq => "`==`",
            TokenKind::DecimalLiteral => "decimal literal",
            TokenKind::HexLiteral => "hex literal",
            TokenKind::RegisterRef => "register",
        }
    }

}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A token with its verbatim text and location in the input line.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    /// Source text, at most [`MAX_TOKEN_LEN`] bytes.
    pub text: String,
    pub span: Span,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, text: impl Into<String>, span: Span) -> Self {
        Token {
            kind,
            text: text.into(),
            span,
        }
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({:?}) @ {}", self.kind, self.text, self.span)
    }
}

/// Ordered tokens of one input line, in left-to-right scan order.
///
/// Each call to the tokenizer returns a fresh list; lists are never reused
/// across evaluations.
#[derive(Clone, Default, Eq, PartialEq, Hash)]
pub struct TokenList {
    tokens: Vec<Token>,
}

impl TokenList {
    #[inline]
    pub fn new() -> Self {
        TokenList { tokens: Vec::new() }
    }

    #[inline]
    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    #[inline]
    pub fn as_slice(&self) -> &[Token] {
        &self.tokens
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter()
    }

    /// Token texts of `range` concatenated without separators.
    ///
    /// Out-of-bounds parts of the range are ignored.
    pub fn render(&self, range: Range<usize>) -> String {
        let end = range.end.min(self.tokens.len());
        let start = range.start.min(end);
        self.tokens[start..end]
            .iter()
            .map(|t| t.text.as_str())
            .collect()
    }

    /// Span covering the tokens of `range`.
    ///
    /// An empty range yields a point span where the missing operand would
    /// have been: right after the preceding token, or at the start of the
    /// following one.
    pub fn span_of(&self, range: Range<usize>) -> Span {
        let end = range.end.min(self.tokens.len());
        let start = range.start.min(end);
        if start < end {
            return self.tokens[start].span.merge(self.tokens[end - 1].span);
        }
        if start > 0 {
            Span::point(self.tokens[start - 1].span.end)
        } else {
            self.tokens
                .first()
                .map_or(Span::DUMMY, |t| Span::point(t.span.start))
        }
    }
}

impl fmt::Debug for TokenList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.tokens).finish()
    }
}

impl<'a> IntoIterator for &'a TokenList {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}
