//! The lexical rule table.
//!
//! Rules are tried in declaration order at each position and the first one
//! that matches wins. Order is part of the grammar: `==` must come before any
//! rule that could consume its first byte, and the hex rule must come before
//! the decimal rule or `0x1f` would lex as `0` followed by garbage.

use sdb_ir::TokenKind;

/// Byte-level pattern anchored at the current position.
#[derive(Copy, Clone, Debug)]
pub enum Pattern {
    /// Exactly this text.
    Exact(&'static str),
    /// One or more bytes accepted by the class.
    Run(fn(u8) -> bool),
    /// One of the prefixes, then one or more bytes accepted by the class.
    Prefixed(&'static [&'static str], fn(u8) -> bool),
}

impl Pattern {
    /// Length of the match at the start of `input`, if any.
    #[inline]
    pub fn match_len(&self, input: &[u8]) -> Option<usize> {
        match *self {
            Pattern::Exact(text) => input.starts_with(text.as_bytes()).then_some(text.len()),
            Pattern::Run(class) => {
                let len = run_len(input, class);
                (len > 0).then_some(len)
            }
            Pattern::Prefixed(prefixes, class) => prefixes.iter().find_map(|prefix| {
                let rest = input.strip_prefix(prefix.as_bytes())?;
                let len = run_len(rest, class);
                (len > 0).then_some(prefix.len() + len)
            }),
        }
    }
}

#[inline]
fn run_len(input: &[u8], class: fn(u8) -> bool) -> usize {
    input.iter().take_while(|&&b| class(b)).count()
}

/// A pattern and the token it produces; `None` consumes input silently.
#[derive(Copy, Clone, Debug)]
pub struct Rule {
    /// Short description for trace output.
    pub name: &'static str,
    pub pattern: Pattern,
    pub emit: Option<TokenKind>,
}

const fn rule(name: &'static str, pattern: Pattern, emit: Option<TokenKind>) -> Rule {
    Rule {
        name,
        pattern,
        emit,
    }
}

fn is_space(b: u8) -> bool {
    b == b' '
}

fn is_digit(b: u8) -> bool {
    b.is_ascii_digit()
}

fn is_hex_digit(b: u8) -> bool {
    b.is_ascii_hexdigit()
}

fn is_alnum(b: u8) -> bool {
    b.is_ascii_alphanumeric()
}

/// The rule table, in priority order.
pub static RULES: &[Rule] = &[
    rule("spaces", Pattern::Run(is_space), None),
    rule("plus", Pattern::Exact("+"), Some(TokenKind::Plus)),
    rule("equal", Pattern::Exact("=="), Some(TokenKind::Eq)),
    rule("minus", Pattern::Exact("-"), Some(TokenKind::Minus)),
    rule("star", Pattern::Exact("*"), Some(TokenKind::Star)),
    rule("slash", Pattern::Exact("/"), Some(TokenKind::Slash)),
    rule("lparen", Pattern::Exact("("), Some(TokenKind::LParen)),
    rule("rparen", Pattern::Exact(")"), Some(TokenKind::RParen)),
    rule(
        "hex",
        Pattern::Prefixed(&["0x", "0X"], is_hex_digit),
        Some(TokenKind::HexLiteral),
    ),
    rule("decimal", Pattern::Run(is_digit), Some(TokenKind::DecimalLiteral)),
    rule(
        "register",
        Pattern::Prefixed(&["$"], is_alnum),
        Some(TokenKind::RegisterRef),
    ),
];

/// First rule matching at the start of `input`, with its index and length.
#[inline]
pub fn first_match(input: &[u8]) -> Option<(usize, &'static Rule, usize)> {
    RULES
        .iter()
        .enumerate()
        .find_map(|(index, rule)| rule.pattern.match_len(input).map(|len| (index, rule, len)))
}
