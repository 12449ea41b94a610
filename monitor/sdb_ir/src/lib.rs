//! SDB IR - data shared between the tokenizer, evaluator and monitor.
//!
//! - [`Span`]: byte range into the line the operator typed
//! - [`Token`], [`TokenKind`], [`TokenList`]: tokenizer output
//! - [`Word`], [`SWord`]: the simulated machine word (RV32)
//!
//! Token lists are owned values returned by the tokenizer. Nothing in this
//! crate is global or shared between evaluations.

/// Compile-time assertion that a type has a specific size.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod span;
mod token;

pub use span::Span;
pub use token::{Token, TokenKind, TokenList, MAX_TOKENS, MAX_TOKEN_LEN};

/// Unsigned machine word of the simulated CPU.
pub type Word = u32;

/// Signed reinterpretation of [`Word`], used by division.
pub type SWord = i32;
