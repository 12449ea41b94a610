//! Expression evaluator for the monitor.
//!
//! Evaluation works directly on the flat token list produced by
//! [`sdb_lexer::tokenize`]; no syntax tree is built. A token range is
//! evaluated by:
//!
//! 1. reading a single operand (literal or `$register`),
//! 2. stripping one pair of parentheses that wraps the whole range, or
//! 3. splitting at the *main operator* (lowest precedence at parenthesis
//!    depth zero, rightmost among ties) and recursing on both halves.
//!
//! Registers are read through the [`RegisterResolver`] trait; the register
//! file itself lives outside this crate.
//!
//! Every failure is an [`EvalError`]. Nothing is silently folded to zero.

mod errors;
mod evaluator;
mod operators;

pub use errors::{EvalError, ExprError};
pub use evaluator::evaluate;
pub use operators::{evaluate_binary, BinaryOp};
pub use sdb_ir::{SWord, Word};

use tracing::debug;

/// Read access to the current machine registers.
///
/// Names arrive without the `$` sigil and compare exactly (case-sensitive).
pub trait RegisterResolver {
    /// Current value of `name`, or `None` if no such register exists.
    fn resolve(&self, name: &str) -> Option<Word>;
}

impl<F> RegisterResolver for F
where
    F: Fn(&str) -> Option<Word>,
{
    #[inline]
    fn resolve(&self, name: &str) -> Option<Word> {
        self(name)
    }
}

/// Tokenize and evaluate `text` in one step.
///
/// This is what the `p` command and the watchpoint scanner call.
pub fn expr(text: &str, regs: &dyn RegisterResolver) -> Result<Word, ExprError> {
    let tokens = sdb_lexer::tokenize(text)?;
    let value = evaluate(&tokens, regs)?;
    debug!(expression = text, value, "evaluated");
    Ok(value)
}
