//! Evaluation errors.

use std::fmt;

use sdb_ir::Span;
use sdb_lexer::TokenizeError;

/// Why a token range could not be evaluated.
///
/// Every variant carries the span of the offending tokens so the monitor can
/// underline them.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum EvalError {
    /// Empty range: an operator is missing an operand, or the line is blank.
    Empty { span: Span },
    /// `$name` is not a register of the current machine.
    UnknownRegister { name: String, span: Span },
    /// A literal that does not parse as a machine word.
    MalformedLiteral { text: String, span: Span },
    /// Several tokens but no operator at parenthesis depth zero.
    NoMainOperator { text: String, span: Span },
    /// Right-hand side of `/` evaluated to zero.
    ///
    /// `span` covers the divisor, `dividend` the left operand.
    DivisionByZero { span: Span, dividend: Span },
}

impl EvalError {
    pub fn span(&self) -> Span {
        match self {
            EvalError::Empty { span }
            | EvalError::UnknownRegister { span, .. }
            | EvalError::MalformedLiteral { span, .. }
            | EvalError::NoMainOperator { span, .. }
            | EvalError::DivisionByZero { span, .. } => *span,
        }
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::Empty { .. } => write!(f, "missing operand"),
            EvalError::UnknownRegister { name, .. } => write!(f, "unknown register `${name}`"),
            EvalError::MalformedLiteral { text, .. } => {
                write!(f, "literal `{text}` does not fit in a machine word")
            }
            EvalError::NoMainOperator { text, .. } => {
                write!(f, "main operator not found in `{text}`")
            }
            EvalError::DivisionByZero { .. } => write!(f, "division by zero"),
        }
    }
}

impl std::error::Error for EvalError {}

/// Failure of [`crate::expr`]: either stage can reject the text.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum ExprError {
    Tokenize(TokenizeError),
    Eval(EvalError),
}

impl ExprError {
    pub fn span(&self) -> Span {
        match self {
            ExprError::Tokenize(err) => err.span(),
            ExprError::Eval(err) => err.span(),
        }
    }

    /// Whether the text is well-formed and only the current register values
    /// (or register set) make it fail.
    ///
    /// Such an expression may evaluate fine after the machine steps.
    pub fn is_state_dependent(&self) -> bool {
        matches!(
            self,
            ExprError::Eval(EvalError::DivisionByZero { .. } | EvalError::UnknownRegister { .. })
        )
    }
}

impl From<TokenizeError> for ExprError {
    fn from(err: TokenizeError) -> Self {
        ExprError::Tokenize(err)
    }
}

impl From<EvalError> for ExprError {
    fn from(err: EvalError) -> Self {
        ExprError::Eval(err)
    }
}

impl fmt::Display for ExprError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExprError::Tokenize(err) => fmt::Display::fmt(err, f),
            ExprError::Eval(err) => fmt::Display::fmt(err, f),
        }
    }
}

impl std::error::Error for ExprError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExprError::Tokenize(err) => Some(err),
            ExprError::Eval(err) => Some(err),
        }
    }
}
