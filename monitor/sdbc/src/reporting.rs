//! Diagnostic rendering.
//!
//! Converts the error types of the lower crates into [`Diagnostic`]s. Spans
//! in those errors are relative to the expression text; `base` is the byte
//! offset of that text within the command line, so labels line up with the
//! line the operator typed.

use sdb_diagnostic::{Diagnostic, ErrorCode};
use sdb_eval::{EvalError, ExprError};
use sdb_ir::{Span, MAX_TOKENS, MAX_TOKEN_LEN};
use sdb_isa::RegisterError;
use sdb_lexer::{TokenizeError, TokenizeErrorKind};
use sdb_watch::{PoolError, WatchError, WatchFailure, MAX_EXPRESSION_LEN};

use crate::commands::CommandError;

/// Conversion into a user-facing diagnostic.
pub trait ToDiagnostic {
    /// `base` is added to every span the error carries.
    fn to_diagnostic(&self, base: u32) -> Diagnostic;
}

#[inline]
fn shift(span: Span, base: u32) -> Span {
    Span::new(span.start.saturating_add(base), span.end.saturating_add(base))
}

impl ToDiagnostic for TokenizeError {
    fn to_diagnostic(&self, base: u32) -> Diagnostic {
        let span = shift(self.span(), base);
        match self.kind {
            TokenizeErrorKind::NoMatch => Diagnostic::error(ErrorCode::E0001)
                .with_message("unrecognized input in expression")
                .with_label(span, "no token starts here"),
            TokenizeErrorKind::TokenTooLong { len } => Diagnostic::error(ErrorCode::E0002)
                .with_message("token is too long")
                .with_label(span, format!("{len} bytes, the limit is {MAX_TOKEN_LEN}")),
            TokenizeErrorKind::TooManyTokens => Diagnostic::error(ErrorCode::E0003)
                .with_message(format!("expression has more than {MAX_TOKENS} tokens"))
                .with_label(span, "limit reached here"),
        }
    }
}

impl ToDiagnostic for EvalError {
    fn to_diagnostic(&self, base: u32) -> Diagnostic {
        let span = shift(self.span(), base);
        let (code, label) = match self {
            EvalError::Empty { .. } => (ErrorCode::E1001, "expected an operand here"),
            EvalError::UnknownRegister { .. } => (ErrorCode::E1002, "not a register"),
            EvalError::MalformedLiteral { .. } => (ErrorCode::E1003, "out of range"),
            EvalError::NoMainOperator { .. } => (ErrorCode::E1004, "no operator joins these"),
            EvalError::DivisionByZero { .. } => (ErrorCode::E1005, "divisor evaluates to zero"),
        };
        let diag = Diagnostic::error(code)
            .with_message(self.to_string())
            .with_label(span, label);
        match self {
            EvalError::DivisionByZero { dividend, .. } => {
                diag.with_secondary_label(shift(*dividend, base), "dividend")
            }
            _ => diag,
        }
    }
}

impl ToDiagnostic for ExprError {
    fn to_diagnostic(&self, base: u32) -> Diagnostic {
        match self {
            ExprError::Tokenize(err) => err.to_diagnostic(base),
            ExprError::Eval(err) => err.to_diagnostic(base),
        }
    }
}

impl ToDiagnostic for PoolError {
    fn to_diagnostic(&self, _base: u32) -> Diagnostic {
        let note = match self {
            PoolError::Exhausted => "delete a watchpoint with `d N` to free a slot",
            PoolError::IdsExhausted => "watchpoint numbers are never reused; restart the monitor",
        };
        Diagnostic::error(ErrorCode::E2001)
            .with_message(self.to_string())
            .with_note(note)
    }
}

impl ToDiagnostic for WatchError {
    fn to_diagnostic(&self, base: u32) -> Diagnostic {
        match self {
            WatchError::NotFound { .. } => Diagnostic::error(ErrorCode::E2002)
                .with_message(self.to_string())
                .with_note("`info w` lists the active watchpoints"),
            WatchError::ExpressionTooLong { len } => {
                let start = base as usize;
                Diagnostic::error(ErrorCode::E2003)
                    .with_message("watch expression is too long")
                    .with_label(
                        Span::from_offsets(start + MAX_EXPRESSION_LEN, start + len),
                        format!("{len} bytes, the limit is {MAX_EXPRESSION_LEN}"),
                    )
            }
            WatchError::Pool(err) => err.to_diagnostic(base),
            WatchError::Expr(err) => err.to_diagnostic(base),
        }
    }
}

impl ToDiagnostic for WatchFailure {
    /// Spans point into the stored watch expression, not a command line.
    fn to_diagnostic(&self, base: u32) -> Diagnostic {
        let inner = self.error.to_diagnostic(base);
        let mut diag = Diagnostic::error(ErrorCode::E2004).with_message(format!(
            "watchpoint {} could not be evaluated: {}",
            self.id, self.error
        ));
        diag.labels.extend(inner.labels);
        diag.with_note(format!("caused by {}", inner.code))
            .with_note("the watchpoint stays active with its previous value")
    }
}

impl ToDiagnostic for RegisterError {
    fn to_diagnostic(&self, _base: u32) -> Diagnostic {
        Diagnostic::error(ErrorCode::E3001)
            .with_message(self.to_string())
            .with_note("`info r` lists the register names")
    }
}

impl ToDiagnostic for CommandError {
    fn to_diagnostic(&self, base: u32) -> Diagnostic {
        let span = shift(self.span(), base);
        match self {
            CommandError::Unknown { .. } => Diagnostic::error(ErrorCode::E3002)
                .with_message(self.to_string())
                .with_label(span, "unknown command")
                .with_note("`help` lists the available commands"),
            CommandError::BadArgs { command, .. } => Diagnostic::error(ErrorCode::E3003)
                .with_message(self.to_string())
                .with_label(span, "here")
                .with_note(format!("`help {command}` shows the expected arguments")),
        }
    }
}
