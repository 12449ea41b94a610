//! Diagnostics for the monitor.
//!
//! Every failure the operator can trigger is reported as a [`Diagnostic`]:
//! - an error code for searchability (`help E1005`)
//! - a message saying what went wrong
//! - a labelled span pointing into the typed expression
//! - optional notes
//!
//! The [`emitter::TerminalEmitter`] renders the input line with a caret
//! underline beneath the labelled span.

mod diagnostic;
pub mod emitter;
mod error_code;

pub use diagnostic::{Diagnostic, Label, Severity};
pub use error_code::ErrorCode;
