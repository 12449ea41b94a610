//! Diagnostic emitters.
//!
//! The monitor only needs human-readable terminal output; the trait keeps
//! the command layer independent of where diagnostics end up.

mod terminal;

pub use terminal::{ColorMode, TerminalEmitter};

use crate::Diagnostic;

/// Sink for rendered diagnostics.
pub trait DiagnosticEmitter {
    fn emit(&mut self, diagnostic: &Diagnostic);

    fn flush(&mut self);

    /// Closing line after a batch run, e.g. `error: 2 commands failed`.
    fn emit_summary(&mut self, error_count: usize);
}
