//! Terminal Emitter
//!
//! Renders a diagnostic as a header line followed, when the input line is
//! known, by that line with the labelled spans underlined:
//!
//! ```text
//! error[E1005]: division by zero
//!   |
//!   | 10 / (2 - 2)
//!   |      ^^^^^^^ divisor evaluates to zero
//!   = note: ...
//! ```

use std::io::{self, Write};

use sdb_ir::Span;

use crate::{Diagnostic, Label, Severity};

use super::DiagnosticEmitter;

/// ANSI color codes for terminal output.
mod colors {
    pub const ERROR: &str = "\x1b[1;31m"; // Bold red
    pub const WARNING: &str = "\x1b[1;33m"; // Bold yellow
    pub const BOLD: &str = "\x1b[1m";
    pub const SECONDARY: &str = "\x1b[1;34m"; // Bold blue
    pub const RESET: &str = "\x1b[0m";
}

#[inline]
fn plural_s(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

/// Color output mode for terminal emitter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Colors when the output is a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// Resolve to a boolean; `is_tty` only matters for `Auto`.
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }

    /// Parse the value of `--color=`.
    pub fn parse(text: &str) -> Option<ColorMode> {
        match text {
            "auto" => Some(ColorMode::Auto),
            "always" => Some(ColorMode::Always),
            "never" => Some(ColorMode::Never),
            _ => None,
        }
    }
}

/// Terminal emitter with optional color support.
pub struct TerminalEmitter<W: Write> {
    writer: W,
    colors: bool,
    /// The input line spans refer to.
    source: Option<String>,
}

impl<W: Write> TerminalEmitter<W> {
    /// Create a terminal emitter.
    ///
    /// `is_tty` decides `ColorMode::Auto`.
    pub fn with_color_mode(writer: W, mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter {
            writer,
            colors: mode.should_use_colors(is_tty),
            source: None,
        }
    }

    /// Set the input line the next diagnostics point into.
    ///
    /// Without a source, labels fall back to `--> start..end: message`.
    pub fn set_source(&mut self, source: Option<&str>) {
        self.source = source.map(str::to_owned);
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_colored(&mut self, text: &str, color: &str) {
        if self.colors {
            let _ = write!(self.writer, "{color}{text}{}", colors::RESET);
        } else {
            let _ = write!(self.writer, "{text}");
        }
    }

    fn write_severity(&mut self, severity: Severity) {
        let color = match severity {
            Severity::Error => colors::ERROR,
            Severity::Warning => colors::WARNING,
        };
        self.write_colored(&severity.to_string(), color);
    }

    fn write_code(&mut self, code: &str) {
        if self.colors {
            let _ = write!(self.writer, "{}[{code}]{}", colors::BOLD, colors::RESET);
        } else {
            let _ = write!(self.writer, "[{code}]");
        }
    }

    fn write_gutter(&mut self) {
        self.write_colored("  |", colors::SECONDARY);
    }

    /// Source line followed by one underline row per label.
    fn write_snippet(&mut self, source: &str, labels: &[Label]) {
        self.write_gutter();
        let _ = writeln!(self.writer);
        self.write_gutter();
        let _ = writeln!(self.writer, " {source}");

        for label in labels {
            let (column, width) = display_columns(source, label.span);
            let marker = if label.is_primary { "^" } else { "-" };
            let underline = marker.repeat(width);

            self.write_gutter();
            let _ = write!(self.writer, " {:column$}", "");
            if label.is_primary {
                self.write_colored(&underline, colors::ERROR);
            } else {
                self.write_colored(&underline, colors::SECONDARY);
            }
            if label.message.is_empty() {
                let _ = writeln!(self.writer);
            } else {
                let _ = writeln!(self.writer, " {}", label.message);
            }
        }
    }

    /// Fallback when the input line is unknown.
    fn write_span_labels(&mut self, labels: &[Label]) {
        for label in labels {
            let marker = if label.is_primary { "-->" } else { "   " };
            let _ = write!(self.writer, "  {marker} {:?}: ", label.span);
            if label.is_primary {
                self.write_colored(&label.message, colors::ERROR);
            } else {
                self.write_colored(&label.message, colors::SECONDARY);
            }
            let _ = writeln!(self.writer);
        }
    }
}

impl TerminalEmitter<io::Stderr> {
    pub fn stderr(mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter::with_color_mode(io::stderr(), mode, is_tty)
    }
}

/// Column and underline width of `span` within `source`, in characters.
///
/// Spans past the end of the line point just after it; empty spans get a
/// single-character caret.
fn display_columns(source: &str, span: Span) -> (usize, usize) {
    let range = span.to_range();
    let start = range.start.min(source.len());
    let end = range.end.clamp(start, source.len());
    let column = source
        .get(..start)
        .map_or(start, |prefix| prefix.chars().count());
    let width = source
        .get(start..end)
        .map_or(end - start, |text| text.chars().count());
    (column, width.max(1))
}

impl<W: Write> DiagnosticEmitter for TerminalEmitter<W> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        // Header: severity[CODE]: message
        self.write_severity(diagnostic.severity);
        self.write_code(diagnostic.code.as_str());
        let _ = writeln!(self.writer, ": {}", diagnostic.message);

        if !diagnostic.labels.is_empty() {
            match self.source.take() {
                Some(source) => {
                    self.write_snippet(&source, &diagnostic.labels);
                    self.source = Some(source);
                }
                None => self.write_span_labels(&diagnostic.labels),
            }
        }

        for note in &diagnostic.notes {
            let _ = write!(self.writer, "  = ");
            if self.colors {
                let _ = write!(self.writer, "{}note{}", colors::BOLD, colors::RESET);
            } else {
                let _ = write!(self.writer, "note");
            }
            let _ = writeln!(self.writer, ": {note}");
        }
    }

    fn flush(&mut self) {
        let _ = self.writer.flush();
    }

    fn emit_summary(&mut self, error_count: usize) {
        if error_count == 0 {
            return;
        }
        self.write_colored("error", colors::ERROR);
        let _ = writeln!(
            self.writer,
            ": {error_count} command{} failed",
            plural_s(error_count)
        );
    }
}
