//! The command loop body.

use std::io::Write;

use sdb_diagnostic::emitter::{DiagnosticEmitter, TerminalEmitter};
use sdb_diagnostic::{Diagnostic, ErrorCode};
use rustc_hash::FxHashSet;
use sdb_isa::RegisterFile;
use sdb_watch::{WatchpointId, WatchpointPool};
use tracing::debug;

use crate::commands::{Arg, Command, COMMANDS};
use crate::reporting::ToDiagnostic;

/// Printed before each interactive command.
pub const PROMPT: &str = "(sdb) ";

/// Whether the loop should keep reading commands.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Outcome {
    Continue,
    Quit,
}

/// Machine state plus the two output channels.
///
/// Regular output goes to `out`; diagnostics go through the emitter. A
/// command that emits at least one error counts once towards the summary.
pub struct Monitor<O: Write, E: Write> {
    regs: RegisterFile,
    watchpoints: WatchpointPool,
    out: O,
    emitter: TerminalEmitter<E>,
    error_count: usize,
    /// The current command has emitted an error.
    failed: bool,
}

impl<O: Write, E: Write> Monitor<O, E> {
    pub fn new(out: O, emitter: TerminalEmitter<E>) -> Self {
        Monitor {
            regs: RegisterFile::new(),
            watchpoints: WatchpointPool::new(),
            out,
            emitter,
            error_count: 0,
            failed: false,
        }
    }

    pub fn prompt(&mut self) {
        let _ = write!(self.out, "{PROMPT}");
        let _ = self.out.flush();
    }

    /// Run one input line.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn execute(&mut self, line: &str) -> Outcome {
        self.failed = false;
        let outcome = match Command::parse(line) {
            Ok(None) => Outcome::Continue,
            Ok(Some(command)) => self.dispatch(line, command),
            Err(err) => {
                self.report(&err.to_diagnostic(0), Some(line));
                Outcome::Continue
            }
        };
        if self.failed {
            self.error_count += 1;
        }
        let _ = self.out.flush();
        self.emitter.flush();
        outcome
    }

    /// Print the batch summary and return the error count.
    pub fn finish(&mut self) -> usize {
        self.emitter.emit_summary(self.error_count);
        self.emitter.flush();
        self.error_count
    }

    /// Take the output channels back.
    pub fn into_parts(self) -> (O, E) {
        (self.out, self.emitter.into_inner())
    }

    fn dispatch(&mut self, line: &str, command: Command<'_>) -> Outcome {
        debug!(?command, "dispatch");
        match command {
            Command::Quit => return Outcome::Quit,
            Command::Help(topic) => self.help(line, topic),
            Command::Step(count) => self.step(count),
            Command::InfoRegisters => {
                let _ = write!(self.out, "{}", self.regs.display());
            }
            Command::InfoWatchpoints => self.list_watchpoints(),
            Command::Print(arg) => self.print(line, arg),
            Command::Watch(arg) => self.watch(line, arg),
            Command::Delete(id) => {
                if let Err(err) = self.watchpoints.delete(WatchpointId::new(id)) {
                    self.report(&err.to_diagnostic(0), Some(line));
                } else {
                    let _ = writeln!(self.out, "Deleted watchpoint {id}");
                }
            }
            Command::Set { register, value } => self.set_register(line, register, value),
        }
        Outcome::Continue
    }

    fn help(&mut self, line: &str, topic: Option<&str>) {
        let Some(topic) = topic else {
            for (name, args, description) in COMMANDS {
                let usage = format!("{name} {args}");
                let _ = writeln!(self.out, "{:<14}{description}", usage.trim_end());
            }
            return;
        };
        if let Some((name, args, description)) = COMMANDS.iter().find(|(n, _, _)| *n == topic) {
            let usage = format!("{name} {args}");
            let _ = writeln!(self.out, "{}", usage.trim_end());
            let _ = writeln!(self.out, "    {description}");
        } else if let Some(code) = ErrorCode::parse(topic) {
            let _ = writeln!(self.out, "{code}: {}", code.description());
        } else {
            let diag = Diagnostic::error(ErrorCode::E3002)
                .with_message(format!("no help for `{topic}`"))
                .with_note("`help` lists the available commands");
            self.report(&diag, Some(line));
        }
    }

    /// Retire `count` idle instructions, scanning watchpoints after each.
    ///
    /// Only a value change stops early. A watchpoint that fails to evaluate
    /// is reported the first time it fails within this command.
    fn step(&mut self, count: u64) {
        let mut failing = FxHashSet::default();
        for executed in 1..=count {
            self.regs.step();
            let report = self.watchpoints.scan(&self.regs);
            for change in &report.changes {
                let _ = writeln!(self.out, "{change}");
            }
            let triggered = match report.into_result() {
                Ok(triggered) => triggered,
                Err(err) => {
                    for failure in &err.failures {
                        if failing.insert(failure.id) {
                            self.report(&failure.to_diagnostic(0), Some(&failure.expression));
                        }
                    }
                    !err.changes.is_empty()
                }
            };
            if triggered {
                debug!(executed, requested = count, "stepping stopped by watchpoint");
                break;
            }
        }
    }

    fn list_watchpoints(&mut self) {
        let active = self.watchpoints.list_active();
        if active.is_empty() {
            let _ = writeln!(self.out, "No watchpoints.");
            return;
        }
        let _ = writeln!(self.out, "{:<6}{:<24}Value", "Num", "Expr");
        for wp in active {
            let _ = writeln!(
                self.out,
                "{:<6}{:<24}{} ({:#x})",
                wp.id, wp.expression, wp.last_value, wp.last_value
            );
        }
    }

    fn print(&mut self, line: &str, arg: Arg<'_>) {
        match sdb_eval::expr(arg.text, &self.regs) {
            Ok(value) => {
                let _ = writeln!(self.out, "{value} ({value:#x})");
            }
            Err(err) => self.report(&err.to_diagnostic(arg.offset), Some(line)),
        }
    }

    fn watch(&mut self, line: &str, arg: Arg<'_>) {
        match self.watchpoints.set(arg.text, &self.regs) {
            Ok(new) => {
                let _ = writeln!(self.out, "Watchpoint {}: {}", new.id, arg.text);
                if let Some(err) = new.pending {
                    let inner = err.to_diagnostic(arg.offset);
                    let mut diag = Diagnostic::warning(ErrorCode::E2004).with_message(format!(
                        "watchpoint {} cannot be evaluated yet: {err}",
                        new.id
                    ));
                    diag.labels = inner.labels;
                    let diag = diag
                        .with_note(format!("caused by {}", inner.code))
                        .with_note("it is checked again after every step, starting from 0");
                    self.report(&diag, Some(line));
                }
            }
            Err(err) => self.report(&err.to_diagnostic(arg.offset), Some(line)),
        }
    }

    fn set_register(&mut self, line: &str, register: Arg<'_>, expression: Arg<'_>) {
        let value = match sdb_eval::expr(expression.text, &self.regs) {
            Ok(value) => value,
            Err(err) => {
                self.report(&err.to_diagnostic(expression.offset), Some(line));
                return;
            }
        };
        let name = register.text.strip_prefix('$').unwrap_or(register.text);
        if let Err(err) = self.regs.write(name, value) {
            let diag = err
                .to_diagnostic(0)
                .with_label(register.span(), "not a register");
            self.report(&diag, Some(line));
        }
    }

    fn report(&mut self, diagnostic: &Diagnostic, source: Option<&str>) {
        self.failed |= diagnostic.is_error();
        self.emitter.set_source(source);
        self.emitter.emit(diagnostic);
    }
}
