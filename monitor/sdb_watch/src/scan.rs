//! Change detection over the active list.

use std::fmt;

use sdb_eval::{ExprError, RegisterResolver};
use sdb_ir::Word;
use tracing::{info, warn};

use crate::pool::{WatchpointId, WatchpointPool};

/// A watchpoint whose value moved since the previous scan.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct WatchChange {
    pub id: WatchpointId,
    pub expression: String,
    pub old_value: Word,
    pub new_value: Word,
}

impl fmt::Display for WatchChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Watchpoint {}: {}", self.id, self.expression)?;
        writeln!(f, "Old value = {} ({:#x})", self.old_value, self.old_value)?;
        write!(f, "New value = {} ({:#x})", self.new_value, self.new_value)
    }
}

/// A watchpoint whose expression could not be evaluated this scan.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct WatchFailure {
    pub id: WatchpointId,
    pub expression: String,
    pub error: ExprError,
}

impl fmt::Display for WatchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "watchpoint {} (`{}`) could not be evaluated: {}",
            self.id, self.expression, self.error
        )
    }
}

/// Outcome of one pass over the active list, in list order.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ScanReport {
    pub changes: Vec<WatchChange>,
    pub failures: Vec<WatchFailure>,
}

impl ScanReport {
    /// At least one watchpoint changed value.
    pub fn triggered(&self) -> bool {
        !self.changes.is_empty()
    }

    /// `Ok(triggered)` if every watchpoint evaluated, otherwise the failures
    /// together with whatever changes the same pass saw.
    pub fn into_result(self) -> Result<bool, ScanError> {
        if self.failures.is_empty() {
            Ok(self.triggered())
        } else {
            Err(ScanError {
                failures: self.failures,
                changes: self.changes,
            })
        }
    }
}

/// One or more watchpoints failed during a scan.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ScanError {
    pub failures: Vec<WatchFailure>,
    pub changes: Vec<WatchChange>,
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.failures.as_slice() {
            [single] => fmt::Display::fmt(single, f),
            failures => write!(f, "{} watchpoints could not be evaluated", failures.len()),
        }
    }
}

impl std::error::Error for ScanError {}

impl WatchpointPool {
    /// Re-evaluate every active watchpoint.
    ///
    /// Changed values are recorded and become the new baseline. A failing
    /// expression is recorded and keeps its old baseline; scanning carries
    /// on with the next watchpoint.
    #[tracing::instrument(level = "debug", skip_all, fields(active = self.active_len()))]
    pub fn scan(&mut self, regs: &dyn RegisterResolver) -> ScanReport {
        let mut report = ScanReport::default();
        let mut cursor = self.active;
        while let Some(i) = cursor {
            let slot = &mut self.slots[i];
            cursor = slot.next;
            match sdb_eval::expr(&slot.expression, regs) {
                Ok(new_value) if new_value != slot.last_value => {
                    info!(id = %slot.id, old = slot.last_value, new = new_value, "watchpoint triggered");
                    report.changes.push(WatchChange {
                        id: slot.id,
                        expression: slot.expression.clone(),
                        old_value: slot.last_value,
                        new_value,
                    });
                    slot.last_value = new_value;
                }
                Ok(_) => {}
                Err(error) => {
                    warn!(id = %slot.id, %error, "watchpoint evaluation failed");
                    report.failures.push(WatchFailure {
                        id: slot.id,
                        expression: slot.expression.clone(),
                        error,
                    });
                }
            }
        }
        report
    }
}
