//! sdb: a simple debugger monitor.
//!
//! The monitor reads one command per line, evaluates expressions over the
//! RV32 register file, and keeps a pool of watchpoints that are checked
//! after every step.
//!
//! ```text
//! line ──► Command::parse ──► Monitor::execute
//!                                 │
//!                 ┌───────────────┼────────────────┐
//!                 ▼               ▼                ▼
//!           sdb_eval::expr   RegisterFile    WatchpointPool::scan
//! ```
//!
//! Failures are rendered through [`sdb_diagnostic`] with the input line and
//! an underline beneath the offending part.

use std::sync::Once;

mod commands;
pub mod config;
mod monitor;
pub mod reporting;

pub use commands::{Arg, Command, CommandError, COMMANDS};
pub use config::{ConfigAction, ConfigError, MonitorConfig};
pub use monitor::{Monitor, Outcome, PROMPT};

static TRACING_INIT: Once = Once::new();

/// Install the tracing subscriber, once, and only if `RUST_LOG` is set.
///
/// Output goes to stderr as an indented tree so nested command and scan
/// spans stay readable.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    tracing_tree::HierarchicalLayer::new(2)
                        .with_writer(std::io::stderr)
                        .with_targets(true)
                        .with_bracketed_fields(true),
                )
                .with(filter)
                .init();
        }
    });
}
