//! sdb: simple debugger monitor
//!
//! Reads commands from stdin, one per line.

use std::io::{self, BufRead, IsTerminal};
use std::process::ExitCode;

use sdb_diagnostic::emitter::TerminalEmitter;
use sdbc::{ConfigAction, Monitor, MonitorConfig, Outcome, COMMANDS};

fn main() -> ExitCode {
    sdbc::init_tracing();

    let no_color = std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
    let config = match MonitorConfig::from_args(std::env::args().skip(1), no_color) {
        Ok(ConfigAction::Run(config)) => config,
        Ok(ConfigAction::Help) => {
            print_usage();
            return ExitCode::SUCCESS;
        }
        Ok(ConfigAction::Version) => {
            println!("sdb {}", env!("CARGO_PKG_VERSION"));
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("error: {err}");
            eprintln!();
            print_usage();
            return ExitCode::FAILURE;
        }
    };

    let emitter = TerminalEmitter::stderr(config.color, io::stderr().is_terminal());
    let mut monitor = Monitor::new(io::stdout().lock(), emitter);
    let mut lines = io::stdin().lock().lines();

    loop {
        if !config.batch {
            monitor.prompt();
        }
        let line = match lines.next() {
            Some(Ok(line)) => line,
            Some(Err(err)) => {
                eprintln!("error: failed to read input: {err}");
                return ExitCode::FAILURE;
            }
            None => break,
        };
        if monitor.execute(&line) == Outcome::Quit {
            break;
        }
    }

    if config.batch && monitor.finish() > 0 {
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn print_usage() {
    println!("sdb: simple debugger monitor for an RV32 register file");
    println!();
    println!("Usage: sdb [options] < commands");
    println!();
    println!("Options:");
    println!("  --color=<mode>    Diagnostics color: auto (default), always, never");
    println!("  -b, --batch       No prompt; exit with status 1 if any command failed");
    println!("  -h, --help        Show this help message");
    println!("  -V, --version     Show version information");
    println!();
    println!("Commands:");
    for (name, args, description) in COMMANDS {
        let usage = format!("{name} {args}");
        println!("  {:<16}{description}", usage.trim_end());
    }
    println!();
    println!("Environment:");
    println!("  NO_COLOR          Disable colored diagnostics");
    println!("  RUST_LOG          Enable tracing output (e.g. RUST_LOG=sdb_watch=debug)");
}
