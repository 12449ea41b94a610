//! General purpose registers and program counter.

use std::fmt;

use rustc_hash::FxHashMap;
use sdb_eval::RegisterResolver;
use sdb_ir::Word;
use tracing::{debug, trace};

/// Number of general purpose registers.
pub const GPR_COUNT: usize = 32;

/// Value of `pc` after reset.
pub const RESET_VECTOR: Word = 0x8000_0000;

/// Canonical ABI names, indexed by register number.
pub const REG_NAMES: [&str; GPR_COUNT] = [
    "zero", "ra", "sp", "gp", "tp", "t0", "t1", "t2", //
    "s0", "s1", "a0", "a1", "a2", "a3", "a4", "a5", //
    "a6", "a7", "s2", "s3", "s4", "s5", "s6", "s7", //
    "s8", "s9", "s10", "s11", "t3", "t4", "t5", "t6",
];

/// Width of one instruction in bytes.
const INSTRUCTION_LEN: Word = 4;

/// Failure to write a register by name.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum RegisterError {
    /// No register has this name.
    Unknown { name: String },
}

impl fmt::Display for RegisterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegisterError::Unknown { name } => write!(f, "unknown register `{name}`"),
        }
    }
}

impl std::error::Error for RegisterError {}

/// The RV32 integer register file.
///
/// `zero` always reads as 0. Names are matched exactly, so `$A0` is not
/// `$a0`.
#[derive(Clone, Debug)]
pub struct RegisterFile {
    gpr: [Word; GPR_COUNT],
    pc: Word,
    index: FxHashMap<&'static str, usize>,
}

impl RegisterFile {
    pub fn new() -> Self {
        let index = REG_NAMES
            .iter()
            .enumerate()
            .map(|(i, name)| (*name, i))
            .collect();
        RegisterFile {
            gpr: [0; GPR_COUNT],
            pc: RESET_VECTOR,
            index,
        }
    }

    /// Look up a register by name. `pc` is checked before the GPR table.
    pub fn read(&self, name: &str) -> Option<Word> {
        if name == "pc" {
            return Some(self.pc);
        }
        self.index.get(name).map(|&i| self.gpr[i])
    }

    /// Write a register by name. Writes to `zero` are accepted and dropped.
    pub fn write(&mut self, name: &str, value: Word) -> Result<(), RegisterError> {
        if name == "pc" {
            self.pc = value;
        } else {
            let Some(&i) = self.index.get(name) else {
                return Err(RegisterError::Unknown {
                    name: name.to_owned(),
                });
            };
            if i != 0 {
                self.gpr[i] = value;
            }
        }
        debug!(register = name, value, "register written");
        Ok(())
    }

    /// Retire one idle instruction.
    pub fn step(&mut self) {
        self.pc = self.pc.wrapping_add(INSTRUCTION_LEN);
        trace!(pc = self.pc, "step");
    }

    /// Register dump, one line per GPR followed by `pc`.
    pub fn display(&self) -> String {
        let mut out = String::with_capacity((GPR_COUNT + 1) * 28);
        for (name, value) in REG_NAMES.iter().zip(self.gpr) {
            push_line(&mut out, name, value);
        }
        push_line(&mut out, "pc", self.pc);
        out
    }
}

impl Default for RegisterFile {
    fn default() -> Self {
        Self::new()
    }
}

impl RegisterResolver for RegisterFile {
    fn resolve(&self, name: &str) -> Option<Word> {
        self.read(name)
    }
}

fn push_line(out: &mut String, name: &str, value: Word) {
    use fmt::Write;
    let signed = sdb_ir::SWord::from_ne_bytes(value.to_ne_bytes());
    // Writing into a String cannot fail.
    let _ = writeln!(out, "{name:<4} 0x{value:08x} {signed}");
}

#[cfg(test)]
mod tests;
