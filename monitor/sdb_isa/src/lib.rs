//! RV32 machine state as seen by the monitor.
//!
//! There is no CPU core here. [`RegisterFile`] holds the 32 general purpose
//! registers and `pc`, answers register lookups for the evaluator, and can
//! retire idle instructions so that stepping moves `pc`.

mod registers;

pub use registers::{RegisterError, RegisterFile, GPR_COUNT, REG_NAMES, RESET_VECTOR};
pub use sdb_ir::Word;
