//! Error codes for monitor diagnostics.
//!
//! Format: E#### where the first digit names the layer:
//! - E0xxx: tokenizer
//! - E1xxx: evaluator
//! - E2xxx: watchpoints
//! - E3xxx: registers and monitor commands

use std::fmt;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Tokenizer (E0xxx)
    /// No lexical rule matches the input
    E0001,
    /// Token text exceeds the token length limit
    E0002,
    /// Expression has too many tokens
    E0003,

    // Evaluator (E1xxx)
    /// Missing operand (empty sub-expression)
    E1001,
    /// Unknown register name
    E1002,
    /// Numeric literal does not fit a machine word
    E1003,
    /// No operator to split the expression on
    E1004,
    /// Division by zero
    E1005,

    // Watchpoints (E2xxx)
    /// Watchpoint pool or id counter exhausted
    E2001,
    /// No active watchpoint with that number
    E2002,
    /// Watch expression too long to store
    E2003,
    /// Watch expression could not be evaluated on the current registers
    E2004,

    // Registers and commands (E3xxx)
    /// Unknown register in `set`
    E3001,
    /// Unknown command
    E3002,
    /// Malformed command arguments
    E3003,
}

impl ErrorCode {
    /// Every code, in numeric order.
    pub const ALL: &'static [ErrorCode] = &[
        ErrorCode::E0001,
        ErrorCode::E0002,
        ErrorCode::E0003,
        ErrorCode::E1001,
        ErrorCode::E1002,
        ErrorCode::E1003,
        ErrorCode::E1004,
        ErrorCode::E1005,
        ErrorCode::E2001,
        ErrorCode::E2002,
        ErrorCode::E2003,
        ErrorCode::E2004,
        ErrorCode::E3001,
        ErrorCode::E3002,
        ErrorCode::E3003,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "E0001",
            ErrorCode::E0002 => "E0002",
            ErrorCode::E0003 => "E0003",
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E1004 => "E1004",
            ErrorCode::E1005 => "E1005",
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E2004 => "E2004",
            ErrorCode::E3001 => "E3001",
            ErrorCode::E3002 => "E3002",
            ErrorCode::E3003 => "E3003",
        }
    }

    /// One-line explanation shown by `help <code>`.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "no token rule matches the input at the marked position",
            ErrorCode::E0002 => "a literal or register name is longer than 31 characters",
            ErrorCode::E0003 => "the expression has more than 65536 tokens",
            ErrorCode::E1001 => "an operator is missing its left or right operand",
            ErrorCode::E1002 => "registers are `$pc` or an ABI name such as `$a0`",
            ErrorCode::E1003 => "the literal does not fit in a 32-bit machine word",
            ErrorCode::E1004 => "adjacent operands need an operator between them",
            ErrorCode::E1005 => "the right-hand side of `/` evaluated to zero",
            ErrorCode::E2001 => "no watchpoint can be created: every slot is in use or every number was issued",
            ErrorCode::E2002 => "`info w` lists the active watchpoint numbers",
            ErrorCode::E2003 => "watch expressions are limited to 127 characters",
            ErrorCode::E2004 => "the watch expression cannot be evaluated on the current registers; it stays active",
            ErrorCode::E3001 => "`info r` lists the register names",
            ErrorCode::E3002 => "`help` lists the available commands",
            ErrorCode::E3003 => "`help <command>` shows the expected arguments",
        }
    }

    /// Look up a code by its `E####` text.
    pub fn parse(text: &str) -> Option<ErrorCode> {
        ErrorCode::ALL
            .iter()
            .copied()
            .find(|code| code.as_str().eq_ignore_ascii_case(text))
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
