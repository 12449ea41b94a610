//! Command line parsing.
//!
//! Each input line is one command. Arguments that hold an expression keep
//! their byte offset within the line so diagnostics can underline the right
//! spot.

use std::fmt;

use sdb_ir::Span;

/// Name, argument synopsis and one-line description of every command.
pub const COMMANDS: &[(&str, &str, &str)] = &[
    ("help", "[CMD]", "List commands, or describe one command or error code"),
    ("q", "", "Quit the monitor"),
    ("si", "[N]", "Step N instructions (default 1), stopping when a watchpoint fires"),
    ("info", "r|w", "Print registers (r) or watchpoints (w)"),
    ("p", "EXPR", "Evaluate EXPR and print the result"),
    ("w", "EXPR", "Stop when the value of EXPR changes"),
    ("d", "N", "Delete watchpoint N"),
    ("set", "REG EXPR", "Write the value of EXPR into register REG"),
];

/// An expression argument and where it starts in the line.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Arg<'a> {
    pub text: &'a str,
    pub offset: u32,
}

impl<'a> Arg<'a> {
    fn new(text: &'a str, offset: usize) -> Self {
        Arg {
            text,
            offset: u32::try_from(offset).unwrap_or(u32::MAX),
        }
    }

    /// Span covering the whole argument.
    pub fn span(&self) -> Span {
        let start = self.offset as usize;
        Span::from_offsets(start, start + self.text.len())
    }
}

/// One parsed monitor command.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Command<'a> {
    Help(Option<&'a str>),
    Quit,
    Step(u64),
    InfoRegisters,
    InfoWatchpoints,
    Print(Arg<'a>),
    Watch(Arg<'a>),
    Delete(u32),
    Set { register: Arg<'a>, value: Arg<'a> },
}

/// A line that is not a well-formed command.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CommandError {
    Unknown { name: String, span: Span },
    BadArgs {
        command: &'static str,
        message: String,
        span: Span,
    },
}

impl CommandError {
    pub fn span(&self) -> Span {
        match self {
            CommandError::Unknown { span, .. } | CommandError::BadArgs { span, .. } => *span,
        }
    }
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::Unknown { name, .. } => write!(f, "unknown command `{name}`"),
            CommandError::BadArgs {
                command, message, ..
            } => write!(f, "{command}: {message}"),
        }
    }
}

impl std::error::Error for CommandError {}

impl<'a> Command<'a> {
    /// Parse one line. Blank lines give `Ok(None)`.
    pub fn parse(line: &'a str) -> Result<Option<Command<'a>>, CommandError> {
        let mut cursor = Cursor { line, pos: 0 };
        let Some(name) = cursor.word() else {
            return Ok(None);
        };

        let command = match name.text {
            "help" => {
                let topic = cursor.word().map(|w| w.text);
                cursor.finish("help")?;
                Command::Help(topic)
            }
            "q" => {
                cursor.finish("q")?;
                Command::Quit
            }
            "si" => {
                let count = match cursor.word() {
                    None => 1,
                    Some(arg) => arg.text.parse::<u64>().map_err(|_| CommandError::BadArgs {
                        command: "si",
                        message: format!("`{}` is not a step count", arg.text),
                        span: arg.span(),
                    })?,
                };
                cursor.finish("si")?;
                Command::Step(count)
            }
            "info" => {
                let command = match cursor.word() {
                    Some(Arg { text: "r", .. }) => Command::InfoRegisters,
                    Some(Arg { text: "w", .. }) => Command::InfoWatchpoints,
                    Some(arg) => {
                        return Err(CommandError::BadArgs {
                            command: "info",
                            message: format!(
                                "unknown subcommand `{}`, expected `r` or `w`",
                                arg.text
                            ),
                            span: arg.span(),
                        })
                    }
                    None => return Err(cursor.missing("info", "expected `r` or `w`")),
                };
                cursor.finish("info")?;
                command
            }
            "p" => Command::Print(cursor.expression("p")?),
            "w" => Command::Watch(cursor.expression("w")?),
            "d" => {
                let Some(arg) = cursor.word() else {
                    return Err(cursor.missing("d", "expected a watchpoint number"));
                };
                let id = arg.text.parse::<u32>().map_err(|_| CommandError::BadArgs {
                    command: "d",
                    message: format!("`{}` is not a watchpoint number", arg.text),
                    span: arg.span(),
                })?;
                cursor.finish("d")?;
                Command::Delete(id)
            }
            "set" => {
                let Some(register) = cursor.word() else {
                    return Err(cursor.missing("set", "expected a register name"));
                };
                let value = cursor.expression("set")?;
                Command::Set { register, value }
            }
            other => {
                return Err(CommandError::Unknown {
                    name: other.to_owned(),
                    span: name.span(),
                })
            }
        };
        Ok(Some(command))
    }
}

/// Splits a line into whitespace separated words, tracking byte offsets.
struct Cursor<'a> {
    line: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn skip_whitespace(&mut self) {
        let rest = &self.line[self.pos..];
        self.pos += rest.len() - rest.trim_start().len();
    }

    fn word(&mut self) -> Option<Arg<'a>> {
        self.skip_whitespace();
        let rest = &self.line[self.pos..];
        if rest.is_empty() {
            return None;
        }
        let len = rest.find(char::is_whitespace).unwrap_or(rest.len());
        let arg = Arg::new(&rest[..len], self.pos);
        self.pos += len;
        Some(arg)
    }

    /// Everything left on the line, trimmed, or `None` if nothing is left.
    fn rest(&mut self) -> Option<Arg<'a>> {
        self.skip_whitespace();
        let text = self.line[self.pos..].trim_end();
        let arg = (!text.is_empty()).then(|| Arg::new(text, self.pos));
        self.pos = self.line.len();
        arg
    }

    fn expression(&mut self, command: &'static str) -> Result<Arg<'a>, CommandError> {
        self.rest()
            .ok_or_else(|| self.missing(command, "expected an expression"))
    }

    /// Reject trailing words.
    fn finish(&mut self, command: &'static str) -> Result<(), CommandError> {
        match self.rest() {
            None => Ok(()),
            Some(extra) => Err(CommandError::BadArgs {
                command,
                message: format!("unexpected argument `{}`", extra.text),
                span: extra.span(),
            }),
        }
    }

    fn missing(&self, command: &'static str, message: &str) -> CommandError {
        let end = self.line.trim_end().len();
        CommandError::BadArgs {
            command,
            message: format!("missing argument: {message}"),
            span: Span::from_offsets(end, end),
        }
    }
}
