//! Command-line configuration for the `sdb` binary.

use std::fmt;

use sdb_diagnostic::emitter::ColorMode;

/// Settings for one monitor session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MonitorConfig {
    pub color: ColorMode,
    /// No prompt; read commands until end of input and fail if any did.
    pub batch: bool,
}

/// What the command line asks for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigAction {
    Run(MonitorConfig),
    Help,
    Version,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    UnknownOption(String),
    BadColor(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::UnknownOption(arg) => write!(f, "unknown option '{arg}'"),
            ConfigError::BadColor(value) => write!(
                f,
                "invalid color mode '{value}' (expected auto, always or never)"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

impl MonitorConfig {
    /// Parse arguments (without the program name).
    ///
    /// `no_color` reflects the `NO_COLOR` environment variable and wins over
    /// `--color`.
    pub fn from_args<I>(args: I, no_color: bool) -> Result<ConfigAction, ConfigError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut config = MonitorConfig::default();
        for arg in args {
            let arg = arg.as_ref();
            if let Some(value) = arg.strip_prefix("--color=") {
                config.color =
                    ColorMode::parse(value).ok_or_else(|| ConfigError::BadColor(value.to_owned()))?;
            } else if arg == "-b" || arg == "--batch" {
                config.batch = true;
            } else if arg == "-h" || arg == "--help" {
                return Ok(ConfigAction::Help);
            } else if arg == "-V" || arg == "--version" {
                return Ok(ConfigAction::Version);
            } else {
                return Err(ConfigError::UnknownOption(arg.to_owned()));
            }
        }
        if no_color {
            config.color = ColorMode::Never;
        }
        Ok(ConfigAction::Run(config))
    }
}
