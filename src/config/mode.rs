//! Operating mode and its resolution.

use std::fmt;

use super::ConfigError;

/// Process variable consulted for a mode override unless configured otherwise.
pub const DEFAULT_MODE_VAR: &str = "NODE_ENV";

/// The named operating profile selecting which env file is loaded.
///
/// `dev` and `prod` have registered defaults. Any other non-empty name is
/// accepted as [`Mode::Custom`] and gets its own `.env.<name>` file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Mode {
    Development,
    Production,
    Custom(String),
}

impl Mode {
    /// Builds a mode from its name, rejecting the empty string.
    pub fn parse(name: &str) -> Result<Self, ConfigError> {
        match name {
            "" => Err(ConfigError::EmptyMode),
            "dev" => Ok(Mode::Development),
            "prod" => Ok(Mode::Production),
            other => Ok(Mode::Custom(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Mode::Development => "dev",
            Mode::Production => "prod",
            Mode::Custom(name) => name.as_str(),
        }
    }

    /// File name of this mode's env file, e.g. `.env.dev`.
    pub fn file_name(&self) -> String {
        format!(".env.{}", self.as_str())
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolves the active mode.
///
/// A present override wins unconditionally, including an empty one, which
/// is then rejected. Without an override, packaged builds run as `prod` and
/// everything else as `dev`.
pub fn resolve_mode(override_value: Option<&str>, packaged: bool) -> Result<Mode, ConfigError> {
    match override_value {
        Some(name) => Mode::parse(name),
        None if packaged => Ok(Mode::Production),
        None => Ok(Mode::Development),
    }
}

/// Reads a mode override from the process environment.
///
/// Returns `Ok(None)` when the variable is unset.
pub fn read_mode_var(var: &str) -> Result<Option<String>, ConfigError> {
    match std::env::var(var) {
        Ok(value) => Ok(Some(value)),
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(std::env::VarError::NotUnicode(_)) => {
            Err(ConfigError::InvalidModeVar(var.to_string()))
        }
    }
}
