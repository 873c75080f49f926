use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use toml::Value;

use super::mode::Mode;
use super::ConfigError;

/// Environment state produced by a bootstrap run.
///
/// Holds the resolved mode, the env file it came from, and every key/value
/// pair after merging. Values are always strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    mode: Mode,
    path: PathBuf,
    created: bool,
    vars: BTreeMap<String, String>,
}

impl Environment {
    pub(crate) fn new(mode: Mode, path: PathBuf, created: bool) -> Self {
        Self {
            mode,
            path,
            created,
            vars: BTreeMap::new(),
        }
    }

    /// Merges pairs in order, overwriting existing keys.
    pub(crate) fn merge<I>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (key, value) in pairs {
            self.vars.insert(key, value);
        }
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    /// Path of the env file that was read.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the env file was created with defaults during this run.
    pub fn was_created(&self) -> bool {
        self.created
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    pub fn vars(&self) -> &BTreeMap<String, String> {
        &self.vars
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Writes every entry into the process environment, overwriting.
    ///
    /// Must run before other threads read or write the environment.
    pub fn apply_to_process(&self) {
        for (key, value) in &self.vars {
            // Empty keys and keys containing '=' or NUL are rejected by set_var.
            if key.is_empty() || key.contains(['=', '\0']) || value.contains('\0') {
                continue;
            }
            std::env::set_var(key, value);
        }
    }

    /// Deserializes the entries into `T`, keyed by variable name.
    ///
    /// Values stay strings, so target fields should be `String` or
    /// `Option<String>`.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, ConfigError> {
        let table: toml::Table = self
            .vars
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect();
        Value::Table(table)
            .try_into()
            .map_err(ConfigError::DeserializeError)
    }
}
