use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("environment mode is empty")]
    EmptyMode,

    #[error("mode variable '{0}' is not valid unicode")]
    InvalidModeVar(String),

    #[error("could not determine a base directory for env files")]
    NoBaseDir,

    #[error("failed to create env directory '{path}': {source}")]
    CreateDirError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write default env file '{path}': {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to read env file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to deserialize environment: {0}")]
    DeserializeError(#[from] toml::de::Error),
}
