use crate::config::ConfigError;
use thiserror::Error;

/// Errors raised while building an [`AppContext`](crate::AppContext).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("environment bootstrap failed: {0}")]
    Config(#[from] ConfigError),

    #[error("no environment attached to the application context")]
    MissingEnvironment,
}
