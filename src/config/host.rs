//! Host capabilities the bootstrapper depends on.
//!
//! The bootstrap sequence only needs two facts from its host: where env
//! files live and whether the running build is a packaged release.

use std::path::PathBuf;

use tracing::debug;

use super::ConfigError;

/// Name of the directory holding env files under the host's root.
pub const ENV_DIR_NAME: &str = "env";

pub trait Host: std::fmt::Debug {
    /// Directory that holds one `.env.<mode>` file per mode.
    fn env_dir(&self) -> Result<PathBuf, ConfigError>;

    /// Whether this is a packaged (distributed) build.
    fn is_packaged(&self) -> bool;
}

/// A plain process: env files live in `./env` relative to a root directory.
#[derive(Debug, Clone, Default)]
pub struct ProcessHost {
    root: Option<PathBuf>,
}

impl ProcessHost {
    /// Uses the current working directory at the time of resolution.
    pub fn current() -> Self {
        Self::default()
    }

    /// Uses `root` in place of the working directory.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }
}

impl Host for ProcessHost {
    fn env_dir(&self) -> Result<PathBuf, ConfigError> {
        let root = match &self.root {
            Some(root) => root.clone(),
            None => std::env::current_dir().map_err(|_| ConfigError::NoBaseDir)?,
        };
        let dir = root.join(ENV_DIR_NAME);
        debug!(dir = %dir.display(), "resolved process env directory");
        Ok(dir)
    }

    fn is_packaged(&self) -> bool {
        false
    }
}

/// A desktop application: env files live under the per-user data directory.
#[derive(Debug, Clone)]
pub struct DesktopHost {
    user_data: PathBuf,
    packaged: bool,
}

impl DesktopHost {
    pub fn new(user_data: impl Into<PathBuf>, packaged: bool) -> Self {
        Self {
            user_data: user_data.into(),
            packaged,
        }
    }

    /// Derives the user data directory as `<platform config dir>/<app_name>`.
    ///
    /// Returns `None` when the platform has no such directory.
    pub fn for_app(app_name: &str, packaged: bool) -> Option<Self> {
        dirs::config_dir().map(|dir| Self::new(dir.join(app_name), packaged))
    }

    pub fn user_data(&self) -> &std::path::Path {
        &self.user_data
    }
}

impl Host for DesktopHost {
    fn env_dir(&self) -> Result<PathBuf, ConfigError> {
        let dir = self.user_data.join(ENV_DIR_NAME);
        debug!(dir = %dir.display(), "resolved desktop env directory");
        Ok(dir)
    }

    fn is_packaged(&self) -> bool {
        self.packaged
    }
}
