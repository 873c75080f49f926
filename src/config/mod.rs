//! Environment bootstrapping: mode resolution, env files and parsing.

mod builder;
mod defaults;
mod env;
mod error;
mod file;
mod host;
mod mode;
mod parse;

pub use builder::Bootstrap;
pub use defaults::default_content;
pub use env::Environment;
pub use error::ConfigError;
pub use file::{ensure_env_file, read_env_file, EnvFile};
pub use host::{DesktopHost, Host, ProcessHost, ENV_DIR_NAME};
pub use mode::{resolve_mode, Mode, DEFAULT_MODE_VAR};
pub use parse::parse_env;
