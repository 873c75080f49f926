pub mod config;
pub mod context;
mod error;

pub use config::{Bootstrap, ConfigError, Environment, Mode};
pub use context::AppContext;
pub use error::Error;
