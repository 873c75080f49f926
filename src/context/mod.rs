//! Application context carrying the resolved environment.

use crate::config::{Bootstrap, Environment, Mode};
use crate::Error;

/// Central application context holding the startup environment.
///
/// Built once at startup and passed to whatever needs configuration, in
/// place of reading process-wide variables.
///
/// ## Example
///
/// ```no_run
/// use dragon_env::{AppContext, Bootstrap};
///
/// let ctx = AppContext::bootstrap(Bootstrap::builder())?;
///
/// let port = ctx.var("PORT").unwrap_or("60000");
/// # Ok::<(), dragon_env::Error>(())
/// ```
#[derive(Debug)]
pub struct AppContext {
    environment: Environment,
}

impl AppContext {
    /// Creates a new builder for constructing an `AppContext`.
    pub fn builder() -> AppContextBuilder {
        AppContextBuilder { environment: None }
    }

    /// Runs `bootstrap` and wraps the result in a context.
    pub fn bootstrap(bootstrap: Bootstrap) -> Result<Self, Error> {
        Self::builder().with_environment(bootstrap.run()?).build()
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn mode(&self) -> &Mode {
        self.environment.mode()
    }

    /// Looks up a single environment value.
    pub fn var(&self, key: &str) -> Option<&str> {
        self.environment.get(key)
    }
}

/// Builder for constructing an [`AppContext`].
#[derive(Debug)]
#[must_use = "builders do nothing until .build() is called"]
pub struct AppContextBuilder {
    environment: Option<Environment>,
}

impl AppContextBuilder {
    /// Attaches the environment produced by [`Bootstrap::run`].
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = Some(environment);
        self
    }

    /// Builds the `AppContext`.
    ///
    /// Returns an error if no environment was provided.
    pub fn build(self) -> Result<AppContext, Error> {
        Ok(AppContext {
            environment: self.environment.ok_or(Error::MissingEnvironment)?,
        })
    }
}
