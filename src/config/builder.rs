use tracing::info;

use super::env::Environment;
use super::file::{ensure_env_file, read_env_file};
use super::host::{Host, ProcessHost};
use super::mode::{read_mode_var, resolve_mode, DEFAULT_MODE_VAR};
use super::parse::parse_env;
use super::ConfigError;

/// Where a mode override comes from.
#[derive(Debug)]
enum ModeSource {
    Var(String),
    Explicit(String),
    Packaging,
}

/// Builder for the startup environment.
///
/// Running it resolves the mode, makes sure `<env dir>/.env.<mode>` exists
/// (writing defaults on first run), reads it and returns the merged
/// [`Environment`]. Nothing is written to the process environment unless
/// [`Environment::apply_to_process`] is called.
///
/// ## Mode resolution
///
/// By default the `NODE_ENV` variable overrides the mode. When it is unset,
/// packaged hosts run as `prod` and all others as `dev`. A mode that
/// resolves to the empty string fails with [`ConfigError::EmptyMode`]
/// before anything touches the disk.
///
/// ## Example
///
/// ```no_run
/// use dragon_env::config::{Bootstrap, DesktopHost};
///
/// let env = Bootstrap::builder()
///     .with_host(DesktopHost::new("/home/me/.config/my-app", true))
///     .run()?;
///
/// println!("mode {} port {:?}", env.mode(), env.get("PORT"));
/// # Ok::<(), dragon_env::ConfigError>(())
/// ```
#[derive(Debug)]
#[must_use = "builders do nothing until .run() is called"]
pub struct Bootstrap {
    host: Box<dyn Host>,
    mode_source: ModeSource,
    seed: Vec<(String, String)>,
}

impl Default for Bootstrap {
    fn default() -> Self {
        Self {
            host: Box::new(ProcessHost::current()),
            mode_source: ModeSource::Var(DEFAULT_MODE_VAR.to_string()),
            seed: Vec::new(),
        }
    }
}

impl Bootstrap {
    /// Creates a bootstrapper for a plain process reading `NODE_ENV`.
    pub fn builder() -> Self {
        Self::default()
    }

    /// Sets the host that provides the env directory and packaging state.
    pub fn with_host(mut self, host: impl Host + 'static) -> Self {
        self.host = Box::new(host);
        self
    }

    /// Forces the mode, taking precedence over any variable or packaging state.
    pub fn with_mode(mut self, mode: impl Into<String>) -> Self {
        self.mode_source = ModeSource::Explicit(mode.into());
        self
    }

    /// Reads the mode override from `var` instead of `NODE_ENV`.
    pub fn with_mode_var(mut self, var: impl Into<String>) -> Self {
        self.mode_source = ModeSource::Var(var.into());
        self
    }

    /// Ignores override variables; the mode comes from packaging state only.
    pub fn without_mode_var(mut self) -> Self {
        self.mode_source = ModeSource::Packaging;
        self
    }

    /// Seeds the environment with existing values. File entries override them.
    pub fn with_vars<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.seed
            .extend(vars.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Runs the bootstrap sequence.
    pub fn run(self) -> Result<Environment, ConfigError> {
        let override_value = match self.mode_source {
            ModeSource::Var(var) => read_mode_var(&var)?,
            ModeSource::Explicit(mode) => Some(mode),
            ModeSource::Packaging => None,
        };
        let mode = resolve_mode(override_value.as_deref(), self.host.is_packaged())?;

        let dir = self.host.env_dir()?;
        let file = ensure_env_file(&dir, &mode)?;
        let text = read_env_file(&file.path)?;

        let mut env = Environment::new(mode, file.path, file.created);
        env.merge(self.seed);
        env.merge(parse_env(&text));

        info!(mode = %env.mode(), "environment loaded");
        Ok(env)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{default_content, DesktopHost, Mode};
    use tempfile::TempDir;

    fn desktop(tmp: &TempDir, packaged: bool) -> DesktopHost {
        DesktopHost::new(tmp.path(), packaged)
    }

    #[test]
    fn test_packaged_first_run_creates_prod_file() {
        let tmp = TempDir::new().unwrap();

        let env = Bootstrap::builder()
            .with_host(desktop(&tmp, true))
            .without_mode_var()
            .run()
            .unwrap();

        let path = tmp.path().join("env").join(".env.prod");
        assert_eq!(env.path(), path);
        assert!(env.was_created());
        assert_eq!(env.mode(), &Mode::Production);
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            default_content(&Mode::Production)
        );
        assert_eq!(env.get("NODE_ENV"), Some("prod"));
        assert_eq!(env.get("PORT"), Some("60000"));
        assert_eq!(env.get("OSSURL"), Some("http://127.0.0.1:60000/"));
        assert_eq!(env.vars().len(), 3);
    }

    #[test]
    fn test_unpackaged_defaults_to_dev() {
        let tmp = TempDir::new().unwrap();

        let env = Bootstrap::builder()
            .with_host(ProcessHost::with_root(tmp.path()))
            .without_mode_var()
            .run()
            .unwrap();

        assert_eq!(env.mode(), &Mode::Development);
        assert_eq!(env.path(), tmp.path().join("env").join(".env.dev"));
        assert_eq!(env.get("NODE_ENV"), Some("dev"));
    }

    #[test]
    fn test_empty_mode_is_fatal_and_writes_nothing() {
        let tmp = TempDir::new().unwrap();

        let result = Bootstrap::builder()
            .with_host(ProcessHost::with_root(tmp.path()))
            .with_mode("")
            .run();

        assert!(matches!(result, Err(ConfigError::EmptyMode)));
        assert!(!tmp.path().join("env").exists());
    }

    #[test]
    fn test_empty_mode_var_is_fatal() {
        let tmp = TempDir::new().unwrap();
        std::env::set_var("DRAGON_ENV_TEST_EMPTY_MODE", "");

        let result = Bootstrap::builder()
            .with_host(desktop(&tmp, true))
            .with_mode_var("DRAGON_ENV_TEST_EMPTY_MODE")
            .run();

        assert!(matches!(result, Err(ConfigError::EmptyMode)));
        assert!(!tmp.path().join("env").exists());
    }

    #[test]
    fn test_mode_var_overrides_packaging() {
        let tmp = TempDir::new().unwrap();
        std::env::set_var("DRAGON_ENV_TEST_OVERRIDE_MODE", "dev");

        let env = Bootstrap::builder()
            .with_host(desktop(&tmp, true))
            .with_mode_var("DRAGON_ENV_TEST_OVERRIDE_MODE")
            .run()
            .unwrap();

        assert_eq!(env.mode(), &Mode::Development);
        assert_eq!(env.get("NODE_ENV"), Some("dev"));
    }

    #[test]
    fn test_unset_mode_var_falls_back_to_packaging() {
        let tmp = TempDir::new().unwrap();

        let env = Bootstrap::builder()
            .with_host(desktop(&tmp, true))
            .with_mode_var("DRAGON_ENV_TEST_NEVER_SET_OVERRIDE")
            .run()
            .unwrap();

        assert_eq!(env.mode(), &Mode::Production);
    }

    #[test]
    fn test_explicit_mode_overrides_packaging() {
        let tmp = TempDir::new().unwrap();

        let env = Bootstrap::builder()
            .with_host(desktop(&tmp, false))
            .with_mode("prod")
            .run()
            .unwrap();

        assert_eq!(env.mode(), &Mode::Production);
    }

    #[test]
    fn test_custom_mode_uses_prod_defaults() {
        let tmp = TempDir::new().unwrap();

        let env = Bootstrap::builder()
            .with_host(ProcessHost::with_root(tmp.path()))
            .with_mode("staging")
            .run()
            .unwrap();

        assert_eq!(env.path(), tmp.path().join("env").join(".env.staging"));
        assert_eq!(env.get("NODE_ENV"), Some("prod"));
    }

    #[test]
    fn test_existing_file_is_read_and_kept() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("env");
        std::fs::create_dir_all(&dir).unwrap();
        let contents = "PORT = 8080\nnot a pair\n=orphan\nURL=http://x/?a=b\nPORT=9090\n";
        std::fs::write(dir.join(".env.dev"), contents).unwrap();

        let env = Bootstrap::builder()
            .with_host(ProcessHost::with_root(tmp.path()))
            .with_mode("dev")
            .run()
            .unwrap();

        assert!(!env.was_created());
        assert_eq!(env.get("PORT"), Some("9090"));
        assert_eq!(env.get("URL"), Some("http://x/?a=b"));
        assert_eq!(env.get("NODE_ENV"), None);
        assert_eq!(env.vars().len(), 2);
        assert_eq!(
            std::fs::read_to_string(dir.join(".env.dev")).unwrap(),
            contents
        );
    }

    #[test]
    fn test_invalid_utf8_line_does_not_block_other_keys() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("env");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(".env.dev"), b"PORT=8080\nNOTE=caf\xe9\n").unwrap();

        let env = Bootstrap::builder()
            .with_host(ProcessHost::with_root(tmp.path()))
            .with_mode("dev")
            .run()
            .unwrap();

        assert_eq!(env.get("PORT"), Some("8080"));
        assert_eq!(env.get("NOTE"), Some("caf\u{FFFD}"));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_unicode_mode_var_is_rejected() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let tmp = TempDir::new().unwrap();
        std::env::set_var("DRAGON_ENV_TEST_BAD_MODE", OsStr::from_bytes(b"\xff"));

        let result = Bootstrap::builder()
            .with_host(ProcessHost::with_root(tmp.path()))
            .with_mode_var("DRAGON_ENV_TEST_BAD_MODE")
            .run();

        assert!(matches!(result, Err(ConfigError::InvalidModeVar(_))));
        assert!(!tmp.path().join("env").exists());
    }

    #[test]
    fn test_file_values_override_seed() {
        let tmp = TempDir::new().unwrap();

        let env = Bootstrap::builder()
            .with_host(ProcessHost::with_root(tmp.path()))
            .with_mode("dev")
            .with_vars([("PORT", "1"), ("HOME_DIR", "/home/me")])
            .run()
            .unwrap();

        assert_eq!(env.get("PORT"), Some("60000"));
        assert_eq!(env.get("HOME_DIR"), Some("/home/me"));
    }

    #[test]
    fn test_running_twice_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let run = || {
            Bootstrap::builder()
                .with_host(desktop(&tmp, false))
                .without_mode_var()
                .run()
                .unwrap()
        };

        let first = run();
        let on_disk = std::fs::read(first.path()).unwrap();
        let second = run();

        assert!(first.was_created());
        assert!(!second.was_created());
        assert_eq!(first.vars(), second.vars());
        assert_eq!(first.mode(), second.mode());
        assert_eq!(std::fs::read(second.path()).unwrap(), on_disk);
    }
}
