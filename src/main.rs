use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use dragon_env::config::{Bootstrap, ConfigError, DesktopHost, ProcessHost, DEFAULT_MODE_VAR};
use dragon_env::{AppContext, Error};
use tracing::error;
use tracing_subscriber::EnvFilter;

/// Resolve the startup environment and print it.
#[derive(Debug, Parser)]
#[command(name = "dragon-env", version)]
struct Cli {
    /// Mode to load, overriding the mode variable and packaging state
    #[arg(long)]
    mode: Option<String>,

    /// Variable that overrides the mode when set
    #[arg(long, default_value = DEFAULT_MODE_VAR)]
    mode_var: String,

    /// Root directory holding `env/` (defaults to the working directory)
    #[arg(long, conflicts_with = "desktop")]
    dir: Option<PathBuf>,

    /// Run as the named desktop application, using its user data directory
    #[arg(long, value_name = "APP")]
    desktop: Option<String>,

    /// Treat the desktop application as a packaged release
    #[arg(long, requires = "desktop")]
    packaged: bool,

    /// Print every resolved entry as KEY=VALUE
    #[arg(long)]
    export: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match run(&cli) {
        Ok(ctx) => {
            if cli.export {
                for (key, value) in ctx.environment().iter() {
                    println!("{key}={value}");
                }
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("failed to load environment: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<AppContext, Error> {
    let mut bootstrap = Bootstrap::builder().with_mode_var(cli.mode_var.clone());

    if let Some(app) = &cli.desktop {
        let host = DesktopHost::for_app(app, cli.packaged).ok_or(ConfigError::NoBaseDir)?;
        bootstrap = bootstrap.with_host(host);
    } else if let Some(dir) = &cli.dir {
        bootstrap = bootstrap.with_host(ProcessHost::with_root(dir));
    }

    if let Some(mode) = &cli.mode {
        bootstrap = bootstrap.with_mode(mode.clone());
    }

    AppContext::bootstrap(bootstrap)
}
