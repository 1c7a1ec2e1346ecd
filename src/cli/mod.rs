//! Command-line interface for howto.
//!
//! ```text
//! howto <query>...            translate a request into a shell command
//! howto upgrade [--check] [-y]
//! howto --version
//! ```
//!
//! Every invocation other than `upgrade` first runs the startup advisory,
//! which warns on stderr when a newer release is published. The advisory
//! never blocks or fails the command it precedes.

mod ask;
pub mod upgrade;


use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::config::GlobalConfig;
use crate::constants::CONFIG_PATH_ENV;
use crate::upgrade::{RunningBuildInfo, VERSION_TEXT, VersionChecker, VersionResolver};
use crate::utils::http_client;

/// Runtime settings derived from the global flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Filter directive for the tracing subscriber. `None` disables logging.
    ///
    /// `RUST_LOG` takes precedence when set.
    pub log_level: Option<String>,

    /// Explicit config file location.
    pub config_path: Option<PathBuf>,

    /// Identity of the running binary, fixed for the whole invocation.
    pub build: RunningBuildInfo,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_level: None,
            config_path: None,
            build: RunningBuildInfo::current(),
        }
    }
}

impl CliConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the global tracing subscriber, writing to stderr.
    ///
    /// Safe to call more than once; later calls are ignored.
    pub fn init_logging(&self) {
        let filter = if std::env::var_os("RUST_LOG").is_some() {
            EnvFilter::from_default_env()
        } else {
            match &self.log_level {
                Some(level) => EnvFilter::new(level),
                None => return,
            }
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "howto",
    about = "Turn a plain-English request into a shell command",
    version = VERSION_TEXT,
    args_conflicts_with_subcommands = true,
    long_about = "howto asks a language model how to do something in your shell and prints the command.\n\nExample: howto find files larger than 100MB"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// What you want to do, in plain words.
    #[arg(value_name = "QUERY", trailing_var_arg = true)]
    query: Vec<String>,

    /// Enable debug logging.
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress all log output.
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to the config file (default: ~/.howto/config.toml).
    #[arg(short, long, global = true, env = CONFIG_PATH_ENV)]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Replace this binary with the latest published release.
    Upgrade(upgrade::UpgradeArgs),
}

impl Cli {
    /// Set up logging, then run the command.
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        config.init_logging();
        self.execute_with_config(config).await
    }

    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            Some("debug".to_string())
        } else if self.quiet {
            None
        } else {
            Some("warn".to_string())
        };

        CliConfig {
            log_level,
            config_path: self.config.clone(),
            build: RunningBuildInfo::current(),
        }
    }

    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        let CliConfig {
            config_path,
            build,
            ..
        } = config;
        let global = GlobalConfig::load_with_optional(config_path).await?;

        match self.command {
            Some(Commands::Upgrade(args)) => upgrade::execute(args, &global, build).await,
            None => {
                if self.query.is_empty() {
                    Cli::command().print_help()?;
                    return Ok(());
                }

                if global.upgrade.check_on_startup {
                    run_startup_advisory(&global, build).await;
                } else {
                    debug!("Startup update check disabled in config");
                }

                ask::execute(&self.query.join(" "), &global).await
            }
        }
    }
}

/// Warn about a newer release. Never fails.
async fn run_startup_advisory(global: &GlobalConfig, build: RunningBuildInfo) {
    let client = match http_client() {
        Ok(client) => client,
        Err(e) => {
            debug!("Skipping update check: {}", e);
            return;
        }
    };
    let resolver = VersionResolver::new(client, &global.upgrade);
    VersionChecker::new(build, resolver).maybe_warn().await;
}
