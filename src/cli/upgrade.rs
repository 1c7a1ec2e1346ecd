//! `howto upgrade`: replace the running binary with the latest release.

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::env;
use tracing::debug;

use crate::config::GlobalConfig;
use crate::upgrade::{RunningBuildInfo, SelfUpdater, UpdateStatus, UpgradeOutcome, VersionChecker};

/// Arguments for `howto upgrade`.
///
/// ```bash
/// # See whether a newer release exists
/// howto upgrade --check
///
/// # Upgrade, answering the prompt interactively
/// howto upgrade
///
/// # Upgrade without asking
/// howto upgrade --yes
/// ```
#[derive(Parser, Debug)]
pub struct UpgradeArgs {
    /// Only report whether an update is available.
    #[arg(long)]
    pub check: bool,

    /// Do not ask for confirmation.
    #[arg(short, long)]
    pub yes: bool,
}

pub async fn execute(
    args: UpgradeArgs,
    config: &GlobalConfig,
    build: RunningBuildInfo,
) -> Result<()> {
    let current_exe = env::current_exe().context("Failed to get current executable path")?;
    let updater = SelfUpdater::new(build, &config.upgrade, current_exe)?
        .assume_yes(args.yes);
    debug!("Running build {} at {}", updater.build(), updater.target().display());

    if args.check {
        return check_for_updates(&updater).await;
    }

    let stdin = std::io::stdin();
    let outcome = updater.run(&mut stdin.lock()).await?;
    report_outcome(&outcome);
    Ok(())
}

async fn check_for_updates(updater: &SelfUpdater) -> Result<()> {
    match updater.check().await? {
        UpdateStatus::Development => print_development_notice(),
        UpdateStatus::UpToDate(current) => {
            println!("{}", VersionChecker::format_version_info(current.as_str(), None).green());
        }
        UpdateStatus::Available {
            current,
            latest,
        } => {
            println!(
                "{}",
                VersionChecker::format_version_info(current.as_str(), Some(latest.as_str()))
            );
            println!("Run `{}` to install it", "howto upgrade".cyan());
        }
    }
    Ok(())
}

fn report_outcome(outcome: &UpgradeOutcome) {
    match outcome {
        UpgradeOutcome::Skipped => print_development_notice(),
        UpgradeOutcome::AlreadyLatest(version) => {
            println!("{}", format!("Already on the latest version ({version})").green());
        }
        UpgradeOutcome::Declined => println!("{}", "Upgrade cancelled".yellow()),
        UpgradeOutcome::Upgraded {
            from,
            to,
        } => {
            println!("{}", format!("Upgraded howto from {from} to {to}").green().bold());
        }
    }
}

fn print_development_notice() {
    println!("{}", "Development build: upgrades are disabled".yellow());
}
