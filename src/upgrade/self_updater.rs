use colored::Colorize;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::core::{HowtoError, HowtoResult};
use crate::upgrade::build_info::{RunningBuildInfo, VersionIdentifier};
use crate::upgrade::config::UpgradeConfig;
use crate::upgrade::fetcher::BinaryFetcher;
use crate::upgrade::replacer::AtomicReplacer;
use crate::upgrade::version_check::VersionResolver;
use crate::utils::http::http_client;
use crate::utils::progress::Spinner;

/// How an upgrade run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpgradeOutcome {
    /// The running version is already the latest release.
    AlreadyLatest(VersionIdentifier),
    /// Development build; nothing was checked.
    Skipped,
    /// The user answered no at the confirmation prompt.
    Declined,
    /// The binary at the install path was replaced.
    Upgraded {
        from: VersionIdentifier,
        to: VersionIdentifier,
    },
}

/// Result of `howto upgrade --check`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateStatus {
    /// Development build; nothing was checked.
    Development,
    /// The running version is the latest release.
    UpToDate(VersionIdentifier),
    /// A different release is published.
    Available {
        current: VersionIdentifier,
        latest: VersionIdentifier,
    },
}

/// Drives a complete self-upgrade.
///
/// `SelfUpdater` resolves the latest release, compares it with the running
/// build, asks the user, and only then downloads the artifact and swaps it
/// into place:
///
/// ```text
/// Idle → Resolving → Comparing ─┬─► Done (AlreadyLatest)
///                               └─► Confirming ─┬─► Declined
///                                               └─► Fetching → Replacing → Done (Upgraded)
/// ```
///
/// Every state is transient; nothing is persisted between runs. One run
/// completes before the process does anything else.
///
/// # Examples
///
/// ```rust,no_run
/// use howto_cli::upgrade::{RunningBuildInfo, SelfUpdater, UpgradeConfig, UpgradeOutcome};
///
/// # async fn example() -> howto_cli::core::HowtoResult<()> {
/// let exe = std::env::current_exe().expect("current exe");
/// let updater = SelfUpdater::new(RunningBuildInfo::current(), &UpgradeConfig::default(), exe)?;
///
/// let stdin = std::io::stdin();
/// match updater.run(&mut stdin.lock()).await? {
///     UpgradeOutcome::Upgraded { from, to } => println!("{from} -> {to}"),
///     other => println!("{other:?}"),
/// }
/// # Ok(())
/// # }
/// ```
pub struct SelfUpdater {
    build: RunningBuildInfo,
    resolver: VersionResolver,
    fetcher: BinaryFetcher,
    replacer: AtomicReplacer,
    target: PathBuf,
    assume_yes: bool,
}

impl SelfUpdater {
    /// Create an updater that replaces the executable at `target`.
    pub fn new(build: RunningBuildInfo, config: &UpgradeConfig, target: PathBuf) -> HowtoResult<Self> {
        let client = http_client()?;
        Ok(Self {
            build,
            resolver: VersionResolver::new(client.clone(), config),
            fetcher: BinaryFetcher::new(client, config),
            replacer: AtomicReplacer::new(),
            target,
            assume_yes: false,
        })
    }

    /// Skip the confirmation prompt.
    pub fn assume_yes(mut self, yes: bool) -> Self {
        self.assume_yes = yes;
        self
    }

    /// Replace the default fetcher (e.g. to stage elsewhere).
    pub fn with_fetcher(mut self, fetcher: BinaryFetcher) -> Self {
        self.fetcher = fetcher;
        self
    }

    /// Replace the default replacer.
    pub fn with_replacer(mut self, replacer: AtomicReplacer) -> Self {
        self.replacer = replacer;
        self
    }

    pub fn build(&self) -> &RunningBuildInfo {
        &self.build
    }

    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Resolve and compare without downloading anything.
    pub async fn check(&self) -> HowtoResult<UpdateStatus> {
        let Some(current) = self.build.version() else {
            return Ok(UpdateStatus::Development);
        };
        let latest = self.resolver.resolve().await?;
        if &latest == current {
            Ok(UpdateStatus::UpToDate(latest))
        } else {
            Ok(UpdateStatus::Available {
                current: current.clone(),
                latest,
            })
        }
    }

    /// Run the upgrade, reading the confirmation answer from `input`.
    ///
    /// # Errors
    ///
    /// Anything surfaced by the resolver, the fetcher or the replacer, plus
    /// [`HowtoError::IoError`] if the answer cannot be read.
    pub async fn run<R: BufRead>(&self, input: &mut R) -> HowtoResult<UpgradeOutcome> {
        let Some(current) = self.build.version() else {
            info!("Development build, skipping upgrade");
            return Ok(UpgradeOutcome::Skipped);
        };

        let spinner = Spinner::start("Checking for updates...");
        let resolved = self.resolver.resolve().await;
        spinner.finish_and_clear();
        let latest = resolved?;

        if &latest == current {
            debug!("Already on {}", latest);
            return Ok(UpgradeOutcome::AlreadyLatest(latest));
        }

        if !self.assume_yes && !confirm(current, &latest, input)? {
            info!("Upgrade to {} declined", latest);
            return Ok(UpgradeOutcome::Declined);
        }

        let spinner = Spinner::start(format!("Downloading {latest}..."));
        let fetched = self.fetcher.fetch(&latest).await;
        spinner.finish_and_clear();
        let staging = fetched?;

        self.replacer.replace(staging, &self.target)?;

        Ok(UpgradeOutcome::Upgraded {
            from: current.clone(),
            to: latest,
        })
    }
}

/// Ask on stdout whether to upgrade; the answer comes from `input`.
fn confirm<R: BufRead>(
    current: &VersionIdentifier,
    latest: &VersionIdentifier,
    input: &mut R,
) -> HowtoResult<bool> {
    print!(
        "Upgrade howto from {} to {}? {} ",
        current.as_str().yellow(),
        latest.as_str().green().bold(),
        "[Y/n]".dimmed()
    );
    // A prompt that fails to flush is still answerable.
    let _ = std::io::stdout().flush();

    let mut answer = String::new();
    input
        .read_line(&mut answer)
        .map_err(|e| HowtoError::from_io("read answer from", Path::new("<stdin>"), e))?;
    Ok(is_affirmative(&answer))
}

/// Interpret a confirmation answer.
///
/// Empty input means yes. Otherwise only the first character counts: `y`
/// or `Y` is yes, anything else is no.
pub fn is_affirmative(answer: &str) -> bool {
    match answer.trim_end_matches(['\r', '\n']).chars().next() {
        None => true,
        Some(c) => c.eq_ignore_ascii_case(&'y'),
    }
}
