//! Test utilities for howto.
//!
//! Available to unit tests and, through the `test-utils` feature, to the
//! integration suite.
//!
//! - [`init_test_logging`] wires tracing into the test harness output
//! - [`FakeInstall`] lays out an "installed" binary plus a private staging
//!   directory, so upgrades can be exercised without touching the real
//!   executable

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Once;
use tempfile::TempDir;
use tracing::Level;
use tracing_subscriber::EnvFilter;

static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests, once per process.
///
/// Uses `level` if given, otherwise `RUST_LOG`; with neither, logging stays
/// off.
///
/// ```bash
/// RUST_LOG=howto_cli=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .try_init();
    });
}

/// A temporary install directory holding a fake `howto` executable.
pub struct FakeInstall {
    dir: TempDir,
    exe: PathBuf,
    staging: PathBuf,
}

impl FakeInstall {
    /// Create the directory, write `contents` as the executable and create
    /// an empty `staging/` sibling.
    pub fn new(contents: &[u8]) -> std::io::Result<Self> {
        let dir = TempDir::new()?;
        let exe = dir.path().join("howto");
        let staging = dir.path().join("staging");
        fs::write(&exe, contents)?;
        fs::create_dir(&staging)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&exe, fs::Permissions::from_mode(0o755))?;
        }

        Ok(Self {
            dir,
            exe,
            staging,
        })
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Path of the installed executable.
    pub fn exe(&self) -> &Path {
        &self.exe
    }

    pub fn staging(&self) -> &Path {
        &self.staging
    }

    /// Current bytes of the installed executable.
    pub fn contents(&self) -> Vec<u8> {
        fs::read(&self.exe).unwrap_or_default()
    }

    /// Whether the staging directory is empty.
    pub fn staging_is_empty(&self) -> bool {
        fs::read_dir(&self.staging).map(|mut entries| entries.next().is_none()).unwrap_or(false)
    }

    /// Names of the entries in the install directory, sorted.
    pub fn entries(&self) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(self.dir.path())
            .map(|entries| {
                entries
                    .filter_map(Result::ok)
                    .map(|e| e.file_name().to_string_lossy().into_owned())
                    .collect()
            })
            .unwrap_or_default();
        names.sort();
        names
    }
}
