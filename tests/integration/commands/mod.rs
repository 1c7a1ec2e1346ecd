//! CLI command tests
//!
//! - Query command and its error reporting
//! - Self-upgrade command in development builds
//! - Version and help output

mod ask;
mod upgrade;
mod version;

use assert_cmd::Command;
use tempfile::TempDir;

/// A `howto` command isolated from the user's config and API keys.
///
/// The returned directory must outlive the command; the config path points
/// inside it and is never created.
pub fn howto_cmd() -> (Command, TempDir) {
    let temp = TempDir::new().unwrap();
    let mut cmd = Command::cargo_bin("howto").unwrap();
    cmd.env("HOWTO_CONFIG_PATH", temp.path().join("config.toml"))
        .env("HOWTO_NO_PROGRESS", "1")
        .env("NO_COLOR", "1")
        .env_remove("HOWTO_API_KEY")
        .env_remove("OPENAI_API_KEY")
        .env_remove("RUST_LOG");
    (cmd, temp)
}

/// Whether the test binary was built without a release tag.
pub fn is_development_build() -> bool {
    howto_cli::upgrade::RunningBuildInfo::current().is_development()
}
