//! Global constants used throughout the howto codebase.
//!
//! Timeouts, file-naming conventions and environment variable names that are
//! used across multiple modules live here so magic values stay discoverable.

use std::time::Duration;

/// Timeout applied to every HTTP request (30 seconds).
///
/// Covers release metadata lookups, artifact downloads and model queries.
/// There are no retries; a timeout is a terminal failure for that call.
pub const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Suffix appended to the installed executable while it is moved aside
/// during a swap.
pub const BACKUP_SUFFIX: &str = ".bak";

/// Prefix for staging files holding a freshly downloaded artifact.
pub const STAGING_PREFIX: &str = ".howto-upgrade-";

/// Version token marking a build made without a release tag.
pub const DEV_SENTINEL: &str = "dev";

/// Environment variable overriding the config file location.
pub const CONFIG_PATH_ENV: &str = "HOWTO_CONFIG_PATH";

/// Environment variables consulted, in order, for the model API key.
pub const API_KEY_ENV_VARS: &[&str] = &["HOWTO_API_KEY", "OPENAI_API_KEY"];

/// Environment variable that hides spinners (CI, scripts).
pub const NO_PROGRESS_ENV: &str = "HOWTO_NO_PROGRESS";

/// User agent sent with every request; GitHub rejects requests without one.
pub const USER_AGENT: &str = concat!("howto/", env!("CARGO_PKG_VERSION"));
