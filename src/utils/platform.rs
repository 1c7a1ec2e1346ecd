//! Platform-specific helpers.
//!
//! Encapsulates the handful of places where howto behaves differently on
//! Windows, macOS and Linux: locating the home directory and naming the
//! release artifact built for this machine.

use crate::core::{HowtoError, HowtoResult};
use std::path::PathBuf;

/// Checks if the current platform is Windows.
#[must_use]
pub const fn is_windows() -> bool {
    cfg!(windows)
}

/// Get the home directory path for the current user.
///
/// A missing home directory is a recoverable [`HowtoError::ConfigError`],
/// never a panic.
///
/// # Platform Behavior
///
/// - **Windows**: Uses `%USERPROFILE%`
/// - **Unix/Linux/macOS**: Uses `$HOME`
pub fn get_home_dir() -> HowtoResult<PathBuf> {
    dirs::home_dir().ok_or_else(|| {
        let platform_help = if is_windows() {
            "On Windows: Check that the USERPROFILE environment variable is set"
        } else {
            "On Unix/Linux: Check that the HOME environment variable is set"
        };
        HowtoError::config(format!("Could not determine home directory. {platform_help}"))
    })
}

/// Name of the release asset built for this OS and architecture.
///
/// Releases publish bare executables named `howto-{os}-{arch}`, with an
/// `.exe` suffix for Windows, e.g. `howto-linux-x86_64` or
/// `howto-macos-aarch64`.
#[must_use]
pub fn release_asset_name() -> String {
    let suffix = if is_windows() {
        ".exe"
    } else {
        ""
    };
    format!("howto-{}-{}{}", std::env::consts::OS, std::env::consts::ARCH, suffix)
}
