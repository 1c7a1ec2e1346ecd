//! Version identity of the running binary.
//!
//! Release builds are compiled with `HOWTO_RELEASE_TAG` set to the tag being
//! published (e.g. `v1.3.0`). Anything built without it, a plain `cargo build`
//! for instance, is a development build and never checks for or installs
//! upgrades.

use crate::constants::DEV_SENTINEL;
use std::fmt;

/// Release tag baked in at compile time, if any.
const RELEASE_TAG: Option<&str> = option_env!("HOWTO_RELEASE_TAG");

/// Text shown by `howto --version`.
pub const VERSION_TEXT: &str = match RELEASE_TAG {
    Some(tag) => tag,
    None => concat!("dev (", env!("CARGO_PKG_VERSION"), ")"),
};

/// An opaque release tag.
///
/// Two identifiers are equal iff their tag strings are equal. There is no
/// ordering: the upgrade logic can only tell "different", never "newer".
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VersionIdentifier(String);

impl VersionIdentifier {
    /// Wrap a tag string.
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    /// The raw tag.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VersionIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for VersionIdentifier {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

/// What the running binary knows about its own version.
///
/// Created once at startup and handed to the upgrade orchestrator and the
/// startup advisory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunningBuildInfo {
    /// Built from a published release.
    Release(VersionIdentifier),
    /// Built without a release tag; upgrade logic is disabled.
    Development,
}

impl RunningBuildInfo {
    /// Build info of this binary.
    pub fn current() -> Self {
        Self::from_tag(RELEASE_TAG)
    }

    /// Interpret a compile-time tag. Missing, blank or `dev` means development.
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag.map(str::trim) {
            None | Some("") => Self::Development,
            Some(tag) if tag == DEV_SENTINEL => Self::Development,
            Some(tag) => Self::Release(VersionIdentifier::new(tag)),
        }
    }

    /// Shorthand for a release build, handy in tests.
    pub fn release(tag: &str) -> Self {
        Self::Release(VersionIdentifier::new(tag))
    }

    /// The release version, or `None` for development builds.
    pub fn version(&self) -> Option<&VersionIdentifier> {
        match self {
            Self::Release(version) => Some(version),
            Self::Development => None,
        }
    }

    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

impl fmt::Display for RunningBuildInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Release(version) => write!(f, "{version}"),
            Self::Development => write!(f, "{DEV_SENTINEL}"),
        }
    }
}
