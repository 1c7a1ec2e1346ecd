//! Self-upgrade functionality for howto.
//!
//! This module lets the installed `howto` binary replace itself with the
//! latest published release. The one property it must never violate: after
//! an upgrade attempt, successful or not, there is exactly one working
//! executable at the install path.
//!
//! # Architecture Overview
//!
//! - **[`VersionResolver`]**: fetches the latest release tag from the release
//!   metadata API
//! - **[`VersionChecker`]**: the startup advisory; warns on ordinary
//!   invocations when a newer release exists, never fails
//! - **[`BinaryFetcher`]**: downloads a release artifact into a
//!   self-deleting [`StagingFile`]
//! - **[`AtomicReplacer`]**: swaps the staged binary into place with
//!   backup-and-rollback, falling back to a copy across filesystems
//! - **[`SelfUpdater`]**: ties the above together behind a confirmation prompt
//!
//! ## Update Process Flow
//!
//! ```text
//! 1. Version Check
//!    ├── Development build? → Skipped, no network
//!    └── Fetch latest tag; equal to running tag? → AlreadyLatest
//!
//! 2. Confirmation
//!    └── "[Y/n]" prompt; empty = yes, first character decides
//!
//! 3. Download
//!    └── Artifact → uniquely named temp file, chmod 755
//!
//! 4. Replacement
//!    ├── target → target.bak
//!    ├── staging → target (copy if cross-device)
//!    ├── failure: target.bak → target
//!    └── success: remove target.bak
//! ```
//!
//! # Versions
//!
//! Release tags are opaque. The tool cannot tell newer from older, only
//! different: if the latest published tag differs from the one baked into
//! the binary, it is offered as an upgrade.
//!
//! # Known Gaps
//!
//! - Downloaded artifacts are installed without checksum or signature
//!   verification.
//! - Concurrent upgrades against the same install path are unsupported.

pub mod build_info;
pub mod config;
pub mod fetcher;
pub mod replacer;
pub mod self_updater;
pub mod version_check;


pub use build_info::{RunningBuildInfo, VERSION_TEXT, VersionIdentifier};
pub use config::UpgradeConfig;
pub use fetcher::{BinaryFetcher, StagingFile};
pub use replacer::AtomicReplacer;
pub use self_updater::{SelfUpdater, UpdateStatus, UpgradeOutcome, is_affirmative};
pub use version_check::{VersionChecker, VersionResolver};
