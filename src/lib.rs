//! howto - natural language to shell commands
//!
//! `howto` takes a request in plain words, asks a language model for the
//! matching shell command and prints it. The binary also keeps itself up to
//! date: ordinary invocations warn when a newer release is published, and
//! `howto upgrade` replaces the installed executable in place.
//!
//! # Core Modules
//!
//! - [`cli`] - Argument parsing, logging setup and command dispatch
//! - [`config`] - The user config file (`~/.howto/config.toml`)
//! - [`core`] - Error types and user-facing error formatting
//! - [`query`] - Model client and command extraction
//! - [`upgrade`] - Release resolution, download and atomic binary replacement
//! - [`utils`] - HTTP client, platform helpers and spinners
//!
//! # Self-Upgrade Guarantees
//!
//! The upgrade path never leaves the install location without a working
//! executable. The current binary is moved to `<path>.bak` before the new
//! one is moved into place; any failure moves the backup back. Development
//! builds (compiled without `HOWTO_RELEASE_TAG`) never touch the network for
//! upgrade purposes.
//!
//! # Configuration
//!
//! ```toml
//! # ~/.howto/config.toml
//! api_key = "sk-..."
//! model = "gpt-4o-mini"
//!
//! [upgrade]
//! check_on_startup = false
//! ```
//!
//! The API key may instead come from `HOWTO_API_KEY` or `OPENAI_API_KEY`.

pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod query;
pub mod upgrade;
pub mod utils;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
