//! Configuration for howto.
//!
//! A single optional TOML file holds the model credential, model selection
//! and the `[upgrade]` table. See [`GlobalConfig`] for the format and lookup
//! rules.

mod global;

pub use global::GlobalConfig;
