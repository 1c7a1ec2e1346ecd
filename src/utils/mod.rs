//! Cross-platform utilities and helpers
//!
//! - [`http`] - the shared HTTP client
//! - [`platform`] - home directory lookup and release asset naming
//! - [`progress`] - spinners for network waits

pub mod http;
pub mod platform;
pub mod progress;

pub use http::http_client;
pub use platform::{get_home_dir, is_windows, release_asset_name};
pub use progress::Spinner;
