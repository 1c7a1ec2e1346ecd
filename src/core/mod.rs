//! Core types shared across howto: the error taxonomy and its user-facing
//! formatting.
//!
//! - [`HowtoError`] - every failure case the tool distinguishes
//! - [`ErrorContext`] - an error with details and a suggestion for display
//! - [`user_friendly_error`] - converts a command's `anyhow::Error` for display

pub mod error;
pub mod error_formatting;

pub use error::{ErrorContext, HowtoError, HowtoResult};
pub use error_formatting::{create_error_context, user_friendly_error};
