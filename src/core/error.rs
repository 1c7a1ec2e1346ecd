//! Error handling for howto
//!
//! The error system follows two principles:
//! 1. **Strongly-typed errors** so callers can tell a network failure from a
//!    permission problem and react differently (the startup advisory swallows
//!    the former, the upgrade command surfaces everything).
//! 2. **User-friendly messages** with actionable suggestions at the CLI boundary.
//!
//! # Architecture
//!
//! - [`HowtoError`] - every failure case the tool distinguishes
//! - [`ErrorContext`] - wrapper adding details and a suggestion for display
//!
//! Use [`user_friendly_error`](crate::core::user_friendly_error) to convert an
//! `anyhow::Error` coming out of a command into an [`ErrorContext`].
//!
//! # Examples
//!
//! ```rust,no_run
//! use howto_cli::core::{ErrorContext, HowtoError};
//!
//! let context = ErrorContext::new(HowtoError::MissingApiKey)
//!     .with_suggestion("Set HOWTO_API_KEY or add api_key to ~/.howto/config.toml");
//!
//! context.display();
//! ```

use colored::Colorize;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result alias used by the upgrade subsystem and the query plumbing.
pub type HowtoResult<T> = std::result::Result<T, HowtoError>;

/// Every failure the tool distinguishes.
#[derive(Error, Debug)]
pub enum HowtoError {
    /// Transport failure, timeout, or a non-success HTTP status.
    #[error("Network request to {url} failed: {message}")]
    NetworkError {
        /// The URL that was requested
        url: String,
        /// Transport error or HTTP status description
        message: String,
    },

    /// The release metadata could not be decoded or lacks a version tag.
    #[error("Invalid release metadata from {url}: {reason}")]
    MetadataParseError {
        /// The metadata URL
        url: String,
        /// Why the document was rejected
        reason: String,
    },

    /// Insufficient rights to modify a path, usually the install location.
    #[error("Permission denied while trying to {operation} {path}")]
    PermissionDenied {
        /// What was being attempted (e.g. "move aside")
        operation: String,
        /// The path involved
        path: String,
        /// Underlying OS error
        #[source]
        source: io::Error,
    },

    /// Unexpected filesystem failure.
    #[error("Failed to {operation} {path}")]
    IoError {
        /// What was being attempted
        operation: String,
        /// The path involved
        path: String,
        /// Underlying OS error
        #[source]
        source: io::Error,
    },

    /// Unreadable or malformed config file, or no home directory to find it in.
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Human-readable description
        message: String,
    },

    /// A query was issued but no API key is set in the config or environment.
    #[error("No API key configured")]
    MissingApiKey,

    /// Replacing the binary failed and the backup could not be moved back.
    ///
    /// This is the only state in which the installed path may be missing or
    /// hold a partial binary; the user has to restore `backup` by hand.
    #[error(
        "{cause}; restoring the previous binary also failed ({source}). \
         Manual recovery required: move {} back to {}",
        backup.display(),
        target.display()
    )]
    RollbackFailed {
        /// The error that triggered the rollback
        cause: Box<HowtoError>,
        /// Where the previous binary still lives
        backup: PathBuf,
        /// Where it needs to go
        target: PathBuf,
        /// Why the rollback rename failed
        #[source]
        source: io::Error,
    },

    /// The language model replied with something we could not decode.
    #[error("Could not read the model response: {reason}")]
    ResponseParseError {
        /// Why the response was rejected
        reason: String,
    },

    /// Anything without a more specific variant.
    #[error("{message}")]
    Other {
        /// Error message
        message: String,
    },
}

impl HowtoError {
    /// Classify an I/O failure on `path`.
    ///
    /// `PermissionDenied` gets its own variant so the CLI can suggest elevated
    /// privileges; every other kind becomes [`HowtoError::IoError`].
    pub fn from_io(operation: impl Into<String>, path: &Path, source: io::Error) -> Self {
        let operation = operation.into();
        let path = path.display().to_string();
        if source.kind() == io::ErrorKind::PermissionDenied {
            Self::PermissionDenied {
                operation,
                path,
                source,
            }
        } else {
            Self::IoError {
                operation,
                path,
                source,
            }
        }
    }

    /// Build a [`HowtoError::NetworkError`] from a reqwest failure.
    pub fn network(url: &str, error: &reqwest::Error) -> Self {
        let message = if error.is_timeout() {
            "request timed out".to_string()
        } else if error.is_connect() {
            format!("could not connect ({error})")
        } else if let Some(status) = error.status() {
            format!("HTTP {status}")
        } else {
            error.to_string()
        };
        Self::NetworkError {
            url: url.to_string(),
            message,
        }
    }

    /// Shorthand for [`HowtoError::ConfigError`].
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }
}

/// An error plus optional details and a suggestion, for terminal display.
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: HowtoError,
    /// What the user can do about it
    pub suggestion: Option<String>,
    /// Extra context about what went wrong
    pub details: Option<String>,
}

impl ErrorContext {
    /// Wrap an error with no details or suggestion.
    #[must_use]
    pub const fn new(error: HowtoError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Attach a suggestion.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Attach details.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print to stderr with colours.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}
