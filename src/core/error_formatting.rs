//! Error formatting utilities for howto
//!
//! Converts errors coming out of a command into an [`ErrorContext`] with a
//! suggestion the user can act on.

use super::error::{ErrorContext, HowtoError};
use crate::constants::{API_KEY_ENV_VARS, CONFIG_PATH_ENV};

/// Convert any error into a user-friendly [`ErrorContext`].
///
/// Walks the error chain looking for a [`HowtoError`] (which may be wrapped
/// by `anyhow` context) and falls back to a generic message otherwise.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    let mut current: &(dyn std::error::Error + 'static) = error.as_ref();
    loop {
        if let Some(howto_error) = current.downcast_ref::<HowtoError>() {
            let ctx = create_error_context(howto_error);
            // Keep the outer context message when the typed error was wrapped.
            let outer = error.to_string();
            return if outer != howto_error.to_string() && ctx.details.is_none() {
                ctx.with_details(outer)
            } else {
                ctx
            };
        }

        match current.source() {
            Some(source) => current = source,
            None => break,
        }
    }

    let chain: Vec<String> = error.chain().skip(1).map(ToString::to_string).collect();
    let ctx = ErrorContext::new(HowtoError::Other {
        message: error.to_string(),
    });
    if chain.is_empty() {
        ctx
    } else {
        ctx.with_details(chain.join(": "))
    }
}

/// Build an [`ErrorContext`] with a suggestion for each error kind.
pub fn create_error_context(error: &HowtoError) -> ErrorContext {
    match error {
        HowtoError::NetworkError {
            url,
            message,
        } => ErrorContext::new(HowtoError::NetworkError {
            url: url.clone(),
            message: message.clone(),
        })
        .with_suggestion("Check your internet connection and try again"),
        HowtoError::MetadataParseError {
            url,
            reason,
        } => ErrorContext::new(HowtoError::MetadataParseError {
            url: url.clone(),
            reason: reason.clone(),
        })
        .with_suggestion("The release server returned unexpected data; try again later"),
        HowtoError::PermissionDenied {
            operation,
            path,
            source,
        } => ErrorContext::new(HowtoError::PermissionDenied {
            operation: operation.clone(),
            path: path.clone(),
            source: std::io::Error::new(source.kind(), source.to_string()),
        })
        .with_suggestion(
            "The install location is not writable by you; re-run with elevated privileges (e.g. sudo howto upgrade)",
        ),
        HowtoError::IoError {
            operation,
            path,
            source,
        } => ErrorContext::new(HowtoError::IoError {
            operation: operation.clone(),
            path: path.clone(),
            source: std::io::Error::new(source.kind(), source.to_string()),
        })
        .with_details(source.to_string())
        .with_suggestion("Check that the path exists and that there is free disk space"),
        HowtoError::ConfigError {
            message,
        } => ErrorContext::new(HowtoError::ConfigError {
            message: message.clone(),
        })
        .with_suggestion(format!(
            "Fix or remove the config file named above (default ~/.howto/config.toml, \
             override with {CONFIG_PATH_ENV} or --config). If no home directory could be \
             found, set HOME (USERPROFILE on Windows) or {CONFIG_PATH_ENV}"
        )),
        HowtoError::MissingApiKey => ErrorContext::new(HowtoError::MissingApiKey).with_suggestion(
            format!(
                "Set {} or add `api_key` to ~/.howto/config.toml (override the location with {})",
                API_KEY_ENV_VARS.join(" or "),
                CONFIG_PATH_ENV
            ),
        ),
        HowtoError::RollbackFailed {
            cause,
            backup,
            target,
            source,
        } => ErrorContext::new(HowtoError::RollbackFailed {
            cause: Box::new(HowtoError::Other {
                message: cause.to_string(),
            }),
            backup: backup.clone(),
            target: target.clone(),
            source: std::io::Error::new(source.kind(), source.to_string()),
        })
        .with_details(format!("The previous binary is still at {}", backup.display()))
        .with_suggestion(format!(
            "Restore it manually: mv '{}' '{}'",
            backup.display(),
            target.display()
        )),
        HowtoError::ResponseParseError {
            reason,
        } => ErrorContext::new(HowtoError::ResponseParseError {
            reason: reason.clone(),
        })
        .with_suggestion("Check the configured api_url and model"),
        HowtoError::Other {
            message,
        } => ErrorContext::new(HowtoError::Other {
            message: message.clone(),
        }),
    }
}
