//! Shared HTTP client construction.

use crate::constants::{HTTP_TIMEOUT, USER_AGENT};
use crate::core::{HowtoError, HowtoResult};

/// Build the client used for every request howto makes.
///
/// All requests share one fixed timeout and a `User-Agent` header, which the
/// GitHub API requires.
pub fn http_client() -> HowtoResult<reqwest::Client> {
    reqwest::Client::builder().user_agent(USER_AGENT).timeout(HTTP_TIMEOUT).build().map_err(|e| {
        HowtoError::Other {
            message: format!("Failed to initialise HTTP client: {e}"),
        }
    })
}
