use serde::{Deserialize, Serialize};

/// Configuration for howto's self-update behavior.
///
/// Lives under the `[upgrade]` table of the global config file. Every field
/// has a default, so an absent table means "check on startup against the
/// official GitHub releases".
///
/// # TOML Example
/// ```toml
/// [upgrade]
/// check_on_startup = true
/// repo_owner = "howto-cli"
/// repo_name = "howto"
/// api_base = "https://api.github.com"
/// download_base = "https://github.com"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradeConfig {
    /// Whether ordinary invocations warn when a newer release exists.
    ///
    /// The check costs one metadata request per invocation. Turn it off for
    /// scripts or offline machines; `howto upgrade` still works either way.
    #[serde(default = "default_check_on_startup")]
    pub check_on_startup: bool,

    /// GitHub account publishing the releases.
    #[serde(default = "default_repo_owner")]
    pub repo_owner: String,

    /// GitHub repository publishing the releases.
    #[serde(default = "default_repo_name")]
    pub repo_name: String,

    /// Base URL of the release metadata API.
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Base URL release assets are downloaded from.
    #[serde(default = "default_download_base")]
    pub download_base: String,
}

impl Default for UpgradeConfig {
    fn default() -> Self {
        Self {
            check_on_startup: default_check_on_startup(),
            repo_owner: default_repo_owner(),
            repo_name: default_repo_name(),
            api_base: default_api_base(),
            download_base: default_download_base(),
        }
    }
}

fn default_check_on_startup() -> bool {
    true
}

fn default_repo_owner() -> String {
    "howto-cli".to_string()
}

fn default_repo_name() -> String {
    "howto".to_string()
}

fn default_api_base() -> String {
    "https://api.github.com".to_string()
}

fn default_download_base() -> String {
    "https://github.com".to_string()
}

impl UpgradeConfig {
    /// Create an `UpgradeConfig` with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Point both metadata and downloads at other hosts (mirrors, test servers).
    pub fn with_endpoints(mut self, api_base: impl Into<String>, download_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self.download_base = download_base.into();
        self
    }

    /// Use another repository.
    pub fn with_repo(mut self, owner: impl Into<String>, name: impl Into<String>) -> Self {
        self.repo_owner = owner.into();
        self.repo_name = name.into();
        self
    }

    pub(crate) fn is_default(&self) -> bool {
        *self == Self::default()
    }
}
