//! Global configuration management for howto.
//!
//! This module handles the user configuration file (`~/.howto/config.toml`),
//! which stores the model API credential, model selection and upgrade
//! settings. The file is optional: every field has a default, and the API
//! key can come from the environment instead.
//!
//! # Configuration File Location
//!
//! - **Unix/macOS**: `~/.howto/config.toml`
//! - **Windows**: `%LOCALAPPDATA%\howto\config.toml`
//!
//! The location can be overridden using the `HOWTO_CONFIG_PATH` environment
//! variable or the `--config` flag.
//!
//! # File Format
//!
//! ```toml
//! api_key = "sk-..."
//! model = "gpt-4o-mini"
//! api_url = "https://api.openai.com/v1/chat/completions"
//!
//! [upgrade]
//! check_on_startup = true
//! ```
//!
//! # Examples
//!
//! ```rust,no_run
//! use howto_cli::config::GlobalConfig;
//!
//! # async fn example() -> howto_cli::core::HowtoResult<()> {
//! let config = GlobalConfig::load().await?;
//! let key = config.api_key()?;
//! # Ok(())
//! # }
//! ```

use crate::constants::{API_KEY_ENV_VARS, CONFIG_PATH_ENV};
use crate::core::{HowtoError, HowtoResult};
use crate::upgrade::config::UpgradeConfig;
use crate::utils::platform::get_home_dir;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_api_url() -> String {
    "https://api.openai.com/v1/chat/completions".to_string()
}

fn is_default_upgrade_config(config: &UpgradeConfig) -> bool {
    config.is_default()
}

/// User-wide settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Bearer token for the model API. Environment variables take over when
    /// this is absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Model name sent with each request.
    #[serde(default = "default_model")]
    pub model: String,

    /// OpenAI-compatible chat completions endpoint.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Self-upgrade settings.
    #[serde(default, skip_serializing_if = "is_default_upgrade_config")]
    pub upgrade: UpgradeConfig,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            api_url: default_api_url(),
            upgrade: UpgradeConfig::default(),
        }
    }
}

impl GlobalConfig {
    /// Load from the default location, or return defaults if there is no file.
    pub async fn load() -> HowtoResult<Self> {
        Self::load_with_optional(None).await
    }

    /// Load from `path` if given, otherwise from the default location.
    ///
    /// A missing file yields defaults; an unreadable or malformed one is a
    /// [`HowtoError::ConfigError`].
    pub async fn load_with_optional(path: Option<PathBuf>) -> HowtoResult<Self> {
        let path = match path {
            Some(path) => path,
            None => Self::default_path()?,
        };
        if path.exists() {
            Self::load_from(&path).await
        } else {
            debug!("No config file at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Load from a specific file.
    pub async fn load_from(path: &Path) -> HowtoResult<Self> {
        let content = fs::read_to_string(path).await.map_err(|e| {
            HowtoError::config(format!("Failed to read {}: {}", path.display(), e))
        })?;

        toml::from_str(&content).map_err(|e| {
            HowtoError::config(format!("Failed to parse {}: {}", path.display(), e))
        })
    }

    /// Write the configuration to `path`, readable only by the owner on Unix.
    pub async fn save_to(&self, path: &Path) -> HowtoResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| HowtoError::from_io("create config directory", parent, e))?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| HowtoError::config(format!("Failed to serialize config: {e}")))?;

        fs::write(path, content).await.map_err(|e| HowtoError::from_io("write", path, e))?;

        // The file may hold an API key.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
                .await
                .map_err(|e| HowtoError::from_io("set permissions on", path, e))?;
        }

        Ok(())
    }

    /// Default config file path, honouring `HOWTO_CONFIG_PATH`.
    ///
    /// Fails with [`HowtoError::ConfigError`] when no home directory can be
    /// determined.
    pub fn default_path() -> HowtoResult<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_PATH_ENV) {
            return Ok(PathBuf::from(path));
        }

        let config_dir = if cfg!(target_os = "windows") {
            dirs::data_local_dir()
                .ok_or_else(|| HowtoError::config("Unable to determine local data directory"))?
                .join("howto")
        } else {
            get_home_dir()?.join(".howto")
        };

        Ok(config_dir.join("config.toml"))
    }

    /// The API key: config file first, then each of `HOWTO_API_KEY` and
    /// `OPENAI_API_KEY`. Fails with [`HowtoError::MissingApiKey`].
    pub fn api_key(&self) -> HowtoResult<String> {
        if let Some(key) = self.api_key.as_deref().map(str::trim).filter(|k| !k.is_empty()) {
            return Ok(key.to_string());
        }

        API_KEY_ENV_VARS
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .map(|key| key.trim().to_string())
            .find(|key| !key.is_empty())
            .ok_or(HowtoError::MissingApiKey)
    }
}
