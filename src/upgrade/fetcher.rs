use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::constants::STAGING_PREFIX;
use crate::core::{HowtoError, HowtoResult};
use crate::upgrade::build_info::VersionIdentifier;
use crate::upgrade::config::UpgradeConfig;
use crate::utils::platform::release_asset_name;

/// A downloaded artifact waiting to be installed.
///
/// The file is removed when the value is dropped, so every early return
/// between download and installation cleans up after itself. The replacer
/// disarms the guard once the file has been moved into place.
#[derive(Debug)]
pub struct StagingFile {
    path: PathBuf,
    armed: bool,
}

impl StagingFile {
    /// Take ownership of an existing file; it will be deleted on drop.
    pub fn adopt(path: PathBuf) -> Self {
        Self {
            path,
            armed: true,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The file has been renamed away; there is nothing left to clean up.
    pub(crate) fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for StagingFile {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        match fs::remove_file(&self.path) {
            Ok(()) => debug!("Removed staging file {}", self.path.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!("Failed to remove staging file {}: {}", self.path.display(), e),
        }
    }
}

/// Downloads the release artifact for a given version.
///
/// The artifact is a bare executable published as a release asset at
/// `{download_base}/{owner}/{repo}/releases/download/{tag}/{asset}`.
#[derive(Debug, Clone)]
pub struct BinaryFetcher {
    client: reqwest::Client,
    download_base: String,
    repo_owner: String,
    repo_name: String,
    asset_name: String,
    staging_dir: PathBuf,
}

impl BinaryFetcher {
    /// Create a fetcher that stages downloads in the system temp directory.
    pub fn new(client: reqwest::Client, config: &UpgradeConfig) -> Self {
        Self {
            client,
            download_base: config.download_base.trim_end_matches('/').to_string(),
            repo_owner: config.repo_owner.clone(),
            repo_name: config.repo_name.clone(),
            asset_name: release_asset_name(),
            staging_dir: std::env::temp_dir(),
        }
    }

    /// Stage downloads somewhere other than the system temp directory.
    pub fn with_staging_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.staging_dir = dir.into();
        self
    }

    /// Name of the asset this fetcher downloads.
    pub fn asset_name(&self) -> &str {
        &self.asset_name
    }

    /// Download URL for `version`.
    pub fn artifact_url(&self, version: &VersionIdentifier) -> String {
        format!(
            "{}/{}/{}/releases/download/{}/{}",
            self.download_base, self.repo_owner, self.repo_name, version, self.asset_name
        )
    }

    /// Download the artifact for `version` into a fresh staging file.
    ///
    /// The staging file is uniquely named, owner-executable, and owned by the
    /// caller. If anything fails after it is created it is removed before the
    /// error is returned.
    ///
    /// # Errors
    ///
    /// - [`HowtoError::NetworkError`] on transport failure or a non-success status
    /// - [`HowtoError::IoError`] if the staging file cannot be written
    pub async fn fetch(&self, version: &VersionIdentifier) -> HowtoResult<StagingFile> {
        let url = self.artifact_url(version);
        info!("Downloading {}", url);

        let response =
            self.client.get(&url).send().await.map_err(|e| HowtoError::network(&url, &e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(HowtoError::NetworkError {
                url,
                message: format!("HTTP {status}"),
            });
        }

        let bytes = response.bytes().await.map_err(|e| HowtoError::network(&url, &e))?;
        debug!("Downloaded {} bytes", bytes.len());

        self.stage(&bytes)
    }

    fn stage(&self, bytes: &[u8]) -> HowtoResult<StagingFile> {
        // NamedTempFile removes itself if we bail out before `keep`.
        let mut file = tempfile::Builder::new()
            .prefix(STAGING_PREFIX)
            .tempfile_in(&self.staging_dir)
            .map_err(|e| HowtoError::from_io("create staging file in", &self.staging_dir, e))?;

        let path = file.path().to_path_buf();
        file.write_all(bytes).map_err(|e| HowtoError::from_io("write", &path, e))?;
        file.as_file().sync_all().map_err(|e| HowtoError::from_io("sync", &path, e))?;
        make_executable(file.as_file(), &path)?;

        let path = file
            .into_temp_path()
            .keep()
            .map_err(|e| HowtoError::from_io("keep", &path, e.error))?;

        debug!("Staged artifact at {}", path.display());
        Ok(StagingFile::adopt(path))
    }
}

/// Make `file` executable by its owner (`0o755`). No-op on Windows.
pub(crate) fn make_executable(file: &fs::File, path: &Path) -> HowtoResult<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(fs::Permissions::from_mode(0o755))
            .map_err(|e| HowtoError::from_io("set permissions on", path, e))?;
    }
    #[cfg(not(unix))]
    {
        let _ = (file, path);
    }
    Ok(())
}
