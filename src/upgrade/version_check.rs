use colored::Colorize;
use serde::Deserialize;
use tracing::{debug, info};

use crate::core::{HowtoError, HowtoResult};
use crate::upgrade::build_info::{RunningBuildInfo, VersionIdentifier};
use crate::upgrade::config::UpgradeConfig;

/// The one field we need from the GitHub "latest release" document.
#[derive(Debug, Deserialize)]
struct ReleaseMetadata {
    #[serde(default)]
    tag_name: Option<String>,
}

/// Looks up the tag of the latest published release.
///
/// Performs a single `GET {api_base}/repos/{owner}/{repo}/releases/latest`
/// bounded by the client's timeout. There are no retries: the caller decides
/// whether a failure is fatal (`howto upgrade`) or ignorable (the startup
/// advisory).
#[derive(Debug, Clone)]
pub struct VersionResolver {
    client: reqwest::Client,
    metadata_url: String,
}

impl VersionResolver {
    pub fn new(client: reqwest::Client, config: &UpgradeConfig) -> Self {
        let metadata_url = format!(
            "{}/repos/{}/{}/releases/latest",
            config.api_base.trim_end_matches('/'),
            config.repo_owner,
            config.repo_name
        );
        Self {
            client,
            metadata_url,
        }
    }

    /// URL of the release metadata document.
    pub fn metadata_url(&self) -> &str {
        &self.metadata_url
    }

    /// Fetch the latest release tag.
    ///
    /// # Errors
    ///
    /// - [`HowtoError::NetworkError`] on transport failure, timeout or a
    ///   non-success status
    /// - [`HowtoError::MetadataParseError`] if the body is not JSON or has no
    ///   non-empty `tag_name`
    pub async fn resolve(&self) -> HowtoResult<VersionIdentifier> {
        debug!("Fetching release metadata from {}", self.metadata_url);

        let response = self
            .client
            .get(&self.metadata_url)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .send()
            .await
            .map_err(|e| HowtoError::network(&self.metadata_url, &e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(HowtoError::NetworkError {
                url: self.metadata_url.clone(),
                message: format!("HTTP {status}"),
            });
        }

        let body = response.text().await.map_err(|e| HowtoError::network(&self.metadata_url, &e))?;

        let metadata: ReleaseMetadata =
            serde_json::from_str(&body).map_err(|e| HowtoError::MetadataParseError {
                url: self.metadata_url.clone(),
                reason: e.to_string(),
            })?;

        match metadata.tag_name.as_deref().map(str::trim) {
            Some(tag) if !tag.is_empty() => {
                debug!("Latest release: {}", tag);
                Ok(VersionIdentifier::new(tag))
            }
            _ => Err(HowtoError::MetadataParseError {
                url: self.metadata_url.clone(),
                reason: "missing `tag_name` field".to_string(),
            }),
        }
    }
}

/// Startup advisory: tells the user, without ever failing, that a newer
/// release exists.
///
/// Run on every ordinary invocation. The upgrade command itself skips it to
/// avoid a redundant request right before it resolves the version anyway.
pub struct VersionChecker {
    build: RunningBuildInfo,
    resolver: VersionResolver,
}

impl VersionChecker {
    pub fn new(build: RunningBuildInfo, resolver: VersionResolver) -> Self {
        Self {
            build,
            resolver,
        }
    }

    /// Warn on stderr if the latest release differs from the running one.
    ///
    /// Returns `true` if a warning was printed. Development builds return
    /// `false` without touching the network; resolver errors are logged at
    /// debug level and treated as "nothing to warn about".
    pub async fn maybe_warn(&self) -> bool {
        let Some(current) = self.build.version() else {
            debug!("Development build, skipping update check");
            return false;
        };

        match self.resolver.resolve().await {
            Ok(latest) if &latest != current => {
                info!("Update available: {} -> {}", current, latest);
                Self::display_update_notification(current, &latest);
                true
            }
            Ok(_) => false,
            Err(e) => {
                debug!("Update check failed, not warning: {}", e);
                false
            }
        }
    }

    /// Print the advisory banner to stderr.
    pub fn display_update_notification(current: &VersionIdentifier, latest: &VersionIdentifier) {
        eprintln!(
            "{} howto {} is available (you have {}). Run {} to update.",
            "note:".bright_cyan().bold(),
            latest.as_str().green().bold(),
            current.as_str().yellow(),
            "howto upgrade".cyan().bold()
        );
    }

    /// Format version information for `howto upgrade --check`.
    pub fn format_version_info(current: &str, latest: Option<&str>) -> String {
        match latest {
            Some(v) if v != current => {
                format!("Current version: {}\nLatest version:  {} (update available)", current, v)
            }
            _ => format!("Current version: {} (up to date)", current),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::http::http_client;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const LATEST_PATH: &str = "/repos/acme/howto/releases/latest";

    fn resolver_for(server: &MockServer) -> VersionResolver {
        let config = UpgradeConfig::new()
            .with_repo("acme", "howto")
            .with_endpoints(server.uri(), server.uri());
        VersionResolver::new(http_client().unwrap(), &config)
    }

    async fn mount_latest(server: &MockServer, response: ResponseTemplate) {
        Mock::given(method("GET"))
            .and(path(LATEST_PATH))
            .respond_with(response)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_resolve_reads_tag_name() {
        let server = MockServer::start().await;
        mount_latest(
            &server,
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"tag_name": "v1.3.0", "name": "Release 1.3"})),
        )
        .await;

        let version = resolver_for(&server).resolve().await.unwrap();
        assert_eq!(version, VersionIdentifier::new("v1.3.0"));
    }

    #[tokio::test]
    async fn test_resolve_missing_tag_is_parse_error() {
        let server = MockServer::start().await;
        mount_latest(&server, ResponseTemplate::new(200).set_body_json(serde_json::json!({"name": "x"})))
            .await;

        let err = resolver_for(&server).resolve().await.unwrap_err();
        assert!(matches!(err, HowtoError::MetadataParseError { .. }), "{err:?}");
        assert!(err.to_string().contains("tag_name"));
    }

    #[tokio::test]
    async fn test_resolve_garbage_body_is_parse_error() {
        let server = MockServer::start().await;
        mount_latest(&server, ResponseTemplate::new(200).set_body_string("<html>rate limited</html>"))
            .await;

        let err = resolver_for(&server).resolve().await.unwrap_err();
        assert!(matches!(err, HowtoError::MetadataParseError { .. }), "{err:?}");
    }

    #[tokio::test]
    async fn test_resolve_non_success_status_is_network_error() {
        let server = MockServer::start().await;
        mount_latest(&server, ResponseTemplate::new(503)).await;

        let err = resolver_for(&server).resolve().await.unwrap_err();
        assert!(matches!(err, HowtoError::NetworkError { .. }), "{err:?}");
        assert!(err.to_string().contains("503"));
    }

    #[tokio::test]
    async fn test_advisory_warns_when_versions_differ() {
        let server = MockServer::start().await;
        mount_latest(&server, ResponseTemplate::new(200).set_body_json(serde_json::json!({"tag_name": "v2.0.0"})))
            .await;

        let checker = VersionChecker::new(RunningBuildInfo::release("v1.0.0"), resolver_for(&server));
        assert!(checker.maybe_warn().await);
    }

    #[tokio::test]
    async fn test_advisory_silent_when_up_to_date() {
        let server = MockServer::start().await;
        mount_latest(&server, ResponseTemplate::new(200).set_body_json(serde_json::json!({"tag_name": "v1.0.0"})))
            .await;

        let checker = VersionChecker::new(RunningBuildInfo::release("v1.0.0"), resolver_for(&server));
        assert!(!checker.maybe_warn().await);
    }

    #[tokio::test]
    async fn test_advisory_swallows_errors() {
        let server = MockServer::start().await;
        mount_latest(&server, ResponseTemplate::new(500)).await;

        let checker = VersionChecker::new(RunningBuildInfo::release("v1.0.0"), resolver_for(&server));
        assert!(!checker.maybe_warn().await);
    }

    #[tokio::test]
    async fn test_advisory_never_calls_network_for_dev_builds() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"tag_name": "v9"})))
            .expect(0)
            .mount(&server)
            .await;

        let checker = VersionChecker::new(RunningBuildInfo::Development, resolver_for(&server));
        assert!(!checker.maybe_warn().await);
        server.verify().await;
    }

    #[test]
    fn test_format_version_info() {
        let info = VersionChecker::format_version_info("v1.0.0", None);
        assert_eq!(info, "Current version: v1.0.0 (up to date)");

        let info = VersionChecker::format_version_info("v1.0.0", Some("v1.0.0"));
        assert_eq!(info, "Current version: v1.0.0 (up to date)");

        let info = VersionChecker::format_version_info("v1.0.0", Some("v1.1.0"));
        assert_eq!(info, "Current version: v1.0.0\nLatest version:  v1.1.0 (update available)");
    }
}
