//! Self-upgrade end to end through the public API.

use anyhow::Result;
use howto_cli::core::HowtoError;
use howto_cli::test_utils::{FakeInstall, init_test_logging};
use howto_cli::upgrade::{
    AtomicReplacer, BinaryFetcher, RunningBuildInfo, SelfUpdater, UpgradeConfig, UpgradeOutcome,
    VersionChecker, VersionIdentifier, VersionResolver,
};
use howto_cli::utils::{http_client, release_asset_name};
use std::io::Cursor;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn release_server(tag: &str, artifact: &[u8]) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/acme/howto/releases/latest"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "tag_name": tag })),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/acme/howto/releases/download/{}/{}", tag, release_asset_name())))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(artifact.to_vec()))
        .mount(&server)
        .await;
    server
}

fn config_for(server: &MockServer) -> UpgradeConfig {
    UpgradeConfig::new().with_repo("acme", "howto").with_endpoints(server.uri(), server.uri())
}

fn updater_for(
    server: &MockServer,
    build: RunningBuildInfo,
    install: &FakeInstall,
) -> Result<SelfUpdater> {
    let config = config_for(server);
    let fetcher = BinaryFetcher::new(http_client()?, &config).with_staging_dir(install.staging());
    Ok(SelfUpdater::new(build, &config, install.exe().to_path_buf())?.with_fetcher(fetcher))
}

#[tokio::test]
async fn test_upgrade_replaces_binary_and_cleans_up() -> Result<()> {
    init_test_logging(None);
    let install = FakeInstall::new(b"howto v1.2.0")?;
    let server = release_server("v1.3.0", b"howto v1.3.0").await;

    let outcome = updater_for(&server, RunningBuildInfo::release("v1.2.0"), &install)?
        .run(&mut Cursor::new("y\n"))
        .await?;

    assert_eq!(
        outcome,
        UpgradeOutcome::Upgraded {
            from: VersionIdentifier::new("v1.2.0"),
            to: VersionIdentifier::new("v1.3.0"),
        }
    );
    assert_eq!(install.contents(), b"howto v1.3.0");
    assert_eq!(install.entries(), vec!["howto", "staging"]);
    assert!(install.staging_is_empty());

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = std::fs::metadata(install.exe())?.permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
    }

    Ok(())
}

#[tokio::test]
async fn test_second_run_after_upgrade_is_already_latest() -> Result<()> {
    init_test_logging(None);
    let install = FakeInstall::new(b"howto v1.2.0")?;
    let server = release_server("v1.3.0", b"howto v1.3.0").await;

    updater_for(&server, RunningBuildInfo::release("v1.2.0"), &install)?
        .assume_yes(true)
        .run(&mut Cursor::new(""))
        .await?;

    // The replaced binary would report the new tag.
    let outcome = updater_for(&server, RunningBuildInfo::release("v1.3.0"), &install)?
        .run(&mut Cursor::new("y\n"))
        .await?;

    assert_eq!(outcome, UpgradeOutcome::AlreadyLatest(VersionIdentifier::new("v1.3.0")));
    assert_eq!(install.contents(), b"howto v1.3.0");
    Ok(())
}

#[tokio::test]
async fn test_declined_upgrade_changes_nothing() -> Result<()> {
    let install = FakeInstall::new(b"howto v1.2.0")?;
    let server = release_server("v1.3.0", b"howto v1.3.0").await;

    let outcome = updater_for(&server, RunningBuildInfo::release("v1.2.0"), &install)?
        .run(&mut Cursor::new("n\n"))
        .await?;

    assert_eq!(outcome, UpgradeOutcome::Declined);
    assert_eq!(install.contents(), b"howto v1.2.0");
    assert_eq!(install.entries(), vec!["howto", "staging"]);
    Ok(())
}

#[cfg(unix)]
#[tokio::test]
async fn test_read_only_install_dir_reports_permission_denied() -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    // Root ignores directory permissions.
    if nix_is_root() {
        return Ok(());
    }

    let install = FakeInstall::new(b"howto v1.2.0")?;
    let server = release_server("v1.3.0", b"howto v1.3.0").await;
    let staging = tempfile::TempDir::new()?;
    let config = config_for(&server);
    let fetcher = BinaryFetcher::new(http_client()?, &config).with_staging_dir(staging.path());
    let updater = SelfUpdater::new(
        RunningBuildInfo::release("v1.2.0"),
        &config,
        install.exe().to_path_buf(),
    )?
    .with_fetcher(fetcher)
    .with_replacer(AtomicReplacer::new());

    std::fs::set_permissions(install.root(), std::fs::Permissions::from_mode(0o555))?;
    let result = updater.run(&mut Cursor::new("y\n")).await;
    std::fs::set_permissions(install.root(), std::fs::Permissions::from_mode(0o755))?;

    let err = result.expect_err("upgrade into a read-only directory must fail");
    assert!(matches!(err, HowtoError::PermissionDenied { .. }), "{err:?}");
    assert_eq!(install.contents(), b"howto v1.2.0");
    Ok(())
}

#[cfg(unix)]
fn nix_is_root() -> bool {
    std::process::Command::new("id")
        .arg("-u")
        .output()
        .map(|out| String::from_utf8_lossy(&out.stdout).trim() == "0")
        .unwrap_or(false)
}

#[tokio::test]
async fn test_advisory_warns_only_when_tags_differ() -> Result<()> {
    let server = release_server("v1.3.0", b"").await;
    let resolver = || VersionResolver::new(http_client().unwrap(), &config_for(&server));

    assert!(VersionChecker::new(RunningBuildInfo::release("v1.2.0"), resolver()).maybe_warn().await);
    assert!(!VersionChecker::new(RunningBuildInfo::release("v1.3.0"), resolver()).maybe_warn().await);
    assert!(!VersionChecker::new(RunningBuildInfo::Development, resolver()).maybe_warn().await);
    Ok(())
}

#[tokio::test]
async fn test_advisory_swallows_unreachable_server() {
    let config = UpgradeConfig::new().with_endpoints("http://127.0.0.1:9", "http://127.0.0.1:9");
    let resolver = VersionResolver::new(http_client().unwrap(), &config);
    assert!(!VersionChecker::new(RunningBuildInfo::release("v1.0.0"), resolver).maybe_warn().await);
}
