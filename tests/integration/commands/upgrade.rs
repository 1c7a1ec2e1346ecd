//! `howto upgrade` through the real binary.
//!
//! A test build is a development build unless `HOWTO_RELEASE_TAG` was set at
//! compile time, so these check the development-build contract: no network,
//! no changes, exit 0.

use predicates::prelude::*;

use super::{howto_cmd, is_development_build};

#[test]
fn test_upgrade_in_development_build_is_skipped() {
    if !is_development_build() {
        return;
    }

    let (mut cmd, _temp) = howto_cmd();
    cmd.arg("upgrade")
        .write_stdin("y\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Development build"));
}

#[test]
fn test_upgrade_check_in_development_build() {
    if !is_development_build() {
        return;
    }

    let (mut cmd, _temp) = howto_cmd();
    cmd.args(["upgrade", "--check"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Development build"));
}

#[test]
fn test_upgrade_with_malformed_config_fails() {
    let (mut cmd, temp) = howto_cmd();
    std::fs::write(temp.path().join("config.toml"), "[upgrade\n").unwrap();

    cmd.arg("upgrade")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Configuration error"))
        .stderr(predicate::str::contains("HOWTO_CONFIG_PATH"))
        .stderr(predicate::str::contains("api_key").not());
}
