use predicates::prelude::*;

use super::howto_cmd;

#[test]
fn test_version_flag_prints_build_identity() {
    let (mut cmd, _temp) = howto_cmd();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(howto_cli::upgrade::VERSION_TEXT));
}

#[test]
fn test_help_lists_upgrade() {
    let (mut cmd, _temp) = howto_cmd();
    cmd.arg("--help").assert().success().stdout(predicate::str::contains("upgrade"));
}

#[test]
fn test_no_arguments_prints_help() {
    let (mut cmd, _temp) = howto_cmd();
    cmd.assert().success().stdout(predicate::str::contains("Usage"));
}

#[test]
fn test_upgrade_help_shows_flags() {
    let (mut cmd, _temp) = howto_cmd();
    cmd.args(["upgrade", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--check"))
        .stdout(predicate::str::contains("--yes"));
}
