use predicates::prelude::*;

use super::howto_cmd;

#[test]
fn test_query_without_api_key_reports_setup_hint() {
    let (mut cmd, _temp) = howto_cmd();
    cmd.args(["list", "open", "ports"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("No API key configured"))
        .stderr(predicate::str::contains("HOWTO_API_KEY"));
}

#[test]
fn test_query_with_unreachable_model_api_fails_cleanly() {
    let (mut cmd, temp) = howto_cmd();
    std::fs::write(
        temp.path().join("config.toml"),
        "api_key = \"sk-test\"\napi_url = \"http://127.0.0.1:9/v1/chat/completions\"\n\n[upgrade]\ncheck_on_startup = false\n",
    )
    .unwrap();

    cmd.args(["show", "disk", "usage"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Network request"));
}
