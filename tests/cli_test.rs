use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn help_lists_subcommands() {
    Command::cargo_bin("claude-usage-tracker")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("report"))
        .stdout(predicate::str::contains("limits"))
        .stdout(predicate::str::contains("check"));
}

#[test]
fn version_flag_works() {
    Command::cargo_bin("claude-usage-tracker")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("1.0.1"));
}

#[cfg(not(target_os = "macos"))]
#[test]
fn report_without_credentials_fails_with_json_error() {
    Command::cargo_bin("claude-usage-tracker")
        .unwrap()
        .args(["report", "--json"])
        .env_remove("ANTHROPIC_ADMIN_API_KEY")
        .assert()
        .failure()
        .stdout(predicate::str::contains("no credentials available"));
}

#[cfg(not(target_os = "macos"))]
#[test]
fn unknown_timeframe_still_resolves_before_credential_check() {
    // The bogus token falls back to "today"; the run still fails on missing
    // credentials, not on timeframe parsing.
    Command::cargo_bin("claude-usage-tracker")
        .unwrap()
        .args(["report", "--timeframe", "bogus"])
        .env_remove("ANTHROPIC_ADMIN_API_KEY")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no credentials available"));
}

#[cfg(not(target_os = "macos"))]
#[test]
fn limits_without_token_reports_unavailable() {
    Command::cargo_bin("claude-usage-tracker")
        .unwrap()
        .arg("limits")
        .env_remove("CLAUDE_CODE_OAUTH_TOKEN")
        .assert()
        .success()
        .stdout(predicate::str::contains("Session usage unavailable"));
}
