//! Binary-level tests for argument handling, exit codes and error output.
//!
//! These runs never reach a Snowflake server: every case fails while reading
//! or checking the secret, so only the env backend is used.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use assert_cmd::Command;
use predicates::prelude::*;

const MISSING_VAR: &str = "SNOWCRED_SECRET_SNOWFLAKE_NOSUCHACCT";

fn snowcred() -> Command {
    let mut cmd = Command::cargo_bin("snowcred").unwrap();
    cmd.env_remove("SNOWCRED_ACCOUNT")
        .env_remove("SNOWCRED_SECRETS_BACKEND")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_help_lists_connection_flags() {
    snowcred()
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("--account")
                .and(predicate::str::contains("--warehouse"))
                .and(predicate::str::contains("--database"))
                .and(predicate::str::contains("--schema"))
                .and(predicate::str::contains("--no-keepalive"))
                .and(predicate::str::contains("<ENGINE_KEY>")),
        );
}

#[test]
fn test_missing_account_is_a_usage_error() {
    snowcred()
        .arg("reporting")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--account"));
}

#[test]
fn test_missing_engine_key_is_a_usage_error() {
    snowcred().args(["-a", "analytics"]).assert().code(2);
}

#[test]
fn test_missing_secret_names_the_variable() {
    snowcred()
        .args(["--secrets-backend", "env", "-a", "nosuchacct", "label"])
        .env_remove(MISSING_VAR)
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains(MISSING_VAR));
}

#[test]
fn test_json_error_envelope() {
    let output = snowcred()
        .args(["--json", "--secrets-backend", "env", "-a", "nosuchacct", "label"])
        .env_remove(MISSING_VAR)
        .assert()
        .code(2)
        .get_output()
        .stdout
        .clone();

    let envelope: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(envelope["status"], "error");
    assert_eq!(envelope["error"]["code"], "config");
    assert!(
        envelope["error"]["message"]
            .as_str()
            .unwrap()
            .contains("snowflake/nosuchacct")
    );
}

#[test]
fn test_payload_without_warehouse_fails_before_connecting() {
    snowcred()
        .args(["--secrets-backend", "env", "-a", "nowh", "label"])
        .env(
            "SNOWCRED_SECRET_SNOWFLAKE_NOWH",
            r#"{"username": "u", "password": "hunter2", "account_identifier": "acct"}"#,
        )
        .assert()
        .code(2)
        .stderr(
            predicate::str::contains("No warehouse configured")
                .and(predicate::str::contains("hunter2").not()),
        );
}

#[test]
fn test_malformed_payload_is_a_config_error() {
    snowcred()
        .args(["--secrets-backend", "env", "-a", "broken", "label"])
        .env("SNOWCRED_SECRET_SNOWFLAKE_BROKEN", "not json")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("snowflake/broken"));
}
