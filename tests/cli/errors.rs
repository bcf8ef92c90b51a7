//! Tests for error handling and CLI flags.

use crate::support::*;

#[test]
fn test_help() {
    let t = Test::new();

    let output = t.run(&["--help"]);
    assert_success(&output);
    let out = stdout(&output);
    assert!(out.contains("cloudkey") || out.contains("Usage"));
}

#[test]
fn test_unknown_command_fails() {
    let t = Test::new();
    assert_failure(&t.run(&["unknown-command"]));
}

#[test]
fn test_version_flag() {
    let t = Test::new();

    let output = t.run(&["--version"]);
    assert_success(&output);
    assert_stdout_contains(&output, env!("CARGO_PKG_VERSION"));
}

#[test]
fn test_encrypt_requires_config_flag() {
    let t = Test::new();
    t.write("file.txt", SAMPLE_PLAINTEXT);

    assert_failure(&t.run(&["encrypt", "gcp", "file.txt"]));
}

#[test]
fn test_malformed_config() {
    let t = Test::new();
    t.write(CONFIG, b"this is not valid toml { [ }");
    t.write("file.txt", SAMPLE_PLAINTEXT);

    let output = t.run(&["encrypt", "gcp", "-c", CONFIG, "file.txt"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "failed to parse config");
}

#[test]
fn test_missing_service_account_key() {
    let t = Test::new();
    assert_success(&t.config_service_account("absent.json"));
    t.write("file.txt", SAMPLE_PLAINTEXT);

    let output = t.run(&["encrypt", "gcp", "-c", CONFIG, "file.txt"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "failed to read service account key");
    assert_stderr_contains(&output, "ServiceAccountKey");
    assert!(!t.path("file.txt.crypted").exists());
}

#[test]
fn test_malformed_service_account_key() {
    let t = Test::new();
    t.write("sa.json", b"{ not json");
    assert_success(&t.config_service_account("sa.json"));
    t.write("file.txt", SAMPLE_PLAINTEXT);

    let output = t.run(&["decrypt", "gcp", "-c", CONFIG, "file.txt"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "invalid service account key");
}

#[test]
fn test_gcloud_account_without_credentials() {
    let t = Test::new();
    assert_success(&t.config_gcloud_account());
    t.write("file.txt", SAMPLE_PLAINTEXT);

    let output = t.run(&["encrypt", "gcp", "-c", CONFIG, "file.txt"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "authentication failed");
    assert_stderr_contains(&output, "gcloud auth application-default login");
    assert!(!t.path("file.txt.crypted").exists());
}

#[test]
fn test_missing_shared_credentials_file() {
    let t = Test::new();
    assert_success(&t.config_shared_creds("absent-credentials", "ops"));
    t.write("file.txt", SAMPLE_PLAINTEXT);

    let output = t.run(&["encrypt", "aws", "-c", CONFIG, "file.txt"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "failed to open aws session");
}

#[test]
fn test_completions_bash_outputs_script() {
    let t = Test::new();

    let output = t.run(&["completions", "bash"]);
    assert_success(&output);
    let out = stdout(&output);
    assert!(out.contains("_cloudkey") || out.contains("complete"));
}

#[test]
fn test_completions_invalid_shell() {
    let t = Test::new();
    assert_failure(&t.run(&["completions", "tcsh"]));
}
