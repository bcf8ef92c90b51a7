//! Tests for encrypt/decrypt and the recursive commands.
//!
//! These run against static example AWS credentials: building the client
//! is offline, so only paths that fail or select nothing before the first
//! provider call are exercised here. Real round-trips live in
//! `aws_kms.rs` and `gcp_kms.rs`.

use crate::support::*;

#[test]
fn test_encrypt_missing_file() {
    let t = Test::new();
    assert_success(&t.config_static_creds());

    let output = t.run(&["encrypt", "aws", "-c", CONFIG, "absent.txt"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "failed to read");
    assert!(!t.path("absent.txt.crypted").exists());
}

#[test]
fn test_re_encrypt_without_siblings_touches_nothing() {
    let t = Test::new();
    assert_success(&t.config_static_creds());
    t.write("tree/a.txt", b"a");
    t.write("tree/nested/b.txt", b"b");

    let output = t.run(&["re-encrypt", "aws", "-c", CONFIG, "tree"]);
    assert_success(&output);
    assert_stdout_contains(&output, "no matching files");

    assert!(!t.path("tree/a.txt.crypted").exists());
    assert!(!t.path("tree/nested/b.txt.crypted").exists());
    assert_eq!(t.read("tree/a.txt"), b"a");
}

#[test]
fn test_re_decrypt_ignores_other_extensions() {
    let t = Test::new();
    assert_success(&t.config_static_creds());
    t.write("tree/a.txt.crypted", b"ciphertext");
    t.write("tree/b.txt", b"b");

    // Only files ending with `.enc` are selected, and there are none.
    let output = t.run(&["rde", "a", "-c", CONFIG, "-e", ".enc", "tree"]);
    assert_success(&output);
    assert_stdout_contains(&output, "no matching files");
    assert!(!t.path("tree/a.txt").exists());
}

#[test]
fn test_re_decrypt_missing_dir() {
    let t = Test::new();
    assert_success(&t.config_static_creds());

    let output = t.run(&["re-decrypt", "aws", "-c", CONFIG, "absent"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "directory walk failed");
}

#[test]
fn test_service_account_session_opens_offline() {
    let t = Test::new();
    assert_success(&t.config_valid_service_account());
    t.write("tree/a.txt", b"a");

    let output = t.run(&["re-encrypt", "gcp", "-c", CONFIG, "tree"]);
    assert_success(&output);
    assert_stdout_contains(&output, "no matching files");
    assert!(!t.path("tree/a.txt.crypted").exists());
}
