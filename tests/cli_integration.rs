//! Integration tests for the yamlvault CLI.
//!
//! These tests exercise the binary end-to-end using `assert_cmd`. The
//! real `ansible-vault` is not assumed to be installed: transformation
//! tests swap in a stub cipher script via `--cipher`, and interactive
//! prompts are bypassed with `YAMLVAULT_PASSWORD`.

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Helper: get a Command pointing at the yamlvault binary.
fn yamlvault() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("yamlvault").expect("binary should exist")
}

/// Helper: a project directory holding an ansible.cfg plus any extra files.
fn project(cfg_body: &str, files: &[(&str, &str)]) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    for (name, contents) in files {
        fs::write(dir.path().join(name), contents).unwrap();
    }
    let cfg = dir.path().join("ansible.cfg");
    fs::write(&cfg, cfg_body).unwrap();
    (dir, cfg)
}

/// Helper: write an executable stub standing in for `ansible-vault`.
///
/// `encrypt` prints a fixed well-formed envelope, `decrypt` prints a
/// fixed plaintext; both swallow stdin.
#[cfg(unix)]
fn stub_cipher(dir: &TempDir) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let script = dir.path().join("stub-vault");
    fs::write(
        &script,
        "#!/bin/sh\n\
         mode=\"$1\"\n\
         cat > /dev/null\n\
         if [ \"$mode\" = \"encrypt\" ]; then\n\
           printf '$ANSIBLE_VAULT;1.1;AES256\\n73747562\\n'\n\
         else\n\
           printf 'stub-plaintext'\n\
         fi\n",
    )
    .unwrap();
    fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
    script
}

// ---------------------------------------------------------------------------
// Help and version
// ---------------------------------------------------------------------------

#[test]
fn help_flag_shows_usage() {
    yamlvault()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Encrypt and decrypt Ansible Vault blocks",
        ))
        .stdout(predicate::str::contains("encrypt"))
        .stdout(predicate::str::contains("decrypt"));
}

#[test]
fn version_flag_shows_version() {
    yamlvault()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("yamlvault"));
}

#[test]
fn no_args_shows_help() {
    yamlvault()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn encrypt_help_shows_context_line_flag() {
    yamlvault()
        .args(["encrypt", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("context-line"))
        .stdout(predicate::str::contains("vault-id"));
}

// ---------------------------------------------------------------------------
// Transformation through the stub cipher
// ---------------------------------------------------------------------------

#[cfg(unix)]
#[test]
fn encrypt_produces_tagged_indented_block() {
    let (dir, cfg) = project(
        "[defaults]\nvault_password_file=pw\n",
        &[("pw", "hunter2\n")],
    );
    let cipher = stub_cipher(&dir);

    yamlvault()
        .args([
            "encrypt",
            "--config",
            cfg.to_str().unwrap(),
            "--cipher",
            cipher.to_str().unwrap(),
            "--context-line",
            "key: ",
        ])
        .write_stdin("secret")
        .assert()
        .success()
        .stdout(predicate::eq(
            "  !vault |\n  $ANSIBLE_VAULT;1.1;AES256\n  73747562\n",
        ));
}

#[cfg(unix)]
#[test]
fn decrypt_recovers_plaintext_with_single_password() {
    let (dir, cfg) = project(
        "[defaults]\nvault_password_file=pw\n",
        &[("pw", "hunter2\n")],
    );
    let cipher = stub_cipher(&dir);

    yamlvault()
        .args([
            "decrypt",
            "--config",
            cfg.to_str().unwrap(),
            "--cipher",
            cipher.to_str().unwrap(),
        ])
        .write_stdin("  !vault |\n  $ANSIBLE_VAULT;1.1;AES256\n  73747562\n")
        .assert()
        .success()
        .stdout(predicate::eq("stub-plaintext"));
}

#[cfg(unix)]
#[test]
fn decrypt_falls_back_to_password_on_unknown_vault_id() {
    let (dir, cfg) = project(
        "[defaults]\nvault_identity_list=dev@pw-dev\n",
        &[("pw-dev", "d\n")],
    );
    let cipher = stub_cipher(&dir);

    yamlvault()
        .args([
            "decrypt",
            "--config",
            cfg.to_str().unwrap(),
            "--cipher",
            cipher.to_str().unwrap(),
        ])
        .env("YAMLVAULT_PASSWORD", "one-off")
        .write_stdin("  !vault |\n  $ANSIBLE_VAULT;1.2;AES256;prod\n  73747562\n")
        .assert()
        .success()
        .stdout(predicate::eq("stub-plaintext"))
        .stderr(predicate::str::contains("prod"));
}

// ---------------------------------------------------------------------------
// Failure paths
// ---------------------------------------------------------------------------

#[test]
fn encrypt_fails_cleanly_when_cipher_is_missing() {
    let (_dir, cfg) = project(
        "[defaults]\nvault_password_file=pw\n",
        &[("pw", "hunter2\n")],
    );

    yamlvault()
        .args([
            "encrypt",
            "--config",
            cfg.to_str().unwrap(),
            "--cipher",
            "/nonexistent/ansible-vault",
        ])
        .write_stdin("secret")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Encryption failed"));
}

#[test]
fn decrypt_rejects_garbage_without_invoking_cipher() {
    let (_dir, cfg) = project(
        "[defaults]\nvault_password_file=pw\n",
        &[("pw", "hunter2\n")],
    );

    // The cipher path is unusable on purpose: a block that is not a
    // vault envelope must be rejected before any cipher process runs.
    yamlvault()
        .args([
            "decrypt",
            "--config",
            cfg.to_str().unwrap(),
            "--cipher",
            "/nonexistent/ansible-vault",
        ])
        .write_stdin("not a vault block")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Malformed vault envelope"));
}

#[test]
fn encrypt_fails_on_missing_input_file() {
    yamlvault()
        .args(["encrypt", "--file", "/nonexistent/plaintext.txt"])
        .assert()
        .failure();
}
