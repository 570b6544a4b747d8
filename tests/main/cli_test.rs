//! CLI contract tests.
//!
//! These run the real binary with an isolated `HOME` so no developer
//! token or config leaks in; nothing here talks to a backend.

use assert_cmd::Command;

fn aerodesk(home: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("aerodesk").expect("binary builds");
    cmd.env("HOME", home);
    cmd.env_remove("AERODESK_API_URL");
    cmd.env_remove("AERODESK_CONFIG_PATH");
    cmd
}

#[test]
fn help_lists_primary_subcommands() {
    let home = tempfile::tempdir().expect("tempdir");
    let assert = aerodesk(home.path()).arg("--help").assert().success();
    let output = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    for subcommand in ["shell", "login", "register", "logout", "whoami"] {
        assert!(output.contains(subcommand), "help should mention {subcommand}");
    }
    for listing in ["airlines", "flights", "passengers", "bookings"] {
        assert!(output.contains(listing), "help should mention {listing}");
    }
}

#[test]
fn whoami_without_a_token_reports_signed_out() {
    let home = tempfile::tempdir().expect("tempdir");
    let assert = aerodesk(home.path()).arg("whoami").assert().success();
    let output = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    assert!(output.contains("Not signed in."));
}

#[test]
fn logout_without_a_token_succeeds() {
    let home = tempfile::tempdir().expect("tempdir");
    aerodesk(home.path()).arg("logout").assert().success();
}

#[test]
fn register_rejects_bad_input_before_any_request() {
    let home = tempfile::tempdir().expect("tempdir");
    let assert = aerodesk(home.path())
        .args([
            "register",
            "--first-name",
            "",
            "--last-name",
            "Pond",
            "--email",
            "not-an-email",
            "--password",
            "pw",
        ])
        .assert()
        .failure();
    let errors = String::from_utf8_lossy(&assert.get_output().stderr).to_string();
    assert!(errors.contains("email"));
}
