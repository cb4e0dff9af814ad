//! Integration tests for the rich-help demo CLI
//!
//! These tests exercise help rendering and dispatch end-to-end using
//! assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to get a rich-help command isolated from the user's config
fn rich_help(config_home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("rich-help").unwrap();
    cmd.env("XDG_CONFIG_HOME", config_home.path())
        .env("RICH_HELP_COLOR", "never")
        .env("RICH_HELP_WIDTH", "80")
        .env_remove("RICH_HELP_LOG");
    cmd
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.output().unwrap();
    assert!(output.status.success(), "{output:?}");
    String::from_utf8(output.stdout).unwrap()
}

// ============================================================================
// Help rendering
// ============================================================================

#[test]
fn test_root_help_lists_visible_commands() {
    let tmp = TempDir::new().unwrap();
    let out = stdout_of(rich_help(&tmp).arg("--help"));

    assert!(out.contains("Usage: rich-help"));
    assert!(out.contains("─ Options"));
    assert!(out.contains("─ Commands"));
    assert!(out.contains("greet"));
    assert!(out.contains("color"));
    assert!(out.contains("(Deprecated) Say hello the old way."));
    assert!(!out.contains("info"));
    assert!(out.contains("Made with rich-help"));
}

#[test]
fn test_help_sections_in_order() {
    let tmp = TempDir::new().unwrap();
    let out = stdout_of(rich_help(&tmp).arg("--help"));

    let banner = out.find("rich-help demo").unwrap();
    let usage = out.find("Usage:").unwrap();
    let options = out.find("─ Options").unwrap();
    let commands = out.find("─ Commands").unwrap();
    let epilog = out.find("Made with rich-help").unwrap();
    assert!(banner < usage && usage < options && options < commands && commands < epilog);
}

#[test]
fn test_no_args_shows_help() {
    let tmp = TempDir::new().unwrap();
    rich_help(&tmp)
        .assert()
        .success()
        .stdout(predicate::str::contains("─ Commands"));
}

#[test]
fn test_help_lines_fit_width() {
    let tmp = TempDir::new().unwrap();
    let out = stdout_of(rich_help(&tmp).arg("--help"));
    for line in out.lines() {
        assert!(line.chars().count() <= 80, "{line:?}");
    }
}

#[test]
fn test_command_help() {
    let tmp = TempDir::new().unwrap();
    rich_help(&tmp)
        .args(["greet", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: rich-help greet [OPTIONS] <NAME>"))
        .stdout(predicate::str::contains("─ Arguments"))
        .stdout(predicate::str::contains("NAME"))
        .stdout(predicate::str::contains("--message <MESSAGE>"))
        .stdout(predicate::str::contains("(default: Hello)"))
        .stdout(predicate::str::contains("(required)"));
}

#[test]
fn test_short_help_flag() {
    let tmp = TempDir::new().unwrap();
    rich_help(&tmp)
        .args(["greet", "-h"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--shout"));
}

#[test]
fn test_subgroup_help_uses_local_name_and_callback_help() {
    let tmp = TempDir::new().unwrap();
    rich_help(&tmp)
        .arg("color")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: rich-help color"))
        .stdout(predicate::str::contains("Work with colors and gradients."))
        .stdout(predicate::str::contains("blend"))
        .stdout(predicate::str::contains("hex"))
        .stdout(predicate::str::contains("Colors are approximated"));
}

// ============================================================================
// Dispatch
// ============================================================================

#[test]
fn test_greet() {
    let tmp = TempDir::new().unwrap();
    rich_help(&tmp)
        .args(["greet", "World"])
        .assert()
        .success()
        .stdout("Hello World\n");
}

#[test]
fn test_greet_with_options() {
    let tmp = TempDir::new().unwrap();
    rich_help(&tmp)
        .args(["greet", "World", "-m", "Hi", "--shout"])
        .assert()
        .success()
        .stdout("HI WORLD\n");
}

#[test]
fn test_greet_missing_name_fails() {
    let tmp = TempDir::new().unwrap();
    rich_help(&tmp)
        .arg("greet")
        .assert()
        .failure()
        .stderr(predicate::str::contains("<NAME>"));
}

#[test]
fn test_unknown_option_fails() {
    let tmp = TempDir::new().unwrap();
    rich_help(&tmp)
        .args(["greet", "World", "--bogus"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--bogus"));
}

#[test]
fn test_deprecated_command_warns() {
    let tmp = TempDir::new().unwrap();
    rich_help(&tmp)
        .arg("hello")
        .assert()
        .success()
        .stdout("Hello!\n")
        .stderr(predicate::str::contains(
            "DeprecationWarning: The command 'hello' is deprecated.",
        ));
}

#[test]
fn test_hidden_command_still_runs() {
    let tmp = TempDir::new().unwrap();
    rich_help(&tmp)
        .arg("info")
        .assert()
        .success()
        .stdout(predicate::str::contains("rich-help"));
}

#[test]
fn test_version_flag() {
    let tmp = TempDir::new().unwrap();
    rich_help(&tmp)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_color_hex() {
    let tmp = TempDir::new().unwrap();
    rich_help(&tmp)
        .args(["color", "hex", "255", "0", "128"])
        .assert()
        .success()
        .stdout("#FF0080\n");
}

#[test]
fn test_color_blend_plain_when_piped() {
    let tmp = TempDir::new().unwrap();
    rich_help(&tmp)
        .args(["color", "blend", "gradient"])
        .assert()
        .success()
        .stdout("gradient\n");
}

#[test]
fn test_color_blend_rejects_bad_hex() {
    let tmp = TempDir::new().unwrap();
    rich_help(&tmp)
        .args(["color", "blend", "x", "--from", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid color"));
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_config_file_sets_width() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("rich-help");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("config.yaml"), "width: 50\n").unwrap();

    let mut cmd = rich_help(&tmp);
    cmd.env_remove("RICH_HELP_WIDTH").arg("--help");
    let out = stdout_of(&mut cmd);
    let widest = out.lines().map(|line| line.chars().count()).max().unwrap();
    assert_eq!(widest, 50);
}

#[test]
fn test_env_width_overrides_config_file() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("rich-help");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("config.yaml"), "width: 50\n").unwrap();

    let out = stdout_of(rich_help(&tmp).env("RICH_HELP_WIDTH", "70").arg("--help"));
    let widest = out.lines().map(|line| line.chars().count()).max().unwrap();
    assert_eq!(widest, 70);
}

#[test]
fn test_broken_config_file_is_ignored() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("rich-help");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("config.yaml"), "width: [oops\n").unwrap();

    rich_help(&tmp)
        .args(["greet", "World"])
        .assert()
        .success()
        .stdout("Hello World\n");
}
