use assert_cmd::prelude::*;
use predicates::prelude::*;
use rstest::rstest;
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tempfile::tempdir;

// Build a minimal valid TOML config for sim mode
fn write_valid_config(dir: &tempfile::TempDir) -> PathBuf {
    let toml = r#"
[serial]
baud = 115200

[zones]
red = 25.0
yellow = 35.0
max_distance = 100.0

[filter]
ema_alpha = 0.2

[trail]
capacity = 180
fade_speed = 3
radar_radius = 450.0

[tick]
period_ms = 4
read_timeout_ms = 20

[audio]
enabled = false
"#;
    let path = dir.path().join("cfg.toml");
    fs::write(&path, toml).unwrap();
    path
}

fn write_invalid_config(dir: &tempfile::TempDir) -> PathBuf {
    // yellow below red fails validation
    let toml = r#"
[zones]
red = 40.0
yellow = 35.0
max_distance = 100.0
"#;
    let path = dir.path().join("bad.toml");
    fs::write(&path, toml).unwrap();
    path
}

#[rstest]
#[case(&["--help"], 0, "Usage:", "stdout")]
#[case(&["self-check"], 0, "self-check: ok", "stdout")]
#[case(&["run", "--simulate", "--ticks", "20"], 0, "stopped after 20 ticks", "stdout")]
fn cli_table_cases(
    #[case] args: &[&str],
    #[case] exit_code: i32,
    #[case] needle: &str,
    #[case] stream: &str,
) {
    let dir = tempdir().unwrap();
    let cfg = write_valid_config(&dir);

    let mut cmd = Command::cargo_bin("radar").unwrap();

    // Always include a valid config to avoid relying on default path
    cmd.arg("--config").arg(&cfg);

    for a in args {
        cmd.arg(a);
    }

    let assert = cmd.assert().code(exit_code);
    match stream {
        "stdout" => {
            assert.stdout(predicate::str::contains(needle));
        }
        "stderr" => {
            assert.stderr(predicate::str::contains(needle));
        }
        other => panic!("unknown stream: {other}"),
    }
}

#[rstest]
fn missing_subcommand_is_a_usage_error() {
    let mut cmd = Command::cargo_bin("radar").unwrap();
    cmd.assert()
        .code(2)
        .stderr(predicate::str::contains("Usage:"));
}

#[rstest]
fn invalid_zone_ordering_is_rejected_with_a_hint() {
    let dir = tempdir().unwrap();
    let cfg = write_invalid_config(&dir);

    let mut cmd = Command::cargo_bin("radar").unwrap();
    cmd.arg("--config").arg(&cfg).arg("self-check");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("zones.yellow"));
}

#[rstest]
fn json_mode_emits_structured_errors() {
    let dir = tempdir().unwrap();
    let cfg = write_invalid_config(&dir);

    let mut cmd = Command::cargo_bin("radar").unwrap();
    cmd.arg("--config")
        .arg(&cfg)
        .arg("--json")
        .arg("self-check");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains(r#""reason":"Error""#));
}

#[rstest]
fn explicit_missing_config_falls_back_to_defaults() {
    // A nonexistent path is treated as "use built-in defaults", so a
    // bounded simulated run still works.
    let dir = tempdir().unwrap();
    let cfg = dir.path().join("does_not_exist.toml");

    let mut cmd = Command::cargo_bin("radar").unwrap();
    cmd.arg("--config").arg(&cfg).arg("self-check");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("self-check: ok"));
}
