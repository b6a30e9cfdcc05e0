//! End-to-end runs of the sca-cli binary against the sample case.

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::{tempdir, TempDir};

fn repo_path(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join(relative)
}

fn sample() -> String {
    repo_path("test_data/cases/sample.json")
        .to_str()
        .unwrap()
        .to_string()
}

/// Command with an empty home directory, so no user config is picked up.
fn sca() -> (TempDir, Command) {
    let home = tempdir().unwrap();
    let mut cmd = cargo_bin_cmd!("sca-cli");
    cmd.env("HOME", home.path()).env_remove("RUST_LOG");
    (home, cmd)
}

fn stdout_lines(output: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(output)
        .lines()
        .map(String::from)
        .collect()
}

#[test]
fn busfault_table_report() {
    let (_home, mut cmd) = sca();
    let output = cmd
        .args(["busfault", "-f", &sample(), "-c", "ABC"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Va_mag (kV)"))
        .stdout(predicate::str::contains("ROANOKE"))
        .get_output()
        .stdout
        .clone();
    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 5);
    assert!(lines[0].starts_with("Fault Description"));
    assert!(lines[1].contains("1. Bus Fault on: 1 NEVADA 132.0 kV 3LG ABC"));
}

#[test]
fn busfault_alias_csv_with_filter() {
    let (_home, mut cmd) = sca();
    let output = cmd
        .args(["bf", "-f", &sample(), "-c", "abc", "-c", "ag", "-a", "2", "-F", "csv"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 5);
    assert!(lines[0]
        .starts_with("Fault Description,Bus Number,Bus Name,Bus kV,Va_mag (kV),Va_ang"));
    assert!(lines[1..].iter().all(|l| l.contains("CLAYTOR") || l.contains("ROANOKE")));
}

#[test]
fn busfault_sequence_report_to_csv_file() {
    let tmp = tempdir().unwrap();
    let out = tmp.path().join("faults.csv");
    let (_home, mut cmd) = sca();
    cmd.args([
        "busfault",
        "-f",
        &sample(),
        "-c",
        "AG",
        "--seq",
        "-e",
        "^NEVADA$",
        "-o",
        out.to_str().unwrap(),
    ])
    .assert()
    .success()
    .stdout(predicate::str::is_empty());

    let text = fs::read_to_string(&out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("V0_mag (kV)"));
    assert!(lines[0].ends_with("I2_mag (A),I2_ang"));
    // single line to ground: each sequence current is a third of Ia
    assert!(lines[1].contains("1436.90"));
}

#[test]
fn busfault_requires_a_connection() {
    let (_home, mut cmd) = sca();
    cmd.args(["busfault", "-f", &sample()])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("at least one fault connection"));
}

#[test]
fn busfault_rejects_unknown_connection() {
    let (_home, mut cmd) = sca();
    cmd.args(["busfault", "-f", &sample(), "-c", "xg"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unknown fault connection: \"XG\""));
}

#[test]
fn fatal_error_is_logged_when_logging_is_off() {
    let (_home, mut cmd) = sca();
    cmd.env("RUST_LOG", "off")
        .args(["busfault", "-f", &sample(), "-c", "xg"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("ERROR"))
        .stderr(predicate::str::contains("unknown fault connection: \"XG\""));
}

#[test]
fn busfault_rejects_negative_resistance() {
    let (_home, mut cmd) = sca();
    cmd.args(["busfault", "-f", &sample(), "-c", "ABC", "--resistance=-1"])
        .assert()
        .code(2);
}

#[test]
fn input_file_is_validated() {
    let (_home, mut cmd) = sca();
    cmd.args(["noclear"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("must provide an input file"));

    let dir = tempdir().unwrap();
    let (_home, mut cmd) = sca();
    cmd.args(["noclear", "-f", dir.path().to_str().unwrap()])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("is not a file"));
}

#[test]
fn bad_filter_expression_is_a_configuration_error() {
    let (_home, mut cmd) = sca();
    cmd.args(["noclear", "-f", &sample(), "-e", "("])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid"));
}

#[test]
fn noclear_reports_problem_runs_only() {
    let (_home, mut cmd) = sca();
    let output = cmd
        .args(["noclear", "-f", &sample()])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 3);
    assert!(lines[0].contains("Max OpTime (s)"));
    assert!(lines[1].contains("OHIO") && lines[1].contains("slow clearing"));
    assert!(lines[1].contains("4.25"));
    assert!(lines[2].contains("CLAYTOR") && lines[2].contains("not cleared"));
}

#[test]
fn noclear_branches_csv() {
    let (_home, mut cmd) = sca();
    let output = cmd
        .args(["nc", "-f", &sample(), "-b", "-F", "csv"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 5);
    assert!(lines[4].contains("ROANOKE"));
    assert!(lines[4].contains("Close-in 1LG AG fault on CLAYTOR-ROANOKE"));
}

#[test]
fn noclear_verbose_reports_every_run() {
    let (_home, mut cmd) = sca();
    let output = cmd
        .args(["noclear", "-f", &sample(), "--verbose"])
        .assert()
        .success()
        .stdout(predicate::str::contains("okay"))
        .get_output()
        .stdout
        .clone();
    assert_eq!(stdout_lines(&output).len(), 9);
}

#[test]
fn noclear_empty_selection_writes_nothing() {
    let (_home, mut cmd) = sca();
    cmd.args(["noclear", "-f", &sample(), "-e", "^NEVADA$"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn config_file_supplies_thresholds() {
    let tmp = tempdir().unwrap();
    let config = tmp.path().join("sca.toml");
    fs::write(&config, "[noclear]\nslow_threshold = 5.0\n\n[report]\nformat = \"csv\"\n").unwrap();

    let (_home, mut cmd) = sca();
    let output = cmd
        .args(["noclear", "-f", &sample(), "--config", config.to_str().unwrap()])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("Fault Description,"));
    assert!(lines[1].contains("CLAYTOR"));

    // explicit flag wins over the file
    let (_home, mut cmd) = sca();
    let output = cmd
        .args([
            "noclear",
            "-f",
            &sample(),
            "--config",
            config.to_str().unwrap(),
            "--slow-threshold",
            "3",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    assert_eq!(stdout_lines(&output).len(), 3);
}

#[test]
fn default_config_is_read_from_home() {
    let (home, mut cmd) = sca();
    fs::create_dir_all(home.path().join(".sca")).unwrap();
    fs::write(
        home.path().join(".sca").join("config.toml"),
        "[noclear]\nconnections = [\"AG\"]\n",
    )
    .unwrap();
    let output = cmd
        .args(["noclear", "-f", &sample(), "-v"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    assert_eq!(stdout_lines(&output).len(), 5);
}

#[test]
fn malformed_config_exits_with_configuration_error() {
    let tmp = tempdir().unwrap();
    let config = tmp.path().join("sca.toml");
    fs::write(&config, "[report]\nformat = \"xml\"\n").unwrap();
    let (_home, mut cmd) = sca();
    cmd.args(["noclear", "-f", &sample(), "--config", config.to_str().unwrap()])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("sca.toml"));
}

#[test]
fn version_and_license() {
    let (_home, mut cmd) = sca();
    cmd.arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("sca-cli version 0.1.0"));

    let (_home, mut cmd) = sca();
    cmd.arg("license")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("MIT License"));
}

#[test]
fn completions_to_stdout() {
    let (_home, mut cmd) = sca();
    cmd.args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sca-cli"));
}

#[test]
fn completions_to_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("completions").join("sca-cli.bash");
    let (_home, mut cmd) = sca();
    cmd.args(["completions", "bash", "--out", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
    let script = fs::read_to_string(&path).unwrap();
    assert!(script.contains("busfault"));
    assert!(script.contains("noclear"));
}
