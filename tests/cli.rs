// LogSniff - tests/cli.rs
//
// End-to-end tests for the `logsniff` binary: argument handling, output
// formats, config overrides, and exit codes.

use assert_cmd::Command;
use std::fs;
use std::path::Path;

fn logsniff(config_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("logsniff").expect("binary built");
    // Point at an empty config so a developer's own config.toml is never read.
    cmd.arg("--config").arg(config_dir.join("config.toml"));
    cmd.env_remove("RUST_LOG");
    cmd
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.assert().success().get_output().stdout.clone();
    String::from_utf8(output).expect("utf-8 stdout")
}

#[test]
fn cli_prints_one_path_per_line() {
    let cfg = tempfile::tempdir().unwrap();
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("app.log"), "").unwrap();
    fs::write(dir.path().join("data.bin"), vec![0u8; 300]).unwrap();

    let out = stdout_of(logsniff(cfg.path()).arg(dir.path()));
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 1, "{out}");
    assert!(lines[0].ends_with("app.log"));
}

#[test]
fn cli_json_output() {
    let cfg = tempfile::tempdir().unwrap();
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("syslog"), "").unwrap();

    let out = stdout_of(logsniff(cfg.path()).arg(dir.path()).args(["--format", "json"]));
    let value: serde_json::Value = serde_json::from_str(&out).expect("valid JSON");
    assert_eq!(value[0]["matched_by"], "filename_pattern");
}

#[test]
fn cli_csv_output_with_max_depth() {
    let cfg = tempfile::tempdir().unwrap();
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("top.log"), "").unwrap();
    fs::create_dir_all(dir.path().join("a/b")).unwrap();
    fs::write(dir.path().join("a/b/deep.log"), "").unwrap();

    let out = stdout_of(
        logsniff(cfg.path())
            .arg(dir.path())
            .args(["-f", "csv", "--max-depth", "1"]),
    );
    assert!(out.starts_with("path,matched_by\n"));
    assert!(out.contains("top.log,filename_pattern"));
    assert!(!out.contains("deep.log"));
}

#[test]
fn cli_missing_directory_prints_nothing() {
    let cfg = tempfile::tempdir().unwrap();
    let out = stdout_of(logsniff(cfg.path()).arg(cfg.path().join("absent")));
    assert!(out.is_empty());
}

#[test]
fn cli_explain_reports_verdict() {
    let cfg = tempfile::tempdir().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let small = dir.path().join("small.txt");
    fs::write(&small, "hi").unwrap();

    let out = stdout_of(logsniff(cfg.path()).arg("--explain").arg(&small));
    assert!(out.contains("not a log file"), "{out}");
    assert!(out.contains("below the 100-byte minimum"), "{out}");
}

#[test]
fn cli_config_patterns_apply() {
    let cfg = tempfile::tempdir().unwrap();
    fs::write(
        cfg.path().join("config.toml"),
        "[classifier]\nfilename_patterns = ['.*\\.trace$']\n",
    )
    .unwrap();
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("run.trace"), "").unwrap();
    fs::write(dir.path().join("app.log"), "").unwrap();

    let out = stdout_of(logsniff(cfg.path()).arg(dir.path()));
    assert!(out.contains("run.trace"));
    assert!(!out.contains("app.log"));
}

#[test]
fn cli_invalid_pattern_exits_nonzero() {
    let cfg = tempfile::tempdir().unwrap();
    fs::write(
        cfg.path().join("config.toml"),
        "[classifier]\nfilename_patterns = ['(']\n",
    )
    .unwrap();
    let dir = tempfile::tempdir().unwrap();

    logsniff(cfg.path()).arg(dir.path()).assert().failure().code(1);
}
