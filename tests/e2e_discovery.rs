// LogSniff - tests/e2e_discovery.rs
//
// End-to-end tests for classification and discovery.
//
// These tests exercise the real filesystem, real walkdir traversal, and real
// file metadata -- no mocks, no stubs.

use logsniff::core::classifier::{Classifier, ClassifierConfig};
use logsniff::core::discovery::{scan_tree, WalkConfig};
use logsniff::{classify, find_logs, LogFinder, MatchStage};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

// =============================================================================
// Helpers
// =============================================================================

fn text(len: usize) -> Vec<u8> {
    b"Jan 15 10:00:01 host sshd[101]: Accepted publickey for deploy\n"
        .iter()
        .copied()
        .cycle()
        .take(len)
        .collect()
}

fn binary(len: usize) -> Vec<u8> {
    let mut body = text(len);
    body[len.min(100) - 1] = 0;
    body
}

fn write(path: &Path, body: &[u8]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("mkdir");
    }
    fs::write(path, body).expect("write fixture");
}

fn age(path: &Path, days: u64) {
    let file = fs::File::options().write(true).open(path).expect("open");
    file.set_modified(SystemTime::now() - Duration::from_secs(86_400 * days))
        .expect("set_modified");
}

fn as_set(paths: &[PathBuf]) -> BTreeSet<PathBuf> {
    paths.iter().cloned().collect()
}

// =============================================================================
// Classification E2E
// =============================================================================

/// Each content-stage rejection path, side by side with an accepted file.
#[test]
fn e2e_content_stage_accepts_only_recent_text() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();

    let good = root.join("service.out");
    let tiny = root.join("tiny.out");
    let old = root.join("old.out");
    let bin = root.join("blob.out");
    write(&good, &text(2_000));
    write(&tiny, &text(50));
    write(&old, &text(2_000));
    age(&old, 45);
    write(&bin, &binary(2_000));

    assert!(classify(&good));
    assert!(!classify(&tiny));
    assert!(!classify(&old));
    assert!(!classify(&bin));
    assert!(!classify(root.join("missing.out")));
    assert!(!classify(root));
}

/// Filename and location matches do not need the file to exist, to be
/// large, recent, or textual.
#[test]
fn e2e_pattern_and_location_ignore_content() {
    let dir = tempfile::tempdir().unwrap();
    let rotated = dir.path().join("app.log.20240101");
    write(&rotated, &binary(10));
    age(&rotated, 400);

    assert!(classify(&rotated));
    assert!(classify("/var/log/audit/audit.log"));
    assert!(classify("/var/log/definitely/not/here.bin"));
}

// =============================================================================
// Discovery E2E
// =============================================================================

/// Zero-byte rotated log under a configured known location is found; a
/// binary file elsewhere is not.
#[test]
fn e2e_location_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    let nginx_dir = root.join("var").join("log").join("nginx");
    let access = nginx_dir.join("access.log.1");
    let notes = root.join("random").join("notes.bin");
    write(&access, b"");
    write(&notes, &binary(5_000));

    let config = ClassifierConfig {
        known_locations: vec![nginx_dir.display().to_string()],
        ..Default::default()
    };
    let finder = LogFinder::new(Classifier::new(&config).unwrap(), WalkConfig::default());
    let report = finder.scan(root);

    assert_eq!(report.paths(), vec![access.clone()]);
    assert_eq!(report.logs[0].matched_by, MatchStage::Location);
    assert_eq!(report.files_examined, 2);
}

/// Without the configured location the same file is still found by name.
#[test]
fn e2e_location_scenario_default_rules() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    let access = root.join("var/log/nginx/access.log.1");
    write(&access, b"");
    write(&root.join("random/notes.bin"), &binary(5_000));

    assert_eq!(find_logs(root, 4), vec![access]);
}

/// A mixed tree run through the free `find_logs` entry point.
#[test]
fn e2e_mixed_tree() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();

    let expected = [
        root.join("app.log"),
        root.join("nginx/error.log.2"),
        root.join("sys/syslog"),
        root.join("sys/secure.0"),
        root.join("jobs/nightly.txt"),
    ];
    write(&expected[0], b"");
    write(&expected[1], b"");
    write(&expected[2], &text(10));
    write(&expected[3], &text(10));
    write(&expected[4], &text(4_000));

    write(&root.join("jobs/stale.txt"), &text(4_000));
    age(&root.join("jobs/stale.txt"), 60);
    write(&root.join("bin/tool"), &binary(8_000));
    write(&root.join("notes/short.md"), b"todo");

    let found = find_logs(root, 4);
    assert_eq!(as_set(&found), as_set(&expected));
}

/// Files deeper than max_depth are not reported.
#[test]
fn e2e_respects_max_depth() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    let shallow = root.join("a/b/shallow.log");
    let deep = root.join("a/b/c/d/e/deep.log");
    write(&shallow, b"");
    write(&deep, b"");

    assert_eq!(find_logs(root, 2), vec![shallow.clone()]);
    assert_eq!(as_set(&find_logs(root, 5)), as_set(&[shallow, deep]));
}

#[test]
fn e2e_missing_root_returns_empty() {
    let dir = tempfile::tempdir().unwrap();
    assert!(find_logs(dir.path().join("nope"), 4).is_empty());
}

#[test]
fn e2e_empty_root_returns_empty() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("x/y/z")).unwrap();
    assert!(find_logs(dir.path(), 4).is_empty());
}

/// Two scans of an unchanged tree return the same paths.
#[test]
fn e2e_scan_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    for name in ["a.log", "b/c.log", "b/d/messages", "e/f.txt"] {
        write(&root.join(name), &text(500));
    }
    let first = find_logs(root, 4);
    let second = find_logs(root, 4);
    assert_eq!(first, second);
    assert_eq!(first.len(), 4);
}

/// A symlinked directory inside the tree contributes nothing, even when it
/// points at a directory full of logs.
#[cfg(unix)]
#[test]
fn e2e_symlinked_directory_not_followed() {
    let outside = tempfile::tempdir().unwrap();
    write(&outside.path().join("outside.log"), b"");
    write(&outside.path().join("nested/more.log"), b"");

    let dir = tempfile::tempdir().unwrap();
    let inside = dir.path().join("inside.log");
    write(&inside, b"");
    std::os::unix::fs::symlink(outside.path(), dir.path().join("link")).unwrap();
    // A self-referential loop must not hang the walk either.
    std::os::unix::fs::symlink(dir.path(), dir.path().join("loop")).unwrap();

    assert_eq!(find_logs(dir.path(), 10), vec![inside]);
}

/// An unreadable directory is skipped with a warning; the rest of the tree
/// is still reported.
#[cfg(unix)]
#[test]
fn e2e_unreadable_directory_is_skipped() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    let visible = root.join("visible.log");
    write(&visible, b"");
    let locked = root.join("locked");
    write(&locked.join("hidden.log"), b"");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    // Root ignores permission bits; nothing to assert about skipping then.
    let readable_anyway = fs::read_dir(&locked).is_ok();

    let report = scan_tree(
        root,
        &Classifier::new(&ClassifierConfig::default()).unwrap(),
        &WalkConfig::default(),
    );

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

    if !readable_anyway {
        assert_eq!(report.paths(), vec![visible]);
        assert!(!report.warnings.is_empty());
    }
}

/// Parallel classification yields the same ordered result as sequential.
#[test]
fn e2e_parallel_scan_matches_sequential() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    for i in 0..40 {
        write(&root.join(format!("d{}/f{i}.log", i % 5)), b"");
        write(&root.join(format!("d{}/f{i}.dat", i % 5)), &binary(500));
    }

    let classifier = Classifier::new(&ClassifierConfig::default()).unwrap();
    let sequential = scan_tree(root, &classifier, &WalkConfig::default());
    let parallel = scan_tree(
        root,
        &classifier,
        &WalkConfig {
            parallel: true,
            ..Default::default()
        },
    );

    assert_eq!(sequential.logs.len(), 40);
    assert_eq!(sequential.logs, parallel.logs);
}
