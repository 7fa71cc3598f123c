// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::fs;
use std::time::Duration;

const VALID: &str = r#"
parallelism = 2
scratch_dirs = ["/scratch/a"]
dest_dirs = ["/farm/0"]
fingerprint = "fp"
stagger_minutes = 5
"#;

/// Rewrite the file and force a visibly newer mtime, so change detection
/// does not depend on filesystem timestamp granularity.
fn write_policy(path: &Path, contents: &str, offset: Duration) {
    fs::write(path, contents).unwrap();
    let file = fs::File::options().write(true).open(path).unwrap();
    file.set_modified(SystemTime::now() + offset).unwrap();
}

#[test]
fn missing_file_reports_absent() {
    let dir = tempfile::tempdir().unwrap();
    let store = PolicyStore::new(dir.path().join("nope.toml"));

    store.refresh();
    assert!(store.current().is_none());
}

#[test]
fn loads_policy_on_first_refresh() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plotmill.toml");
    write_policy(&path, VALID, Duration::ZERO);

    let store = PolicyStore::new(&path);
    store.refresh();

    let policy = store.current().expect("policy should load");
    assert_eq!(policy.parallelism, 2);
    assert_eq!(policy.stagger_minutes, 5);
}

#[test]
fn unchanged_file_is_not_reparsed_into_a_different_policy() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plotmill.toml");
    write_policy(&path, VALID, Duration::ZERO);

    let store = PolicyStore::new(&path);
    store.refresh();
    store.refresh();
    assert!(store.current().is_some());
}

#[test]
fn modified_file_is_reloaded() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plotmill.toml");
    write_policy(&path, VALID, Duration::ZERO);

    let store = PolicyStore::new(&path);
    store.refresh();

    let updated = VALID.replace("parallelism = 2", "parallelism = 6");
    write_policy(&path, &updated, Duration::from_secs(2));
    store.refresh();

    assert_eq!(store.current().map(|p| p.parallelism), Some(6));
}

#[test]
fn corrupt_rewrite_keeps_last_good_policy() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plotmill.toml");
    write_policy(&path, VALID, Duration::ZERO);

    let store = PolicyStore::new(&path);
    store.refresh();

    write_policy(&path, "parallelism = \"garbage", Duration::from_secs(2));
    store.refresh();

    // Previous good policy survives the broken write
    assert_eq!(store.current().map(|p| p.parallelism), Some(2));
}

#[test]
fn corrupt_file_with_no_prior_load_stays_absent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plotmill.toml");
    write_policy(&path, "not toml at all [", Duration::ZERO);

    let store = PolicyStore::new(&path);
    store.refresh();
    assert!(store.current().is_none());
}
