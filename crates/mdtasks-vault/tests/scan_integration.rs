//! Integration tests for VaultScanner.
//!
//! These tests build small vaults in temporary directories and verify what
//! the scanner reads from disk.

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use mdtasks_core::models::{Priority, TaskStatus};
use mdtasks_vault::filter::{FilterContext, Query};
use mdtasks_vault::{ScanError, VaultScanner};
use tempfile::{tempdir, TempDir};

fn write(root: &Path, relative: &str, contents: &[u8]) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("failed to create parent dir");
    }
    fs::write(path, contents).expect("failed to write file");
}

/// A small vault with nested folders and some files that must be skipped.
fn sample_vault() -> TempDir {
    let temp_dir = tempdir().expect("failed to create temp dir");
    let root = temp_dir.path();

    write(
        root,
        "inbox.md",
        "# Inbox\n\n- [ ] Call plumber 📅 2025-04-20 #home\n- [x] Pay rent ✅ 2025-04-01\n".as_bytes(),
    );
    write(
        root,
        "projects/alpha.md",
        "- [/] Draft report ⏫ 📅 2025-05-01 #work\n  - [ ] Collect figures #work/data\n- [-] Old idea\n".as_bytes(),
    );
    write(
        root,
        "journal/2025-04-28.md",
        "Notes\n- [?] Maybe later\n- [ ] Water plants 🔁 every week ⏳ 2025-04-28\n".as_bytes(),
    );
    write(root, ".git/HEAD.md", b"- [ ] not a vault task\n");
    write(root, ".obsidian/workspace.md", b"- [ ] editor state\n");
    write(root, "notes.txt", b"- [ ] plain text is ignored\n");

    temp_dir
}

fn ids(index: &mdtasks_vault::TaskIndex) -> Vec<&str> {
    index.tasks.iter().map(|t| t.id.as_str()).collect()
}

#[test]
fn test_scan_nested_vault() {
    let vault = sample_vault();
    let index = VaultScanner::new(vault.path())
        .scan()
        .expect("scan should succeed");

    assert_eq!(index.files_scanned, 3);
    assert_eq!(index.root, vault.path());
    assert_eq!(
        ids(&index),
        vec![
            "inbox.md:2",
            "inbox.md:3",
            "journal/2025-04-28.md:1",
            "journal/2025-04-28.md:2",
            "projects/alpha.md:0",
            "projects/alpha.md:1",
            "projects/alpha.md:2",
        ]
    );
}

#[test]
fn test_scan_recognizes_metadata() {
    let vault = sample_vault();
    let index = VaultScanner::new(vault.path()).scan().unwrap();

    let report = index.find("projects/alpha.md:0").expect("report task");
    assert_eq!(report.status, TaskStatus::InProgress);
    assert_eq!(report.priority, Some(Priority::High));
    assert_eq!(report.due_date.as_deref(), Some("2025-05-01"));
    assert_eq!(report.file_path, "projects/alpha.md");

    let nested = index.find("projects/alpha.md:1").expect("nested task");
    assert_eq!(nested.tags, vec!["#work/data"]);
    assert_eq!(nested.original_markdown, "  - [ ] Collect figures #work/data");

    let maybe = index.find("journal/2025-04-28.md:1").expect("non-task");
    assert_eq!(maybe.status, TaskStatus::NonTask);
    assert_eq!(maybe.status_symbol, '?');

    let plants = index.find("journal/2025-04-28.md:2").expect("recurring task");
    assert_eq!(plants.recurrence.as_deref(), Some("every"));
    assert_eq!(plants.scheduled_date.as_deref(), Some("2025-04-28"));
}

#[test]
fn test_scan_skips_builtin_excludes() {
    let vault = sample_vault();
    let index = VaultScanner::new(vault.path()).scan().unwrap();

    assert!(index
        .tasks
        .iter()
        .all(|t| !t.file_path.starts_with(".git") && !t.file_path.starts_with(".obsidian")));
    assert!(index.tasks.iter().all(|t| t.file_path.ends_with(".md")));
}

#[test]
fn test_scan_extra_exclude() {
    let vault = sample_vault();
    let index = VaultScanner::new(vault.path())
        .exclude(["journal/**"])
        .scan()
        .unwrap();

    assert_eq!(index.files_scanned, 2);
    assert!(index.tasks.iter().all(|t| !t.file_path.starts_with("journal/")));
}

#[test]
fn test_scan_include_override() {
    let vault = sample_vault();
    let index = VaultScanner::new(vault.path())
        .include(["projects/**/*.md", "**/*.txt"])
        .scan()
        .unwrap();

    assert_eq!(index.files_scanned, 2);
    assert_eq!(
        ids(&index),
        vec![
            "notes.txt:0",
            "projects/alpha.md:0",
            "projects/alpha.md:1",
            "projects/alpha.md:2",
        ]
    );
}

#[test]
fn test_scan_skips_non_utf8_file() {
    let vault = sample_vault();
    write(vault.path(), "binary.md", &[0xff, 0xfe, b'-', b' ', b'[', b' ', b']']);

    let index = VaultScanner::new(vault.path()).scan().unwrap();

    assert_eq!(index.files_scanned, 3);
    assert!(index.tasks.iter().all(|t| t.file_path != "binary.md"));
}

#[test]
fn test_scan_empty_vault() {
    let temp_dir = tempdir().unwrap();
    let index = VaultScanner::new(temp_dir.path()).scan().unwrap();

    assert!(index.is_empty());
    assert_eq!(index.files_scanned, 0);
}

#[test]
fn test_scan_missing_root_returns_error() {
    let temp_dir = tempdir().unwrap();
    let missing = temp_dir.path().join("nope");

    let err = VaultScanner::new(&missing).scan().unwrap_err();
    assert!(
        matches!(err, ScanError::RootNotFound { ref path } if path == &missing),
        "unexpected error: {}",
        err
    );
}

#[test]
fn test_scan_root_is_file_returns_error() {
    let temp_dir = tempdir().unwrap();
    write(temp_dir.path(), "single.md", b"- [ ] one\n");

    let result = VaultScanner::new(temp_dir.path().join("single.md")).scan();
    assert!(matches!(result, Err(ScanError::RootNotFound { .. })));
}

#[test]
fn test_scan_invalid_glob_returns_error() {
    let vault = sample_vault();
    let err = VaultScanner::new(vault.path())
        .exclude(["a[b"])
        .scan()
        .unwrap_err();

    assert!(matches!(err, ScanError::InvalidGlob { ref pattern, .. } if pattern == "a[b"));
    assert!(err.to_string().contains("a[b"));
}

#[tokio::test]
async fn test_scan_async_matches_sync_scan() {
    let vault = sample_vault();
    let scanner = VaultScanner::new(vault.path());

    let sync_index = scanner.scan().unwrap();
    let async_index = scanner.scan_async().await.unwrap();

    assert_eq!(async_index.files_scanned, sync_index.files_scanned);
    assert_eq!(async_index.tasks, sync_index.tasks);
}

#[tokio::test]
async fn test_scan_async_missing_root() {
    let temp_dir = tempdir().unwrap();
    let result = VaultScanner::new(temp_dir.path().join("gone"))
        .scan_async()
        .await;
    assert!(matches!(result, Err(ScanError::RootNotFound { .. })));
}

// ==================== Scan + Query Tests ====================

#[test]
fn test_query_over_scanned_vault() {
    let vault = sample_vault();
    let index = VaultScanner::new(vault.path()).scan().unwrap();
    let ctx = FilterContext::new(NaiveDate::from_ymd_opt(2025, 4, 28).unwrap());

    let overdue = index.query(&Query::parse("not done\ndue before today"), &ctx);
    let overdue: Vec<&str> = overdue.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(overdue, vec!["inbox.md:2"]);

    let work = index.query(&Query::parse("tag includes work\npath includes projects/"), &ctx);
    assert_eq!(work.len(), 2);

    let today = index.query(&Query::parse("scheduled today"), &ctx);
    assert_eq!(today.len(), 1);
    assert_eq!(today[0].id, "journal/2025-04-28.md:2");
}

#[test]
fn test_not_done_excludes_finished_and_non_tasks() {
    let vault = sample_vault();
    let index = VaultScanner::new(vault.path()).scan().unwrap();
    let ctx = FilterContext::new(NaiveDate::from_ymd_opt(2025, 4, 28).unwrap());

    let open = index.query(&Query::parse("not done"), &ctx);
    assert!(open.iter().all(|t| t.status.is_open()));
    assert_eq!(open.len(), index.open_tasks().len());
}

#[test]
fn test_empty_query_matches_everything() {
    let vault = sample_vault();
    let index = VaultScanner::new(vault.path()).scan().unwrap();
    let ctx = FilterContext::new(NaiveDate::from_ymd_opt(2025, 4, 28).unwrap());

    let all = index.query(&Query::parse("# only a comment\n\n"), &ctx);
    assert_eq!(all.len(), index.len());
}
