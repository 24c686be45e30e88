//! Tests for log rotation and the dashboard's directories.

use std::fs;
use std::path::Path;
use std::time::{Duration, SystemTime};

use gymdesk_tui::dirs::AppDirs;
use gymdesk_tui::logging::{self, KEEP_ARCHIVES, LATEST};

fn names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().into_string().unwrap())
        .collect();
    names.sort();
    names
}

fn archive(dir: &Path, stamp: &str) {
    fs::write(dir.join(format!("gymdesk-{stamp}.log")), stamp).unwrap();
}

// ============================================================================
// rotate
// ============================================================================

#[test]
fn test_rotate_missing_dir() {
    let dir = tempfile::tempdir().unwrap();

    let archived = logging::rotate(&dir.path().join("absent"), KEEP_ARCHIVES).unwrap();

    assert_eq!(archived, None);
}

#[test]
fn test_rotate_without_latest_keeps_archives() {
    let dir = tempfile::tempdir().unwrap();
    archive(dir.path(), "20260101-000000");

    assert_eq!(logging::rotate(dir.path(), KEEP_ARCHIVES).unwrap(), None);
    assert_eq!(names(dir.path()), ["gymdesk-20260101-000000.log"]);
}

#[test]
fn test_rotate_archives_latest_under_write_time() {
    let dir = tempfile::tempdir().unwrap();
    let latest = dir.path().join(LATEST);
    fs::write(&latest, "previous run").unwrap();

    let archived = logging::rotate(dir.path(), KEEP_ARCHIVES).unwrap().unwrap();

    assert!(!latest.exists());
    assert_eq!(fs::read_to_string(&archived).unwrap(), "previous run");
    let name = archived.file_name().unwrap().to_str().unwrap();
    assert!(name.starts_with("gymdesk-"), "{name}");
    assert!(name.ends_with(".log"), "{name}");
    // gymdesk-YYYYmmdd-HHMMSS.log
    assert_eq!(name.len(), "gymdesk-".len() + 15 + ".log".len(), "{name}");
}

#[test]
fn test_rotate_same_second_gets_counter() {
    let dir = tempfile::tempdir().unwrap();

    fs::write(dir.path().join(LATEST), "first").unwrap();
    let first = logging::rotate(dir.path(), KEEP_ARCHIVES).unwrap().unwrap();

    fs::write(dir.path().join(LATEST), "second").unwrap();
    let file = fs::File::options()
        .write(true)
        .open(dir.path().join(LATEST))
        .unwrap();
    file.set_modified(fs::metadata(&first).unwrap().modified().unwrap())
        .unwrap();
    drop(file);
    let second = logging::rotate(dir.path(), KEEP_ARCHIVES).unwrap().unwrap();

    assert_ne!(first, second);
    assert_eq!(fs::read_to_string(&first).unwrap(), "first");
    assert_eq!(fs::read_to_string(&second).unwrap(), "second");
}

#[test]
fn test_rotate_prunes_oldest_by_stamp() {
    let dir = tempfile::tempdir().unwrap();
    for day in 1..=5 {
        archive(dir.path(), &format!("202601{day:02}-120000"));
    }
    // Write times disagree with the stamps; the stamps decide.
    let old = SystemTime::now() - Duration::from_secs(3600);
    fs::File::options()
        .write(true)
        .open(dir.path().join("gymdesk-20260105-120000.log"))
        .unwrap()
        .set_modified(old)
        .unwrap();

    logging::rotate(dir.path(), 3).unwrap();

    assert_eq!(
        names(dir.path()),
        [
            "gymdesk-20260103-120000.log",
            "gymdesk-20260104-120000.log",
            "gymdesk-20260105-120000.log",
        ]
    );
}

#[test]
fn test_rotate_leaves_foreign_files() {
    let dir = tempfile::tempdir().unwrap();
    archive(dir.path(), "20260101-000000");
    archive(dir.path(), "20260102-000000");
    fs::write(dir.path().join("notes.log"), "").unwrap();
    fs::write(dir.path().join("gymdesk-settings.db"), "").unwrap();

    logging::rotate(dir.path(), 1).unwrap();

    assert_eq!(
        names(dir.path()),
        ["gymdesk-20260102-000000.log", "gymdesk-settings.db", "notes.log"]
    );
}

#[test]
fn test_rotate_keeps_fresh_archive_at_limit() {
    let dir = tempfile::tempdir().unwrap();
    for n in 0..KEEP_ARCHIVES {
        archive(dir.path(), &format!("20200101-{n:06}"));
    }
    fs::write(dir.path().join(LATEST), "now").unwrap();

    let archived = logging::rotate(dir.path(), KEEP_ARCHIVES).unwrap().unwrap();

    assert!(archived.exists());
    assert!(!dir.path().join("gymdesk-20200101-000000.log").exists());
    assert_eq!(names(dir.path()).len(), KEEP_ARCHIVES);
}

// ============================================================================
// AppDirs
// ============================================================================

#[test]
fn test_dirs_under_root() {
    let dirs = AppDirs::under("/tmp/gym");

    assert_eq!(dirs.settings_db(), Path::new("/tmp/gym/data/settings.db"));
    assert_eq!(dirs.log_dir(), Path::new("/tmp/gym/cache/logs"));
}
