use chrono::{NaiveDate, NaiveDateTime};
use tempfile::TempDir;

use crate::{FileStore, NotificationRecord};

fn test_store() -> (TempDir, FileStore) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let store = FileStore::open(dir.path()).expect("Failed to open test store");
    (dir, store)
}

fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 5, 17)
        .unwrap()
        .and_hms_opt(h, m, s)
        .unwrap()
}

fn record(summary: &str) -> NotificationRecord {
    NotificationRecord::new(at(9, 0, 0), summary, "body text", 4000).with_app_name("mail")
}
