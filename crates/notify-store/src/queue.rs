//! Notification queue: one JSON record per line, oldest first.

use std::fs::OpenOptions;
use std::io::Write;

use crate::{FileStore, NotificationRecord, StoreError};

/// Ordered queue of pending notifications. The head is the oldest record.
pub trait QueueStore {
    /// Insert at the tail.
    fn append(&self, record: &NotificationRecord) -> Result<(), StoreError>;

    /// Fresh read of the whole queue in arrival order.
    fn read_all(&self) -> Result<Vec<NotificationRecord>, StoreError>;

    /// Overwrite the queue with exactly `records`.
    fn replace_all(&self, records: &[NotificationRecord]) -> Result<(), StoreError>;

    /// Drop the head, returning it. No-op on an empty queue.
    fn skip(&self) -> Result<Option<NotificationRecord>, StoreError> {
        let mut queue = self.read_all()?;
        if queue.is_empty() {
            return Ok(None);
        }
        let head = queue.remove(0);
        self.replace_all(&queue)?;
        tracing::debug!(summary = %head.summary, remaining = queue.len(), "Skipped head notification");
        Ok(Some(head))
    }
}

impl QueueStore for FileStore {
    fn append(&self, record: &NotificationRecord) -> Result<(), StoreError> {
        let mut line = serde_json::to_string(record)?;
        line.push('\n');
        let mut f = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.queue_path())?;
        f.write_all(line.as_bytes())?;
        Ok(())
    }

    fn read_all(&self) -> Result<Vec<NotificationRecord>, StoreError> {
        let text = Self::read_text(&self.queue_path())?;
        parse_queue(&text, false)
    }

    fn replace_all(&self, records: &[NotificationRecord]) -> Result<(), StoreError> {
        let mut text = String::new();
        for record in records {
            text.push_str(&serde_json::to_string(record)?);
            text.push('\n');
        }
        Self::write_atomic(&self.queue_path(), &text)
    }
}

impl FileStore {
    /// Like [`QueueStore::read_all`], but a line that does not decode is an
    /// error instead of being skipped.
    pub fn read_all_strict(&self) -> Result<Vec<NotificationRecord>, StoreError> {
        let text = Self::read_text(&self.queue_path())?;
        parse_queue(&text, true)
    }
}

/// Decode queue file contents. Blank lines are ignored; undecodable lines
/// are skipped with a warning unless `strict`.
pub fn parse_queue(text: &str, strict: bool) -> Result<Vec<NotificationRecord>, StoreError> {
    let mut records = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match serde_json::from_str::<NotificationRecord>(line) {
            Ok(record) => records.push(record),
            Err(e) if strict => {
                return Err(StoreError::MalformedRecord {
                    line: idx + 1,
                    reason: e.to_string(),
                });
            }
            Err(e) => {
                tracing::warn!(line = idx + 1, "Skipping malformed queue record: {e}");
            }
        }
    }
    Ok(records)
}
