//! In-memory store implementing the same traits as [`crate::FileStore`].

use std::sync::{Mutex, MutexGuard};

use crate::{
    DisplayState, DisplayStateStore, MuteStore, NotificationRecord, QueueStore, StoreError,
};

#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    queue: Vec<NotificationRecord>,
    display: Option<DisplayState>,
    muted: bool,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the queue without counting it as a write.
    pub fn with_queue(records: Vec<NotificationRecord>) -> Self {
        let store = Self::default();
        if let Ok(mut inner) = store.inner.lock() {
            inner.queue = records;
        }
        store
    }

    /// Seed the mute flag without counting it as a write.
    pub fn muted(self, muted: bool) -> Self {
        if let Ok(mut inner) = self.inner.lock() {
            inner.muted = muted;
        }
        self
    }

    /// Number of mutating calls made so far.
    pub fn write_count(&self) -> usize {
        self.inner.lock().map(|i| i.writes).unwrap_or(0)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>, StoreError> {
        self.inner.lock().map_err(|_| StoreError::LockPoisoned)
    }
}

impl QueueStore for MemoryStore {
    fn append(&self, record: &NotificationRecord) -> Result<(), StoreError> {
        let mut inner = self.lock()?;
        inner.queue.push(record.clone());
        inner.writes += 1;
        Ok(())
    }

    fn read_all(&self) -> Result<Vec<NotificationRecord>, StoreError> {
        Ok(self.lock()?.queue.clone())
    }

    fn replace_all(&self, records: &[NotificationRecord]) -> Result<(), StoreError> {
        let mut inner = self.lock()?;
        inner.queue = records.to_vec();
        inner.writes += 1;
        Ok(())
    }
}

impl DisplayStateStore for MemoryStore {
    fn read_display_state(&self) -> Result<Option<DisplayState>, StoreError> {
        Ok(self.lock()?.display.clone())
    }

    fn write_display_state(&self, state: &DisplayState) -> Result<(), StoreError> {
        let mut inner = self.lock()?;
        inner.display = Some(state.clone());
        inner.writes += 1;
        Ok(())
    }
}

impl MuteStore for MemoryStore {
    fn is_muted(&self) -> Result<bool, StoreError> {
        Ok(self.lock()?.muted)
    }

    fn toggle_mute(&self) -> Result<bool, StoreError> {
        let mut inner = self.lock()?;
        inner.muted = !inner.muted;
        inner.writes += 1;
        Ok(inner.muted)
    }
}
