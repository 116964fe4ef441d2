//! File-backed state for the notification bar: the queue, the tracked
//! display state and the mute toggle.
//!
//! Every invocation of the CLI re-reads these files, so several processes
//! (listener, periodic render, skip) share them without any locking. A
//! concurrent append and replace-all can lose the appended record; callers
//! accept that race. Whole-file writes go through a temp file and a rename
//! so a crash never leaves a half-written file behind.

pub mod display_state;
pub mod fingerprint;
pub mod memory;
pub mod mute;
pub mod queue;
pub mod record;

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

pub use display_state::{DisplayState, DisplayStateStore};
pub use fingerprint::fingerprint;
pub use memory::MemoryStore;
pub use mute::MuteStore;
pub use queue::QueueStore;
pub use record::NotificationRecord;

pub const QUEUE_FILE: &str = "notifyblock_list";
pub const MUTE_FILE: &str = "notifyblock_mute_toggle";
pub const DISPLAY_STATE_FILE: &str = "notifyblock_last_display";

/// Storage rooted in a single directory holding one file per resource.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open the store at `dir`, creating the directory and any missing
    /// state file as empty.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        let store = Self { dir };
        for path in [
            store.queue_path(),
            store.mute_path(),
            store.display_state_path(),
        ] {
            if !path.exists() {
                File::create(&path)?;
                tracing::debug!("Created state file {}", path.display());
            }
        }
        Ok(store)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn queue_path(&self) -> PathBuf {
        self.dir.join(QUEUE_FILE)
    }

    pub fn mute_path(&self) -> PathBuf {
        self.dir.join(MUTE_FILE)
    }

    pub fn display_state_path(&self) -> PathBuf {
        self.dir.join(DISPLAY_STATE_FILE)
    }

    /// Read a whole file; a missing file reads as empty.
    pub(crate) fn read_text(path: &Path) -> Result<String, StoreError> {
        match fs::read_to_string(path) {
            Ok(text) => Ok(text),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(String::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Replace a file's contents via write-to-temp + rename. Each call gets
    /// its own uniquely named temp file in the same directory.
    pub(crate) fn write_atomic(path: &Path, contents: &str) -> Result<(), StoreError> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(contents.as_bytes())?;
        tmp.flush()?;
        if let Err(e) = tmp.as_file().sync_all() {
            tracing::debug!("sync of {} failed: {e}", tmp.path().display());
        }
        tmp.persist(path).map_err(|e| e.error)?;
        Ok(())
    }
}

/// Storage error type.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Malformed record on line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    #[error("Store lock poisoned")]
    LockPoisoned,
}

#[cfg(test)]
mod tests;
