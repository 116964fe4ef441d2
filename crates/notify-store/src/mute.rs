//! Mute toggle. Muted notifications stay queued; they are just not shown.

use crate::{FileStore, StoreError};

pub trait MuteStore {
    fn is_muted(&self) -> Result<bool, StoreError>;

    /// Flip the flag and return the new value.
    fn toggle_mute(&self) -> Result<bool, StoreError>;
}

impl MuteStore for FileStore {
    fn is_muted(&self) -> Result<bool, StoreError> {
        Ok(Self::read_text(&self.mute_path())?.trim() == "True")
    }

    fn toggle_mute(&self) -> Result<bool, StoreError> {
        let muted = !self.is_muted()?;
        Self::write_atomic(&self.mute_path(), if muted { "True" } else { "False" })?;
        tracing::info!(muted, "Mute toggled");
        Ok(muted)
    }
}
