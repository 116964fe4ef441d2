//! Tracking state for the queue head currently on display.

use chrono::NaiveDateTime;

use crate::record::{format_timestamp, parse_timestamp};
use crate::{FileStore, StoreError};

/// The head being tracked: when it was first shown, which record it is,
/// and how many times it has been rendered since.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayState {
    pub first_display: NaiveDateTime,
    pub fingerprint: String,
    pub counter: u64,
}

impl DisplayState {
    /// `timestamp;fingerprint;counter`
    pub fn encode(&self) -> String {
        format!(
            "{};{};{}",
            format_timestamp(&self.first_display),
            self.fingerprint,
            self.counter
        )
    }

    /// Parse the single-line file form. Anything malformed reads as absent.
    pub fn decode(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        let mut parts = line.split(';');
        let (Some(ts), Some(fp), Some(counter), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            tracing::warn!("Ignoring malformed display state: {line}");
            return None;
        };
        let (Ok(first_display), Ok(counter)) = (parse_timestamp(ts), counter.parse::<u64>()) else {
            tracing::warn!("Ignoring malformed display state: {line}");
            return None;
        };
        if fp.is_empty() {
            return None;
        }
        Some(Self {
            first_display,
            fingerprint: fp.to_string(),
            counter,
        })
    }
}

/// Singleton slot holding the current [`DisplayState`]; never keeps history.
pub trait DisplayStateStore {
    fn read_display_state(&self) -> Result<Option<DisplayState>, StoreError>;

    fn write_display_state(&self, state: &DisplayState) -> Result<(), StoreError>;
}

impl DisplayStateStore for FileStore {
    fn read_display_state(&self) -> Result<Option<DisplayState>, StoreError> {
        let text = Self::read_text(&self.display_state_path())?;
        Ok(DisplayState::decode(&text))
    }

    fn write_display_state(&self, state: &DisplayState) -> Result<(), StoreError> {
        Self::write_atomic(&self.display_state_path(), &state.encode())
    }
}
