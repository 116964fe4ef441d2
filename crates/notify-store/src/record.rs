//! Notification record as persisted in the queue file.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Timestamp layout used for `timetag` and the display-state file.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// A single queued notification.
///
/// Field order is the canonical serialization order and feeds the
/// fingerprint, so it must not be reordered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationRecord {
    #[serde(with = "timetag")]
    pub timetag: NaiveDateTime,
    pub summary: String,
    pub body: String,
    /// Milliseconds; non-negative once ingested.
    pub expire_timeout: i64,
    pub app_name: String,
    pub app_icon: String,
    pub replaces_id: u32,
    pub actions: Vec<String>,
    pub urgency: i32,
    #[serde(rename = "sender-pid")]
    pub sender_pid: i64,
}

impl NotificationRecord {
    /// Creates a record with empty metadata, urgency 1 and no actions.
    pub fn new(
        timetag: NaiveDateTime,
        summary: impl Into<String>,
        body: impl Into<String>,
        expire_timeout: i64,
    ) -> Self {
        Self {
            timetag,
            summary: summary.into(),
            body: body.into(),
            expire_timeout,
            app_name: String::new(),
            app_icon: String::new(),
            replaces_id: 0,
            actions: Vec::new(),
            urgency: 1,
            sender_pid: 0,
        }
    }

    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = app_name.into();
        self
    }

    pub fn with_urgency(mut self, urgency: i32) -> Self {
        self.urgency = urgency;
        self
    }
}

pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

pub fn parse_timestamp(s: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT)
}

mod timetag {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ts: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&super::format_timestamp(ts))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(d)?;
        super::parse_timestamp(&raw).map_err(serde::de::Error::custom)
    }
}
