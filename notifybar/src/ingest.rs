//! Notification-server side: turns `Notify` calls from the desktop bus into
//! queued records.

use std::collections::HashMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use notify_store::{NotificationRecord, QueueStore, StoreError};

use crate::config::AppConfig;

pub const SERVER_NAME: &str = "notifybar";
pub const SERVER_VENDOR: &str = "notifications";
pub const SERVER_VERSION: &str = "1.0";
pub const SPEC_VERSION: &str = "1.2";

const DEFAULT_URGENCY: i64 = 1;
/// Bus urgencies are low (0), normal (1) and critical (2).
const URGENCY_RANGE: std::ops::RangeInclusive<i64> = 0..=2;
const DEFAULT_SENDER_PID: i64 = 0;

/// Arguments of an `org.freedesktop.Notifications.Notify` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotifyRequest {
    pub app_name: String,
    pub replaces_id: u32,
    pub app_icon: String,
    pub summary: String,
    pub body: String,
    pub actions: Vec<String>,
    pub hints: HashMap<String, Value>,
    /// Milliseconds; negative asks for the server default.
    pub expire_timeout: i64,
}

impl Default for NotifyRequest {
    fn default() -> Self {
        Self {
            app_name: String::new(),
            replaces_id: 0,
            app_icon: String::new(),
            summary: String::new(),
            body: String::new(),
            actions: Vec::new(),
            hints: HashMap::new(),
            expire_timeout: -1,
        }
    }
}

/// Server identity as reported by `GetServerInformation`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ServerInformation {
    pub name: &'static str,
    pub vendor: &'static str,
    pub version: &'static str,
    pub spec_version: &'static str,
}

pub struct NotificationService<'a, S> {
    store: &'a S,
    default_timeout_ms: i64,
    long_body_threshold: usize,
    double_on_long_body: bool,
}

impl<'a, S: QueueStore> NotificationService<'a, S> {
    pub fn new(store: &'a S, config: &AppConfig) -> Self {
        Self {
            store,
            default_timeout_ms: config.default_timeout_ms,
            long_body_threshold: config.viewport_width,
            double_on_long_body: config.double_on_long_body,
        }
    }

    /// Queue a notification that arrived at `now`. Always answers id 0.
    pub fn notify(&self, request: NotifyRequest, now: NaiveDateTime) -> Result<u32, StoreError> {
        let record = self.build_record(request, now);
        self.store.append(&record)?;
        tracing::info!(
            app = %record.app_name,
            summary = %record.summary,
            expire_timeout = record.expire_timeout,
            "Received notification"
        );
        Ok(0)
    }

    /// Normalize a request into the record that gets persisted.
    pub fn build_record(&self, request: NotifyRequest, now: NaiveDateTime) -> NotificationRecord {
        let mut expire_timeout = request.expire_timeout;
        if expire_timeout < 0 {
            expire_timeout = self.default_timeout_ms;
        }
        if self.double_on_long_body && request.body.chars().count() > self.long_body_threshold {
            expire_timeout = expire_timeout.saturating_mul(2);
        }

        let urgency = clamp_urgency(hint_int(&request.hints, "urgency", DEFAULT_URGENCY));
        let sender_pid = hint_int(&request.hints, "sender-pid", DEFAULT_SENDER_PID);

        NotificationRecord {
            timetag: now,
            summary: request.summary,
            body: request.body,
            expire_timeout,
            app_name: request.app_name,
            app_icon: request.app_icon,
            replaces_id: request.replaces_id,
            actions: request.actions,
            urgency: urgency as i32,
            sender_pid,
        }
    }

    pub fn capabilities(&self) -> Vec<&'static str> {
        vec!["body"]
    }

    pub fn server_information(&self) -> ServerInformation {
        ServerInformation {
            name: SERVER_NAME,
            vendor: SERVER_VENDOR,
            version: SERVER_VERSION,
            spec_version: SPEC_VERSION,
        }
    }
}

/// Integer hint value. Numeric strings are accepted; anything else falls
/// back to `default`.
fn hint_int(hints: &HashMap<String, Value>, key: &str, default: i64) -> i64 {
    let Some(value) = hints.get(key) else {
        return default;
    };
    let parsed = match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    parsed.unwrap_or_else(|| {
        tracing::warn!(hint = key, value = %value, "Ignoring non-integer hint");
        default
    })
}

fn clamp_urgency(urgency: i64) -> i64 {
    if URGENCY_RANGE.contains(&urgency) {
        return urgency;
    }
    let clamped = urgency.clamp(*URGENCY_RANGE.start(), *URGENCY_RANGE.end());
    tracing::warn!(urgency, clamped, "Urgency hint out of range");
    clamped
}
