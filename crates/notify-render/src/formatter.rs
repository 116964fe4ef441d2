//! Turns a queued record into the single line printed to the bar.

use std::fmt::Write;

use chrono::format::{Item, StrftimeItems};
use notify_store::NotificationRecord;
use notify_store::record::format_timestamp;

use crate::template::{Placeholder, Template};
use crate::windower::{WindowConfig, window};

/// Characters the bar's consumer splits on; each becomes a space.
const FORBIDDEN: [char; 6] = ['\n', '\r', '\t', '|', '<', '>'];

#[derive(Debug, Clone)]
pub struct Formatter {
    template: Template,
    time_format: String,
    window: WindowConfig,
}

impl Formatter {
    pub fn new(template: Template, time_format: impl Into<String>, window: WindowConfig) -> Self {
        Self {
            template,
            time_format: time_format.into(),
            window,
        }
    }

    pub fn window_config(&self) -> &WindowConfig {
        &self.window
    }

    /// Render `record` for its `counter`-th display with `rest_secs` left.
    pub fn format(&self, record: &NotificationRecord, counter: u64, rest_secs: i64) -> String {
        let line = self.template.render(|p| match p {
            Placeholder::Timetag => self.timetag(record),
            Placeholder::AppName => record.app_name.clone(),
            Placeholder::Summary => record.summary.clone(),
            Placeholder::Body => window(&record.body, counter, &self.window),
            Placeholder::Urgency => urgency_marker(record.urgency),
            Placeholder::RestTime => rest_secs.to_string(),
            Placeholder::SenderPid => record.sender_pid.to_string(),
            Placeholder::AppIcon => record.app_icon.clone(),
            Placeholder::ReplacesId => record.replaces_id.to_string(),
            Placeholder::Actions => record.actions.join(", "),
            Placeholder::ExpireTimeout => record.expire_timeout.to_string(),
        });
        sanitize(&line)
    }

    fn timetag(&self, record: &NotificationRecord) -> String {
        let mut out = String::new();
        if write!(out, "{}", record.timetag.format(&self.time_format)).is_err() {
            tracing::warn!(format = %self.time_format, "Invalid time format, using full timestamp");
            return format_timestamp(&record.timetag);
        }
        out
    }
}

/// Longest marker rendered, whatever urgency a queued record carries.
const MAX_URGENCY_MARKS: i32 = 8;

/// `[!!]` for urgency 2; negative urgencies render as `[]`.
pub fn urgency_marker(urgency: i32) -> String {
    let marks = urgency.clamp(0, MAX_URGENCY_MARKS) as usize;
    format!("[{}]", "!".repeat(marks))
}

/// Replace line breaks, tabs, `|` and angle brackets with spaces.
pub fn sanitize(line: &str) -> String {
    line.chars()
        .map(|c| if FORBIDDEN.contains(&c) { ' ' } else { c })
        .collect()
}

/// Whether `pattern` is a strftime pattern chrono can render.
pub fn is_valid_time_format(pattern: &str) -> bool {
    StrftimeItems::new(pattern).all(|item| !matches!(item, Item::Error))
}
