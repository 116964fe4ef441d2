//! Single-line rendering of queued notifications for a status bar.

pub mod formatter;
pub mod template;
pub mod windower;

pub use formatter::{Formatter, sanitize, urgency_marker};
pub use template::{Placeholder, Template, TemplateError};
pub use windower::{WindowConfig, window};

/// Pattern used when none is configured.
pub const DEFAULT_TEMPLATE: &str =
    "{timetag}/ {app_name}/ {summary} {body}/ {urgency} ({rest_time})";

/// strftime pattern for `{timetag}` when none is configured.
pub const DEFAULT_TIME_FORMAT: &str = "%H:%M:%S";
