//! All setting definitions with their default values.

use std::collections::HashMap;
use std::sync::LazyLock;

/// A single setting definition.
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct SettingDef {
    pub key: &'static str,
    pub default: &'static str,
    pub description: &'static str,
}

const DEFS: &[(&str, &str, &str)] = &[
    (
        "NOTIFYBAR_VIEWPORT_WIDTH",
        "60",
        "Characters of body text visible at once; longer bodies scroll",
    ),
    (
        "NOTIFYBAR_SHIFT_AMOUNT",
        "20",
        "Characters the body scrolls per step",
    ),
    (
        "NOTIFYBAR_SHIFT_STRIDE",
        "2",
        "Render calls per scroll step (1 scrolls on every render)",
    ),
    (
        "NOTIFYBAR_SCROLL_SEPARATOR",
        " - ",
        "Text placed between the end of a scrolling body and its repeat",
    ),
    (
        "NOTIFYBAR_DOUBLE_ON_LONG_BODY",
        "true",
        "Double the display time of notifications whose body scrolls",
    ),
    (
        "NOTIFYBAR_DEFAULT_TIMEOUT_MS",
        "4000",
        "Display time for notifications that do not request one",
    ),
    (
        "NOTIFYBAR_TIME_FORMAT",
        notify_render::DEFAULT_TIME_FORMAT,
        "strftime pattern for {timetag}",
    ),
    (
        "NOTIFYBAR_FORMAT",
        notify_render::DEFAULT_TEMPLATE,
        "Output pattern over {timetag} {app_name} {summary} {body} {urgency} {rest_time} {sender_pid} {app_icon} {replaces_id} {actions} {expire_timeout}",
    ),
    (
        "NOTIFYBAR_DATA_DIR",
        "",
        "Directory for the state files (empty: the user cache directory)",
    ),
];

/// Global setting definitions indexed by key.
pub static DEFAULT_SETTINGS: LazyLock<HashMap<&'static str, SettingDef>> = LazyLock::new(|| {
    DEFS.iter()
        .map(|&(key, default, description)| {
            (
                key,
                SettingDef {
                    key,
                    default,
                    description,
                },
            )
        })
        .collect()
});

/// Get the default value for a setting key, or `None` if not defined.
pub fn get_default(key: &str) -> Option<&'static str> {
    DEFAULT_SETTINGS.get(key).map(|d| d.default)
}

/// Keys in declaration order.
pub fn keys() -> impl Iterator<Item = &'static str> {
    DEFS.iter().map(|&(key, _, _)| key)
}
