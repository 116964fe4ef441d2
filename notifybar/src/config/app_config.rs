//! Runtime configuration loaded from environment overrides over defaults.

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::Context;
use notify_render::{Formatter, Template, WindowConfig};

use super::defaults::{get_default, keys};
use super::validation::validate_setting;

/// Runtime configuration shared by ingestion and rendering.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub viewport_width: usize,
    pub shift_amount: usize,
    pub shift_stride: u64,
    pub scroll_separator: String,
    pub double_on_long_body: bool,
    pub default_timeout_ms: i64,
    pub time_format: String,
    pub template: Template,
    /// `None` means the platform cache directory.
    pub data_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            viewport_width: 60,
            shift_amount: 20,
            shift_stride: 2,
            scroll_separator: " - ".into(),
            double_on_long_body: true,
            default_timeout_ms: 4000,
            time_format: notify_render::DEFAULT_TIME_FORMAT.into(),
            template: Template::parse(notify_render::DEFAULT_TEMPLATE)
                .expect("default template is valid"),
            data_dir: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, anyhow::Error> {
        Self::load(|key| std::env::var(key).ok())
    }

    /// Load configuration, asking `lookup` for each key and falling back to
    /// its default. Every value is validated before use.
    pub fn load<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut values: HashMap<&'static str, String> = HashMap::new();
        for key in keys() {
            let value = lookup(key)
                .or_else(|| get_default(key).map(str::to_string))
                .unwrap_or_default();
            validate_setting(key, &value)
                .map_err(|e| anyhow::anyhow!("validation error for {key}: {e}"))?;
            values.insert(key, value);
        }
        let g = |key: &str| -> String { values.get(key).cloned().unwrap_or_default() };

        let data_dir = match g("NOTIFYBAR_DATA_DIR") {
            dir if dir.is_empty() => None,
            dir => Some(PathBuf::from(dir)),
        };

        Ok(Self {
            viewport_width: g("NOTIFYBAR_VIEWPORT_WIDTH").parse()?,
            shift_amount: g("NOTIFYBAR_SHIFT_AMOUNT").parse()?,
            shift_stride: g("NOTIFYBAR_SHIFT_STRIDE").parse()?,
            scroll_separator: g("NOTIFYBAR_SCROLL_SEPARATOR"),
            double_on_long_body: g("NOTIFYBAR_DOUBLE_ON_LONG_BODY") == "true",
            default_timeout_ms: g("NOTIFYBAR_DEFAULT_TIMEOUT_MS").parse()?,
            time_format: g("NOTIFYBAR_TIME_FORMAT"),
            template: Template::parse(&g("NOTIFYBAR_FORMAT")).context("NOTIFYBAR_FORMAT")?,
            data_dir,
        })
    }

    pub fn window_config(&self) -> WindowConfig {
        WindowConfig {
            viewport_width: self.viewport_width,
            shift_amount: self.shift_amount,
            shift_stride: self.shift_stride,
            separator: self.scroll_separator.clone(),
        }
    }

    pub fn formatter(&self) -> Formatter {
        Formatter::new(
            self.template.clone(),
            self.time_format.clone(),
            self.window_config(),
        )
    }
}
