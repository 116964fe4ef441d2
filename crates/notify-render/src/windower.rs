//! Scrolling viewport over bodies too long for the bar.

/// Scroll parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowConfig {
    /// Visible characters.
    pub viewport_width: usize,
    /// Characters advanced per step.
    pub shift_amount: usize,
    /// Render calls per step.
    pub shift_stride: u64,
    /// Joins the body to its own copy so the wrap point never yields a
    /// short fragment.
    pub separator: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            viewport_width: 60,
            shift_amount: 20,
            shift_stride: 2,
            separator: " - ".into(),
        }
    }
}

/// Visible slice of `body` for the `counter`-th render of the same
/// notification. Lengths are counted in chars.
pub fn window(body: &str, counter: u64, cfg: &WindowConfig) -> String {
    let len = body.chars().count();
    if len <= cfg.viewport_width {
        return body.to_string();
    }

    let step = counter / cfg.shift_stride.max(1);
    let position = ((cfg.shift_amount as u128 * step as u128) % len as u128) as usize;

    body.chars()
        .chain(cfg.separator.chars())
        .chain(body.chars())
        .skip(position)
        .take(cfg.viewport_width)
        .collect()
}
