//! CLI subcommand bodies. Each returns the text for stdout, if any.

use chrono::{Local, NaiveDateTime};
use notify_store::{DisplayStateStore, MuteStore, QueueStore};

use crate::config::AppConfig;
use crate::scheduler::DisplayScheduler;

pub const MUTED_ICON: &str = "🔕";
pub const UNMUTED_ICON: &str = "🔔";

pub fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

pub fn render<S>(store: &S, config: &AppConfig, now: NaiveDateTime) -> Result<String, anyhow::Error>
where
    S: QueueStore + DisplayStateStore + MuteStore,
{
    let outcome = DisplayScheduler::new(store, config.formatter()).render(now)?;
    Ok(outcome.line().to_string())
}

/// Flip mute and return the icon for the new state.
pub fn mute_toggle<S: MuteStore>(store: &S) -> Result<&'static str, anyhow::Error> {
    Ok(if store.toggle_mute()? { MUTED_ICON } else { UNMUTED_ICON })
}

/// Drop the current head so the next notification shows.
pub fn skip<S: QueueStore>(store: &S) -> Result<(), anyhow::Error> {
    if store.skip()?.is_none() {
        tracing::debug!("Nothing to skip");
    }
    Ok(())
}
