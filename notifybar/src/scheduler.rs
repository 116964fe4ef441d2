//! Decides what the bar shows on each render tick.
//!
//! The queue head stays on screen until its expiry has elapsed since it was
//! first shown, then it is dropped and the next record takes its place. A
//! render counter drives the scrolling of long bodies.

use chrono::NaiveDateTime;
use notify_render::Formatter;
use notify_store::{
    DisplayState, DisplayStateStore, MuteStore, NotificationRecord, QueueStore, StoreError,
    fingerprint,
};

pub const MUTED_MESSAGE: &str = "notifications muted";
pub const EMPTY_MESSAGE: &str = "No notifications";

/// A record as it is being shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Display {
    pub record: NotificationRecord,
    pub counter: u64,
    pub rest_secs: i64,
    pub line: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    Muted,
    NoNotification,
    /// The head was not tracked before this render.
    NewDisplay(Display),
    /// The tracked head is still within its display time.
    ContinuedDisplay(Display),
}

impl RenderOutcome {
    /// Text for the bar.
    pub fn line(&self) -> &str {
        match self {
            Self::Muted => MUTED_MESSAGE,
            Self::NoNotification => EMPTY_MESSAGE,
            Self::NewDisplay(d) | Self::ContinuedDisplay(d) => &d.line,
        }
    }

    pub fn display(&self) -> Option<&Display> {
        match self {
            Self::NewDisplay(d) | Self::ContinuedDisplay(d) => Some(d),
            Self::Muted | Self::NoNotification => None,
        }
    }
}

enum HeadStatus {
    Shown(RenderOutcome),
    Expired,
}

pub struct DisplayScheduler<'a, S> {
    store: &'a S,
    formatter: Formatter,
}

impl<'a, S> DisplayScheduler<'a, S>
where
    S: QueueStore + DisplayStateStore + MuteStore,
{
    pub fn new(store: &'a S, formatter: Formatter) -> Self {
        Self { store, formatter }
    }

    /// Run one render tick at `now`.
    ///
    /// Muted or empty: nothing is written. Otherwise the display state is
    /// updated for the head, and expired heads are dropped from the queue
    /// until one is showable or the queue is empty.
    pub fn render(&self, now: NaiveDateTime) -> Result<RenderOutcome, StoreError> {
        if self.store.is_muted()? {
            return Ok(RenderOutcome::Muted);
        }

        let tracked = self.store.read_display_state()?;

        // Each pass either returns or drops the head of a fresh read; a stale
        // copy of the queue is never written back.
        loop {
            let mut queue = self.store.read_all()?;
            let Some(head) = queue.first() else {
                break;
            };
            let fp = fingerprint(head)?;
            match self.check_head(head, fp, tracked.as_ref(), now)? {
                HeadStatus::Shown(outcome) => return Ok(outcome),
                HeadStatus::Expired => {
                    let dropped = queue.remove(0);
                    self.store.replace_all(&queue)?;
                    tracing::debug!(
                        summary = %dropped.summary,
                        remaining = queue.len(),
                        "Notification expired, dropped from queue"
                    );
                }
            }
        }
        Ok(RenderOutcome::NoNotification)
    }

    fn check_head(
        &self,
        head: &NotificationRecord,
        fp: String,
        tracked: Option<&DisplayState>,
        now: NaiveDateTime,
    ) -> Result<HeadStatus, StoreError> {
        let state = match tracked {
            Some(state) if state.fingerprint == fp => state,
            _ => {
                self.store.write_display_state(&DisplayState {
                    first_display: now,
                    fingerprint: fp,
                    counter: 0,
                })?;
                tracing::debug!(summary = %head.summary, "Tracking new head");
                let rest_secs = head.expire_timeout / 1000;
                return Ok(HeadStatus::Shown(RenderOutcome::NewDisplay(
                    self.display(head, 0, rest_secs),
                )));
            }
        };

        let elapsed = (now - state.first_display).num_milliseconds();
        if elapsed > head.expire_timeout {
            return Ok(HeadStatus::Expired);
        }

        let counter = state.counter.saturating_add(1);
        self.store.write_display_state(&DisplayState {
            first_display: state.first_display,
            fingerprint: fp,
            counter,
        })?;
        let rest_secs = head.expire_timeout.saturating_sub(elapsed) / 1000;
        Ok(HeadStatus::Shown(RenderOutcome::ContinuedDisplay(
            self.display(head, counter, rest_secs),
        )))
    }

    fn display(&self, record: &NotificationRecord, counter: u64, rest_secs: i64) -> Display {
        Display {
            line: self.formatter.format(record, counter, rest_secs),
            record: record.clone(),
            counter,
            rest_secs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use chrono::{Duration, NaiveDate};
    use notify_store::{FileStore, MemoryStore};
    use std::cell::Cell;

    fn t0() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn ms(n: i64) -> Duration {
        Duration::milliseconds(n)
    }

    fn rec(summary: &str, expiry: i64) -> NotificationRecord {
        NotificationRecord::new(t0() - ms(500), summary, "body", expiry).with_app_name("app")
    }

    fn formatter() -> Formatter {
        AppConfig::default().formatter()
    }

    #[test]
    fn empty_queue_writes_nothing() {
        let store = MemoryStore::new();
        let outcome = DisplayScheduler::new(&store, formatter()).render(t0()).unwrap();
        assert_eq!(outcome, RenderOutcome::NoNotification);
        assert_eq!(outcome.line(), "No notifications");
        assert_eq!(store.write_count(), 0);
        assert!(store.read_display_state().unwrap().is_none());
    }

    #[test]
    fn muted_writes_nothing() {
        let store = MemoryStore::with_queue(vec![rec("a", 4000)]).muted(true);
        let outcome = DisplayScheduler::new(&store, formatter()).render(t0()).unwrap();
        assert_eq!(outcome, RenderOutcome::Muted);
        assert_eq!(outcome.line(), "notifications muted");
        assert_eq!(store.write_count(), 0);
    }

    #[test]
    fn first_render_tracks_head() {
        let a = rec("a", 4000);
        let store = MemoryStore::with_queue(vec![a.clone()]);
        let outcome = DisplayScheduler::new(&store, formatter()).render(t0()).unwrap();

        let RenderOutcome::NewDisplay(d) = outcome else {
            panic!("expected NewDisplay, got {outcome:?}");
        };
        assert_eq!(d.counter, 0);
        assert_eq!(d.rest_secs, 4);
        assert_eq!(d.record, a);
        assert!(d.line.contains("a body"));
        assert!(d.line.ends_with("[!] (4)"));
        assert_eq!(
            store.read_display_state().unwrap(),
            Some(DisplayState {
                first_display: t0(),
                fingerprint: fingerprint(&a).unwrap(),
                counter: 0,
            })
        );
    }

    #[test]
    fn continued_renders_count_up_and_count_down() {
        let store = MemoryStore::with_queue(vec![rec("a", 4000)]);
        let scheduler = DisplayScheduler::new(&store, formatter());
        scheduler.render(t0()).unwrap();

        let first = scheduler.render(t0() + ms(1200)).unwrap();
        let second = scheduler.render(t0() + ms(2500)).unwrap();
        let (RenderOutcome::ContinuedDisplay(d1), RenderOutcome::ContinuedDisplay(d2)) =
            (&first, &second)
        else {
            panic!("expected two ContinuedDisplay, got {first:?} / {second:?}");
        };
        assert_eq!(d1.counter, 1);
        assert_eq!(d2.counter, d1.counter + 1);
        assert_eq!(d1.rest_secs, 2);
        assert_eq!(d2.rest_secs, 1);
        assert!(d2.rest_secs < d1.rest_secs);

        let state = store.read_display_state().unwrap().unwrap();
        assert_eq!(state.first_display, t0());
        assert_eq!(state.counter, 2);
    }

    #[test]
    fn expired_head_is_dropped_and_queue_empties() {
        let store = MemoryStore::with_queue(vec![rec("a", 4000)]);
        let scheduler = DisplayScheduler::new(&store, formatter());
        scheduler.render(t0()).unwrap();

        let outcome = scheduler.render(t0() + ms(4500)).unwrap();
        assert_eq!(outcome, RenderOutcome::NoNotification);
        assert!(store.read_all().unwrap().is_empty());
    }

    #[test]
    fn expiry_boundary_still_shows() {
        let store = MemoryStore::with_queue(vec![rec("a", 4000)]);
        let scheduler = DisplayScheduler::new(&store, formatter());
        scheduler.render(t0()).unwrap();

        let at_boundary = scheduler.render(t0() + ms(4000)).unwrap();
        let RenderOutcome::ContinuedDisplay(d) = at_boundary else {
            panic!("expected ContinuedDisplay at the boundary, got {at_boundary:?}");
        };
        assert_eq!(d.rest_secs, 0);
        assert_eq!(
            scheduler.render(t0() + ms(4001)).unwrap(),
            RenderOutcome::NoNotification
        );
    }

    #[test]
    fn zero_expiry_renders_once() {
        let store = MemoryStore::with_queue(vec![rec("flash", 0)]);
        let scheduler = DisplayScheduler::new(&store, formatter());
        assert!(matches!(
            scheduler.render(t0()).unwrap(),
            RenderOutcome::NewDisplay(_)
        ));
        assert_eq!(
            scheduler.render(t0() + ms(1)).unwrap(),
            RenderOutcome::NoNotification
        );
    }

    #[test]
    fn expired_head_gives_way_to_next() {
        let a = rec("a", 1000);
        let b = rec("b", 3000);
        let store = MemoryStore::with_queue(vec![a, b.clone()]);
        let scheduler = DisplayScheduler::new(&store, formatter());
        scheduler.render(t0()).unwrap();

        let later = t0() + ms(1500);
        let outcome = scheduler.render(later).unwrap();
        let RenderOutcome::NewDisplay(d) = outcome else {
            panic!("expected NewDisplay for the next head, got {outcome:?}");
        };
        assert_eq!(d.record, b);
        assert_eq!(d.counter, 0);
        assert_eq!(d.rest_secs, 3);
        assert_eq!(store.read_all().unwrap(), vec![b.clone()]);
        let state = store.read_display_state().unwrap().unwrap();
        assert_eq!(state.first_display, later);
        assert_eq!(state.fingerprint, fingerprint(&b).unwrap());
    }

    #[test]
    fn identical_duplicates_expire_together() {
        let a = rec("dup", 1000);
        let c = rec("other", 2000);
        let store = MemoryStore::with_queue(vec![a.clone(), a, c.clone()]);
        let scheduler = DisplayScheduler::new(&store, formatter());
        scheduler.render(t0()).unwrap();

        let outcome = scheduler.render(t0() + ms(1500)).unwrap();
        assert_eq!(outcome.display().map(|d| &d.record), Some(&c));
        assert_eq!(store.read_all().unwrap(), vec![c]);
    }

    #[test]
    fn stale_state_from_another_head_resets_tracking() {
        let store = MemoryStore::with_queue(vec![rec("a", 4000)]);
        store
            .write_display_state(&DisplayState {
                first_display: t0() - ms(60_000),
                fingerprint: "not-the-head".into(),
                counter: 17,
            })
            .unwrap();
        let outcome = DisplayScheduler::new(&store, formatter())
            .render(t0())
            .unwrap();
        assert!(matches!(outcome, RenderOutcome::NewDisplay(ref d) if d.counter == 0));
        assert_eq!(store.read_display_state().unwrap().unwrap().counter, 0);
    }

    #[test]
    fn mute_leaves_files_byte_identical() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        store.append(&rec("a", 4000)).unwrap();
        store
            .write_display_state(&DisplayState {
                first_display: t0(),
                fingerprint: "abc".into(),
                counter: 3,
            })
            .unwrap();
        assert!(store.toggle_mute().unwrap());

        let queue_before = std::fs::read(store.queue_path()).unwrap();
        let state_before = std::fs::read(store.display_state_path()).unwrap();

        let outcome = DisplayScheduler::new(&store, formatter())
            .render(t0() + ms(10_000))
            .unwrap();
        assert_eq!(outcome, RenderOutcome::Muted);
        assert_eq!(std::fs::read(store.queue_path()).unwrap(), queue_before);
        assert_eq!(std::fs::read(store.display_state_path()).unwrap(), state_before);
    }

    #[test]
    fn file_backed_scenario_new_then_expired() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        let a = rec("a", 4000);
        store.append(&a).unwrap();
        let scheduler = DisplayScheduler::new(&store, formatter());

        let first = scheduler.render(t0()).unwrap();
        assert!(matches!(first, RenderOutcome::NewDisplay(ref d) if d.rest_secs == 4));
        let state = store.read_display_state().unwrap().unwrap();
        assert_eq!(state.first_display, t0());
        assert_eq!(state.fingerprint, fingerprint(&a).unwrap());
        assert_eq!(state.counter, 0);

        let second = scheduler.render(t0() + ms(4500)).unwrap();
        assert_eq!(second, RenderOutcome::NoNotification);
        assert!(store.read_all().unwrap().is_empty());
    }

    #[test]
    fn long_body_scrolls_across_renders() {
        let mut long = rec("news", 60_000);
        long.body = "abcdefghijklmnopqrstuvwxyz".repeat(4);
        let store = MemoryStore::with_queue(vec![long.clone()]);
        let scheduler = DisplayScheduler::new(&store, formatter());

        let lines: Vec<String> = (0..4)
            .map(|i| {
                scheduler
                    .render(t0() + ms(i * 1000))
                    .unwrap()
                    .line()
                    .to_string()
            })
            .collect();
        // counters 0,1 share a window; counter 2 advances it
        assert_eq!(lines[0].replace("(60)", "(59)"), lines[1]);
        assert!(lines[0].contains(&long.body[..60]));
        assert!(lines[2].contains(&long.body[20..80]));
    }

    /// Appends `late` to the queue right after the first `replace_all`, the
    /// way a listener running alongside a render would.
    struct AppendAfterReplace {
        inner: MemoryStore,
        late: NotificationRecord,
        injected: Cell<bool>,
    }

    impl QueueStore for AppendAfterReplace {
        fn append(&self, record: &NotificationRecord) -> Result<(), StoreError> {
            self.inner.append(record)
        }

        fn read_all(&self) -> Result<Vec<NotificationRecord>, StoreError> {
            self.inner.read_all()
        }

        fn replace_all(&self, records: &[NotificationRecord]) -> Result<(), StoreError> {
            self.inner.replace_all(records)?;
            if !self.injected.replace(true) {
                self.inner.append(&self.late)?;
            }
            Ok(())
        }
    }

    impl DisplayStateStore for AppendAfterReplace {
        fn read_display_state(&self) -> Result<Option<DisplayState>, StoreError> {
            self.inner.read_display_state()
        }

        fn write_display_state(&self, state: &DisplayState) -> Result<(), StoreError> {
            self.inner.write_display_state(state)
        }
    }

    impl MuteStore for AppendAfterReplace {
        fn is_muted(&self) -> Result<bool, StoreError> {
            self.inner.is_muted()
        }

        fn toggle_mute(&self) -> Result<bool, StoreError> {
            self.inner.toggle_mute()
        }
    }

    #[test]
    fn append_during_expiry_drops_is_kept() {
        let dup = rec("dup", 1000);
        let mut late = rec("late", 3000);
        late.timetag = t0() + ms(1400);
        let store = AppendAfterReplace {
            inner: MemoryStore::with_queue(vec![dup.clone(), dup.clone()]),
            late: late.clone(),
            injected: Cell::new(false),
        };
        store
            .write_display_state(&DisplayState {
                first_display: t0(),
                fingerprint: fingerprint(&dup).unwrap(),
                counter: 2,
            })
            .unwrap();

        let outcome = DisplayScheduler::new(&store, formatter())
            .render(t0() + ms(1500))
            .unwrap();
        let RenderOutcome::NewDisplay(d) = outcome else {
            panic!("expected the appended record to be shown, got {outcome:?}");
        };
        assert_eq!(d.record, late);
        assert_eq!(store.read_all().unwrap(), vec![late]);
    }

    #[test]
    fn clock_going_back_keeps_huge_expiry_showing() {
        let store = MemoryStore::with_queue(vec![rec("forever", i64::MAX)]);
        let scheduler = DisplayScheduler::new(&store, formatter());
        scheduler.render(t0()).unwrap();

        let outcome = scheduler.render(t0() - ms(3_600_000)).unwrap();
        let RenderOutcome::ContinuedDisplay(d) = outcome else {
            panic!("expected ContinuedDisplay after the clock moved back, got {outcome:?}");
        };
        assert_eq!(d.rest_secs, i64::MAX / 1000);
        assert_eq!(d.counter, 1);
    }
}
