use consts::youtube::IFRAME_API_LOAD_TIMEOUT_MS;
use leptos::prelude::*;
use leptos::task::spawn_local;
use utils::time::now_ms;
use utils::types::VideoDetails;
use utils::watch_time::{
    IntervalScheduler, LocalStorageTelemetry, TickScheduler, TrackerCommand, WatchTelemetry,
    WatchTelemetryEvent, WatchTicker, WatchTimeTracker,
};
use utils::youtube::{
    extract_video_id, EmbedHandle, IframeApiLease, IframeApiLoader, PlayerInitError, PlayerState,
};
use web_sys::HtmlElement;

/// Reactive shell around [`WatchTimeTracker`] for one mounted player.
///
/// Owns the tick, the embedded player and the IFrame API lease, and executes
/// the commands the tracker hands back.
#[derive(Clone, Copy)]
pub struct WatchSession<T = LocalStorageTelemetry, S = IntervalScheduler>
where
    T: WatchTelemetry + Copy + 'static,
    S: TickScheduler,
{
    tracker: RwSignal<WatchTimeTracker>,
    pub details: RwSignal<Option<VideoDetails>>,
    // starts true and nothing clears it yet
    pub loading: RwSignal<bool>,
    pub init_error: RwSignal<Option<PlayerInitError>>,
    pub watched_time: Memo<u32>,
    /// Seconds left before "Next" unlocks, `None` without a duration
    pub remaining: Memo<Option<u32>>,
    pub next_unlocked: Memo<bool>,
    pub is_playing: Memo<bool>,
    ticker: WatchTicker<S>,
    telemetry: T,
    embed: StoredValue<Option<EmbedHandle>, LocalStorage>,
    lease: StoredValue<Option<IframeApiLease>, LocalStorage>,
}

impl WatchSession {
    pub fn new(details: Option<VideoDetails>) -> Self {
        Self::with_parts(details, LocalStorageTelemetry::new(), IntervalScheduler)
    }
}

impl<T, S> WatchSession<T, S>
where
    T: WatchTelemetry + Copy + 'static,
    S: TickScheduler,
{
    pub fn with_parts(details: Option<VideoDetails>, telemetry: T, scheduler: S) -> Self {
        let tracker = RwSignal::new(WatchTimeTracker::new(
            details.as_ref().map(|d| d.duration),
        ));

        let session = Self {
            tracker,
            details: RwSignal::new(details),
            loading: RwSignal::new(true),
            init_error: RwSignal::new(None),
            watched_time: Memo::new(move |_| tracker.with(|t| t.watched())),
            remaining: Memo::new(move |_| tracker.with(|t| t.remaining())),
            next_unlocked: Memo::new(move |_| tracker.with(|t| t.is_unlocked())),
            is_playing: Memo::new(move |_| tracker.with(|t| t.is_playing())),
            ticker: WatchTicker::with_scheduler(scheduler),
            telemetry,
            embed: StoredValue::new_local(None),
            lease: StoredValue::new_local(None),
        };

        // a zero-length video starts out unlocked
        session.check_threshold();
        session
    }

    pub fn handle_state(&self, state: PlayerState) {
        let now = now_ms();
        let cmds = self
            .tracker
            .try_update(|t| t.handle_state(state, now))
            .unwrap_or_default();
        self.apply(cmds);
    }

    /// One tick of the interval. The threshold is checked right after the
    /// counter moves, before the next tick can land.
    fn tick(&self) {
        let mut advanced = false;
        self.tracker.maybe_update(|t| {
            advanced = t.tick();
            advanced
        });
        if advanced {
            self.check_threshold();
        }
    }

    fn check_threshold(&self) {
        let mut cmds = vec![];
        self.tracker.maybe_update(|t| {
            let was_unlocked = t.is_unlocked();
            cmds = t.check_threshold();
            if !was_unlocked && t.is_unlocked() {
                leptos::logging::log!("watch_log: next unlocked after {}s", t.watched());
            }
            !was_unlocked && t.is_unlocked()
        });
        self.apply(cmds);
    }

    fn apply(&self, cmds: Vec<TrackerCommand>) {
        for cmd in cmds {
            match cmd {
                TrackerCommand::StartTicking => {
                    let session = *self;
                    self.ticker.start(move || session.tick());
                }
                TrackerCommand::StopTicking => self.ticker.stop(),
                TrackerCommand::PauseEmbed => self.embed.with_value(|embed| {
                    if let Some(embed) = embed {
                        embed.pause();
                    }
                }),
                TrackerCommand::RecordStart { at_ms } => self
                    .telemetry
                    .record(WatchTelemetryEvent::SegmentStarted { at_ms }),
                TrackerCommand::RecordSegment { elapsed_secs } => self
                    .telemetry
                    .record(WatchTelemetryEvent::SegmentWatched { elapsed_secs }),
            }
        }
    }

    /// Loads the IFrame API and mounts the player inside `host`. Failures land
    /// in `init_error`; calling this again retries from scratch.
    pub fn mount(&self, host: HtmlElement) {
        let Some(details) = self.details.get_untracked() else {
            return;
        };
        self.init_error.set(None);

        let video_id = match extract_video_id(&details.url) {
            Ok(id) => id,
            Err(e) => return self.fail(e),
        };

        let lease = IframeApiLoader::acquire();
        let session = *self;
        spawn_local(async move {
            if let Err(e) = lease.ready_within(IFRAME_API_LOAD_TIMEOUT_MS).await {
                return session.fail(e);
            }

            let embed = match EmbedHandle::mount(&host, &video_id, move |state| {
                session.handle_state(state)
            }) {
                Ok(embed) => embed,
                Err(e) => return session.fail(e),
            };
            leptos::logging::log!("watch_log: player ready, video_id={video_id}");

            // the view may be gone by now, dropping the embed tears it down
            session.embed.try_update_value(|slot| *slot = Some(embed));
            session.lease.try_update_value(|slot| *slot = Some(lease));
        });
    }

    fn fail(&self, err: PlayerInitError) {
        leptos::logging::error!("watch_log: player init failed: {err}");
        let _ = self.init_error.try_set(Some(err));
    }

    /// Stops the tick and destroys the player. Safe to call repeatedly.
    pub fn teardown(&self) {
        self.ticker.stop();
        self.embed.try_update_value(|slot| *slot = None);
        self.lease.try_update_value(|slot| *slot = None);
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;
    use std::time::Duration;

    use super::*;

    /// Scheduler whose ticks are fired by hand.
    #[derive(Clone, Copy)]
    struct ManualScheduler {
        ticks: StoredValue<Vec<Option<Rc<dyn Fn()>>>, LocalStorage>,
    }

    impl ManualScheduler {
        fn new() -> Self {
            Self {
                ticks: StoredValue::new_local(vec![]),
            }
        }

        fn scheduled(&self) -> usize {
            self.ticks.with_value(Vec::len)
        }

        fn active(&self) -> usize {
            self.ticks.with_value(|t| t.iter().flatten().count())
        }

        fn fire(&self) {
            let tick = self
                .ticks
                .with_value(|t| t.iter().rev().flatten().next().cloned());
            if let Some(tick) = tick {
                tick();
            }
        }
    }

    impl TickScheduler for ManualScheduler {
        type Handle = usize;

        fn schedule(&self, on_tick: Box<dyn Fn()>, _period: Duration) -> Option<usize> {
            self.ticks.update_value(|t| t.push(Some(Rc::from(on_tick))));
            Some(self.scheduled() - 1)
        }

        fn cancel(&self, handle: usize) {
            self.ticks.update_value(|t| t[handle] = None);
        }
    }

    #[derive(Clone, Copy)]
    struct RecordingTelemetry {
        events: RwSignal<Vec<WatchTelemetryEvent>>,
    }

    impl RecordingTelemetry {
        fn new() -> Self {
            Self {
                events: RwSignal::new(vec![]),
            }
        }

        fn starts(&self) -> usize {
            self.events.with_untracked(|e| {
                e.iter()
                    .filter(|ev| matches!(ev, WatchTelemetryEvent::SegmentStarted { .. }))
                    .count()
            })
        }

        fn segments(&self) -> usize {
            self.events.with_untracked(|e| {
                e.iter()
                    .filter(|ev| matches!(ev, WatchTelemetryEvent::SegmentWatched { .. }))
                    .count()
            })
        }
    }

    impl WatchTelemetry for RecordingTelemetry {
        fn record(&self, event: WatchTelemetryEvent) {
            self.events.update(|e| e.push(event));
        }
    }

    fn session() -> (
        WatchSession<RecordingTelemetry, ManualScheduler>,
        RecordingTelemetry,
        ManualScheduler,
    ) {
        let telemetry = RecordingTelemetry::new();
        let scheduler = ManualScheduler::new();
        let session = WatchSession::with_parts(Some(VideoDetails::stub()), telemetry, scheduler);
        (session, telemetry, scheduler)
    }

    #[test]
    fn ten_ticks_unlock_and_stop_the_tick() {
        let owner = Owner::new();
        owner.set();
        let (session, telemetry, scheduler) = session();

        session.handle_state(PlayerState::Playing);
        session.handle_state(PlayerState::Playing);
        assert_eq!(scheduler.scheduled(), 1);
        assert_eq!(telemetry.starts(), 2);
        assert!(session.is_playing.get_untracked());

        for _ in 0..9 {
            scheduler.fire();
        }
        assert_eq!(session.remaining.get_untracked(), Some(1));
        assert!(!session.next_unlocked.get_untracked());

        scheduler.fire();
        assert_eq!(session.watched_time.get_untracked(), 10);
        assert!(session.next_unlocked.get_untracked());
        assert_eq!(scheduler.active(), 0);

        // nothing left to fire, the counter stays put
        scheduler.fire();
        assert_eq!(session.watched_time.get_untracked(), 10);
        assert_eq!(scheduler.scheduled(), 1);
    }

    #[test]
    fn pause_records_segment_and_resume_continues() {
        let owner = Owner::new();
        owner.set();
        let (session, telemetry, scheduler) = session();

        session.handle_state(PlayerState::Playing);
        for _ in 0..3 {
            scheduler.fire();
        }
        session.handle_state(PlayerState::Paused);

        assert_eq!(scheduler.active(), 0);
        assert_eq!(telemetry.segments(), 1);
        assert!(!session.is_playing.get_untracked());

        session.handle_state(PlayerState::Playing);
        scheduler.fire();
        assert_eq!(scheduler.scheduled(), 2);
        assert_eq!(session.watched_time.get_untracked(), 4);
    }

    #[test]
    fn playing_after_unlock_starts_nothing() {
        let owner = Owner::new();
        owner.set();
        let (session, telemetry, scheduler) = session();

        session.handle_state(PlayerState::Playing);
        for _ in 0..10 {
            scheduler.fire();
        }
        session.handle_state(PlayerState::Paused);
        session.handle_state(PlayerState::Playing);

        assert_eq!(scheduler.scheduled(), 1);
        assert_eq!(telemetry.starts(), 1);
        assert!(!session.is_playing.get_untracked());
    }

    #[test]
    fn teardown_stops_the_tick() {
        let owner = Owner::new();
        owner.set();
        let (session, _, scheduler) = session();

        session.handle_state(PlayerState::Playing);
        session.teardown();
        session.teardown();

        assert_eq!(scheduler.active(), 0);
        scheduler.fire();
        assert_eq!(session.watched_time.get_untracked(), 0);
    }

    #[test]
    fn zero_length_video_is_unlocked_from_the_start() {
        let owner = Owner::new();
        owner.set();
        let details = VideoDetails {
            duration: 0,
            ..VideoDetails::stub()
        };
        let session =
            WatchSession::with_parts(Some(details), RecordingTelemetry::new(), ManualScheduler::new());

        assert!(session.next_unlocked.get_untracked());
    }
}
