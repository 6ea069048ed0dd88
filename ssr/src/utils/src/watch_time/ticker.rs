use consts::WATCH_TICK_INTERVAL;
use leptos::prelude::*;
use web_time::Duration;

/// Something that can run a callback on a fixed period until cancelled.
pub trait TickScheduler: Copy + 'static {
    type Handle: Clone + Send + Sync + 'static;

    fn schedule(&self, on_tick: Box<dyn Fn()>, period: Duration) -> Option<Self::Handle>;

    fn cancel(&self, handle: Self::Handle);
}

/// Browser intervals through Leptos.
#[derive(Clone, Copy, Debug, Default)]
pub struct IntervalScheduler;

impl TickScheduler for IntervalScheduler {
    type Handle = IntervalHandle;

    fn schedule(&self, on_tick: Box<dyn Fn()>, period: Duration) -> Option<IntervalHandle> {
        set_interval_with_handle(move || on_tick(), period)
            .inspect_err(|e| log::error!("watch_log: failed to start watch tick: {e:?}"))
            .ok()
    }

    fn cancel(&self, handle: IntervalHandle) {
        handle.clear();
    }
}

/// Owner of the one-second repeating tick that drives the watched-time counter.
pub struct WatchTicker<S: TickScheduler = IntervalScheduler> {
    scheduler: S,
    interval: RwSignal<Option<S::Handle>>,
}

// Manual impls: the derive would demand `S::Handle: Copy`, but the signal is
// `Copy` regardless of its contents.
impl<S: TickScheduler> Clone for WatchTicker<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: TickScheduler> Copy for WatchTicker<S> {}

impl Default for WatchTicker {
    fn default() -> Self {
        Self::new()
    }
}

impl WatchTicker {
    pub fn new() -> Self {
        Self::with_scheduler(IntervalScheduler)
    }
}

impl<S: TickScheduler> WatchTicker<S> {
    pub fn with_scheduler(scheduler: S) -> Self {
        Self {
            scheduler,
            interval: RwSignal::new(None),
        }
    }

    /// Starts ticking unless a tick is already active.
    pub fn start(&self, on_tick: impl Fn() + 'static) {
        if self.is_active() {
            return;
        }

        if let Some(handle) = self
            .scheduler
            .schedule(Box::new(on_tick), WATCH_TICK_INTERVAL)
        {
            let _ = self.interval.try_set(Some(handle));
        }
    }

    pub fn stop(&self) {
        if let Some(handle) = self.interval.try_get_untracked().flatten() {
            self.scheduler.cancel(handle);
            let _ = self.interval.try_set(None);
        }
    }

    pub fn is_active(&self) -> bool {
        self.interval
            .try_with_untracked(Option::is_some)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy)]
    struct CountingScheduler {
        scheduled: RwSignal<usize>,
        cancelled: RwSignal<Vec<usize>>,
    }

    impl CountingScheduler {
        fn new() -> Self {
            Self {
                scheduled: RwSignal::new(0),
                cancelled: RwSignal::new(vec![]),
            }
        }
    }

    impl TickScheduler for CountingScheduler {
        type Handle = usize;

        fn schedule(&self, _on_tick: Box<dyn Fn()>, period: Duration) -> Option<usize> {
            assert_eq!(period, WATCH_TICK_INTERVAL);
            self.scheduled.update(|n| *n += 1);
            Some(self.scheduled.get_untracked())
        }

        fn cancel(&self, handle: usize) {
            self.cancelled.update(|c| c.push(handle));
        }
    }

    #[test]
    fn start_while_active_is_a_noop() {
        let owner = Owner::new();
        owner.set();
        let scheduler = CountingScheduler::new();
        let ticker = WatchTicker::with_scheduler(scheduler);

        ticker.start(|| {});
        ticker.start(|| {});

        assert!(ticker.is_active());
        assert_eq!(scheduler.scheduled.get_untracked(), 1);
    }

    #[test]
    fn stop_is_idempotent() {
        let owner = Owner::new();
        owner.set();
        let scheduler = CountingScheduler::new();
        let ticker = WatchTicker::with_scheduler(scheduler);

        ticker.stop();
        ticker.start(|| {});
        ticker.stop();
        ticker.stop();

        assert!(!ticker.is_active());
        assert_eq!(scheduler.cancelled.get_untracked(), vec![1]);
    }

    #[test]
    fn restart_after_stop_schedules_a_new_tick() {
        let owner = Owner::new();
        owner.set();
        let scheduler = CountingScheduler::new();
        let ticker = WatchTicker::with_scheduler(scheduler);

        ticker.start(|| {});
        ticker.stop();
        ticker.start(|| {});

        assert!(ticker.is_active());
        assert_eq!(scheduler.scheduled.get_untracked(), 2);
    }
}
