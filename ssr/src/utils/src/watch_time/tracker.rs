use crate::youtube::PlayerState;

/// Side effects requested by [`WatchTimeTracker`], executed by whoever owns
/// the timer, the embed and the telemetry sink.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TrackerCommand {
    StartTicking,
    StopTicking,
    PauseEmbed,
    RecordStart { at_ms: f64 },
    RecordSegment { elapsed_secs: f64 },
}

/// Watched-time accounting for a single video.
///
/// The counter only moves through [`WatchTimeTracker::tick`], one whole second
/// at a time, and only while a tick is active. Once the counter reaches the
/// video duration the tracker unlocks for good and refuses to tick again.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WatchTimeTracker {
    duration: Option<u32>,
    watched: u32,
    playing: bool,
    ticking: bool,
    resumed_at_ms: Option<f64>,
    unlocked: bool,
}

impl WatchTimeTracker {
    pub fn new(duration: Option<u32>) -> Self {
        Self {
            duration,
            ..Default::default()
        }
    }

    pub fn watched(&self) -> u32 {
        self.watched
    }

    /// Seconds left before unlocking, `None` without a known duration.
    pub fn remaining(&self) -> Option<u32> {
        self.duration.map(|d| d.saturating_sub(self.watched))
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_ticking(&self) -> bool {
        self.ticking
    }

    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }

    fn threshold_reached(&self) -> bool {
        self.duration.is_some_and(|d| self.watched >= d)
    }

    pub fn handle_state(&mut self, state: PlayerState, now_ms: f64) -> Vec<TrackerCommand> {
        match state {
            PlayerState::Playing => self.on_playing(now_ms),
            s if s.stops_playback() => self.on_stopped(now_ms),
            _ => vec![],
        }
    }

    fn on_playing(&mut self, now_ms: f64) -> Vec<TrackerCommand> {
        // late or duplicate events after the video was fully watched
        if self.threshold_reached() {
            return vec![];
        }

        self.playing = true;
        self.resumed_at_ms = Some(now_ms);

        let mut cmds = vec![TrackerCommand::RecordStart { at_ms: now_ms }];
        if !self.ticking {
            self.ticking = true;
            cmds.push(TrackerCommand::StartTicking);
        }
        cmds
    }

    fn on_stopped(&mut self, now_ms: f64) -> Vec<TrackerCommand> {
        self.playing = false;

        let Some(resumed_at_ms) = self.resumed_at_ms else {
            return vec![];
        };
        // telemetry only, the counter was already advanced by ticks
        let elapsed_secs = ((now_ms - resumed_at_ms) / 1000.0).max(0.0);

        self.ticking = false;
        vec![
            TrackerCommand::PauseEmbed,
            TrackerCommand::StopTicking,
            TrackerCommand::RecordSegment { elapsed_secs },
        ]
    }

    /// Advances the counter by one second. Returns whether it moved.
    pub fn tick(&mut self) -> bool {
        if !self.ticking || !self.playing || self.unlocked || self.threshold_reached() {
            return false;
        }
        self.watched += 1;
        true
    }

    /// Unlocks once the duration is reached. Keeps asking for the embed to
    /// pause and the tick to stop on every call past the threshold.
    pub fn check_threshold(&mut self) -> Vec<TrackerCommand> {
        if !self.threshold_reached() {
            return vec![];
        }
        self.unlocked = true;
        self.ticking = false;
        vec![TrackerCommand::PauseEmbed, TrackerCommand::StopTicking]
    }
}
