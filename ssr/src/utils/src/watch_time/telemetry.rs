use consts::{START_VIDEO_STORE, WATCH_TIME_AFTER_START_STORE};
use leptos::prelude::*;

use crate::local_storage::LocalStorage;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum WatchTelemetryEvent {
    SegmentStarted { at_ms: f64 },
    SegmentWatched { elapsed_secs: f64 },
}

impl WatchTelemetryEvent {
    pub fn store_key(&self) -> &'static str {
        match self {
            Self::SegmentStarted { .. } => START_VIDEO_STORE,
            Self::SegmentWatched { .. } => WATCH_TIME_AFTER_START_STORE,
        }
    }

    /// Value as it lands in the store: whole milliseconds for the start
    /// instant, plain decimal seconds for the segment.
    pub fn store_value(&self) -> String {
        match self {
            Self::SegmentStarted { at_ms } => format!("{}", at_ms.trunc()),
            Self::SegmentWatched { elapsed_secs } => elapsed_secs.to_string(),
        }
    }
}

pub trait WatchTelemetry: Send + Sync {
    fn record(&self, event: WatchTelemetryEvent);
}

/// Write-only telemetry into `localStorage`. Failed writes are dropped.
#[derive(Clone, Copy)]
pub struct LocalStorageTelemetry {
    set_start: WriteSignal<String>,
    set_segment: WriteSignal<String>,
}

impl Default for LocalStorageTelemetry {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalStorageTelemetry {
    pub fn new() -> Self {
        Self {
            set_start: LocalStorage::string_writer(START_VIDEO_STORE),
            set_segment: LocalStorage::string_writer(WATCH_TIME_AFTER_START_STORE),
        }
    }
}

impl WatchTelemetry for LocalStorageTelemetry {
    fn record(&self, event: WatchTelemetryEvent) {
        let writer = match event {
            WatchTelemetryEvent::SegmentStarted { .. } => self.set_start,
            WatchTelemetryEvent::SegmentWatched { .. } => self.set_segment,
        };
        log::debug!("{} <- {}", event.store_key(), event.store_value());
        writer.set(event.store_value());
    }
}
