pub mod telemetry;
pub mod ticker;
pub mod tracker;

pub use telemetry::{LocalStorageTelemetry, WatchTelemetry, WatchTelemetryEvent};
pub use ticker::{IntervalScheduler, TickScheduler, WatchTicker};
pub use tracker::{TrackerCommand, WatchTimeTracker};
