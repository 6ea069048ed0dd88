use web_time::Duration;

/// localStorage key holding the instant the current playback segment started
pub const START_VIDEO_STORE: &str = "setStartVideo";
/// localStorage key holding the wall-clock length of the last playback segment
pub const WATCH_TIME_AFTER_START_STORE: &str = "watchTimeAfterStart";

pub const WATCH_TICK_INTERVAL_MS: u64 = 1000;
pub const WATCH_TICK_INTERVAL: Duration = Duration::from_millis(WATCH_TICK_INTERVAL_MS);

pub mod youtube {
    pub const IFRAME_API_URL: &str = "https://www.youtube.com/iframe_api";
    /// Global hook the IFrame API script invokes once `YT.Player` is usable
    pub const IFRAME_API_READY_HOOK: &str = "onYouTubeIframeAPIReady";
    /// Maximum time in milliseconds to wait for the IFrame API script
    pub const IFRAME_API_LOAD_TIMEOUT_MS: u32 = 10_000;
    pub const WATCH_QUERY_PARAM: &str = "v";
}

// stand-in until video details come from a service
pub mod stub_video {
    pub const URL: &str = "https://www.youtube.com/watch?v=W_MfNQ9cv9M";
    pub const DURATION_SECS: u32 = 10;
    pub const ID: &str = "id1";
}
