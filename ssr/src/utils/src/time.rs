use web_time::{SystemTime, UNIX_EPOCH};

/// Milliseconds since the unix epoch, `0.0` if the clock is before it.
pub fn now_ms() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or_default()
}
