use consts::stub_video;
use serde::{Deserialize, Serialize};

/// What the player needs to know about the video it gates on.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct VideoDetails {
    pub url: String,
    /// Seconds of playback required before "Next" unlocks
    pub duration: u32,
    pub id: String,
}

impl VideoDetails {
    pub fn stub() -> Self {
        Self {
            url: stub_video::URL.to_string(),
            duration: stub_video::DURATION_SECS,
            id: stub_video::ID.to_string(),
        }
    }
}
