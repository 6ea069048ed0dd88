pub mod embed;
pub mod error;
pub mod loader;
pub mod player_state;
pub mod video_id;

pub use embed::EmbedHandle;
pub use error::PlayerInitError;
pub use loader::{IframeApiLease, IframeApiLoader};
pub use player_state::PlayerState;
pub use video_id::extract_video_id;
