use thiserror::Error;

/// Failures that keep the embedded player from coming up. All of them are
/// recoverable by retrying initialisation.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum PlayerInitError {
    #[error("Invalid video URL `{0}`")]
    InvalidUrl(String),
    #[error("No video id found in `{0}`")]
    MissingVideoId(String),
    #[error("Failed to load the YouTube IFrame API")]
    ScriptLoad,
    #[error("Timed out waiting for the YouTube IFrame API")]
    LoadTimeout,
    #[error("Failed to create the YouTube player: {0}")]
    Embed(String),
}
