use thiserror::Error;

use crate::models::VideoId;

/// Failure classification for the playback tracking core.
///
/// Only fetch failures during `open()` are fatal; routine progress and
/// watched-state writes are best-effort and never surface past a warning.
#[derive(Error, Debug)]
pub enum PlaybackError {
    #[error("Video not found: {0}")]
    VideoNotFound(VideoId),

    #[error("Fetch failed: {0}")]
    Fetch(String),

    #[error("Invalid state: {0}")]
    InvalidState(&'static str),

    #[error("Configuration error: {0}")]
    Configuration(String),
}
