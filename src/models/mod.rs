mod identifiers;
mod sponsor;

pub use identifiers::{PlayerHandleId, SegmentId, VideoId};
pub use sponsor::{SponsorInfo, SponsorSegment, SuppressionState, sanitize_segments};

use serde::{Deserialize, Serialize};

/// Durable watched/unwatched classification for a video, distinct from the
/// transient resume position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WatchStatus {
    Watched,
    Unwatched,
}

impl WatchStatus {
    pub fn is_watched(&self) -> bool {
        matches!(self, WatchStatus::Watched)
    }

    pub fn from_watched_flag(watched: bool) -> Self {
        if watched {
            WatchStatus::Watched
        } else {
            WatchStatus::Unwatched
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WatchStatus::Watched => "watched",
            WatchStatus::Unwatched => "unwatched",
        }
    }
}

impl std::fmt::Display for WatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Metadata subset of a fetched video that the tracking core needs.
#[derive(Debug, Clone)]
pub struct Video {
    pub id: VideoId,
    pub title: String,
    pub duration_seconds: f64,
    pub watched: bool,
    pub sponsor: Option<SponsorInfo>,
}

/// Stored resume position for a video; 0.0 when nothing is stored.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct StoredProgress {
    #[serde(default)]
    pub position_seconds: f64,
}
