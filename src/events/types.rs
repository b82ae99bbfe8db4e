use serde::{Deserialize, Serialize};

use crate::models::{SegmentId, VideoId, WatchStatus};

/// Events published by the playback tracking core.
///
/// List views outside the player subscribe to these to keep their watched
/// indicators and progress bars current.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum PlayerEvent {
    /// The watched/unwatched classification of a video changed, either by an
    /// explicit toggle, a threshold crossing or an end-of-video signal.
    WatchStatusChanged {
        video_id: VideoId,
        status: WatchStatus,
    },

    /// A sponsor-skip notification became visible or was withdrawn.
    SponsorNotificationChanged { segment_id: SegmentId, visible: bool },

    /// A position write reached (or was dispatched to) the backend.
    ProgressFlushed {
        video_id: VideoId,
        position_seconds: f64,
    },

    /// Stored progress for a video was deleted; progress bars go blank.
    ProgressCleared { video_id: VideoId },

    /// A session was bound to a player surface.
    SessionOpened { video_id: VideoId },

    /// The session was torn down and its final position flushed.
    SessionClosed { video_id: VideoId },
}

impl PlayerEvent {
    /// String representation for filtering/routing.
    pub fn kind(&self) -> &'static str {
        match self {
            PlayerEvent::WatchStatusChanged { .. } => "watch_status.changed",
            PlayerEvent::SponsorNotificationChanged { .. } => "sponsor.notification_changed",
            PlayerEvent::ProgressFlushed { .. } => "progress.flushed",
            PlayerEvent::ProgressCleared { .. } => "progress.cleared",
            PlayerEvent::SessionOpened { .. } => "session.opened",
            PlayerEvent::SessionClosed { .. } => "session.closed",
        }
    }
}
