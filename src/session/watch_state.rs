use std::sync::Arc;

use tracing::{debug, warn};

use crate::backends::ArchiveBackend;
use crate::events::{PlayerEvent, PlayerEventBus};
use crate::models::{VideoId, WatchStatus};

/// Videos at or under this duration use the completion-ratio rule.
const SHORT_VIDEO_SECONDS: f64 = 1800.0;
const SHORT_VIDEO_WATCHED_RATIO: f64 = 0.90;
/// Long videos count as watched once this little remains.
const LONG_VIDEO_REMAINING_SECONDS: f64 = 120.0;

/// Owns the watched/unwatched status for the bound video.
///
/// Status mutates through an explicit user toggle, an automatic threshold
/// crossing during playback, or the end-of-video signal. Transitioning to
/// Watched is idempotent: repeated threshold hits or ended signals produce a
/// single backend call and a single event.
pub struct WatchStateMachine {
    video_id: VideoId,
    status: WatchStatus,
    backend: Arc<dyn ArchiveBackend>,
    events: PlayerEventBus,
}

impl WatchStateMachine {
    pub fn new(
        video_id: VideoId,
        initial: WatchStatus,
        backend: Arc<dyn ArchiveBackend>,
        events: PlayerEventBus,
    ) -> Self {
        Self {
            video_id,
            status: initial,
            backend,
            events,
        }
    }

    pub fn status(&self) -> WatchStatus {
        self.status
    }

    pub fn is_watched(&self) -> bool {
        self.status.is_watched()
    }

    /// User-driven toggle. Always applies locally and emits; the backend
    /// write is best-effort (last write wins).
    pub async fn set_explicit(&mut self, status: WatchStatus) {
        self.status = status;
        self.write_through().await;
        self.events.publish(PlayerEvent::WatchStatusChanged {
            video_id: self.video_id.clone(),
            status,
        });
    }

    /// Evaluate the auto-watched policy for the current tick. Returns true
    /// when this call transitioned the video to Watched.
    pub async fn evaluate_threshold(&mut self, current: f64, duration: f64) -> bool {
        if self.status.is_watched() {
            return false;
        }
        if !watched_threshold(current, duration) {
            return false;
        }
        debug!(
            "Auto-watched threshold crossed at {current:.1}/{duration:.1}s for {}",
            self.video_id
        );
        self.transition_to_watched().await;
        true
    }

    /// End-of-video signal. Returns true when this call transitioned.
    pub async fn on_ended(&mut self) -> bool {
        if self.status.is_watched() {
            return false;
        }
        self.transition_to_watched().await;
        true
    }

    async fn transition_to_watched(&mut self) {
        self.status = WatchStatus::Watched;
        self.write_through().await;
        self.events.publish(PlayerEvent::WatchStatusChanged {
            video_id: self.video_id.clone(),
            status: WatchStatus::Watched,
        });
    }

    async fn write_through(&self) {
        if let Err(e) = self
            .backend
            .set_watched_status(&self.video_id, self.status)
            .await
        {
            warn!("Failed to store watch status for {}: {e:#}", self.video_id);
        }
    }
}

/// Auto-watched policy. Short videos need 90% completion; long videos count
/// as watched once less than two minutes remain, so a one-hour video is not
/// held hostage by its outro.
pub fn watched_threshold(current: f64, duration: f64) -> bool {
    if !current.is_finite() || !duration.is_finite() || duration <= 0.0 {
        return false;
    }
    if duration <= SHORT_VIDEO_SECONDS {
        current / duration >= SHORT_VIDEO_WATCHED_RATIO
    } else {
        current >= duration - LONG_VIDEO_REMAINING_SECONDS
    }
}
