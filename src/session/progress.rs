use std::sync::Arc;

use tracing::{debug, warn};

use crate::backends::ArchiveBackend;
use crate::events::{PlayerEvent, PlayerEventBus};
use crate::models::{VideoId, WatchStatus};

/// Width of the window after each 10-second mark in which a regular tick is
/// allowed through. Position-driven rather than wall-clock, so the limiter
/// re-aligns naturally after seeks.
const REPORT_WINDOW_SECONDS: f64 = 0.2;
const REPORT_INTERVAL_SECONDS: f64 = 10.0;

/// Rate-limits and deduplicates outbound position writes for one video.
///
/// Regular ticks are forwarded at most once per ~10 seconds of playback;
/// pause and teardown flush immediately. All writes are best-effort: a
/// failure is logged and superseded by the next flush.
pub struct ProgressReporter {
    video_id: VideoId,
    backend: Arc<dyn ArchiveBackend>,
    events: PlayerEventBus,
    watched: bool,
    /// 10-second bucket of the last regular flush, for dedup within a window.
    last_bucket: Option<i64>,
}

impl ProgressReporter {
    pub fn new(
        video_id: VideoId,
        watched: bool,
        backend: Arc<dyn ArchiveBackend>,
        events: PlayerEventBus,
    ) -> Self {
        Self {
            video_id,
            backend,
            events,
            watched,
            last_bucket: None,
        }
    }

    /// Keep the suppression rule in sync with the watch state machine.
    pub fn set_watch_status(&mut self, status: WatchStatus) {
        self.watched = status.is_watched();
    }

    /// Regular playback tick. Only positions just past a 10-second mark are
    /// forwarded, and each mark at most once.
    pub async fn on_tick(&mut self, current: f64, duration: f64) {
        if !current.is_finite() || !duration.is_finite() {
            return;
        }
        if current.rem_euclid(REPORT_INTERVAL_SECONDS) > REPORT_WINDOW_SECONDS {
            return;
        }

        let bucket = (current / REPORT_INTERVAL_SECONDS).floor() as i64;
        if self.last_bucket == Some(bucket) {
            return;
        }
        self.last_bucket = Some(bucket);

        self.flush(current).await;
    }

    /// Pause must not lose the latest position.
    pub async fn on_pause(&mut self, current: f64) {
        self.flush(current).await;
    }

    /// Final flush when the session is torn down.
    pub async fn on_teardown(&mut self, current: f64) {
        self.flush(current).await;
    }

    /// Reset stored progress to nothing (watched/unwatched toggle path).
    pub async fn reset(&mut self) {
        self.last_bucket = None;
        self.flush(0.0).await;
    }

    async fn flush(&mut self, current: f64) {
        if !current.is_finite() {
            return;
        }

        if current == 0.0 {
            // Position zero means "forget the resume point" rather than
            // "resume from the very beginning".
            if let Err(e) = self.backend.delete_progress(&self.video_id).await {
                warn!("Failed to delete progress for {}: {e:#}", self.video_id);
            }
            self.events.publish(PlayerEvent::ProgressCleared {
                video_id: self.video_id.clone(),
            });
            return;
        }

        // Watched videos do not need a resume position.
        if self.watched {
            return;
        }

        debug!("Flushing position {current:.1}s for {}", self.video_id);
        if let Err(e) = self.backend.write_progress(&self.video_id, current).await {
            warn!("Failed to write progress for {}: {e:#}", self.video_id);
        }
        self.events.publish(PlayerEvent::ProgressFlushed {
            video_id: self.video_id.clone(),
            position_seconds: current,
        });
    }
}
