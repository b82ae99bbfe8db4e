mod progress;
mod sponsor;
mod watch_state;

pub use progress::ProgressReporter;
pub use sponsor::SponsorSkipEngine;
pub use watch_state::{WatchStateMachine, watched_threshold};

use std::sync::Arc;

use anyhow::Result;
use chrono::{DateTime, Utc};
use tracing::{debug, info, trace, warn};

use crate::backends::{ArchiveBackend, SegmentVote};
use crate::error::PlaybackError;
use crate::events::{PlayerEvent, PlayerEventBus};
use crate::models::{PlayerHandleId, SegmentId, VideoId, WatchStatus};
use crate::player::PlayerSurface;

/// The single live binding between a player surface and one video id.
struct ActiveSession {
    video_id: VideoId,
    player: Arc<dyn PlayerSurface>,
    started_at: DateTime<Utc>,
    last_position: f64,
    reporter: ProgressReporter,
    watch: WatchStateMachine,
    sponsor: Option<SponsorSkipEngine>,
}

/// Orchestrates playback tracking for at most one video at a time.
///
/// `open()` always fully tears down any prior session before touching state
/// for the new video, and every signal carries the originating player handle
/// so that late ticks from a replaced surface are no-ops. All methods take
/// `&mut self`, which serializes mutations structurally; there is no point at
/// which two tick subscriptions can be live.
pub struct PlayerSession {
    backend: Arc<dyn ArchiveBackend>,
    events: PlayerEventBus,
    /// Deployment-level sponsor integration switch.
    sponsor_enabled: bool,
    active: Option<ActiveSession>,
}

impl PlayerSession {
    pub fn new(backend: Arc<dyn ArchiveBackend>, events: PlayerEventBus) -> Self {
        Self {
            backend,
            events,
            sponsor_enabled: true,
            active: None,
        }
    }

    pub fn with_sponsor_enabled(mut self, enabled: bool) -> Self {
        self.sponsor_enabled = enabled;
        self
    }

    pub fn is_open(&self) -> bool {
        self.active.is_some()
    }

    pub fn current_video_id(&self) -> Option<&VideoId> {
        self.active.as_ref().map(|active| &active.video_id)
    }

    /// When the active session was bound, if any.
    pub fn opened_at(&self) -> Option<DateTime<Utc>> {
        self.active.as_ref().map(|active| active.started_at)
    }

    /// Bind a player surface to a video and start tracking.
    ///
    /// Any prior session is closed (final position flushed, notifications
    /// cleared) before the new video's data is fetched. A fetch failure
    /// aborts the open and leaves the session Closed; no partial session is
    /// ever left bound.
    pub async fn open(
        &mut self,
        video_id: VideoId,
        player: Arc<dyn PlayerSurface>,
        start_position: Option<f64>,
    ) -> Result<()> {
        self.close().await;

        let (video, progress) = tokio::try_join!(
            self.backend.fetch_video(&video_id),
            self.backend.fetch_progress(&video_id)
        )?;

        let initial = WatchStatus::from_watched_flag(video.watched);
        let watch = WatchStateMachine::new(
            video_id.clone(),
            initial,
            self.backend.clone(),
            self.events.clone(),
        );
        let reporter = ProgressReporter::new(
            video_id.clone(),
            video.watched,
            self.backend.clone(),
            self.events.clone(),
        );
        let sponsor = match (self.sponsor_enabled, video.sponsor) {
            (true, Some(info)) if info.is_enabled => {
                debug!(
                    "Sponsor skipping active with {} segment(s) for {video_id}",
                    info.segments.len()
                );
                Some(SponsorSkipEngine::new(info.segments, self.events.clone()))
            }
            _ => None,
        };

        // Explicit start position wins over the stored one.
        let resume = start_position.unwrap_or(progress.position_seconds);
        if resume > 0.0 {
            player.seek(resume).await?;
        }

        info!("Opened player session for {video_id} at {resume:.1}s");
        self.active = Some(ActiveSession {
            video_id: video_id.clone(),
            player,
            started_at: Utc::now(),
            last_position: resume,
            reporter,
            watch,
            sponsor,
        });
        self.events.publish(PlayerEvent::SessionOpened { video_id });
        Ok(())
    }

    /// Tear down the active session: detach first so late signals are no-ops,
    /// then flush the final position. Safe to call when already Closed.
    pub async fn close(&mut self) {
        let Some(mut active) = self.active.take() else {
            return;
        };

        if let Some(sponsor) = active.sponsor.as_mut() {
            sponsor.clear_notifications();
        }
        active.reporter.on_teardown(active.last_position).await;

        info!("Closed player session for {}", active.video_id);
        self.events.publish(PlayerEvent::SessionClosed {
            video_id: active.video_id,
        });
    }

    /// Periodic playback tick. Sponsor skipping runs before progress
    /// sampling so a sponsor-induced seek reports the post-skip position.
    pub async fn on_tick(&mut self, handle: &PlayerHandleId, current: f64, duration: f64) {
        let Some(active) = self.active.as_mut() else {
            return;
        };
        if active.player.handle_id() != *handle {
            trace!("Ignoring tick from stale player handle {handle}");
            return;
        }
        if !current.is_finite() || !duration.is_finite() || duration <= 0.0 {
            return;
        }

        let mut position = current;
        if let Some(sponsor) = active.sponsor.as_mut()
            && let Some(target) = sponsor.on_tick(current)
        {
            match active.player.seek(target).await {
                Ok(()) => position = target,
                Err(e) => warn!("Sponsor skip seek failed: {e:#}"),
            }
        }

        active.last_position = position;
        if active.watch.evaluate_threshold(position, duration).await {
            active.reporter.set_watch_status(active.watch.status());
        }
        active.reporter.on_tick(position, duration).await;
    }

    /// Pause signal: flush the current position immediately.
    pub async fn on_pause(&mut self, handle: &PlayerHandleId, current: f64) {
        let Some(active) = self.active.as_mut() else {
            return;
        };
        if active.player.handle_id() != *handle {
            trace!("Ignoring pause from stale player handle {handle}");
            return;
        }
        if !current.is_finite() {
            return;
        }

        active.last_position = current;
        active.reporter.on_pause(current).await;
    }

    /// End-of-video signal: mark watched, withdraw sponsor notifications.
    pub async fn on_ended(&mut self, handle: &PlayerHandleId) {
        let Some(active) = self.active.as_mut() else {
            return;
        };
        if active.player.handle_id() != *handle {
            trace!("Ignoring ended signal from stale player handle {handle}");
            return;
        }

        if active.watch.on_ended().await {
            active.reporter.set_watch_status(active.watch.status());
        }
        if let Some(sponsor) = active.sponsor.as_mut() {
            sponsor.on_ended();
        }
    }

    /// Explicit user toggle for the bound video. Also clears the stored
    /// resume position, so the list-view progress bar goes blank.
    pub async fn set_watched(&mut self, status: WatchStatus) -> Result<()> {
        let Some(active) = self.active.as_mut() else {
            return Err(PlaybackError::InvalidState("no open session").into());
        };

        active.watch.set_explicit(status).await;
        active.reporter.set_watch_status(status);
        active.reporter.reset().await;
        Ok(())
    }

    /// Forward a sponsor segment vote unchanged.
    pub async fn sponsor_vote(&self, segment_id: &SegmentId, vote: SegmentVote) -> Result<()> {
        let Some(active) = self.active.as_ref() else {
            return Err(PlaybackError::InvalidState("no open session").into());
        };
        self.backend
            .sponsor_vote(&active.video_id, segment_id, vote)
            .await
    }

    /// Submit a new sponsor segment for the bound video.
    pub async fn submit_sponsor_segment(&self, start: f64, end: f64) -> Result<()> {
        let Some(active) = self.active.as_ref() else {
            return Err(PlaybackError::InvalidState("no open session").into());
        };
        self.backend
            .submit_sponsor_segment(&active.video_id, start, end)
            .await
    }
}
