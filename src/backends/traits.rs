use anyhow::Result;
use async_trait::async_trait;

use super::commands::SegmentVote;
use crate::models::{StoredProgress, Video, VideoId, WatchStatus};

/// The backend of record for per-video state.
///
/// Fetches are hard errors when they fail; the write side is fire-and-forget
/// (last write wins, no transactional guarantee against concurrent writers
/// such as a second browser tab).
#[async_trait]
pub trait ArchiveBackend: Send + Sync + std::fmt::Debug {
    /// Fetch video metadata, the watched flag and any sponsor data.
    /// Fails with [`crate::PlaybackError::VideoNotFound`] for unknown ids.
    async fn fetch_video(&self, video_id: &VideoId) -> Result<Video>;

    /// Fetch the stored resume position; 0.0 when nothing is stored.
    async fn fetch_progress(&self, video_id: &VideoId) -> Result<StoredProgress>;

    /// Store the current position. May fail silently on the wire.
    async fn write_progress(&self, video_id: &VideoId, position_seconds: f64) -> Result<()>;

    /// Clear the stored position.
    async fn delete_progress(&self, video_id: &VideoId) -> Result<()>;

    /// Set the durable watched/unwatched classification. Idempotent.
    async fn set_watched_status(&self, video_id: &VideoId, status: WatchStatus) -> Result<()>;

    /// Forward a sponsor segment vote unchanged from the UI.
    async fn sponsor_vote(
        &self,
        video_id: &VideoId,
        segment_id: &crate::models::SegmentId,
        vote: SegmentVote,
    ) -> Result<()>;

    /// Submit a new sponsor segment for the video.
    async fn submit_sponsor_segment(&self, video_id: &VideoId, start: f64, end: f64) -> Result<()>;
}
