mod api;

pub use api::ArchiveApi;

use anyhow::Result;
use async_trait::async_trait;

use super::commands::{SegmentVote, SponsorCommand, WatchedCommand};
use super::traits::ArchiveBackend;
use crate::models::{SegmentId, StoredProgress, Video, VideoId, WatchStatus};

/// [`ArchiveBackend`] implementation over the archive's REST API.
#[derive(Debug, Clone)]
pub struct HttpArchiveBackend {
    api: ArchiveApi,
}

impl HttpArchiveBackend {
    pub fn new(base_url: impl Into<String>, api_token: impl Into<String>) -> Result<Self> {
        Ok(Self {
            api: ArchiveApi::new(base_url, api_token)?,
        })
    }
}

#[async_trait]
impl ArchiveBackend for HttpArchiveBackend {
    async fn fetch_video(&self, video_id: &VideoId) -> Result<Video> {
        self.api.get_video(video_id).await
    }

    async fn fetch_progress(&self, video_id: &VideoId) -> Result<StoredProgress> {
        self.api.get_progress(video_id).await
    }

    async fn write_progress(&self, video_id: &VideoId, position_seconds: f64) -> Result<()> {
        self.api.post_progress(video_id, position_seconds).await
    }

    async fn delete_progress(&self, video_id: &VideoId) -> Result<()> {
        self.api.delete_progress(video_id).await
    }

    async fn set_watched_status(&self, video_id: &VideoId, status: WatchStatus) -> Result<()> {
        let command = WatchedCommand::new(video_id.clone(), status);
        self.api.post_watched(&command).await
    }

    async fn sponsor_vote(
        &self,
        video_id: &VideoId,
        segment_id: &SegmentId,
        vote: SegmentVote,
    ) -> Result<()> {
        let command = SponsorCommand::Vote {
            segment_id: segment_id.clone(),
            vote,
        };
        self.api.post_sponsor(video_id, &command).await
    }

    async fn submit_sponsor_segment(&self, video_id: &VideoId, start: f64, end: f64) -> Result<()> {
        let command = SponsorCommand::submit(start, end)?;
        self.api.post_sponsor(video_id, &command).await
    }
}
