use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use playhead::backends::{ArchiveBackend, SegmentVote};
use playhead::models::{
    PlayerHandleId, SegmentId, SponsorInfo, SponsorSegment, StoredProgress, Video, VideoId,
    WatchStatus,
};
use playhead::player::PlayerSurface;

/// Archive backend fake with per-video fixtures and full write recording.
#[derive(Debug, Default)]
pub struct MockArchive {
    videos: Mutex<HashMap<String, Video>>,
    progress: Mutex<HashMap<String, f64>>,
    pub writes: Mutex<Vec<(String, f64)>>,
    pub deletes: Mutex<Vec<String>>,
    pub watched_calls: Mutex<Vec<(String, WatchStatus)>>,
    fail_fetches: Mutex<bool>,
}

impl MockArchive {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn add_video(&self, video: Video) {
        self.videos
            .lock()
            .unwrap()
            .insert(video.id.to_string(), video);
    }

    pub fn set_progress(&self, video_id: &str, position: f64) {
        self.progress
            .lock()
            .unwrap()
            .insert(video_id.to_string(), position);
    }

    pub fn fail_fetches(&self) {
        *self.fail_fetches.lock().unwrap() = true;
    }

    pub fn writes(&self) -> Vec<(String, f64)> {
        self.writes.lock().unwrap().clone()
    }

    pub fn deletes(&self) -> Vec<String> {
        self.deletes.lock().unwrap().clone()
    }

    pub fn watched(&self) -> Vec<(String, WatchStatus)> {
        self.watched_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ArchiveBackend for MockArchive {
    async fn fetch_video(&self, video_id: &VideoId) -> Result<Video> {
        if *self.fail_fetches.lock().unwrap() {
            return Err(anyhow!("injected fetch failure"));
        }
        self.videos
            .lock()
            .unwrap()
            .get(video_id.as_str())
            .cloned()
            .ok_or_else(|| playhead::PlaybackError::VideoNotFound(video_id.clone()).into())
    }

    async fn fetch_progress(&self, video_id: &VideoId) -> Result<StoredProgress> {
        if *self.fail_fetches.lock().unwrap() {
            return Err(anyhow!("injected fetch failure"));
        }
        Ok(StoredProgress {
            position_seconds: self
                .progress
                .lock()
                .unwrap()
                .get(video_id.as_str())
                .copied()
                .unwrap_or(0.0),
        })
    }

    async fn write_progress(&self, video_id: &VideoId, position_seconds: f64) -> Result<()> {
        self.writes
            .lock()
            .unwrap()
            .push((video_id.to_string(), position_seconds));
        Ok(())
    }

    async fn delete_progress(&self, video_id: &VideoId) -> Result<()> {
        self.deletes.lock().unwrap().push(video_id.to_string());
        Ok(())
    }

    async fn set_watched_status(&self, video_id: &VideoId, status: WatchStatus) -> Result<()> {
        self.watched_calls
            .lock()
            .unwrap()
            .push((video_id.to_string(), status));
        Ok(())
    }

    async fn sponsor_vote(
        &self,
        _video_id: &VideoId,
        _segment_id: &SegmentId,
        _vote: SegmentVote,
    ) -> Result<()> {
        Ok(())
    }

    async fn submit_sponsor_segment(
        &self,
        _video_id: &VideoId,
        _start: f64,
        _end: f64,
    ) -> Result<()> {
        Ok(())
    }
}

/// Player surface fake that records seeks.
pub struct FakePlayer {
    handle: PlayerHandleId,
    pub seeks: Mutex<Vec<f64>>,
}

impl FakePlayer {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            handle: PlayerHandleId::generate(),
            seeks: Mutex::new(Vec::new()),
        })
    }

    pub fn handle(&self) -> PlayerHandleId {
        self.handle.clone()
    }

    pub fn seeks(&self) -> Vec<f64> {
        self.seeks.lock().unwrap().clone()
    }
}

#[async_trait]
impl PlayerSurface for FakePlayer {
    fn handle_id(&self) -> PlayerHandleId {
        self.handle.clone()
    }

    async fn seek(&self, position_seconds: f64) -> Result<()> {
        self.seeks.lock().unwrap().push(position_seconds);
        Ok(())
    }
}

/// 20-minute unwatched video without sponsor data.
pub fn plain_video(id: &str) -> Video {
    Video {
        id: VideoId::new(id),
        title: format!("Video {id}"),
        duration_seconds: 1200.0,
        watched: false,
        sponsor: None,
    }
}

/// Unwatched video carrying one enabled sponsor segment.
pub fn sponsored_video(id: &str, start: f64, end: f64) -> Video {
    Video {
        sponsor: Some(SponsorInfo {
            is_enabled: true,
            has_unlocked: false,
            segments: vec![SponsorSegment {
                id: SegmentId::new("seg-x"),
                start_seconds: start,
                end_seconds: end,
            }],
        }),
        ..plain_video(id)
    }
}
