//! Recording fakes shared by the unit tests.

use std::sync::Mutex;

use anyhow::{Result, anyhow};
use async_trait::async_trait;

use crate::backends::commands::SegmentVote;
use crate::backends::traits::ArchiveBackend;
use crate::models::{SegmentId, StoredProgress, Video, VideoId, WatchStatus};

/// Backend fake that records every write it receives.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    pub video: Mutex<Option<Video>>,
    pub stored_position: Mutex<f64>,
    writes: Mutex<Vec<f64>>,
    deletes: Mutex<usize>,
    watched: Mutex<Vec<(String, WatchStatus)>>,
    fail_writes: Mutex<bool>,
}

impl RecordingBackend {
    pub fn with_video(video: Video) -> Self {
        let backend = Self::default();
        *backend.video.lock().unwrap() = Some(video);
        backend
    }

    pub fn written_positions(&self) -> Vec<f64> {
        self.writes.lock().unwrap().clone()
    }

    pub fn delete_count(&self) -> usize {
        *self.deletes.lock().unwrap()
    }

    pub fn watched_calls(&self) -> Vec<(String, WatchStatus)> {
        self.watched.lock().unwrap().clone()
    }

    pub fn fail_writes(&self) {
        *self.fail_writes.lock().unwrap() = true;
    }

    fn check_write(&self) -> Result<()> {
        if *self.fail_writes.lock().unwrap() {
            return Err(anyhow!("injected write failure"));
        }
        Ok(())
    }
}

#[async_trait]
impl ArchiveBackend for RecordingBackend {
    async fn fetch_video(&self, video_id: &VideoId) -> Result<Video> {
        self.video
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| crate::PlaybackError::VideoNotFound(video_id.clone()).into())
    }

    async fn fetch_progress(&self, _video_id: &VideoId) -> Result<StoredProgress> {
        Ok(StoredProgress {
            position_seconds: *self.stored_position.lock().unwrap(),
        })
    }

    async fn write_progress(&self, _video_id: &VideoId, position_seconds: f64) -> Result<()> {
        self.check_write()?;
        self.writes.lock().unwrap().push(position_seconds);
        Ok(())
    }

    async fn delete_progress(&self, _video_id: &VideoId) -> Result<()> {
        self.check_write()?;
        *self.deletes.lock().unwrap() += 1;
        Ok(())
    }

    async fn set_watched_status(&self, video_id: &VideoId, status: WatchStatus) -> Result<()> {
        self.check_write()?;
        self.watched
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
