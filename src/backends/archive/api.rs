use anyhow::{Context, Result};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use super::super::commands::{SponsorCommand, WatchedCommand};
use crate::error::PlaybackError;
use crate::models::{
    SegmentId, SponsorInfo, SponsorSegment, StoredProgress, Video, VideoId, sanitize_segments,
};

/// Low-level client for the archive's REST API.
#[derive(Debug, Clone)]
pub struct ArchiveApi {
    client: reqwest::Client,
    base_url: String,
    api_token: String,
}

impl ArchiveApi {
    pub fn new(base_url: impl Into<String>, api_token: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into();
        Url::parse(&base_url).with_context(|| format!("Invalid archive base url {base_url:?}"))?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_token: api_token.into(),
        })
    }

    fn auth_header(&self) -> String {
        format!("Token {}", self.api_token)
    }

    pub async fn get_video(&self, video_id: &VideoId) -> Result<Video> {
        let url = format!("{}/api/video/{}/", self.base_url, video_id);

        let response = self
            .client
            .get(&url)
            .header("Authorization", self.auth_header())
            .send()
            .await
            .context("Video fetch failed")?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(PlaybackError::VideoNotFound(video_id.clone()).into());
        }
        if !response.status().is_success() {
            return Err(PlaybackError::Fetch(format!(
                "video fetch returned {}",
                response.status()
            ))
            .into());
        }

        let body: VideoResponse = response.json().await.context("Invalid video response")?;
        Ok(body.into_video())
    }

    pub async fn get_progress(&self, video_id: &VideoId) -> Result<StoredProgress> {
        let url = format!("{}/api/video/{}/progress/", self.base_url, video_id);

        let response = self
            .client
            .get(&url)
            .header("Authorization", self.auth_header())
            .send()
            .await
            .context("Progress fetch failed")?;

        // No stored record reads back as position 0.
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(StoredProgress::default());
        }
        if !response.status().is_success() {
            return Err(PlaybackError::Fetch(format!(
                "progress fetch returned {}",
                response.status()
            ))
            .into());
        }

        let body: ProgressResponse = response.json().await.context("Invalid progress response")?;
        Ok(StoredProgress {
            position_seconds: body.position,
        })
    }

    pub async fn post_progress(&self, video_id: &VideoId, position_seconds: f64) -> Result<()> {
        let url = format!("{}/api/video/{}/progress/", self.base_url, video_id);

        let response = self
            .client
            .post(&url)
            .header("Authorization", self.auth_header())
            .json(&serde_json::json!({ "position": position_seconds }))
            .send()
            .await?;

        if !response.status().is_success() {
            warn!("Failed to post progress: {}", response.status());
        }

        Ok(())
    }

    pub async fn delete_progress(&self, video_id: &VideoId) -> Result<()> {
        let url = format!("{}/api/video/{}/progress/", self.base_url, video_id);

        let response = self
            .client
            .delete(&url)
            .header("Authorization", self.auth_header())
            .send()
            .await?;

        if !response.status().is_success() {
            warn!("Failed to delete progress: {}", response.status());
        }

        Ok(())
    }

    pub async fn post_watched(&self, command: &WatchedCommand) -> Result<()> {
        let url = format!("{}/api/watched/", self.base_url);
        debug!("Posting watched command: {:?}", command);

        let response = self
            .client
            .post(&url)
            .header("Authorization", self.auth_header())
            .json(&command.to_payload())
            .send()
            .await?;

        if !response.status().is_success() {
            warn!("Failed to post watched status: {}", response.status());
        }

        Ok(())
    }

    pub async fn post_sponsor(&self, video_id: &VideoId, command: &SponsorCommand) -> Result<()> {
        let url = format!("{}/api/video/{}/sponsor/", self.base_url, video_id);

        let response = self
            .client
            .post(&url)
            .header("Authorization", self.auth_header())
            .json(&command.to_payload())
            .send()
            .await?;

        if !response.status().is_success() {
            warn!("Failed to post sponsor command: {}", response.status());
        }

        Ok(())
    }
}

// Wire types.

#[derive(Debug, Deserialize)]
struct VideoResponse {
    data: VideoData,
}

#[derive(Debug, Deserialize)]
struct VideoData {
    youtube_id: String,
    title: String,
    player: PlayerData,
    #[serde(default)]
    sponsorblock: Option<SponsorBlockData>,
}

#[derive(Debug, Deserialize)]
struct PlayerData {
    watched: bool,
    #[serde(default)]
    duration: f64,
}

#[derive(Debug, Deserialize)]
struct SponsorBlockData {
    #[serde(default)]
    is_enabled: bool,
    #[serde(default)]
    has_unlocked: bool,
    #[serde(default)]
    segments: Vec<SegmentData>,
}

#[derive(Debug, Deserialize)]
struct SegmentData {
    #[serde(rename = "UUID")]
    uuid: String,
    segment: [f64; 2],
}

#[derive(Debug, Deserialize)]
struct ProgressResponse {
    #[serde(default)]
    position: f64,
}

impl VideoResponse {
    fn into_video(self) -> Video {
        let sponsor = self.data.sponsorblock.map(|sb| SponsorInfo {
            is_enabled: sb.is_enabled,
            has_unlocked: sb.has_unlocked,
            segments: sanitize_segments(
                sb.segments
                    .into_iter()
                    .map(|s| SponsorSegment {
                        id: SegmentId::new(s.uuid),
                        start_seconds: s.segment[0],
                        end_seconds: s.segment[1],
                    })
                    .collect(),
            ),
        });

        Video {
            id: VideoId::new(self.data.youtube_id),
            title: self.data.title,
            duration_seconds: self.data.player.duration,
            watched: self.data.player.watched,
            sponsor,
        }
    }
}
