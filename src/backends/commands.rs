use anyhow::{Result, bail};
use serde_json::{Value, json};

use crate::models::{SegmentId, VideoId, WatchStatus};

/// Command for the watched-state endpoint.
///
/// The wire format is a single-key object, so the valid shapes are captured
/// here as variants instead of ad-hoc string-keyed payloads assembled at the
/// call sites.
#[derive(Debug, Clone, PartialEq)]
pub enum WatchedCommand {
    MarkWatched(VideoId),
    MarkUnwatched(VideoId),
}

impl WatchedCommand {
    pub fn new(video_id: VideoId, status: WatchStatus) -> Self {
        match status {
            WatchStatus::Watched => WatchedCommand::MarkWatched(video_id),
            WatchStatus::Unwatched => WatchedCommand::MarkUnwatched(video_id),
        }
    }

    pub fn to_payload(&self) -> Value {
        match self {
            WatchedCommand::MarkWatched(id) => json!({ "watched": id.as_str() }),
            WatchedCommand::MarkUnwatched(id) => json!({ "un_watched": id.as_str() }),
        }
    }
}

/// Vote on an existing sponsor segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentVote {
    Upvote,
    Downvote,
}

impl SegmentVote {
    /// SponsorBlock wire value: 1 for up, 0 for down.
    pub fn wire_value(&self) -> u8 {
        match self {
            SegmentVote::Upvote => 1,
            SegmentVote::Downvote => 0,
        }
    }
}

/// Command for the per-video sponsor endpoint.
#[derive(Debug, Clone, PartialEq)]
pub enum SponsorCommand {
    Vote {
        segment_id: SegmentId,
        vote: SegmentVote,
    },
    Submit {
        start_seconds: f64,
        end_seconds: f64,
    },
}

impl SponsorCommand {
    /// Validate a segment submission before it goes over the wire.
    pub fn submit(start_seconds: f64, end_seconds: f64) -> Result<Self> {
        if !start_seconds.is_finite() || !end_seconds.is_finite() || start_seconds < 0.0 {
            bail!("sponsor segment bounds must be non-negative finite seconds");
        }
        if end_seconds <= start_seconds {
            bail!(
                "sponsor segment must end after it starts ({start_seconds} >= {end_seconds})"
            );
        }
        Ok(SponsorCommand::Submit {
            start_seconds,
            end_seconds,
        })
    }

    pub fn to_payload(&self) -> Value {
        match self {
            SponsorCommand::Vote { segment_id, vote } => json!({
                "vote": {
                    "uuid": segment_id.as_str(),
                    "yourVote": vote.wire_value(),
                }
            }),
            SponsorCommand::Submit {
                start_seconds,
                end_seconds,
            } => json!({
                "segment": {
                    "startTime": start_seconds,
                    "endTime": end_seconds,
                }
            }),
        }
    }
}
