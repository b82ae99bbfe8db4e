use std::collections::HashSet;

use tracing::warn;

use super::SegmentId;

/// A community-sourced time range within a video that should be skipped.
///
/// Immutable once loaded for a session. Ordered by start time; no two
/// segments in the same session share an id.
#[derive(Debug, Clone, PartialEq)]
pub struct SponsorSegment {
    pub id: SegmentId,
    pub start_seconds: f64,
    pub end_seconds: f64,
}

/// Per-video sponsor payload as served by the video endpoint.
#[derive(Debug, Clone, Default)]
pub struct SponsorInfo {
    pub is_enabled: bool,
    pub has_unlocked: bool,
    pub segments: Vec<SponsorSegment>,
}

/// Transient per-segment notification state, reset on session teardown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuppressionState {
    NotYetNotified,
    Notified,
    Cleared,
}

/// Drop malformed segments individually instead of aborting the session:
/// zero/negative length ranges and duplicate ids are both unusable.
pub fn sanitize_segments(segments: Vec<SponsorSegment>) -> Vec<SponsorSegment> {
    let mut seen = HashSet::new();
    let mut kept: Vec<SponsorSegment> = segments
        .into_iter()
        .filter(|segment| {
            if segment.end_seconds <= segment.start_seconds {
                warn!(
                    segment = %segment.id,
                    start = segment.start_seconds,
                    end = segment.end_seconds,
                    "Dropping sponsor segment with non-positive length"
                );
                return false;
            }
            if !seen.insert(segment.id.clone()) {
                warn!(segment = %segment.id, "Dropping sponsor segment with duplicate id");
                return false;
            }
            true
        })
        .collect();
    kept.sort_by(|a, b| a.start_seconds.total_cmp(&b.start_seconds));
    kept
}
