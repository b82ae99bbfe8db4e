use tracing::debug;

use crate::events::{PlayerEvent, PlayerEventBus};
use crate::models::{SponsorSegment, SuppressionState};

/// The tick source fires at sub-second but irregular intervals, so an exact
/// start-time equality check would miss. A short forward window guarantees
/// exactly-once detection without tick-rate awareness.
const ARMING_WINDOW_SECONDS: f64 = 0.3;
/// Notifications linger this long past a segment's end before being cleared,
/// so a user who scrubbed back can re-trigger review messaging.
const NOTIFICATION_LINGER_SECONDS: f64 = 10.0;

struct TrackedSegment {
    segment: SponsorSegment,
    state: SuppressionState,
}

/// Reacts to playback position by jumping the player head over sponsor
/// segments and raising/withdrawing one notification per segment.
///
/// Segment notification state is session-transient; recreating the player for
/// the same video starts fresh. Nothing here is persisted.
pub struct SponsorSkipEngine {
    segments: Vec<TrackedSegment>,
    events: PlayerEventBus,
}

impl SponsorSkipEngine {
    /// Segments are assumed pre-sanitized (see
    /// [`crate::models::sanitize_segments`]).
    pub fn new(segments: Vec<SponsorSegment>, events: PlayerEventBus) -> Self {
        Self {
            segments: segments
                .into_iter()
                .map(|segment| TrackedSegment {
                    segment,
                    state: SuppressionState::NotYetNotified,
                })
                .collect(),
            events,
        }
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Evaluate one tick. Returns the position the player head should jump
    /// to, if the tick landed in a segment's arming window.
    pub fn on_tick(&mut self, current: f64) -> Option<f64> {
        if !current.is_finite() {
            return None;
        }

        let mut seek_target = None;
        for tracked in &mut self.segments {
            let start = tracked.segment.start_seconds;
            let end = tracked.segment.end_seconds;

            let armed = current >= start && current < start + ARMING_WINDOW_SECONDS;
            if armed && tracked.state != SuppressionState::Notified {
                debug!(
                    segment = %tracked.segment.id,
                    "Skipping sponsor segment {start:.1}s -> {end:.1}s"
                );
                seek_target = Some(end);
                tracked.state = SuppressionState::Notified;
                self.events.publish(PlayerEvent::SponsorNotificationChanged {
                    segment_id: tracked.segment.id.clone(),
                    visible: true,
                });
            } else if current > end + NOTIFICATION_LINGER_SECONDS
                && tracked.state == SuppressionState::Notified
            {
                // Far enough past the segment; a later scrub back into the
                // arming window re-arms and re-notifies.
                tracked.state = SuppressionState::Cleared;
                self.events.publish(PlayerEvent::SponsorNotificationChanged {
                    segment_id: tracked.segment.id.clone(),
                    visible: false,
                });
            }
        }
        seek_target
    }

    /// Withdraw any notifications still showing. Safe no-op with no segments
    /// or nothing notified.
    pub fn clear_notifications(&mut self) {
        for tracked in &mut self.segments {
            if tracked.state == SuppressionState::Notified {
                tracked.state = SuppressionState::Cleared;
                self.events.publish(PlayerEvent::SponsorNotificationChanged {
                    segment_id: tracked.segment.id.clone(),
                    visible: false,
                });
            }
        }
    }

    /// End-of-video: force-clear all remaining notifications.
    pub fn on_ended(&mut self) {
        self.clear_notifications();
    }
}
