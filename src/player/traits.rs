use anyhow::Result;
use async_trait::async_trait;

use crate::models::PlayerHandleId;

/// The seam to whatever actually renders video.
///
/// The session never polls the surface; the UI delivers tick/pause/ended
/// signals into the session together with the originating handle id, and the
/// session only commands the surface to seek. A handle id that no longer
/// matches the bound surface marks the signal as stale.
#[async_trait]
pub trait PlayerSurface: Send + Sync {
    /// Stable identity of this surface instance.
    fn handle_id(&self) -> PlayerHandleId;

    /// Move the playback head.
    async fn seek(&self, position_seconds: f64) -> Result<()>;
}
