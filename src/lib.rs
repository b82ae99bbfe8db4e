//! Playback tracking core for a self-hosted video archive.
//!
//! Keeps watch position, watched/unwatched state and sponsor-segment skipping
//! in sync between a player surface and the archive backend. The UI layer owns
//! rendering and the actual video element; it drives a
//! [`session::PlayerSession`] with tick/pause/ended signals and listens on the
//! [`events::PlayerEventBus`] to keep list-view indicators up to date.

pub mod backends;
pub mod config;
pub mod error;
pub mod events;
pub mod models;
pub mod player;
pub mod session;
pub mod utils;

#[cfg(test)]
mod test_utils;

pub use error::PlaybackError;
pub use session::PlayerSession;
