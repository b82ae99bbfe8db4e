pub mod archive;
pub mod commands;
pub mod traits;

pub use archive::HttpArchiveBackend;
pub use commands::{SegmentVote, SponsorCommand, WatchedCommand};
pub use traits::ArchiveBackend;
