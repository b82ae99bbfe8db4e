pub mod format;

pub use format::{format_number, format_time, parse_timestamp, progress_fraction};
