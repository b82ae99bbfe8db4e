use anyhow::{Context, Result, bail};

/// Compact a raw counter for display: 1.2K, 3.4M, 1.0B.
pub fn format_number(number: u64) -> String {
    let n = number as f64;
    if number > 999_999_999 {
        format!("{:.1}B", n / 1_000_000_000.0)
    } else if number > 999_999 {
        format!("{:.1}M", n / 1_000_000.0)
    } else if number > 999 {
        format!("{:.1}K", n / 1_000.0)
    } else {
        number.to_string()
    }
}

/// Seconds to `h:mm:ss`. The hour digit is omitted when zero, and minutes
/// are only zero-padded when hours are shown.
pub fn format_time(seconds: f64) -> String {
    let hours = (seconds / 3600.0).trunc() as u64;
    let minutes = ((seconds % 3600.0) / 60.0).trunc() as u64;
    let secs = (seconds % 60.0).trunc() as u64;

    if hours > 0 {
        format!("{hours}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes}:{secs:02}")
    }
}

/// Parse a `hh:mm:ss(.ms)` timestamp into seconds.
pub fn parse_timestamp(timestamp: &str) -> Result<f64> {
    let parts: Vec<&str> = timestamp.split(':').collect();
    if parts.len() != 3 {
        bail!("expected hh:mm:ss timestamp, got {timestamp:?}");
    }

    let hours: u64 = parts[0]
        .parse()
        .with_context(|| format!("invalid hours in {timestamp:?}"))?;
    let minutes: u64 = parts[1]
        .parse()
        .with_context(|| format!("invalid minutes in {timestamp:?}"))?;
    let seconds: f64 = parts[2]
        .parse()
        .with_context(|| format!("invalid seconds in {timestamp:?}"))?;

    Ok((hours * 3600 + minutes * 60) as f64 + seconds)
}

/// Fraction of a video consumed, for list-view progress bars. Watched videos
/// report zero since their bars are blanked.
pub fn progress_fraction(current: f64, duration: f64, watched: bool) -> f64 {
    if watched || duration <= 0.0 || !current.is_finite() || !duration.is_finite() {
        return 0.0;
    }
    (current / duration).clamp(0.0, 1.0)
}
