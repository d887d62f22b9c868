//! Flight time parsing and formatting.
//!
//! Pilots enter block time as `HH:MM`; providers store durations in seconds.

/// Parses an `HH:MM` flight time into seconds.
///
/// # Arguments
/// - `raw` - Flight time as typed by the pilot, e.g. `02:30` or `2:30`
///
/// # Returns
/// - `Some(u64)` - Total seconds, greater than zero
/// - `None` - Input is not `HH:MM`, minutes are 60 or more, the time is zero or too large
///   to represent
pub fn parse_flight_time(raw: &str) -> Option<u64> {
    let (hours, minutes) = raw.trim().split_once(':')?;

    if hours.is_empty()
        || minutes.len() != 2
        || !hours.chars().all(|c| c.is_ascii_digit())
        || !minutes.chars().all(|c| c.is_ascii_digit())
    {
        return None;
    }

    let hours: u64 = hours.parse().ok()?;
    let minutes: u64 = minutes.parse().ok()?;
    if minutes >= 60 {
        return None;
    }

    let seconds = hours.checked_mul(3600)?.checked_add(minutes * 60)?;
    (seconds > 0).then_some(seconds)
}

/// Applies a mode multiplier to a duration, rounding to whole seconds
pub fn scale_seconds(seconds: u64, multiplier: f64) -> u64 {
    (seconds as f64 * multiplier).round().max(0.0) as u64
}

/// Formats seconds as `HH:MM`
pub fn format_hhmm(seconds: u64) -> String {
    let minutes = seconds / 60;
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}
