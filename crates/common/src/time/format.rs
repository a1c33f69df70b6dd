//! Human-readable duration formatting
//!
//! Two renderings are used by the client: a zero-padded clock face for the
//! live timer and an hours/minutes summary for totals reported in minutes.

/// Format a number of seconds as a zero-padded `HH:MM:SS` clock face
///
/// Hours are not wrapped, so values past 99 hours widen the first field.
///
/// # Examples
///
/// ```
/// use trak_common::time::format::format_clock;
///
/// assert_eq!(format_clock(0), "00:00:00");
/// assert_eq!(format_clock(3661), "01:01:01");
/// assert_eq!(format_clock(360_000), "100:00:00");
/// ```
pub fn format_clock(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    format!("{hours:02}:{minutes:02}:{secs:02}")
}

/// Format a total expressed in (possibly fractional) minutes
///
/// Produces `"Xh Ym"` when at least one full hour is present, `"Ym"`
/// otherwise. Hours are floored and the minute remainder is rounded to the
/// nearest whole minute. Negative and non-finite inputs render as `"0m"`.
///
/// # Examples
///
/// ```
/// use trak_common::time::format::format_minutes;
///
/// assert_eq!(format_minutes(125.0), "2h 5m");
/// assert_eq!(format_minutes(45.0), "45m");
/// assert_eq!(format_minutes(12.4), "12m");
/// ```
pub fn format_minutes(minutes: f64) -> String {
    if !minutes.is_finite() || minutes <= 0.0 {
        return "0m".to_string();
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let hours = (minutes / 60.0).floor() as u64;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let mins = (minutes % 60.0).round() as u64;

    if hours > 0 {
        format!("{hours}h {mins}m")
    } else {
        format!("{mins}m")
    }
}
