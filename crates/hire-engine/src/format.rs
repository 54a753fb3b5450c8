//! Human-readable renderings used by display collaborators.

use chrono::NaiveDateTime;

/// Render a number of minutes as e.g. `"1 hour 30 minutes"` or `"2 days 15 minutes"`.
///
/// Zero (or negative) renders as an empty string.
pub fn humanize_minutes(minutes: i64) -> String {
    let (hours, minutes) = (minutes.max(0) / 60, minutes.max(0) % 60);
    let (days, hours) = (hours / 24, hours % 24);

    let mut parts = Vec::new();
    for (value, unit) in [(days, "day"), (hours, "hour"), (minutes, "minute")] {
        if value > 0 {
            let plural = if value == 1 { "" } else { "s" };
            parts.push(format!("{value} {unit}{plural}"));
        }
    }
    parts.join(" ")
}

/// `"09:00 AM - 09:30 AM"`.
pub fn slot_label(start: NaiveDateTime, end: NaiveDateTime) -> String {
    format!("{} - {}", start.format("%I:%M %p"), end.format("%I:%M %p"))
}

/// `"2016-02-01 09:00:00"`.
pub fn slot_id(start: NaiveDateTime) -> String {
    start.format("%Y-%m-%d %H:%M:%S").to_string()
}
