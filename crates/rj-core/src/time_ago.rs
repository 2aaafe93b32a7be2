//! Coarse "N units ago" strings for feed and comment timestamps.

use chrono::{DateTime, Utc};

/// Formats the distance between `timestamp` and `now`.
///
/// The gap is split largest-unit-first: whole days, then the whole hours
/// left over, then the whole minutes left over. Only the largest non-zero
/// unit is reported, so 49 hours reads "2 days ago", not "49 hours ago".
pub fn time_ago(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff = now.signed_duration_since(timestamp);

    let days = diff.num_days();
    let hours = diff.num_hours() - days * 24;
    let minutes = diff.num_minutes() - diff.num_hours() * 60;

    if days > 0 {
        format!("{} ago", plural(days, "day"))
    } else if hours > 0 {
        format!("{} ago", plural(hours, "hour"))
    } else if minutes > 0 {
        format!("{} ago", plural(minutes, "minute"))
    } else {
        "Just now".to_string()
    }
}

fn plural(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("{count} {unit}")
    } else {
        format!("{count} {unit}s")
    }
}
