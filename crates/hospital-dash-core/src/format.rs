//! Display formatting for raw field values.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::models::{non_blank, NotificationKind, SurgeryStatus};

/// Parse the leading `YYYY-MM-DD` of a date or datetime string.
pub fn parse_day(raw: &str) -> Option<NaiveDate> {
    let head = raw.trim().get(..10)?;
    NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
}

/// "Mar 7, 2026"
pub fn format_date(day: NaiveDate) -> String {
    day.format("%b %-d, %Y").to_string()
}

/// Format a raw date string, falling back to the raw text when unparseable.
pub fn format_day_str(raw: &str) -> String {
    parse_day(raw).map(format_date).unwrap_or_else(|| raw.to_string())
}

/// "Today", "Tomorrow", or the formatted date.
pub fn day_label(day: NaiveDate, today: NaiveDate) -> String {
    if day == today {
        "Today".into()
    } else if today.succ_opt() == Some(day) {
        "Tomorrow".into()
    } else {
        format_date(day)
    }
}

/// Human label for a surgery status.
pub fn status_label(status: &SurgeryStatus) -> String {
    match status {
        SurgeryStatus::Scheduled => "Scheduled".into(),
        SurgeryStatus::InProgress => "In Progress".into(),
        SurgeryStatus::Completed => "Completed".into(),
        SurgeryStatus::Cancelled => "Cancelled".into(),
        SurgeryStatus::Postponed => "Postponed".into(),
        SurgeryStatus::Other(raw) => capitalize(raw),
    }
}

/// Row class for a surgery status.
pub fn status_class(status: &SurgeryStatus) -> &'static str {
    match status {
        SurgeryStatus::Scheduled => "status-scheduled",
        SurgeryStatus::InProgress => "status-in-progress",
        SurgeryStatus::Completed => "status-completed",
        SurgeryStatus::Cancelled => "status-cancelled",
        SurgeryStatus::Postponed => "status-postponed",
        SurgeryStatus::Other(_) => "",
    }
}

/// Icon class for a notification kind.
pub fn notification_icon(kind: &NotificationKind) -> &'static str {
    match kind {
        NotificationKind::Surgery => "fa-calendar-alt",
        NotificationKind::Patient => "fa-user",
        NotificationKind::Supply => "fa-box-open",
        NotificationKind::Alert => "fa-exclamation-circle",
        NotificationKind::Other(_) => "fa-bell",
    }
}

/// Parse a backend timestamp. Naive timestamps are taken as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Relative label: "just now", "5 minutes ago", "1 day ago", "2 months ago".
///
/// Months are 30 days. Future timestamps read as "just now".
pub fn time_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - then).num_seconds();
    if seconds < 60 {
        return "just now".into();
    }

    let minutes = seconds / 60;
    if minutes < 60 {
        return plural(minutes, "minute");
    }

    let hours = minutes / 60;
    if hours < 24 {
        return plural(hours, "hour");
    }

    let days = hours / 24;
    if days < 30 {
        return plural(days, "day");
    }

    plural(days / 30, "month")
}

/// `time_ago` over a raw timestamp; unparseable input is shown as-is.
pub fn time_ago_str(raw: &str, now: DateTime<Utc>) -> String {
    parse_timestamp(raw)
        .map(|then| time_ago(then, now))
        .unwrap_or_else(|| raw.to_string())
}

/// The value, or `fallback` when missing or blank.
pub fn or_fallback<'a>(value: &'a Option<String>, fallback: &'a str) -> &'a str {
    non_blank(value).unwrap_or(fallback)
}

fn plural(n: i64, unit: &str) -> String {
    format!("{} {}{} ago", n, unit, if n > 1 { "s" } else { "" })
}

fn capitalize(raw: &str) -> String {
    let mut chars = raw.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
