//! Due-date parsing and timestamp formatting for the command line.
//!
//! Accepted due-date forms:
//!
//! - `YYYY-MM-DD HH:MM`: local time
//! - `YYYY-MM-DD`: 23:59 local time on that day
//! - `+<n>m`, `+<n>h`, `+<n>d`, `+<n>w`: relative to now
//!
//! Timestamps are shown in local time as `YYYY-MM-DD HH:MM`.

use crate::libs::messages::Message;
use crate::msg_error_anyhow;
use anyhow::Result;
use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

pub const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M";
const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn parse_due(input: &str) -> Result<DateTime<Utc>> {
    parse_due_at(input, Local::now())
}

/// Parses `input` relative to `now`.
pub fn parse_due_at<Tz: TimeZone>(input: &str, now: DateTime<Tz>) -> Result<DateTime<Utc>> {
    let input = input.trim();

    if let Some(relative) = input.strip_prefix('+') {
        let offset = parse_offset(relative).ok_or_else(|| msg_error_anyhow!(Message::InvalidDueDate(input.to_string())))?;
        return Ok(now.with_timezone(&Utc) + offset);
    }

    let naive = NaiveDateTime::parse_from_str(input, DISPLAY_FORMAT).ok().or_else(|| {
        NaiveDate::parse_from_str(input, DATE_FORMAT)
            .ok()
            .and_then(|date| NaiveTime::from_hms_opt(23, 59, 0).map(|time| date.and_time(time)))
    });

    let naive = naive.ok_or_else(|| msg_error_anyhow!(Message::InvalidDueDate(input.to_string())))?;
    let local = now
        .timezone()
        .from_local_datetime(&naive)
        .earliest()
        .ok_or_else(|| msg_error_anyhow!(Message::InvalidDueDate(input.to_string())))?;

    Ok(local.with_timezone(&Utc))
}

fn parse_offset(relative: &str) -> Option<Duration> {
    let unit = relative.chars().last()?;
    let amount: i64 = relative[..relative.len() - unit.len_utf8()].parse().ok()?;
    match unit {
        'm' => Duration::try_minutes(amount),
        'h' => Duration::try_hours(amount),
        'd' => Duration::try_days(amount),
        'w' => Duration::try_weeks(amount),
        _ => None,
    }
}

pub fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.with_timezone(&Local).format(DISPLAY_FORMAT).to_string()
}

pub fn format_due(due: Option<&DateTime<Utc>>) -> String {
    due.map(format_timestamp).unwrap_or_default()
}

/// Shortens `text` to `width` characters, ending with `…` when cut.
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut cut: String = text.chars().take(width - 1).collect();
    cut.push('…');
    cut
}
