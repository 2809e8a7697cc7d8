use crate::error::{GitBarsError, Result};
use crate::model::Periodicity;
use chrono::{
    DateTime, Datelike, Duration, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc,
    Weekday,
};
use std::time::SystemTime;

/// Bucket label for `timestamp` at the given granularity, in the commit's own offset.
pub fn period_key(timestamp: &DateTime<FixedOffset>, periodicity: Periodicity) -> String {
    match periodicity {
        Periodicity::Day => timestamp.format("%Y-%m-%d").to_string(),
        Periodicity::Week => {
            let week = timestamp.iso_week();
            format!("{}/{:02}", week.year(), week.week())
        }
        Periodicity::Month => timestamp.format("%Y-%m").to_string(),
        Periodicity::Year => timestamp.format("%Y").to_string(),
    }
}

pub fn is_weekend(date: &NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

pub fn weekday_name(date: &NaiveDate) -> String {
    date.format("%A").to_string()
}

/// Whole calendar days from `from` to `to`, ignoring time of day.
pub fn day_gap(from: &DateTime<FixedOffset>, to: &DateTime<FixedOffset>) -> i64 {
    (to.date_naive() - from.date_naive()).num_days()
}

/// `timestamp` moved by `days` whole days, keeping time of day and offset.
pub fn shift_days(timestamp: &DateTime<FixedOffset>, days: i64) -> DateTime<FixedOffset> {
    *timestamp + Duration::days(days)
}

/// Which end of a date range a bound string describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundKind {
    After,
    Before,
}

/// Parses a date bound given as RFC 3339, `YYYY-MM-DD[ HH:MM[:SS]]` (UTC) or a
/// relative duration such as `2 weeks ago`. Returns `Ok(None)` when the input
/// is none of these so the caller can try it as a revision.
pub fn parse_date_bound(input: &str, kind: BoundKind) -> Result<Option<DateTime<FixedOffset>>> {
    let input = input.trim();
    if input.is_empty() {
        return Err(GitBarsError::InvalidDate("empty date".to_string()));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(Some(dt));
    }

    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, fmt) {
            return Ok(Some(utc_fixed(naive)));
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        // A bare `before` date still covers that whole day.
        let time = match kind {
            BoundKind::After => NaiveTime::MIN,
            BoundKind::Before => NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN),
        };
        return Ok(Some(utc_fixed(date.and_time(time))));
    }

    if let Some(duration) = parse_relative(input) {
        let target = SystemTime::now()
            .checked_sub(duration)
            .ok_or_else(|| GitBarsError::InvalidDate(format!("Duration overflow for '{input}'")))?;
        return Ok(Some(DateTime::<Utc>::from(target).fixed_offset()));
    }

    Ok(None)
}

fn utc_fixed(naive: NaiveDateTime) -> DateTime<FixedOffset> {
    Utc.from_utc_datetime(&naive).fixed_offset()
}

fn parse_relative(input: &str) -> Option<std::time::Duration> {
    let lowered = input.to_lowercase();
    let trimmed = lowered.strip_suffix("ago").unwrap_or(&lowered).trim();
    // humantime wants "2weeks", people type "2 weeks".
    let compact: String = trimmed
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("");
    if compact.is_empty() || !compact.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }
    humantime::parse_duration(&compact).ok()
}
