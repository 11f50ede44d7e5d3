//! Replay protection via the payload's embedded `webhookTimestamp`.
//!
//! A signed payload stays valid forever, so a captured delivery could be
//! replayed later. The provider embeds its send time in the body (covered by
//! the signature); deliveries whose timestamp is missing or outside the window
//! are rejected.

use std::time::Duration;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, TimeZone, Utc};
use serde_json::Value;

/// Payload field carrying the provider's send time.
pub const TIMESTAMP_FIELD: &str = "webhookTimestamp";

/// Default freshness window.
pub const DEFAULT_MAX_AGE_SECONDS: u64 = 300;

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y%m%d"];

const TIME_FORMATS: &[&str] = &["%H:%M:%S%.f", "%H:%M", "%H%M%S%.f", "%H%M"];

/// Reads and parses the payload's `webhookTimestamp`.
///
/// Accepts ISO-8601 date-times in extended (`2026-10-16T12:00:00`) or basic
/// (`20261016T120000`) form, with `T` or a space between date and time. The
/// time may stop at the hour or minute, and fractional seconds may use `.` or
/// `,`. A trailing `Z` means UTC, the offset may be `+HH`, `+HHMM` or
/// `+HH:MM`, and a value without an offset is taken as UTC. A bare date is
/// midnight UTC.
///
/// Returns `None` when the field is absent, not a string, empty, or
/// unparseable. The result is always in UTC.
pub fn parse_timestamp(payload: &Value) -> Option<DateTime<Utc>> {
    let raw = payload.get(TIMESTAMP_FIELD)?.as_str()?;
    if raw.is_empty() {
        return None;
    }
    parse_iso8601(raw)
}

/// Returns `true` if the payload's timestamp is within `max_age_seconds` of now.
///
/// A missing or unparseable timestamp is never fresh.
pub fn is_fresh(payload: &Value, max_age_seconds: u64) -> bool {
    is_fresh_at(payload, max_age_seconds, Utc::now())
}

/// [`is_fresh`] against an explicit reference instant.
///
/// The window is symmetric: a timestamp `max_age_seconds` in the future is as
/// acceptable as one `max_age_seconds` in the past.
pub fn is_fresh_at(payload: &Value, max_age_seconds: u64, now: DateTime<Utc>) -> bool {
    let Some(sent_at) = parse_timestamp(payload) else {
        return false;
    };

    let age = if now >= sent_at {
        now - sent_at
    } else {
        sent_at - now
    };

    age.to_std()
        .map(|age| age <= Duration::from_secs(max_age_seconds))
        .unwrap_or(false)
}

fn parse_iso8601(raw: &str) -> Option<DateTime<Utc>> {
    let (date, rest) = match raw.split_once(['T', ' ']) {
        Some((date, rest)) => (date, Some(rest)),
        None => (raw, None),
    };

    let date = DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(date, fmt).ok())?;

    let Some(rest) = rest else {
        return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    };

    let (time, offset) = split_offset(rest)?;
    let naive = date.and_time(parse_time(time)?);

    match offset {
        Some(offset) => offset
            .from_local_datetime(&naive)
            .single()
            .map(|dt| dt.with_timezone(&Utc)),
        None => Some(naive.and_utc()),
    }
}

/// Splits `12:00:00+02:00` into the time and its parsed offset.
fn split_offset(rest: &str) -> Option<(&str, Option<FixedOffset>)> {
    if let Some(time) = rest.strip_suffix('Z') {
        return Some((time, Some(FixedOffset::east_opt(0)?)));
    }

    match rest.find(['+', '-']) {
        Some(at) => {
            let (time, offset) = rest.split_at(at);
            Some((time, Some(parse_offset(offset)?)))
        }
        None => Some((rest, None)),
    }
}

fn parse_time(raw: &str) -> Option<NaiveTime> {
    let mut time = raw.replace(',', ".");

    // chrono needs a minute; `12` means `12:00`.
    if time.len() == 2 && time.bytes().all(|b| b.is_ascii_digit()) {
        time.push_str(":00");
    }

    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(&time, fmt).ok())
}

/// `+HH`, `+HHMM`, `+HH:MM`, and the same with seconds.
fn parse_offset(raw: &str) -> Option<FixedOffset> {
    let sign = match raw.chars().next()? {
        '+' => 1,
        '-' => -1,
        _ => return None,
    };
    let digits = &raw[1..];

    let compact = if digits.contains(':') {
        let groups: Vec<&str> = digits.split(':').collect();
        if groups.iter().any(|group| group.len() != 2) {
            return None;
        }
        groups.concat()
    } else {
        digits.to_string()
    };

    if !matches!(compact.len(), 2 | 4 | 6) || !compact.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let field = |at: usize| -> Option<i32> {
        match compact.get(at..at + 2) {
            Some(group) => group.parse().ok(),
            None => Some(0),
        }
    };
    let (hours, minutes, seconds) = (field(0)?, field(2)?, field(4)?);
    if hours > 23 || minutes > 59 || seconds > 59 {
        return None;
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60 + seconds))
}

#[cfg(test)]
#[path = "freshness_tests.rs"]
mod tests;
