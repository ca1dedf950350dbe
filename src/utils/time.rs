// src/utils/time.rs

//! Feed date formatting.
//!
//! RSS `pubDate`/`lastBuildDate` fields use an RFC-822 style layout with a
//! literal `GMT` zone. All conversions land in UTC first.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

/// Date layout used by every date-bearing feed element.
pub const FEED_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Format a UTC timestamp as a feed date.
pub fn feed_date(moment: DateTime<Utc>) -> String {
    moment.format(FEED_DATE_FORMAT).to_string()
}

/// The current UTC time as a feed date.
pub fn feed_date_now() -> String {
    feed_date(Utc::now())
}

/// Convert an ISO-8601 timestamp (e.g. a `datetime` attribute) into a feed
/// date. Returns `None` when the input does not parse.
pub fn feed_date_from_rfc3339(raw: &str) -> Option<String> {
    DateTime::parse_from_rfc3339(raw.trim())
        .ok()
        .map(|moment| feed_date(moment.with_timezone(&Utc)))
}

/// Convert a bare `YYYY-MM-DD` date into a feed date at midnight UTC.
/// Returns `None` when the input does not parse.
pub fn feed_date_from_ymd(raw: &str) -> Option<String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .ok()
        .map(|date| feed_date(date.and_time(NaiveTime::MIN).and_utc()))
}
