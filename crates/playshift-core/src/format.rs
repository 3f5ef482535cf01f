//! Display helpers shared by list rows and the detail overlay.

use std::fmt::Display;

use chrono::{DateTime, Local, TimeZone, Utc};

/// `m:ss` with unpadded minutes: `0 → 0:00`, `65 → 1:05`, `3600 → 60:00`.
pub fn format_duration(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Calendar date in the viewer's local timezone as `mm/dd/yyyy`.
pub fn format_local_date(ts: &DateTime<Utc>) -> String {
    format_date_in(ts, &Local)
}

fn format_date_in<Tz: TimeZone>(ts: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: Display,
{
    ts.with_timezone(tz).format("%m/%d/%Y").to_string()
}

/// Value or the "Not available" sentinel.
pub fn or_not_available(value: Option<&str>) -> &str {
    value.unwrap_or("Not available")
}
