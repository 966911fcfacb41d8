//! Calendar dates without a time of day.
//!
//! Records arrive with timestamps in several shapes. Only the calendar date
//! written in the timestamp matters here: the clock time and the UTC offset
//! are dropped, never converted.

use std::fmt;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A (year, month, day) triple. Months are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    pub fn new(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(CalendarDate)
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    pub fn naive(&self) -> NaiveDate {
        self.0
    }

    /// Today's date on the local clock.
    pub fn today() -> Self {
        CalendarDate(chrono::Local::now().date_naive())
    }

    /// Parse "YYYY-MM-DD".
    pub fn parse_ymd(s: &str) -> Option<Self> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .ok()
            .map(CalendarDate)
    }

    /// Derive the calendar date from a record timestamp.
    ///
    /// Accepted shapes, tried in order:
    /// - RFC 3339 with offset (`2025-06-01T18:00:00-04:00`)
    /// - naive date-time (`2025-06-01T18:00:00`, `2025-06-01 18:00`)
    /// - plain date (`2025-06-01`)
    /// - long form (`June 1, 2025`)
    /// - a day range in long form (`June 1-15, 2025`), which yields its first day
    pub fn from_timestamp(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            // The offset is discarded: the date is the one written in the string.
            return Some(CalendarDate(dt.naive_local().date()));
        }

        for fmt in [
            "%Y-%m-%dT%H:%M:%S%.f",
            "%Y-%m-%dT%H:%M",
            "%Y-%m-%d %H:%M:%S%.f",
            "%Y-%m-%d %H:%M",
        ] {
            if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
                return Some(CalendarDate(dt.date()));
            }
        }

        if let Some(date) = Self::parse_ymd(raw) {
            return Some(date);
        }

        Self::parse_long_form(raw)
    }

    fn parse_long_form(raw: &str) -> Option<Self> {
        for fmt in ["%B %d, %Y", "%b %d, %Y"] {
            if let Ok(date) = NaiveDate::parse_from_str(raw, fmt) {
                return Some(CalendarDate(date));
            }
        }

        // "June 1-15, 2025": keep the start day and the trailing year.
        let (head, year) = raw.rsplit_once(',')?;
        let (start, end) = head.split_once('-')?;
        end.trim().parse::<u32>().ok()?;
        let normalized = format!("{}, {}", start.trim(), year.trim());

        ["%B %d, %Y", "%b %d, %Y"]
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(&normalized, fmt).ok())
            .map(CalendarDate)
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        CalendarDate(date)
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}
