//! Wall clock used to stamp consultation log entries.

use chrono::{NaiveDateTime, Utc};

/// Storage format for consultation timestamps. Lexicographic order matches
/// chronological order, which the recent-activity query relies on.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// UTC wall time, millisecond resolution. Never steps back at a
/// daylight-saving change, so stored timestamps follow arrival order.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Utc::now().naive_utc()
    }
}

/// Always returns the same instant. Used in tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S"))
        .ok()
}
