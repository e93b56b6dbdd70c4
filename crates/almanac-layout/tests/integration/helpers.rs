#![allow(dead_code)]
//! Fixtures shared by the integration tests.
//!
//! All dates fall in August 2025; 2025-08-04 is a Monday.

use almanac_layout::view::{CalendarWeek, ViewContext, build_week};
use almanac_layout::{Event, Timestamp, process};
use chrono::NaiveDate;

pub const EPSILON: f64 = 1e-9;

pub fn ts(text: &str) -> Timestamp {
    Timestamp::parse(text).expect("fixture timestamp should parse")
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("fixture date should be valid")
}

pub fn monday() -> NaiveDate {
    date(2025, 8, 4)
}

/// A timed event on `day` (`YYYY-MM-DD`) from `start` to `end` (`HH:MM`).
pub fn timed(id: &str, day: &str, start: &str, end: &str) -> Event {
    Event::new(id, id, ts(&format!("{day}T{start}:00Z")))
        .with_end(ts(&format!("{day}T{end}:00Z")))
}

pub fn spanning(id: &str, title: &str, start: &str, end: &str) -> Event {
    Event::new(id, title, ts(start)).with_end(ts(end))
}

/// The Monday-first week holding 2025-08-04, built from `events`.
pub fn week_of(events: &[Event]) -> CalendarWeek {
    build_week(&process(events), &ViewContext::new(monday(), monday()))
}

/// A day with nested, chained and disjoint overlaps.
pub fn busy_day() -> Vec<Event> {
    let day = "2025-08-12";
    vec![
        timed("standup", day, "09:00", "09:15"),
        timed("planning", day, "09:00", "11:00"),
        timed("review", day, "09:30", "10:30"),
        timed("pairing", day, "10:00", "12:00"),
        timed("lunch", day, "12:00", "13:00"),
        timed("one-on-one", day, "12:30", "13:00"),
        timed("retro", day, "15:00", "16:00"),
        timed("demo", day, "15:00", "16:00"),
        timed("focus", day, "14:00", "17:00"),
    ]
}

/// Spanning events that straddle, fill and nest inside the fixture week.
pub fn busy_week() -> Vec<Event> {
    vec![
        spanning("before", "Before", "2025-07-31T00:00:00Z", "2025-08-05T12:00:00Z"),
        spanning("after", "After", "2025-08-09T00:00:00Z", "2025-08-14T00:00:00Z"),
        spanning("whole", "Whole", "2025-08-01T00:00:00Z", "2025-08-20T00:00:00Z"),
        spanning("mid", "Mid", "2025-08-06T00:00:00Z", "2025-08-07T00:00:00Z"),
        spanning("overnight", "Overnight", "2025-08-05T22:00:00Z", "2025-08-06T02:00:00Z"),
        spanning("flagless", "Flagless", "2025-08-08T00:00:00Z", "2025-08-09T00:00:00Z"),
        timed("meeting", "2025-08-06", "09:00", "10:00"),
    ]
}
