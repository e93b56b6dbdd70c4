//! Scheduling helpers: conflicts, durations and free-slot suggestions.

use almanac_core::constants::{
    DEFAULT_EVENT_DURATION_MINUTES, DEFAULT_SLOT_END, DEFAULT_SLOT_START,
    MIN_EVENT_DURATION_MINUTES,
};
use chrono::{NaiveDate, NaiveTime, TimeDelta, Timelike};
use serde::Serialize;

use crate::date::{Timestamp, minutes_since_midnight, parse_time};
use crate::event::{
    Event, end_clock_time, is_all_day, is_multi_day, shows_as_all_day, start_clock_time,
    start_date,
};

/// A suggested `[start, end)` clock window on some day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SlotSuggestion {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl SlotSuggestion {
    fn on_the_hour(start_hour: u32, end_hour: u32) -> Self {
        Self {
            start: clock(start_hour % 24),
            end: clock(end_hour % 24),
        }
    }

    /// `start_hour:00` to `end_hour:00`, or the default slot when the window would
    /// begin past midnight or collapse to zero length.
    fn on_the_hour_or_default(start_hour: u32, end_hour: u32) -> Self {
        if start_hour >= 24 || start_hour == end_hour % 24 {
            return Self::default();
        }
        Self::on_the_hour(start_hour, end_hour)
    }
}

impl Default for SlotSuggestion {
    fn default() -> Self {
        Self {
            start: parse_time(DEFAULT_SLOT_START).unwrap_or(NaiveTime::MIN),
            end: parse_time(DEFAULT_SLOT_END).unwrap_or(NaiveTime::MIN),
        }
    }
}

fn clock(hour: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, 0, 0).unwrap_or(NaiveTime::MIN)
}

/// Start and end of a new event, before it has an id or title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDraft {
    pub start: Timestamp,
    pub end: Option<Timestamp>,
    pub all_day: bool,
}

/// ## Summary
/// Whether two timed events on the same start day overlap on the clock.
///
/// All-day events and events without an end never conflict.
#[must_use]
pub fn has_time_conflict(a: &Event, b: &Event) -> bool {
    if shows_as_all_day(a) || shows_as_all_day(b) {
        return false;
    }
    if start_date(a) != start_date(b) {
        return false;
    }

    let (Some(start_a), Some(end_a), Some(start_b), Some(end_b)) = (
        start_clock_time(a),
        end_clock_time(a),
        start_clock_time(b),
        end_clock_time(b),
    ) else {
        return false;
    };

    start_a < end_b && start_b < end_a
}

/// Minutes between the start and end clock times; 0 for all-day or open-ended events.
#[must_use]
pub fn clock_duration_minutes(event: &Event) -> i64 {
    match (start_clock_time(event), end_clock_time(event)) {
        (Some(start), Some(end)) => minutes_since_midnight(end) - minutes_since_midnight(start),
        _ => 0,
    }
}

/// Duration in minutes, at least 15; one hour when either end is missing.
#[must_use]
pub fn duration_minutes(start: Option<Timestamp>, end: Option<Timestamp>) -> i64 {
    match (start, end) {
        (Some(start), Some(end)) => end.since(&start).num_minutes().max(MIN_EVENT_DURATION_MINUTES),
        _ => DEFAULT_EVENT_DURATION_MINUTES,
    }
}

/// Clock time `duration` minutes after `start`, wrapping past midnight.
/// `None` for non-positive durations.
#[must_use]
pub fn calculate_end_time(start: NaiveTime, duration: i64) -> Option<NaiveTime> {
    (duration > 0).then(|| start.overflowing_add_signed(TimeDelta::minutes(duration)).0)
}

/// Timed events on `date`, sorted by start clock time.
fn timed_events_on<'a>(date: NaiveDate, events: &'a [Event]) -> Vec<&'a Event> {
    let mut timed: Vec<&Event> = events
        .iter()
        .filter(|e| !shows_as_all_day(e) && e.end.is_some() && start_date(e) == date)
        .collect();
    timed.sort_by_key(|e| start_clock_time(e));
    timed
}

/// ## Summary
/// Suggests a one-hour slot after the last timed event starting on `date`.
///
/// The suggestion begins at the last event's end, rounded up to the hour. With no
/// timed events, or when no full hour is left before midnight, `09:00-10:00` is returned.
#[must_use]
pub fn find_next_available_time(date: NaiveDate, events: &[Event]) -> SlotSuggestion {
    let Some(last_end) = timed_events_on(date, events)
        .last()
        .and_then(|e| end_clock_time(e))
    else {
        return SlotSuggestion::default();
    };

    let mut hour = last_end.hour();
    if last_end.minute() > 0 {
        hour += 1;
    }

    SlotSuggestion::on_the_hour_or_default(hour, (hour + 1).min(23))
}

/// Timed events whose start falls within `hour` on the clock.
#[must_use]
pub fn events_in_hour(events: &[Event], hour: u32) -> Vec<&Event> {
    events
        .iter()
        .filter(|e| !is_all_day(e) && !is_multi_day(e))
        .filter(|e| start_clock_time(e).is_some_and(|t| t.hour() == hour))
        .collect()
}

/// ## Summary
/// Suggests a one-hour slot within the time-grid row for `hour`.
///
/// An empty row yields `hour:00` to the next hour. Otherwise the slot begins when
/// the latest-starting event in that row ends, rounded up to the hour. A slot that
/// would start after midnight falls back to `09:00-10:00`.
#[must_use]
pub fn next_slot_in_hour(events: &[Event], hour: u32) -> SlotSuggestion {
    let mut in_hour = events_in_hour(events, hour);
    in_hour.sort_by_key(|e| start_clock_time(e));

    let Some(last_end) = in_hour.last().and_then(|e| end_clock_time(e)) else {
        return SlotSuggestion::on_the_hour(hour, hour + 1);
    };

    let start_hour = if last_end.minute() > 0 {
        last_end.hour() + 1
    } else {
        last_end.hour()
    };
    SlotSuggestion::on_the_hour_or_default(start_hour, start_hour + 1)
}

/// ## Summary
/// Builds the start/end instants for a new event on `date`.
///
/// All-day drafts cover `00:00:00` to `23:59:59.999`. Timed drafts start at
/// `start` (midnight when absent) and end at `end` when given.
#[must_use]
pub fn create_event_draft(
    date: NaiveDate,
    start: Option<NaiveTime>,
    end: Option<NaiveTime>,
    all_day: bool,
) -> EventDraft {
    if all_day {
        let end_of_day = NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN);
        return EventDraft {
            start: Timestamp::from_local(date, NaiveTime::MIN),
            end: Some(Timestamp::from_local(date, end_of_day)),
            all_day: true,
        };
    }

    EventDraft {
        start: Timestamp::from_local(date, start.unwrap_or(NaiveTime::MIN)),
        end: end.map(|end| Timestamp::from_local(date, end)),
        all_day: false,
    }
}
