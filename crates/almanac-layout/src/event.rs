//! Calendar event model and classification.
//!
//! ## Summary
//! An event is *all-day* when it lasts at least 24 hours and *multi-day* when its
//! start and end fall on different calendar days. The two predicates are
//! independent: an event may be both, either, or neither. Events without an `end`
//! are never all-day or multi-day.

use almanac_core::constants::ALL_DAY_MIN_HOURS;
use almanac_core::error::{CoreError, CoreResult};
use chrono::{NaiveDate, NaiveTime, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::date::Timestamp;

/// A calendar event as supplied by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Unique identifier; layout maps are keyed by it.
    pub id: String,
    pub title: String,
    pub start: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<Timestamp>,
    /// Producer hint. Classification uses the duration, not this flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub all_day: Option<bool>,
    /// Duration in minutes, as reported by the producer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<i64>,
    #[serde(default)]
    pub background_color: String,
    #[serde(default)]
    pub text_color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Map<String, serde_json::Value>>,
}

impl Event {
    /// Creates an event with only the required fields set.
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>, start: Timestamp) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            start,
            end: None,
            all_day: None,
            duration: None,
            background_color: String::new(),
            text_color: String::new(),
            description: None,
            metadata: None,
        }
    }

    #[must_use]
    pub fn with_end(mut self, end: Timestamp) -> Self {
        self.end = Some(end);
        self
    }

    #[must_use]
    pub fn with_all_day(mut self, all_day: bool) -> Self {
        self.all_day = Some(all_day);
        self
    }

    #[must_use]
    pub fn with_colors(
        mut self,
        background_color: impl Into<String>,
        text_color: impl Into<String>,
    ) -> Self {
        self.background_color = background_color.into();
        self.text_color = text_color.into();
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// ## Summary
    /// Checks the event can be laid out.
    ///
    /// ## Errors
    /// Returns `CoreError::InvalidEvent` if the id is blank or `end` precedes `start`.
    pub fn validate(&self) -> CoreResult<()> {
        if self.id.trim().is_empty() {
            return Err(CoreError::InvalidEvent {
                id: self.id.clone(),
                reason: "id must not be empty",
            });
        }
        if self.end.is_some_and(|end| end < self.start) {
            return Err(CoreError::InvalidEvent {
                id: self.id.clone(),
                reason: "end precedes start",
            });
        }
        Ok(())
    }

    /// Derived classification of this event.
    #[must_use]
    pub fn classify(&self) -> Classification {
        Classification {
            all_day: is_all_day(self),
            multi_day: is_multi_day(self),
        }
    }
}

/// Result of [`Event::classify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Classification {
    pub all_day: bool,
    pub multi_day: bool,
}

impl Classification {
    /// Neither all-day nor multi-day; eligible for column layout.
    #[must_use]
    pub const fn is_timed(self) -> bool {
        !self.all_day && !self.multi_day
    }

    /// All-day or multi-day; eligible for week track layout.
    #[must_use]
    pub const fn spans_days(self) -> bool {
        self.all_day || self.multi_day
    }
}

/// `true` iff the event has an end and lasts at least 24 hours.
#[must_use]
pub fn is_all_day(event: &Event) -> bool {
    event
        .end
        .is_some_and(|end| end.since(&event.start) >= TimeDelta::hours(ALL_DAY_MIN_HOURS))
}

/// `true` iff the event has an end on a different calendar day than its start.
#[must_use]
pub fn is_multi_day(event: &Event) -> bool {
    event
        .end
        .is_some_and(|end| end.date() != event.start.date())
}

/// All-day by duration, or flagged all-day by its producer.
#[must_use]
pub fn shows_as_all_day(event: &Event) -> bool {
    event.all_day == Some(true) || is_all_day(event)
}

/// Clock time the event starts at; `None` for all-day events.
#[must_use]
pub fn start_clock_time(event: &Event) -> Option<NaiveTime> {
    (!shows_as_all_day(event)).then(|| event.start.clock_time())
}

/// Clock time the event ends at; `None` for all-day events or without an end.
#[must_use]
pub fn end_clock_time(event: &Event) -> Option<NaiveTime> {
    if shows_as_all_day(event) {
        return None;
    }
    event.end.map(|end| end.clock_time())
}

#[must_use]
pub fn start_date(event: &Event) -> NaiveDate {
    event.start.date()
}

/// Calendar day of the end, or of the start when there is no end.
#[must_use]
pub fn end_date(event: &Event) -> NaiveDate {
    event.end.map_or_else(|| start_date(event), |end| end.date())
}

/// Whether `date` lies within the event's inclusive day span.
#[must_use]
pub fn is_on_date(event: &Event, date: NaiveDate) -> bool {
    start_date(event) <= date && date <= end_date(event)
}

/// Whether the event's day span intersects `[range_start, range_end]`.
#[must_use]
pub fn overlaps_range(event: &Event, range_start: NaiveDate, range_end: NaiveDate) -> bool {
    start_date(event) <= range_end && end_date(event) >= range_start
}

/// Number of calendar days the event touches, counting both ends.
#[must_use]
pub fn duration_in_days(event: &Event) -> i64 {
    (end_date(event) - start_date(event)).num_days().abs() + 1
}

#[must_use]
pub fn filter_events_by_date(events: &[Event], date: NaiveDate) -> Vec<&Event> {
    events.iter().filter(|e| is_on_date(e, date)).collect()
}

#[must_use]
pub fn filter_events_by_range(
    events: &[Event],
    range_start: NaiveDate,
    range_end: NaiveDate,
) -> Vec<&Event> {
    events
        .iter()
        .filter(|e| overlaps_range(e, range_start, range_end))
        .collect()
}
