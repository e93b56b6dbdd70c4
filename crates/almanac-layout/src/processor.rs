//! Groups a flat event list into per-day buckets and precomputes their layout.
//!
//! ## Summary
//! Every recompute builds a fresh map; nothing is patched in place. Hosts call
//! [`EventProcessor::recompute`] after any change to their event collection.

use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;
use serde::Serialize;

use crate::date::{dates_in_range, format_date};
use crate::event::{Event, end_date, overlaps_range, start_date};
use crate::timed::{TimedLayout, compute_columns};
use crate::track::DayCell;

/// Events active on one calendar day and their precomputed geometry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayBucket {
    pub date: NaiveDate,
    /// Every event touching this day, in input order.
    pub events: Vec<Event>,
    /// Column geometry of the day's timed events, keyed by event id.
    pub timed_layout: BTreeMap<String, TimedLayout>,
    /// Distinct all-day or multi-day events on this day.
    pub multi_day_track_count: usize,
}

impl DayBucket {
    #[must_use]
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            events: Vec::new(),
            timed_layout: BTreeMap::new(),
            multi_day_track_count: 0,
        }
    }

    /// `YYYY-MM-DD` key of this bucket.
    #[must_use]
    pub fn date_key(&self) -> String {
        format_date(self.date)
    }

    /// Events that are neither all-day nor multi-day.
    pub fn timed_events(&self) -> impl Iterator<Item = &Event> {
        self.events.iter().filter(|e| e.classify().is_timed())
    }

    /// Events that are all-day or multi-day.
    pub fn spanning_events(&self) -> impl Iterator<Item = &Event> {
        self.events.iter().filter(|e| e.classify().spans_days())
    }

    fn compute_layout(&mut self) {
        self.timed_layout = compute_columns(self.timed_events());
        self.multi_day_track_count = self
            .spanning_events()
            .map(|e| e.id.as_str())
            .collect::<HashSet<_>>()
            .len();
    }
}

impl DayCell for DayBucket {
    fn date(&self) -> NaiveDate {
        self.date
    }

    fn events(&self) -> &[Event] {
        &self.events
    }
}

/// Day buckets keyed (and ordered) by date.
pub type ProcessedEvents = BTreeMap<NaiveDate, DayBucket>;

/// ## Summary
/// Buckets events by every calendar day they touch and lays out each day.
///
/// An event without an `end` lands on its start day only and never receives a
/// timed layout entry.
///
/// ## Side Effects
/// None - pure function.
#[tracing::instrument(skip_all, fields(events = events.len()))]
#[must_use]
pub fn process(events: &[Event]) -> ProcessedEvents {
    group(events.iter())
}

/// ## Summary
/// Like [`process`], restricted to the visible range `[range_start, range_end]`.
///
/// Events whose day span misses the range are ignored; buckets outside the range
/// are not returned.
#[tracing::instrument(skip_all, fields(events = events.len(), range_start = %range_start, range_end = %range_end))]
#[must_use]
pub fn process_range(
    events: &[Event],
    range_start: NaiveDate,
    range_end: NaiveDate,
) -> ProcessedEvents {
    let mut processed = group(
        events
            .iter()
            .filter(|e| overlaps_range(e, range_start, range_end)),
    );
    processed.retain(|date, _| (range_start..=range_end).contains(date));
    processed
}

fn group<'a>(events: impl Iterator<Item = &'a Event>) -> ProcessedEvents {
    let mut processed = ProcessedEvents::new();

    for event in events {
        for date in dates_in_range(start_date(event), end_date(event)) {
            processed
                .entry(date)
                .or_insert_with(|| DayBucket::new(date))
                .events
                .push(event.clone());
        }
    }

    for bucket in processed.values_mut() {
        bucket.compute_layout();
    }

    tracing::debug!(days = processed.len(), "Grouped events by day");

    processed
}

/// Holds the latest processed output for a host's event collection.
///
/// Each [`recompute`](Self::recompute) replaces the whole map in one assignment,
/// so readers never observe a partially updated day.
#[derive(Debug, Clone, Default)]
pub struct EventProcessor {
    range: Option<(NaiveDate, NaiveDate)>,
    processed: ProcessedEvents,
}

impl EventProcessor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Limits processing to the visible range `[start, end]`.
    #[must_use]
    pub fn with_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.range = Some((start, end));
        self
    }

    /// Changes the visible range. Takes effect on the next recompute.
    pub fn set_range(&mut self, start: NaiveDate, end: NaiveDate) {
        self.range = Some((start, end));
    }

    /// Rebuilds the per-day output from `events`.
    pub fn recompute(&mut self, events: &[Event]) -> &ProcessedEvents {
        self.processed = match self.range {
            Some((start, end)) => process_range(events, start, end),
            None => process(events),
        };
        &self.processed
    }

    #[must_use]
    pub fn processed(&self) -> &ProcessedEvents {
        &self.processed
    }

    #[must_use]
    pub fn day(&self, date: NaiveDate) -> Option<&DayBucket> {
        self.processed.get(&date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date::Timestamp;

    fn ts(text: &str) -> Timestamp {
        Timestamp::parse(text).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn event(id: &str, start: &str, end: Option<&str>) -> Event {
        let e = Event::new(id, id, ts(start));
        match end {
            Some(end) => e.with_end(ts(end)),
            None => e,
        }
    }

    #[test_log::test]
    fn test_empty_input() {
        assert!(process(&[]).is_empty());
    }

    #[test_log::test]
    fn test_multi_day_event_lands_in_every_day() {
        let events = [event(
            "conf",
            "2025-08-04T09:00:00Z",
            Some("2025-08-06T17:00:00Z"),
        )];
        let processed = process(&events);

        assert_eq!(
            processed.keys().copied().collect::<Vec<_>>(),
            vec![date(2025, 8, 4), date(2025, 8, 5), date(2025, 8, 6)]
        );
        for bucket in processed.values() {
            assert_eq!(bucket.events.len(), 1);
            assert!(bucket.timed_layout.is_empty());
            assert_eq!(bucket.multi_day_track_count, 1);
        }
    }

    #[test_log::test]
    fn test_timed_and_spanning_events_split() {
        let events = [
            event("a", "2025-08-04T09:00:00Z", Some("2025-08-04T10:00:00Z")),
            event("b", "2025-08-04T09:30:00Z", Some("2025-08-04T10:30:00Z")),
            event("trip", "2025-08-03T00:00:00Z", Some("2025-08-05T00:00:00Z")),
        ];
        let processed = process(&events);
        let monday = &processed[&date(2025, 8, 4)];

        assert_eq!(monday.events.len(), 3);
        assert_eq!(monday.timed_layout.len(), 2);
        assert!(!monday.timed_layout.contains_key("trip"));
        assert_eq!(monday.multi_day_track_count, 1);
        assert_eq!(monday.date_key(), "2025-08-04");
    }

    #[test_log::test]
    fn test_duplicate_spanning_ids_count_once() {
        let events = [
            event("dup", "2025-08-04T00:00:00Z", Some("2025-08-05T12:00:00Z")),
            event("dup", "2025-08-04T00:00:00Z", Some("2025-08-05T12:00:00Z")),
        ];
        let processed = process(&events);
        let monday = &processed[&date(2025, 8, 4)];
        assert_eq!(monday.events.len(), 2);
        assert_eq!(monday.multi_day_track_count, 1);
    }

    #[test_log::test]
    fn test_open_ended_event() {
        let events = [event("open", "2025-08-04T09:00:00Z", None)];
        let processed = process(&events);
        let bucket = &processed[&date(2025, 8, 4)];
        assert_eq!(bucket.events.len(), 1);
        assert!(bucket.timed_layout.is_empty());
        assert_eq!(bucket.multi_day_track_count, 0);
    }

    #[test_log::test]
    fn test_process_range_trims_buckets() {
        let events = [
            event("long", "2025-07-30T00:00:00Z", Some("2025-08-02T00:00:00Z")),
            event("outside", "2025-09-10T09:00:00Z", Some("2025-09-10T10:00:00Z")),
        ];
        let processed = process_range(&events, date(2025, 8, 1), date(2025, 8, 31));
        assert_eq!(
            processed.keys().copied().collect::<Vec<_>>(),
            vec![date(2025, 8, 1), date(2025, 8, 2)]
        );
    }

    #[test_log::test]
    fn test_recompute_replaces_output() {
        let mut processor = EventProcessor::new();
        processor.recompute(&[event(
            "a",
            "2025-08-04T09:00:00Z",
            Some("2025-08-04T10:00:00Z"),
        )]);
        assert!(processor.day(date(2025, 8, 4)).is_some());

        processor.recompute(&[event(
            "b",
            "2025-08-05T09:00:00Z",
            Some("2025-08-05T10:00:00Z"),
        )]);
        assert!(processor.day(date(2025, 8, 4)).is_none());
        assert_eq!(processor.processed().len(), 1);
    }

    #[test_log::test]
    fn test_recompute_honours_range() {
        let mut processor =
            EventProcessor::new().with_range(date(2025, 8, 4), date(2025, 8, 10));
        let processed = processor.recompute(&[event(
            "a",
            "2025-08-11T09:00:00Z",
            Some("2025-08-11T10:00:00Z"),
        )]);
        assert!(processed.is_empty());

        processor.set_range(date(2025, 8, 11), date(2025, 8, 17));
        let events = [event("a", "2025-08-11T09:00:00Z", Some("2025-08-11T10:00:00Z"))];
        assert_eq!(processor.recompute(&events).len(), 1);
    }
}
