//! End-to-end layout scenarios.

use almanac_layout::schedule::create_event_draft;
use almanac_layout::track::{EventLayout, track_count};
use almanac_layout::{Event, process};

use crate::helpers::*;

#[test_log::test]
fn two_overlapping_meetings_split_the_day() {
    let events = [
        timed("a", "2025-08-11", "09:00", "10:00"),
        timed("b", "2025-08-11", "09:30", "10:30"),
    ];
    let processed = process(&events);
    let layout = &processed[&date(2025, 8, 11)].timed_layout;

    assert_eq!(layout["a"].column, 0);
    assert_eq!(layout["b"].column, 1);
    for id in ["a", "b"] {
        assert!((layout[id].width_percent - 50.0).abs() < EPSILON);
        assert!(layout[id].is_contained);
    }
    assert!((layout["b"].left_percent - 50.0).abs() < EPSILON);
    assert_eq!(layout["b"].z_index, 11);
}

#[test_log::test]
fn chained_overlaps_use_three_columns() {
    let events = [
        timed("a", "2025-08-11", "09:00", "11:00"),
        timed("b", "2025-08-11", "09:30", "10:30"),
        timed("c", "2025-08-11", "10:00", "12:00"),
    ];
    let processed = process(&events);
    let layout = &processed[&date(2025, 8, 11)].timed_layout;

    assert_eq!(
        [layout["a"].column, layout["b"].column, layout["c"].column],
        [0, 1, 2]
    );
    for id in ["a", "b", "c"] {
        assert!((layout[id].width_percent - 100.0 / 3.0).abs() < EPSILON);
    }
}

#[test_log::test]
fn all_day_event_spans_the_start_of_the_week() {
    let events = [spanning(
        "offsite",
        "Offsite",
        "2025-08-04T00:00:00Z",
        "2025-08-06T12:00:00Z",
    )];
    let week = week_of(&events);

    assert_eq!(
        week.layout,
        vec![EventLayout {
            event_id: "offsite".into(),
            start_day_index: 0,
            span: 3,
            track: 0,
        }]
    );
}

#[test_log::test]
fn two_full_week_events_stack() {
    let events = [
        spanning("x", "Conference", "2025-08-04T00:00:00Z", "2025-08-10T12:00:00Z"),
        spanning("y", "Vacation", "2025-08-02T00:00:00Z", "2025-08-15T00:00:00Z"),
    ];
    let week = week_of(&events);

    let mut tracks: Vec<(&str, usize, usize)> = week
        .layout
        .iter()
        .map(|l| (l.event_id.as_str(), l.span, l.track))
        .collect();
    tracks.sort_unstable();
    assert_eq!(tracks, vec![("x", 7, 0), ("y", 7, 1)]);
    assert_eq!(track_count(&week.layout), 2);
}

#[test_log::test]
fn start_only_event_is_listed_but_not_laid_out() {
    let events = [Event::new("ping", "Ping", ts("2025-08-11T09:00:00Z"))];
    let processed = process(&events);
    let bucket = &processed[&date(2025, 8, 11)];

    assert_eq!(bucket.events.len(), 1);
    assert!(bucket.timed_layout.is_empty());
    assert_eq!(bucket.multi_day_track_count, 0);
}

#[test_log::test]
fn empty_input_yields_nothing() {
    assert!(process(&[]).is_empty());
    assert!(week_of(&[]).layout.is_empty());
}

#[test_log::test]
fn offset_timestamps_bucket_by_their_own_wall_clock() {
    // 23:30 at +02:00 is 21:30 UTC, still the 11th on its own clock
    let events = [Event::new("late", "Late", ts("2025-08-11T23:30:00+02:00"))
        .with_end(ts("2025-08-12T00:30:00+02:00"))];
    let processed = process(&events);

    assert!(processed.contains_key(&date(2025, 8, 11)));
    assert!(processed.contains_key(&date(2025, 8, 12)));
    assert!(processed[&date(2025, 8, 11)].timed_layout.is_empty());
    assert_eq!(processed[&date(2025, 8, 11)].multi_day_track_count, 1);
}

#[test_log::test]
fn drafted_all_day_event_lands_on_a_week_track() {
    let draft = create_event_draft(date(2025, 8, 5), None, None, true);
    let mut holiday = Event::new("holiday", "Holiday", draft.start).with_all_day(draft.all_day);
    holiday.end = draft.end;
    let week = week_of(&[holiday]);

    assert_eq!(
        week.layout,
        vec![EventLayout {
            event_id: "holiday".into(),
            start_day_index: 1,
            span: 1,
            track: 0,
        }]
    );
}
