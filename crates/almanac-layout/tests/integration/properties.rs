//! Invariants that hold for any input, checked over the busy fixtures.

use almanac_layout::compute_columns;
use almanac_layout::event::is_on_date;
use almanac_layout::track::DayCell;
use almanac_layout::{Event, process};

use crate::helpers::*;

fn overlaps(a: &Event, b: &Event) -> bool {
    match (a.end, b.end) {
        (Some(end_a), Some(end_b)) => a.start < end_b && b.start < end_a,
        _ => false,
    }
}

#[test]
fn column_layout_is_idempotent() {
    let events = busy_day();
    assert_eq!(compute_columns(&events), compute_columns(&events));
}

#[test]
fn overlapping_events_never_share_a_column() {
    let events = busy_day();
    let layout = compute_columns(&events);

    for (i, a) in events.iter().enumerate() {
        for b in &events[i + 1..] {
            if overlaps(a, b) {
                assert_ne!(
                    layout[&a.id].column, layout[&b.id].column,
                    "{} and {} overlap",
                    a.id, b.id
                );
            }
        }
    }
}

#[test]
fn columns_stay_inside_the_day() {
    let layout = compute_columns(&busy_day());

    for (id, entry) in &layout {
        assert!(entry.width_percent > 0.0, "{id} has no width");
        assert!(
            entry.left_percent + entry.width_percent <= 100.0 + EPSILON,
            "{id} overflows"
        );
        assert_eq!(entry.z_index, 10 + entry.column);
        assert_eq!(entry.is_contained, entry.width_percent < 100.0);
    }
}

#[test]
fn input_order_does_not_change_distinct_intervals() {
    let events = busy_day();
    let mut reversed = events.clone();
    reversed.reverse();

    let forward = compute_columns(&events);
    let backward = compute_columns(&reversed);
    // Only the identical retro/demo pair may swap columns
    for id in ["standup", "planning", "review", "pairing", "lunch", "one-on-one", "focus"] {
        assert_eq!(forward[id], backward[id], "{id} moved");
    }
}

#[test]
fn week_tracks_never_collide() {
    let week = week_of(&busy_week());

    for (i, a) in week.layout.iter().enumerate() {
        for b in &week.layout[i + 1..] {
            let intersect = a.start_day_index <= b.end_day_index()
                && b.start_day_index <= a.end_day_index();
            if intersect {
                assert_ne!(a.track, b.track, "{} and {} collide", a.event_id, b.event_id);
            }
        }
    }
}

#[test]
fn week_spans_are_clamped_and_positive() {
    let week = week_of(&busy_week());

    for entry in &week.layout {
        assert!(entry.span >= 1);
        assert!(entry.end_day_index() < 7, "{} leaves the week", entry.event_id);
    }

    let before = week.layout.iter().find(|l| l.event_id == "before");
    assert_eq!(before.map(|l| (l.start_day_index, l.span)), Some((0, 2)));
    let after = week.layout.iter().find(|l| l.event_id == "after");
    assert_eq!(after.map(|l| (l.start_day_index, l.span)), Some((5, 2)));
}

#[test]
fn week_layout_lists_each_event_once() {
    let week = week_of(&busy_week());

    let mut ids: Vec<&str> = week.layout.iter().map(|l| l.event_id.as_str()).collect();
    ids.sort_unstable();
    assert_eq!(
        ids,
        vec!["after", "before", "flagless", "mid", "overnight", "whole"]
    );
}

#[test]
fn every_bucket_holds_only_its_own_events() {
    let processed = process(&busy_week());

    for (day, bucket) in &processed {
        assert_eq!(bucket.date(), *day);
        assert!(bucket.events().iter().all(|e| is_on_date(e, *day)));
    }
}
