//! Side-by-side column layout for timed events within a single day.
//!
//! ## Summary
//! Overlapping events are coloured greedily into columns, longest first when two
//! events start together. Each event's width is derived from the widest column
//! index among itself and its direct overlap neighbours, so two disjoint clusters
//! on the same day may have different column counts.

use std::collections::BTreeMap;

use almanac_core::constants::{BASE_Z_INDEX, FULL_WIDTH_PERCENT};
use serde::Serialize;

use crate::date::Timestamp;
use crate::event::Event;

/// Column geometry for one timed event on one day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimedLayout {
    /// Percentage of the day column's width.
    pub width_percent: f64,
    /// Offset from the left edge, as a percentage of the day column's width.
    pub left_percent: f64,
    /// `10 + column`.
    pub z_index: u32,
    /// The event shares its time slot with at least one overlapping event.
    pub is_contained: bool,
    /// Zero-based column the event was assigned within its overlap group.
    pub column: u32,
}

/// Per-call scratch entry; dropped when [`compute_columns`] returns.
struct Slot<'a> {
    event: &'a Event,
    start: Timestamp,
    end: Timestamp,
    overlaps: Vec<usize>,
    column: Option<u32>,
}

impl Slot<'_> {
    fn intersects(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// ## Summary
/// Computes column geometry for one day's timed events, keyed by event id.
///
/// Events without an `end` are skipped. When several events share an id the
/// entry of the one processed last wins.
///
/// ## Side Effects
/// None - pure function.
#[must_use]
pub fn compute_columns<'a, I>(events: I) -> BTreeMap<String, TimedLayout>
where
    I: IntoIterator<Item = &'a Event>,
{
    let mut slots: Vec<Slot<'a>> = events
        .into_iter()
        .filter_map(|event| {
            event.end.map(|end| Slot {
                event,
                start: event.start,
                end,
                overlaps: Vec::new(),
                column: None,
            })
        })
        .collect();

    if slots.is_empty() {
        return BTreeMap::new();
    }

    // Stable: equal start and end keep their input order
    slots.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| b.end.cmp(&a.end)));

    for i in 0..slots.len() {
        for j in (i + 1)..slots.len() {
            if slots[i].intersects(&slots[j]) {
                slots[i].overlaps.push(j);
                slots[j].overlaps.push(i);
            }
        }
    }

    for i in 0..slots.len() {
        let taken: Vec<u32> = slots[i]
            .overlaps
            .iter()
            .filter_map(|&j| slots[j].column)
            .collect();
        let mut column = 0;
        while taken.contains(&column) {
            column += 1;
        }
        slots[i].column = Some(column);
    }

    let mut layout = BTreeMap::new();
    let mut widest = 0;
    for slot in &slots {
        let column = slot.column.unwrap_or_default();
        let total_columns = slot
            .overlaps
            .iter()
            .filter_map(|&j| slots[j].column)
            .fold(column, u32::max)
            + 1;
        widest = widest.max(total_columns);

        let width = FULL_WIDTH_PERCENT / f64::from(total_columns);
        layout.insert(
            slot.event.id.clone(),
            TimedLayout {
                width_percent: width,
                left_percent: f64::from(column) * width,
                z_index: BASE_Z_INDEX + column,
                is_contained: width < FULL_WIDTH_PERCENT,
                column,
            },
        );
    }

    tracing::trace!(
        events = slots.len(),
        columns = widest,
        "Computed timed event layout"
    );

    layout
}
