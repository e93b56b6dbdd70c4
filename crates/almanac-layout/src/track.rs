//! Track (row) layout for all-day and multi-day events across a week row.
//!
//! ## Summary
//! Each ribbon event touching the week is placed once, clamped to the visible
//! seven days, and packed first-fit into the lowest track whose day slots are free.
//! Ribbon events are multi-day, or all-day by duration or by the producer's flag.

use std::collections::HashSet;

use almanac_core::constants::DAYS_PER_WEEK;
use chrono::NaiveDate;
use serde::Serialize;

use crate::date::add_days;
use crate::event::{Event, end_date, is_multi_day, shows_as_all_day, start_date};

/// A calendar day together with the events active on it.
///
/// Implemented by the processed day buckets and by the view cells so the week
/// layout can run on either.
pub trait DayCell {
    fn date(&self) -> NaiveDate;
    fn events(&self) -> &[Event];
}

/// Placement of one spanning event within one week row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventLayout {
    /// Id of the placed event.
    pub event_id: String,
    /// Zero-based column of the first visible day.
    pub start_day_index: usize,
    /// Number of visible days covered, at least 1.
    pub span: usize,
    /// Zero-based row; 0 is the top track.
    pub track: usize,
}

impl EventLayout {
    /// Zero-based column of the last visible day.
    #[must_use]
    pub fn end_day_index(&self) -> usize {
        self.start_day_index + self.span - 1
    }
}

/// Drawn as a ribbon across day cells rather than as a timed block.
fn is_ribbon(event: &Event) -> bool {
    shows_as_all_day(event) || is_multi_day(event)
}

struct Candidate<'a> {
    event: &'a Event,
    start_day_index: usize,
    span: usize,
}

fn is_contiguous_week<C: DayCell>(cells: &[C]) -> bool {
    cells.len() == DAYS_PER_WEEK
        && cells
            .windows(2)
            .all(|pair| add_days(pair[0].date(), 1) == pair[1].date())
}

/// Clamps an event's day span to the cell row. `None` when the event misses the row.
fn visible_indices<C: DayCell>(
    cells: &[C],
    event: &Event,
    week_start: NaiveDate,
    week_end: NaiveDate,
) -> Option<(usize, usize)> {
    let event_start = start_date(event);
    let event_end = end_date(event);
    let last = cells.len() - 1;
    let overlaps_week = event_start <= week_end && event_end >= week_start;

    let start_index = if event_start < week_start {
        Some(0)
    } else {
        cells.iter().position(|c| c.date() == event_start)
    };
    let start_index = start_index.or_else(|| overlaps_week.then_some(0))?;

    let end_index = if event_end > week_end {
        Some(last)
    } else {
        cells.iter().position(|c| c.date() == event_end)
    };
    let end_index = end_index
        .or_else(|| overlaps_week.then_some(last))
        .unwrap_or(start_index);

    Some((start_index, end_index))
}

/// ## Summary
/// Computes track placement for the all-day and multi-day events of one week row.
///
/// Candidates are ordered by start index, then widest span, then title, and
/// placed into the lowest track whose slots `[start, start + span)` are free.
///
/// `cells` must be seven date-contiguous days. Anything else is a caller bug:
/// debug builds assert, release builds log a warning and lay out the cells as given.
///
/// ## Side Effects
/// None - pure function.
#[tracing::instrument(skip_all, fields(cells = cells.len()))]
#[must_use]
pub fn compute_week_layout<C: DayCell>(cells: &[C]) -> Vec<EventLayout> {
    let (Some(first), Some(last)) = (cells.first(), cells.last()) else {
        return Vec::new();
    };

    let well_formed = is_contiguous_week(cells);
    debug_assert!(well_formed, "week layout needs 7 consecutive day cells");
    if !well_formed {
        tracing::warn!("Week layout called with a malformed week row");
    }

    let week_start = first.date();
    let week_end = last.date();

    let mut seen = HashSet::new();
    let mut candidates = Vec::new();
    for event in cells.iter().flat_map(|cell| cell.events()) {
        if !is_ribbon(event) || !seen.insert(event.id.as_str()) {
            continue;
        }

        if let Some((start_day_index, end_day_index)) =
            visible_indices(cells, event, week_start, week_end)
        {
            candidates.push(Candidate {
                event,
                start_day_index,
                span: (end_day_index + 1).saturating_sub(start_day_index).max(1),
            });
        }
    }

    candidates.sort_by(|a, b| {
        a.start_day_index
            .cmp(&b.start_day_index)
            .then_with(|| b.span.cmp(&a.span))
            .then_with(|| a.event.title.cmp(&b.event.title))
    });

    let mut tracks: Vec<Vec<bool>> = Vec::new();
    let mut layout = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        let days = candidate.start_day_index
            ..(candidate.start_day_index + candidate.span).min(cells.len());

        let track = match tracks
            .iter()
            .position(|occupied| days.clone().all(|day| !occupied[day]))
        {
            Some(track) => track,
            None => {
                tracks.push(vec![false; cells.len()]);
                tracks.len() - 1
            }
        };
        for day in days {
            tracks[track][day] = true;
        }

        layout.push(EventLayout {
            event_id: candidate.event.id.clone(),
            start_day_index: candidate.start_day_index,
            span: candidate.span,
            track,
        });
    }

    tracing::debug!(
        events = layout.len(),
        tracks = tracks.len(),
        week_start = %week_start,
        "Computed week track layout"
    );

    layout
}

/// Number of rows a week needs, `max(track) + 1`.
#[must_use]
pub fn track_count(layout: &[EventLayout]) -> usize {
    layout.iter().map(|l| l.track + 1).max().unwrap_or(0)
}

/// Distinct ribbon events active on a single cell.
#[must_use]
pub fn multi_day_count_for_day<C: DayCell>(cell: &C) -> usize {
    let date = cell.date();
    cell.events()
        .iter()
        .filter(|e| is_ribbon(e))
        .filter(|e| start_date(e) <= date && end_date(e) >= date)
        .map(|e| e.id.as_str())
        .collect::<HashSet<_>>()
        .len()
}
