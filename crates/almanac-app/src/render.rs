//! Turns the calendar configuration and an event list into the document the
//! `almanac` binary prints.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use almanac_core::config::CalendarConfig;
use almanac_core::constants::DAYS_PER_WEEK;
use almanac_core::types::{CalendarView, TimeFormat};
use almanac_layout::date::{format_display_time, generate_time_slots, parse_time};
use almanac_layout::schedule::find_next_available_time;
use almanac_layout::view::{
    CalendarCell, CalendarMonth, CalendarWeek, ViewContext, build_day, build_month, build_week,
    day_names, visible_dates,
};
use almanac_layout::{Event, EventProcessor, TimedLayout};
use chrono::NaiveDate;
use serde::Serialize;

use crate::error::{AppError, AppResult};

/// The visible grid, tagged by view.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Grid {
    Month(CalendarMonth),
    Week(CalendarWeek),
    Day(CalendarCell),
}

/// A clock window formatted for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotLabel {
    pub start: String,
    pub end: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedView {
    pub view: CalendarView,
    pub anchor: NaiveDate,
    pub day_names: [&'static str; DAYS_PER_WEEK],
    pub grid: Grid,
    /// Column geometry of timed events, keyed by date key then event id.
    pub timed_layout: BTreeMap<String, BTreeMap<String, TimedLayout>>,
    /// Row labels of the time grid; empty for the month view.
    pub time_slots: Vec<String>,
    /// Where a new event on the anchor day would go. Day view only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_available: Option<SlotLabel>,
}

/// ## Summary
/// Parses a JSON array of events and validates each one.
///
/// Duplicate ids are accepted with a warning; the layout keeps one entry per id.
///
/// ## Errors
/// Returns `AppError::JsonError` for malformed JSON and `AppError::CoreError` for
/// an event that fails validation.
pub fn parse_events(text: &str) -> AppResult<Vec<Event>> {
    let events: Vec<Event> = serde_json::from_str(text)?;

    let mut seen = HashSet::new();
    for event in &events {
        event.validate()?;
        if !seen.insert(event.id.as_str()) {
            tracing::warn!(id = %event.id, "Duplicate event id, layout keeps one entry");
        }
    }

    tracing::debug!(count = events.len(), "Parsed events");
    Ok(events)
}

/// ## Summary
/// Reads and parses the event file at `path`.
///
/// ## Errors
/// Returns `AppError::IoError` if the file cannot be read, otherwise any error
/// from [`parse_events`].
pub fn load_events(path: &Path) -> AppResult<Vec<Event>> {
    let text = std::fs::read_to_string(path).map_err(|source| AppError::IoError {
        path: path.to_path_buf(),
        source,
    })?;
    parse_events(&text)
}

fn display_label(text: &str, format: TimeFormat) -> String {
    parse_time(text).map_or_else(|_| text.to_owned(), |time| format_display_time(time, format))
}

/// ## Summary
/// Lays out `events` for the configured view around the configured anchor.
///
/// Only the visible dates are processed. `today` comes from the caller.
#[tracing::instrument(skip_all, fields(view = %calendar.view))]
#[must_use]
pub fn render(events: &[Event], calendar: &CalendarConfig, today: NaiveDate) -> RenderedView {
    let context = ViewContext::new(calendar.anchor_or(today), today)
        .with_week_start(calendar.week_start)
        .with_view(calendar.view);

    let dates = visible_dates(&context);
    let mut processor = match (dates.first(), dates.last()) {
        (Some(&start), Some(&end)) => EventProcessor::new().with_range(start, end),
        _ => EventProcessor::new(),
    };
    let processed = processor.recompute(events);

    let grid = match calendar.view {
        CalendarView::Month => Grid::Month(build_month(processed, &context)),
        CalendarView::Week => Grid::Week(build_week(processed, &context)),
        CalendarView::Day => Grid::Day(build_day(processed, &context)),
    };

    let timed_layout = processed
        .values()
        .filter(|bucket| !bucket.timed_layout.is_empty())
        .map(|bucket| (bucket.date_key(), bucket.timed_layout.clone()))
        .collect();

    let time_slots = if calendar.view == CalendarView::Month {
        Vec::new()
    } else {
        generate_time_slots(0, 24)
            .iter()
            .map(|slot| display_label(slot, calendar.time_format))
            .collect()
    };

    let next_available = (calendar.view == CalendarView::Day).then(|| {
        let slot = find_next_available_time(context.anchor, events);
        SlotLabel {
            start: format_display_time(slot.start, calendar.time_format),
            end: format_display_time(slot.end, calendar.time_format),
        }
    });

    tracing::info!(
        anchor = %context.anchor,
        days = processed.len(),
        "Rendered calendar view"
    );

    RenderedView {
        view: calendar.view,
        anchor: context.anchor,
        day_names: day_names(calendar.week_start),
        grid,
        timed_layout,
        time_slots,
        next_available,
    }
}
