//! Assembles renderable month, week and day grids from processed day buckets.

use almanac_core::constants::DAYS_PER_WEEK;
use almanac_core::types::{CalendarView, WeekStart};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

pub use crate::event::filter_events_by_range;

use crate::date::{
    format_date, is_same_month, is_today, is_weekend, iso_week_number, month_grid, week_grid,
};
use crate::event::{Event, shows_as_all_day, start_clock_time};
use crate::processor::ProcessedEvents;
use crate::track::{DayCell, EventLayout, compute_week_layout};

const MONDAY_FIRST: [&str; DAYS_PER_WEEK] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
const SUNDAY_FIRST: [&str; DAYS_PER_WEEK] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Everything a grid needs besides the events themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewContext {
    /// The day the visible grid is built around.
    pub anchor: NaiveDate,
    /// Supplied by the host so grid assembly stays deterministic.
    pub today: NaiveDate,
    pub selected: Option<NaiveDate>,
    pub week_start: WeekStart,
    pub view: CalendarView,
}

impl ViewContext {
    #[must_use]
    pub fn new(anchor: NaiveDate, today: NaiveDate) -> Self {
        Self {
            anchor,
            today,
            selected: None,
            week_start: WeekStart::default(),
            view: CalendarView::default(),
        }
    }

    #[must_use]
    pub fn with_week_start(mut self, week_start: WeekStart) -> Self {
        self.week_start = week_start;
        self
    }

    #[must_use]
    pub fn with_view(mut self, view: CalendarView) -> Self {
        self.view = view;
        self
    }

    #[must_use]
    pub fn with_selected(mut self, selected: NaiveDate) -> Self {
        self.selected = Some(selected);
        self
    }
}

/// One visible day of a month, week or single-day view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarCell {
    pub date: NaiveDate,
    pub date_key: String,
    pub is_current_month: bool,
    pub is_today: bool,
    pub is_selected: bool,
    pub is_weekend: bool,
    /// Events touching this day, in display order.
    pub events: Vec<Event>,
}

impl DayCell for CalendarCell {
    fn date(&self) -> NaiveDate {
        self.date
    }

    fn events(&self) -> &[Event] {
        &self.events
    }
}

/// A seven-day row and the track placement of its spanning events.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarWeek {
    pub week_number: u32,
    pub days: Vec<CalendarCell>,
    pub layout: Vec<EventLayout>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarMonth {
    pub year: i32,
    /// 1-12
    pub month: u32,
    pub weeks: Vec<CalendarWeek>,
}

/// Short English day names, in grid column order.
#[must_use]
pub const fn day_names(week_start: WeekStart) -> [&'static str; DAYS_PER_WEEK] {
    match week_start {
        WeekStart::Monday => MONDAY_FIRST,
        WeekStart::Sunday => SUNDAY_FIRST,
    }
}

/// Days shown by the context's view: 42 for a month, 7 for a week, the anchor alone for a day.
#[must_use]
pub fn visible_dates(context: &ViewContext) -> Vec<NaiveDate> {
    match context.view {
        CalendarView::Month => month_grid(context.anchor, context.week_start),
        CalendarView::Week => week_grid(context.anchor, context.week_start),
        CalendarView::Day => vec![context.anchor],
    }
}

/// ## Summary
/// Orders events for display within a day cell.
///
/// All-day events come first, then events without a start clock time, then the
/// rest by start clock time. Ties keep their relative order.
pub fn sort_events_by_time(events: &mut [Event]) {
    events.sort_by_key(|e| (!shows_as_all_day(e), start_clock_time(e)));
}

fn build_cell(date: NaiveDate, processed: &ProcessedEvents, context: &ViewContext) -> CalendarCell {
    let mut events = processed
        .get(&date)
        .map(|bucket| bucket.events.clone())
        .unwrap_or_default();
    sort_events_by_time(&mut events);

    CalendarCell {
        date,
        date_key: format_date(date),
        is_current_month: context.view != CalendarView::Month
            || is_same_month(date, context.anchor),
        is_today: is_today(date, context.today),
        is_selected: context.selected == Some(date),
        is_weekend: is_weekend(date),
        events,
    }
}

/// ## Summary
/// Builds one cell per date, filled from the matching day bucket.
///
/// Dates without a bucket get an empty event list. Outside the month view every
/// cell counts as belonging to the current month.
#[must_use]
pub fn build_cells(
    dates: &[NaiveDate],
    processed: &ProcessedEvents,
    context: &ViewContext,
) -> Vec<CalendarCell> {
    dates
        .iter()
        .map(|&date| build_cell(date, processed, context))
        .collect()
}

fn assemble_week(days: Vec<CalendarCell>) -> CalendarWeek {
    let week_number = days.first().map_or(0, |cell| iso_week_number(cell.date));
    let layout = compute_week_layout(&days);
    CalendarWeek {
        week_number,
        days,
        layout,
    }
}

/// ## Summary
/// Builds the six-week month grid around `context.anchor`.
///
/// Each week carries the ISO week number of its first day and the track layout
/// of its all-day and multi-day events.
#[tracing::instrument(skip_all, fields(anchor = %context.anchor))]
#[must_use]
pub fn build_month(processed: &ProcessedEvents, context: &ViewContext) -> CalendarMonth {
    let context = ViewContext {
        view: CalendarView::Month,
        ..*context
    };
    let cells = build_cells(
        &month_grid(context.anchor, context.week_start),
        processed,
        &context,
    );

    let mut weeks = Vec::with_capacity(cells.len() / DAYS_PER_WEEK);
    let mut cells = cells.into_iter();
    loop {
        let days: Vec<CalendarCell> = cells.by_ref().take(DAYS_PER_WEEK).collect();
        if days.is_empty() {
            break;
        }
        weeks.push(assemble_week(days));
    }

    CalendarMonth {
        year: context.anchor.year(),
        month: context.anchor.month(),
        weeks,
    }
}

/// Builds the week row holding `context.anchor`.
#[tracing::instrument(skip_all, fields(anchor = %context.anchor))]
#[must_use]
pub fn build_week(processed: &ProcessedEvents, context: &ViewContext) -> CalendarWeek {
    let context = ViewContext {
        view: CalendarView::Week,
        ..*context
    };
    assemble_week(build_cells(
        &week_grid(context.anchor, context.week_start),
        processed,
        &context,
    ))
}

/// The single cell of the day view.
#[must_use]
pub fn build_day(processed: &ProcessedEvents, context: &ViewContext) -> CalendarCell {
    let context = ViewContext {
        view: CalendarView::Day,
        ..*context
    };
    build_cell(context.anchor, processed, &context)
}
