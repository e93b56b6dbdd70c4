//! Date and time primitives consumed by the layout engine.
//!
//! ## Summary
//! Event instants are carried as [`Timestamp`], an ISO-8601 instant with the UTC
//! offset it was written in. Calendar days and clock times are read from the
//! wall-clock in that offset; no timezone conversion happens anywhere in the crate.

use std::fmt;
use std::str::FromStr;

use almanac_core::constants::{
    CLOCK_TIME_FORMAT, DATE_KEY_FORMAT, DAYS_PER_WEEK, LOCAL_DATE_TIME_SHORT_FORMAT,
    MONTH_GRID_DAYS, TIME_SLOT_INTERVAL_MINUTES,
};
use almanac_core::error::{CoreError, CoreResult};
use almanac_core::types::{TimeFormat, WeekStart};
use chrono::{
    DateTime, Datelike, FixedOffset, Months, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat,
    TimeDelta, Timelike, Weekday,
};
use serde::{Deserialize, Serialize};

/// An event instant (ISO 8601).
///
/// Accepts RFC 3339 text with an offset (`2025-08-09T10:00:00Z`,
/// `2025-08-09T10:00:00+02:00`) as well as naive local text
/// (`2025-08-09T10:00:00`, `2025-08-09T10:00`, `2025-08-09`), which is read as `+00:00`.
///
/// Ordering and equality compare the absolute instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Timestamp(DateTime<FixedOffset>);

impl Timestamp {
    /// ## Summary
    /// Parses an ISO-8601 instant.
    ///
    /// ## Errors
    /// Returns `CoreError::ParseError` if the text matches none of the accepted forms.
    pub fn parse(text: &str) -> CoreResult<Self> {
        let text = text.trim();

        if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
            return Ok(Self(dt));
        }

        let naive = text
            .parse::<NaiveDateTime>()
            .or_else(|_e| NaiveDateTime::parse_from_str(text, LOCAL_DATE_TIME_SHORT_FORMAT))
            .or_else(|_e| {
                NaiveDate::parse_from_str(text, DATE_KEY_FORMAT)
                    .map(|date| date.and_time(NaiveTime::MIN))
            })
            .map_err(|e| CoreError::ParseError(format!("invalid timestamp '{text}': {e}")))?;

        Ok(Self::from_naive(naive))
    }

    /// Wraps a wall-clock date-time at offset `+00:00`.
    #[must_use]
    pub fn from_naive(naive: NaiveDateTime) -> Self {
        Self(naive.and_utc().fixed_offset())
    }

    /// Combines a calendar day and a clock time at offset `+00:00`.
    #[must_use]
    pub fn from_local(date: NaiveDate, time: NaiveTime) -> Self {
        Self::from_naive(date.and_time(time))
    }

    /// Calendar day of the wall-clock reading.
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.0.date_naive()
    }

    /// Clock time of the wall-clock reading.
    #[must_use]
    pub fn clock_time(&self) -> NaiveTime {
        self.0.time()
    }

    #[must_use]
    pub fn offset(&self) -> FixedOffset {
        *self.0.offset()
    }

    /// Signed distance from `earlier` to `self`.
    #[must_use]
    pub fn since(&self, earlier: &Self) -> TimeDelta {
        self.0.signed_duration_since(earlier.0)
    }

    #[must_use]
    pub fn as_datetime(&self) -> &DateTime<FixedOffset> {
        &self.0
    }
}

impl From<DateTime<FixedOffset>> for Timestamp {
    fn from(value: DateTime<FixedOffset>) -> Self {
        Self(value)
    }
}

impl FromStr for Timestamp {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Timestamp {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Timestamp> for String {
    fn from(value: Timestamp) -> Self {
        value.to_string()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }
}

/// Formats a date as its `YYYY-MM-DD` key.
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_KEY_FORMAT).to_string()
}

/// ## Summary
/// Parses a `YYYY-MM-DD` date key.
///
/// ## Errors
/// Returns `CoreError::ParseError` if the text is not a valid calendar date.
pub fn parse_date(text: &str) -> CoreResult<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), DATE_KEY_FORMAT)
        .map_err(|e| CoreError::ParseError(format!("invalid date '{text}': {e}")))
}

/// Formats a clock time as `HH:MM`.
#[must_use]
pub fn format_time(time: NaiveTime) -> String {
    time.format(CLOCK_TIME_FORMAT).to_string()
}

/// ## Summary
/// Parses an `HH:MM` clock time.
///
/// ## Errors
/// Returns `CoreError::ParseError` if the text is not a valid clock time.
pub fn parse_time(text: &str) -> CoreResult<NaiveTime> {
    NaiveTime::parse_from_str(text.trim(), CLOCK_TIME_FORMAT)
        .map_err(|e| CoreError::ParseError(format!("invalid time '{text}': {e}")))
}

/// Formats a clock time for display, e.g. `14:05` or `2:05 PM`.
#[must_use]
pub fn format_display_time(time: NaiveTime, format: TimeFormat) -> String {
    match format {
        TimeFormat::TwentyFourHour => format_time(time),
        TimeFormat::TwelveHour => time.format("%-I:%M %p").to_string(),
    }
}

#[must_use]
pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    date + TimeDelta::days(days)
}

#[must_use]
pub fn add_weeks(date: NaiveDate, weeks: i64) -> NaiveDate {
    date + TimeDelta::weeks(weeks)
}

/// Shifts by whole months, clamping the day to the target month's length
/// (Jan 31 + 1 month = Feb 28/29). Saturates to `date` outside chrono's range.
#[must_use]
pub fn add_months(date: NaiveDate, months: i32) -> NaiveDate {
    let delta = Months::new(months.unsigned_abs());
    let shifted = if months >= 0 {
        date.checked_add_months(delta)
    } else {
        date.checked_sub_months(delta)
    };
    shifted.unwrap_or(date)
}

#[must_use]
pub fn add_minutes(timestamp: Timestamp, minutes: i64) -> Timestamp {
    Timestamp(timestamp.0 + TimeDelta::minutes(minutes))
}

/// Number of days between the week's first weekday and `weekday`.
fn days_into_week(weekday: Weekday, week_start: WeekStart) -> u32 {
    (weekday.num_days_from_monday() + 7 - week_start.weekday().num_days_from_monday()) % 7
}

#[must_use]
pub fn start_of_week(date: NaiveDate, week_start: WeekStart) -> NaiveDate {
    add_days(
        date,
        -i64::from(days_into_week(date.weekday(), week_start)),
    )
}

#[must_use]
pub fn end_of_week(date: NaiveDate, week_start: WeekStart) -> NaiveDate {
    add_days(start_of_week(date, week_start), 6)
}

#[must_use]
pub fn start_of_month(date: NaiveDate) -> NaiveDate {
    add_days(date, -i64::from(date.day0()))
}

#[must_use]
pub fn end_of_month(date: NaiveDate) -> NaiveDate {
    add_days(start_of_month(date), i64::from(days_in_month(date)) - 1)
}

#[must_use]
pub fn days_in_month(date: NaiveDate) -> u32 {
    match date.month() {
        2 if date.leap_year() => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

#[must_use]
pub fn is_same_day(a: NaiveDate, b: NaiveDate) -> bool {
    a == b
}

#[must_use]
pub fn is_same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

#[must_use]
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// `today` is supplied by the caller; nothing in this crate reads the clock.
#[must_use]
pub fn is_today(date: NaiveDate, today: NaiveDate) -> bool {
    date == today
}

/// ISO-8601 week number (weeks start Monday, week 1 holds the first Thursday).
#[must_use]
pub fn iso_week_number(date: NaiveDate) -> u32 {
    date.iso_week().week()
}

/// Every calendar day from `start` to `end`, inclusive. Empty when `end < start`.
#[must_use]
pub fn dates_in_range(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    start.iter_days().take_while(|day| *day <= end).collect()
}

/// Six week rows covering the month of `date`, starting on the week that holds the 1st.
#[must_use]
pub fn month_grid(date: NaiveDate, week_start: WeekStart) -> Vec<NaiveDate> {
    start_of_week(start_of_month(date), week_start)
        .iter_days()
        .take(MONTH_GRID_DAYS)
        .collect()
}

/// The seven days of the week holding `date`.
#[must_use]
pub fn week_grid(date: NaiveDate, week_start: WeekStart) -> Vec<NaiveDate> {
    start_of_week(date, week_start)
        .iter_days()
        .take(DAYS_PER_WEEK)
        .collect()
}

/// Half-hour slot labels from `start_hour` (inclusive) to `end_hour` (exclusive).
#[must_use]
pub fn generate_time_slots(start_hour: u32, end_hour: u32) -> Vec<String> {
    (start_hour..end_hour.min(24))
        .flat_map(|hour| {
            (0..60)
                .step_by(TIME_SLOT_INTERVAL_MINUTES)
                .map(move |minute| format!("{hour:02}:{minute:02}"))
        })
        .collect()
}

/// Clock time reduced to whole minutes since midnight.
#[must_use]
pub fn minutes_since_midnight(time: NaiveTime) -> i64 {
    i64::from(time.hour()) * 60 + i64::from(time.minute())
}
