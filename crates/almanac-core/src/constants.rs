/// `chrono` format strings shared across crates
pub const DATE_KEY_FORMAT: &str = "%Y-%m-%d";
pub const CLOCK_TIME_FORMAT: &str = "%H:%M";
/// Naive `YYYY-MM-DDTHH:MM`, accepted alongside RFC 3339 timestamps
pub const LOCAL_DATE_TIME_SHORT_FORMAT: &str =
    const_str::concat!(DATE_KEY_FORMAT, "T", CLOCK_TIME_FORMAT);

/// Grid dimensions
pub const DAYS_PER_WEEK: usize = 7;
pub const MONTH_GRID_WEEKS: usize = 6;
pub const MONTH_GRID_DAYS: usize = DAYS_PER_WEEK * MONTH_GRID_WEEKS;

/// Timed layout geometry
pub const FULL_WIDTH_PERCENT: f64 = 100.0;
pub const BASE_Z_INDEX: u32 = 10;

/// An event lasting at least this many hours counts as all-day.
pub const ALL_DAY_MIN_HOURS: i64 = 24;

/// Scheduling defaults
pub const MIN_EVENT_DURATION_MINUTES: i64 = 15;
pub const DEFAULT_EVENT_DURATION_MINUTES: i64 = 60;
pub const DEFAULT_SLOT_START: &str = "09:00";
pub const DEFAULT_SLOT_END: &str = "10:00";
pub const TIME_SLOT_INTERVAL_MINUTES: usize = 30;
