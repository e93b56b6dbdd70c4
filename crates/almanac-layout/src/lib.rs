//! Calendar event layout engine.
//!
//! Groups events by day, assigns overlapping timed events to side-by-side columns
//! and packs all-day or multi-day events into week tracks.

pub mod date;
pub mod event;
pub mod processor;
pub mod schedule;
pub mod timed;
pub mod track;
pub mod view;

pub use date::Timestamp;
pub use event::Event;
pub use processor::{DayBucket, EventProcessor, ProcessedEvents, process, process_range};
pub use timed::{TimedLayout, compute_columns};
pub use track::{DayCell, EventLayout, compute_week_layout};
pub use view::{CalendarCell, CalendarMonth, CalendarWeek, ViewContext};
