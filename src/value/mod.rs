//! Picker values: `HH:MM` times and calendar-date helpers.
//!
//! - [`TimeOfDay`]: hour/minute pair serialized as `HH:MM`.
//! - [`days_in_month`]: cardinality of the day column.
//! - [`clamp_date`]: build a date, clamping the day down into the month.

pub mod date;
pub mod time;

pub use date::{clamp_date, days_in_month, parse_date, parse_date_lenient};
pub use time::{parse_time_parts, TimeOfDay};
