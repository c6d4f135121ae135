//! Picker configuration.
//!
//! Builder-style structs with sensible defaults. Every picker takes its
//! config by value at construction; nothing here is mutated afterwards.

use std::time::Duration;

use chrono::NaiveDate;

use crate::value::TimeOfDay;

/// Default quiet period after the last scroll event before a snap commits.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(10);

// ---------------------------------------------------------------------------
// AxisConfig
// ---------------------------------------------------------------------------

/// Configuration shared by every picker column.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisConfig {
    /// Display length of one item, in the host's scroll units.
    pub item_extent: f64,
    /// Quiet period after the last scroll before snapping.
    pub settle_delay: Duration,
}

impl Default for AxisConfig {
    fn default() -> Self {
        Self {
            item_extent: 1.0,
            settle_delay: DEFAULT_SETTLE_DELAY,
        }
    }
}

impl AxisConfig {
    /// Create a new default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the item extent (builder).
    pub fn with_item_extent(mut self, item_extent: f64) -> Self {
        self.item_extent = item_extent;
        self
    }

    /// Set the settle delay (builder).
    pub fn with_settle_delay(mut self, settle_delay: Duration) -> Self {
        self.settle_delay = settle_delay;
        self
    }
}

// ---------------------------------------------------------------------------
// TimePickerConfig
// ---------------------------------------------------------------------------

/// Configuration for [`TimePicker`](crate::widgets::TimePicker).
#[derive(Debug, Clone, PartialEq)]
pub struct TimePickerConfig {
    pub axis: AxisConfig,
    /// Spacing of the minute column. Must divide 60; other values fall back to 5.
    pub minute_step: u8,
    /// Value used for the parts of an inbound string that fail to parse.
    pub default_time: TimeOfDay,
}

impl Default for TimePickerConfig {
    fn default() -> Self {
        Self {
            axis: AxisConfig::default(),
            minute_step: 5,
            default_time: TimeOfDay::DEFAULT,
        }
    }
}

impl TimePickerConfig {
    /// Create a new default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the column config (builder).
    pub fn with_axis(mut self, axis: AxisConfig) -> Self {
        self.axis = axis;
        self
    }

    /// Set the minute step (builder).
    pub fn with_minute_step(mut self, minute_step: u8) -> Self {
        self.minute_step = minute_step;
        self
    }

    /// Set the default time (builder).
    pub fn with_default_time(mut self, default_time: TimeOfDay) -> Self {
        self.default_time = default_time;
        self
    }

    /// The minute step actually used for the minute column.
    pub fn effective_minute_step(&self) -> u8 {
        match self.minute_step {
            s @ (1 | 2 | 3 | 4 | 5 | 6 | 10 | 12 | 15 | 20 | 30) => s,
            _ => 5,
        }
    }
}

// ---------------------------------------------------------------------------
// DatePickerConfig
// ---------------------------------------------------------------------------

/// Configuration for [`DatePicker`](crate::widgets::DatePicker).
#[derive(Debug, Clone, PartialEq)]
pub struct DatePickerConfig {
    pub axis: AxisConfig,
    /// Years shown before the initial year when no minimum date is set.
    pub years_before: i32,
    /// Years shown after the initial year.
    pub years_after: i32,
    /// Inclusive lower bound. Advisory: it only moves the start of the year
    /// column.
    pub min_date: Option<NaiveDate>,
}

impl Default for DatePickerConfig {
    fn default() -> Self {
        Self {
            axis: AxisConfig::default(),
            years_before: 5,
            years_after: 5,
            min_date: None,
        }
    }
}

impl DatePickerConfig {
    /// Create a new default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the column config (builder).
    pub fn with_axis(mut self, axis: AxisConfig) -> Self {
        self.axis = axis;
        self
    }

    /// Set how many years the column spans around the initial year (builder).
    pub fn with_year_span(mut self, before: i32, after: i32) -> Self {
        self.years_before = before.max(0);
        self.years_after = after.max(0);
        self
    }

    /// Set the minimum date (builder).
    pub fn with_min_date(mut self, min_date: NaiveDate) -> Self {
        self.min_date = Some(min_date);
        self
    }
}
