//! # shift-picker
//!
//! Scroll-driven discrete value pickers for the time and date fields of a
//! shift-scheduling form.
//!
//! A picker column maps a continuous scroll offset onto a quantized value,
//! snaps the surface back onto the item grid once scrolling settles, and the
//! composite pickers keep their columns consistent (hour/minute, or
//! year/month/day) while reporting changes to the host form without echoing
//! the value they were mounted with.
//!
//! ## Core Systems
//!
//! - **[`axis`]**: Quantized axis: ordered values plus offset <-> index mapping
//! - **[`widget`]**: Widget trait, composite lifecycle phases, scroll surface, snap timer
//! - **[`widgets`]**: Pickers: [`AxisPicker`](widgets::AxisPicker), [`TimePicker`](widgets::TimePicker), [`DatePicker`](widgets::DatePicker)
//! - **[`value`]**: `HH:MM` time values and calendar-date helpers
//! - **[`reactive`]**: Signals and effects the composites observe their columns through
//! - **[`event`]**: Input events decoupled from crossterm
//! - **[`render`]**: Styled strips produced by widgets
//! - **[`testing`]**: Headless `Pilot` and plain-text rendering for snapshot assertions
//! - **[`config`]**: Builder-style picker configuration
//! - **[`error`]**: Error types

// Foundation
pub mod error;
pub mod geometry;
pub mod config;
pub mod value;

// Core
pub mod axis;
pub mod reactive;

// Widget system
pub mod widget;
pub mod widgets;

// Input and output
pub mod event;
pub mod render;
pub mod testing;

pub use axis::Axis;
pub use config::{AxisConfig, DatePickerConfig, TimePickerConfig};
pub use error::{AxisError, PickerError};
pub use value::TimeOfDay;
pub use widgets::{AxisPicker, DateField, DatePicker, TimeField, TimePicker};
