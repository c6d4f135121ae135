//! Pickers: one scrollable column, and the time and date composites built
//! from columns.

pub mod axis_picker;
pub mod composite;
pub mod date_picker;
pub mod time_picker;

pub use axis_picker::{AxisPicker, DEFAULT_VISIBLE_ROWS};
pub use composite::ChangeCallback;
pub use date_picker::{DateField, DatePicker};
pub use time_picker::{TimeField, TimePicker};
