//! Headless testing helpers: Pilot, snapshot rendering.
//!
//! Use the [`Pilot`] to drive a composite picker with synthetic input and a
//! hand-advanced clock. Use [`render_to_string`] and related helpers to
//! capture widget output as plain text for snapshot-style assertions.

pub mod pilot;
pub mod snapshot;

pub use pilot::Pilot;
pub use snapshot::{render_to_string, strips_to_string};
