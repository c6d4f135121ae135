//! Widget traits: render, focus, input.
//!
//! Every picker knows its type name and how to render itself into strips
//! within a region. Object-safe so hosts can keep heterogeneous pickers in one
//! form.

use tokio::time::Instant;

use crate::event::input::InputEvent;
use crate::geometry::Region;
use crate::render::strip::Strip;

/// Core trait implemented by all pickers.
pub trait Widget {
    /// Type name, e.g. `"TimePicker"`.
    fn widget_type(&self) -> &str;

    /// Render into strips within `region`.
    fn render(&self, region: Region) -> Vec<Strip>;

    /// Natural size in cells, `(width, height)`.
    fn preferred_size(&self) -> (i32, i32);

    /// Whether the widget takes keyboard focus. Defaults to `false`.
    fn can_focus(&self) -> bool {
        false
    }
}

/// A widget driven by input events and a clock.
///
/// Implemented by the composite pickers so hosts (and the test
/// [`Pilot`](crate::testing::Pilot)) can drive them uniformly.
pub trait Interactive: Widget {
    /// Route an input event; `region` is where the widget was last rendered.
    fn handle_input(&mut self, event: &InputEvent, region: Region, now: Instant) -> bool;

    /// Fire every snap due at `now`. Returns how many fired.
    fn tick(&mut self, now: Instant) -> usize;
}
