//! Pilot: programmatic interaction with a headless picker.
//!
//! The `Pilot` owns an [`Interactive`] widget, the region it is drawn in and a
//! clock that only moves when told to. It simulates key presses, clicks and
//! wheel scrolls, advances time to fire snaps, and renders to text.

use std::time::Duration;

use tokio::time::Instant;

use crate::event::input::{InputEvent, Key, KeyEvent, Modifiers, MouseAction, MouseEvent};
use crate::geometry::Region;
use crate::widget::Interactive;

use super::snapshot::strips_to_string;

// ---------------------------------------------------------------------------
// Pilot
// ---------------------------------------------------------------------------

/// A headless driver for testing composite pickers.
///
/// # Examples
///
/// ```
/// use shift_picker::event::Key;
/// use shift_picker::testing::Pilot;
/// use shift_picker::{TimePicker, TimePickerConfig};
///
/// let picker = TimePicker::mount("07:00", TimePickerConfig::default(), |_| {}).unwrap();
/// let mut pilot = Pilot::new(picker);
/// pilot.press_key(Key::Down);
/// assert_eq!(pilot.widget().value().to_string(), "08:00");
/// ```
pub struct Pilot<W: Interactive> {
    widget: W,
    region: Region,
    now: Instant,
}

impl<W: Interactive> Pilot<W> {
    /// Drive `widget` in a region of its preferred size at the origin.
    pub fn new(widget: W) -> Self {
        let (width, height) = widget.preferred_size();
        Self::with_region(widget, Region::new(0, 0, width, height))
    }

    /// Drive `widget` in an explicit region.
    pub fn with_region(widget: W, region: Region) -> Self {
        Self {
            widget,
            region,
            now: Instant::now(),
        }
    }

    // ── Input simulation ─────────────────────────────────────────────

    /// Simulate a key press with no modifiers. Returns whether it was consumed.
    pub fn press_key(&mut self, key: Key) -> bool {
        self.press_key_with(key, Modifiers::NONE)
    }

    /// Simulate a key press with the given modifiers.
    pub fn press_key_with(&mut self, key: Key, modifiers: Modifiers) -> bool {
        self.send(InputEvent::Key(KeyEvent::new(key, modifiers)))
    }

    /// Simulate a left-button click at (x, y).
    pub fn click(&mut self, x: u16, y: u16) -> bool {
        self.send(InputEvent::Mouse(MouseEvent::new(MouseAction::Click, x, y)))
    }

    /// Simulate `notches` wheel steps at (x, y); positive scrolls down.
    pub fn wheel(&mut self, x: u16, y: u16, notches: i32) -> bool {
        let kind = if notches < 0 {
            MouseAction::ScrollUp
        } else {
            MouseAction::ScrollDown
        };
        let mut consumed = false;
        for _ in 0..notches.unsigned_abs() {
            consumed |= self.send(InputEvent::Mouse(MouseEvent::new(kind, x, y)));
        }
        consumed
    }

    /// Deliver an arbitrary input event at the current time.
    pub fn send(&mut self, event: InputEvent) -> bool {
        self.widget.handle_input(&event, self.region, self.now)
    }

    // ── Clock ────────────────────────────────────────────────────────

    /// Move the clock forward and fire any snaps that became due. Returns
    /// how many fired.
    pub fn advance(&mut self, by: Duration) -> usize {
        self.now += by;
        self.widget.tick(self.now)
    }

    pub fn now(&self) -> Instant {
        self.now
    }

    // ── Query ────────────────────────────────────────────────────────

    pub fn widget(&self) -> &W {
        &self.widget
    }

    pub fn widget_mut(&mut self) -> &mut W {
        &mut self.widget
    }

    pub fn region(&self) -> Region {
        self.region
    }

    /// Give the widget back.
    pub fn into_inner(self) -> W {
        self.widget
    }

    /// Render the widget to plain text. See
    /// [`render_to_string`](super::render_to_string).
    pub fn render(&self) -> String {
        let strips = self.widget.render(self.region);
        strips_to_string(&strips, self.region.right(), self.region.bottom())
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TimePickerConfig;
    use crate::widgets::{TimeField, TimePicker};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn pilot(value: &str) -> (Pilot<TimePicker>, Rc<RefCell<Vec<String>>>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = log.clone();
        let picker = TimePicker::mount(value, TimePickerConfig::default(), move |v| {
            sink.borrow_mut().push(v)
        })
        .unwrap();
        (Pilot::new(picker), log)
    }

    #[test]
    fn new_uses_preferred_size() {
        let (pilot, _) = pilot("07:00");
        assert_eq!(pilot.region(), Region::new(0, 0, 5, 5));
    }

    #[test]
    fn unbound_keys_are_not_consumed() {
        let (mut pilot, log) = pilot("07:00");
        assert!(!pilot.press_key(Key::Char('x')));
        assert!(!pilot.press_key_with(Key::Down, Modifiers::ALT));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn wheel_defers_snap_until_clock_advances() {
        let (mut pilot, log) = pilot("07:00");
        assert!(pilot.wheel(0, 2, 3));
        assert_eq!(*log.borrow(), vec!["08:00", "09:00", "10:00"]);
        assert!(pilot.widget().hour().has_pending_snap());

        assert_eq!(pilot.advance(Duration::from_millis(9)), 0);
        assert_eq!(pilot.advance(Duration::from_millis(1)), 1);
        assert_eq!(pilot.widget().hour().offset(), 10.0);
    }

    #[test]
    fn wheel_up_on_minutes() {
        let (mut pilot, log) = pilot("07:30");
        pilot.wheel(4, 2, -2);
        assert_eq!(pilot.widget().focus(), TimeField::Minute);
        assert_eq!(log.borrow().last().map(String::as_str), Some("07:20"));
    }

    #[test]
    fn wheel_outside_any_column() {
        let (mut pilot, _) = pilot("07:00");
        assert!(!pilot.wheel(2, 2, 1));
        assert!(!pilot.wheel(0, 7, 1));
    }

    #[test]
    fn render_follows_clicks() {
        let (mut pilot, _) = pilot("07:00");
        pilot.click(1, 0);
        insta::assert_snapshot!(pilot.render(), @r"
03
04
05:00
06 05
07 10
");
    }

    #[test]
    fn into_inner_returns_widget() {
        let (mut pilot, _) = pilot("07:00");
        pilot.press_key(Key::End);
        let picker = pilot.into_inner();
        assert_eq!(picker.value().to_string(), "23:00");
    }
}
