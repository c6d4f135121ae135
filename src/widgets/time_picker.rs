//! TimePicker: hour and minute columns behind one `HH:MM` value.
//!
//! The picker is mounted with the host's value, initializes both columns from
//! it without reporting anything, and from then on reports every change of
//! the combined value that differs from what the host last held.

use std::cell::RefCell;
use std::rc::Rc;

use tokio::time::Instant;
use tracing::debug;

use crate::config::TimePickerConfig;
use crate::error::PickerError;
use crate::event::binding::{KeyBindingRegistry, PickerAction};
use crate::event::input::InputEvent;
use crate::geometry::Region;
use crate::reactive::{batch, create_effect_with_id, dispose_effect, EffectId};
use crate::render::strip::{CellStyle, Strip};
use crate::value::time::{parse_time_parts, TimeOfDay};
use crate::widget::lifecycle::{Lifecycle, LifecycleEvent, SyncPhase};
use crate::widget::snap::Snap;
use crate::widget::traits::{Interactive, Widget};

use super::axis_picker::{AxisPicker, DEFAULT_VISIBLE_ROWS};
use super::composite::{column_at, cycle, latest_deadline, ChangeCallback};

const HOUR_DX: i32 = 0;
const SEPARATOR_DX: i32 = 2;
const MINUTE_DX: i32 = 3;
const WIDTH: i32 = 5;

/// A column of the time picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeField {
    Hour,
    Minute,
}

const FIELD_ORDER: [TimeField; 2] = [TimeField::Hour, TimeField::Minute];

// ---------------------------------------------------------------------------
// TimePicker
// ---------------------------------------------------------------------------

/// Hour/minute picker reporting `HH:MM` strings.
///
/// # Examples
///
/// ```
/// use std::cell::RefCell;
/// use std::rc::Rc;
/// use shift_picker::{TimeField, TimePicker, TimePickerConfig};
///
/// let emitted = Rc::new(RefCell::new(Vec::new()));
/// let sink = emitted.clone();
/// let mut picker = TimePicker::mount("07:00", TimePickerConfig::default(), move |v| {
///     sink.borrow_mut().push(v)
/// })
/// .unwrap();
/// assert!(emitted.borrow().is_empty());
///
/// picker.select(TimeField::Minute, 30);
/// assert_eq!(*emitted.borrow(), vec!["07:30".to_string()]);
/// ```
pub struct TimePicker {
    hour: AxisPicker<u8>,
    minute: AxisPicker<u8>,
    lifecycle: Lifecycle,
    /// The value the host holds: the mounted string, then each emitted one.
    committed: Rc<RefCell<String>>,
    effect: EffectId,
    focus: TimeField,
    bindings: KeyBindingRegistry,
    config: TimePickerConfig,
}

impl TimePicker {
    /// Create an unsynchronized picker. Nothing is reported until
    /// [`receive`](Self::receive) has applied the host's value.
    pub fn new(
        config: TimePickerConfig,
        on_change: impl FnMut(String) + 'static,
    ) -> Result<Self, PickerError> {
        let step = config.effective_minute_step() as usize;
        let mut hour = AxisPicker::from_values((0..24).collect(), &config.axis)?;
        let minute = AxisPicker::from_values((0..60).step_by(step).collect(), &config.axis)?;
        hour.set_focused(true);

        let lifecycle = Lifecycle::new();
        let committed = Rc::new(RefCell::new(String::new()));
        let effect = Self::watch(&hour, &minute, &lifecycle, &committed, Box::new(on_change));

        Ok(Self {
            hour,
            minute,
            lifecycle,
            committed,
            effect,
            focus: TimeField::Hour,
            bindings: KeyBindingRegistry::with_defaults(),
            config,
        })
    }

    /// Create a picker and synchronize it with `value` in one go.
    pub fn mount(
        value: &str,
        config: TimePickerConfig,
        on_change: impl FnMut(String) + 'static,
    ) -> Result<Self, PickerError> {
        let mut picker = Self::new(config, on_change)?;
        picker.receive(value);
        Ok(picker)
    }

    /// Observe both columns; report combined changes while live.
    fn watch(
        hour: &AxisPicker<u8>,
        minute: &AxisPicker<u8>,
        lifecycle: &Lifecycle,
        committed: &Rc<RefCell<String>>,
        mut on_change: ChangeCallback<String>,
    ) -> EffectId {
        let (hour, minute) = (hour.selected_signal(), minute.selected_signal());
        let phase = lifecycle.handle();
        let committed = Rc::clone(committed);

        create_effect_with_id(move || {
            // Read both first so the effect stays subscribed in every phase.
            let (Some(h), Some(m)) = (hour.try_get(), minute.try_get()) else {
                return;
            };
            if !phase.is_live() {
                return;
            }
            let Some(value) = TimeOfDay::new(h, m) else {
                return;
            };
            let value = value.to_string();
            if *committed.borrow() == value {
                return;
            }
            *committed.borrow_mut() = value.clone();
            debug!(%value, "time picker changed");
            on_change(value);
        })
    }

    // ── Host value ───────────────────────────────────────────────────

    /// Apply the host's `HH:MM` value. Only the first call has any effect.
    ///
    /// Missing or non-numeric parts take the configured default; numeric
    /// parts that are not on their column fall back to the column's first
    /// value. Returns whether the value was applied.
    pub fn receive(&mut self, value: &str) -> bool {
        if !self.lifecycle.begin_sync() {
            debug!(value, phase = ?self.lifecycle.phase(), "host value after mount ignored");
            return false;
        }
        *self.committed.borrow_mut() = value.to_owned();

        let default = self.config.default_time;
        let (hour, minute) = parse_time_parts(value);
        let hour = hour.unwrap_or(default.hour());
        let minute = minute.unwrap_or(default.minute());
        batch(|| {
            self.hour.initialize(&hour);
            self.minute.initialize(&minute);
        });

        self.lifecycle.finish_sync();
        debug!(value, shown = %self.value(), "time picker synchronized");
        true
    }

    /// The time the columns currently show.
    pub fn value(&self) -> TimeOfDay {
        TimeOfDay::new(self.hour.selected(), self.minute.selected()).unwrap_or_default()
    }

    /// The value the host holds (mounted or last emitted).
    pub fn committed(&self) -> String {
        self.committed.borrow().clone()
    }

    pub fn phase(&self) -> SyncPhase {
        self.lifecycle.phase()
    }

    /// Drain recorded lifecycle events.
    pub fn lifecycle_events(&mut self) -> Vec<LifecycleEvent> {
        self.lifecycle.pending_events()
    }

    // ── Columns ──────────────────────────────────────────────────────

    pub fn hour(&self) -> &AxisPicker<u8> {
        &self.hour
    }

    pub fn minute(&self) -> &AxisPicker<u8> {
        &self.minute
    }

    fn column_mut(&mut self, field: TimeField) -> &mut AxisPicker<u8> {
        match field {
            TimeField::Hour => &mut self.hour,
            TimeField::Minute => &mut self.minute,
        }
    }

    pub fn focus(&self) -> TimeField {
        self.focus
    }

    pub fn set_focus(&mut self, field: TimeField) {
        self.focus = field;
        self.hour.set_focused(field == TimeField::Hour);
        self.minute.set_focused(field == TimeField::Minute);
    }

    /// Replace the key bindings.
    pub fn set_bindings(&mut self, bindings: KeyBindingRegistry) {
        self.bindings = bindings;
    }

    // ── Interaction ──────────────────────────────────────────────────

    /// Report a raw scroll offset for one column.
    pub fn scroll(&mut self, field: TimeField, raw_offset: f64, now: Instant) -> bool {
        batch(|| self.column_mut(field).on_scroll(raw_offset, now))
    }

    /// Select a value directly (tap). `None` when the value is not on the column.
    pub fn select(&mut self, field: TimeField, value: u8) -> Option<Snap> {
        batch(|| self.column_mut(field).select_direct(&value))
    }

    /// Move one column's selection by `delta` items.
    pub fn step(&mut self, field: TimeField, delta: i32) -> Snap {
        batch(|| self.column_mut(field).step(delta))
    }

    /// Fire every snap whose deadline has passed at `now`.
    pub fn tick(&mut self, now: Instant) -> Vec<(TimeField, Snap)> {
        FIELD_ORDER
            .into_iter()
            .filter_map(|field| self.column_mut(field).tick(now).map(|snap| (field, snap)))
            .collect()
    }

    /// Wait until every pending snap is due, then fire them.
    pub async fn settle(&mut self) -> Vec<(TimeField, Snap)> {
        let deadline = latest_deadline([
            self.hour.snap_timer().deadline(),
            self.minute.snap_timer().deadline(),
        ]);
        match deadline {
            Some(deadline) => {
                tokio::time::sleep_until(deadline).await;
                self.tick(Instant::now())
            }
            None => Vec::new(),
        }
    }

    fn columns(region: Region) -> [(TimeField, Region); 2] {
        [
            (TimeField::Hour, region.column(HOUR_DX, 2)),
            (TimeField::Minute, region.column(MINUTE_DX, 2)),
        ]
    }

    /// Route an input event; `region` is where the picker was rendered.
    /// Returns whether the event was consumed.
    pub fn handle_input(&mut self, event: &InputEvent, region: Region, now: Instant) -> bool {
        match event {
            InputEvent::Key(key) => {
                let Some(action) = self.bindings.resolve(key) else {
                    return false;
                };
                match action {
                    PickerAction::FocusNext => self.set_focus(cycle(&FIELD_ORDER, self.focus, 1)),
                    PickerAction::FocusPrevious => {
                        self.set_focus(cycle(&FIELD_ORDER, self.focus, -1))
                    }
                    action => {
                        let field = self.focus;
                        batch(|| self.column_mut(field).apply(action));
                    }
                }
                true
            }
            InputEvent::Mouse(mouse) => {
                let columns = Self::columns(region);
                let Some(field) = column_at(&columns, mouse.x as i32, mouse.y as i32) else {
                    return false;
                };
                let column = match field {
                    TimeField::Hour => columns[0].1,
                    TimeField::Minute => columns[1].1,
                };
                self.set_focus(field);
                batch(|| self.column_mut(field).handle_mouse(mouse, column, now))
            }
            InputEvent::Ignored => false,
        }
    }

    /// Tear the picker down. Pending snaps are dropped and nothing is
    /// reported afterwards. Returns the final lifecycle events.
    pub fn unmount(mut self) -> Vec<LifecycleEvent> {
        self.teardown();
        self.lifecycle.pending_events()
    }

    fn teardown(&mut self) {
        self.lifecycle.unmount();
        dispose_effect(self.effect);
        self.hour.cancel_snap();
        self.minute.cancel_snap();
    }
}

impl Drop for TimePicker {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl Widget for TimePicker {
    fn widget_type(&self) -> &str {
        "TimePicker"
    }

    fn render(&self, region: Region) -> Vec<Strip> {
        if region.is_empty() {
            return Vec::new();
        }
        let [(_, hour), (_, minute)] = Self::columns(region);
        let mut strips = self.hour.render(hour);
        strips.extend(self.minute.render(minute));

        let separator = region.column(SEPARATOR_DX, 1);
        if !separator.is_empty() {
            let mut strip = Strip::new(region.center_row(), separator.x);
            strip.push(':', CellStyle::new());
            strips.push(strip);
        }
        strips
    }

    fn preferred_size(&self) -> (i32, i32) {
        (WIDTH, DEFAULT_VISIBLE_ROWS)
    }

    fn can_focus(&self) -> bool {
        true
    }
}

impl Interactive for TimePicker {
    fn handle_input(&mut self, event: &InputEvent, region: Region, now: Instant) -> bool {
        TimePicker::handle_input(self, event, region, now)
    }

    fn tick(&mut self, now: Instant) -> usize {
        TimePicker::tick(self, now).len()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AxisConfig;
    use crate::event::input::{Key, KeyEvent, MouseAction, MouseEvent};
    use crate::testing::render_to_string;
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    type Log = Rc<RefCell<Vec<String>>>;

    fn mounted(value: &str) -> (TimePicker, Log) {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let sink = log.clone();
        let picker = TimePicker::mount(value, TimePickerConfig::default(), move |v| {
            sink.borrow_mut().push(v)
        })
        .unwrap();
        (picker, log)
    }

    #[test]
    fn mount_initializes_columns_silently() {
        let (picker, log) = mounted("23:45");
        assert_eq!(picker.hour().selected(), 23);
        assert_eq!(picker.minute().selected(), 45);
        assert_eq!(picker.value().to_string(), "23:45");
        assert_eq!(picker.phase(), SyncPhase::Live);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn nothing_is_reported_before_receive() {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let sink = log.clone();
        let mut picker =
            TimePicker::new(TimePickerConfig::default(), move |v| sink.borrow_mut().push(v))
                .unwrap();
        assert_eq!(picker.phase(), SyncPhase::Uninitialized);
        picker.select(TimeField::Hour, 9);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn partial_input_keeps_defaults() {
        let (picker, _) = mounted("09");
        assert_eq!(picker.value().to_string(), "09:00");
        let (picker, _) = mounted("");
        assert_eq!(picker.value().to_string(), "07:00");
        let (picker, _) = mounted(":25");
        assert_eq!(picker.value().to_string(), "07:25");
    }

    #[test]
    fn off_grid_parts_fall_back_to_first_value() {
        let (picker, log) = mounted("25:07");
        assert_eq!(picker.value().to_string(), "00:00");
        assert_eq!(picker.committed(), "25:07");
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn scroll_emits_combined_value() {
        let t0 = Instant::now();
        let (mut picker, log) = mounted("07:00");
        // Minute column item extent is 1.0; index 6 is 30.
        picker.scroll(TimeField::Minute, 6.2, t0);
        assert_eq!(*log.borrow(), vec!["07:30"]);
        assert_eq!(picker.committed(), "07:30");
    }

    #[test]
    fn unchanged_value_is_not_reemitted() {
        let t0 = Instant::now();
        let (mut picker, log) = mounted("07:00");
        picker.scroll(TimeField::Hour, 8.0, t0);
        picker.scroll(TimeField::Hour, 8.3, t0);
        picker.scroll(TimeField::Hour, 7.9, t0);
        assert_eq!(*log.borrow(), vec!["08:00"]);
    }

    #[test]
    fn each_distinct_value_is_emitted() {
        let (mut picker, log) = mounted("07:00");
        picker.select(TimeField::Hour, 8);
        picker.select(TimeField::Hour, 7);
        assert_eq!(*log.borrow(), vec!["08:00", "07:00"]);
    }

    #[test]
    fn later_host_values_are_ignored() {
        let (mut picker, log) = mounted("07:00");
        let _ = picker.lifecycle_events();
        assert!(!picker.receive("12:00"));
        assert_eq!(picker.value().to_string(), "07:00");
        assert_eq!(picker.lifecycle_events(), vec![LifecycleEvent::ResyncIgnored]);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn tick_reports_due_snaps() {
        let t0 = Instant::now();
        let (mut picker, _) = mounted("07:00");
        picker.scroll(TimeField::Hour, 9.4, t0);
        assert!(picker.tick(t0).is_empty());
        let snaps = picker.tick(t0 + Duration::from_millis(10));
        assert_eq!(snaps, vec![(TimeField::Hour, Snap { index: 9, offset: 9.0 })]);
    }

    #[tokio::test(start_paused = true)]
    async fn settle_waits_for_both_columns() {
        let (mut picker, log) = mounted("07:00");
        let t0 = Instant::now();
        picker.scroll(TimeField::Hour, 10.4, t0);
        picker.scroll(TimeField::Minute, 2.6, t0 + Duration::from_millis(3));
        let snaps = picker.settle().await;
        assert_eq!(snaps.len(), 2);
        assert_eq!(picker.hour().offset(), 10.0);
        assert_eq!(picker.minute().offset(), 3.0);
        assert_eq!(log.borrow().last().map(String::as_str), Some("10:15"));
    }

    #[test]
    fn keyboard_moves_focus_and_steps() {
        let t0 = Instant::now();
        let region = Region::new(0, 0, 5, 5);
        let (mut picker, log) = mounted("07:00");
        assert_eq!(picker.focus(), TimeField::Hour);

        let down = InputEvent::Key(KeyEvent::plain(Key::Down));
        assert!(picker.handle_input(&down, region, t0));
        assert_eq!(*log.borrow(), vec!["08:00"]);

        let tab = InputEvent::Key(KeyEvent::plain(Key::Tab));
        assert!(picker.handle_input(&tab, region, t0));
        assert_eq!(picker.focus(), TimeField::Minute);
        assert!(picker.minute().is_focused());
        assert!(!picker.hour().is_focused());

        let end = InputEvent::Key(KeyEvent::plain(Key::End));
        picker.handle_input(&end, region, t0);
        assert_eq!(log.borrow().last().map(String::as_str), Some("08:55"));

        let unbound = InputEvent::Key(KeyEvent::plain(Key::Enter));
        assert!(!picker.handle_input(&unbound, region, t0));
    }

    #[test]
    fn mouse_routes_to_column_under_pointer() {
        let t0 = Instant::now();
        let region = Region::new(0, 0, 5, 5);
        let (mut picker, log) = mounted("07:00");

        // Minute column spans x = 3..5; row 4 is two items below the center.
        let click = InputEvent::Mouse(MouseEvent::new(MouseAction::Click, 4, 4));
        assert!(picker.handle_input(&click, region, t0));
        assert_eq!(picker.focus(), TimeField::Minute);
        assert_eq!(*log.borrow(), vec!["07:10"]);

        // The separator column belongs to nobody.
        let on_separator = InputEvent::Mouse(MouseEvent::new(MouseAction::Click, 2, 2));
        assert!(!picker.handle_input(&on_separator, region, t0));
    }

    #[test]
    fn unmount_stops_reporting() {
        let (picker, log) = mounted("07:00");
        let signal = picker.hour().selected_signal();
        let events = picker.unmount();
        assert!(events.contains(&LifecycleEvent::Unmount));
        assert_eq!(signal.try_get(), None);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn wider_item_extent() {
        let t0 = Instant::now();
        let config = TimePickerConfig::new()
            .with_axis(AxisConfig::new().with_item_extent(40.0))
            .with_minute_step(15);
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let sink = log.clone();
        let mut picker =
            TimePicker::mount("06:45", config, move |v| sink.borrow_mut().push(v)).unwrap();
        assert_eq!(picker.minute().offset(), 120.0);
        picker.scroll(TimeField::Minute, 59.0, t0);
        assert_eq!(*log.borrow(), vec!["06:15"]);
    }

    #[test]
    fn renders_columns_with_separator() {
        let (picker, _) = mounted("07:00");
        insta::assert_snapshot!(render_to_string(&picker, 5, 3), @r"
06
07:00
08 05
");
    }
}
