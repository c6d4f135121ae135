//! AxisPicker: one scrollable picker column.
//!
//! Owns a quantized [`Axis`], the column's scroll surface, the selected value
//! and one snap timer. Scroll reports resolve to the nearest item right away;
//! the surface itself is only moved back onto the item grid once scrolling
//! has been quiet for the settle delay. Direct selection (tap, key) snaps
//! immediately.
//!
//! The selected value is published through a signal. The column never calls
//! its owner; composites observe the signal.

use std::fmt;

use tokio::time::Instant;
use tracing::{trace, warn};

use crate::axis::{Axis, AxisLabel};
use crate::config::AxisConfig;
use crate::error::{AxisError, PickerError};
use crate::event::binding::PickerAction;
use crate::event::input::{MouseAction, MouseEvent};
use crate::geometry::Region;
use crate::reactive::{create_signal, dispose_signal, ReadSignal, WriteSignal};
use crate::render::strip::{CellStyle, Strip};
use crate::widget::scroll::ScrollState;
use crate::widget::snap::{Snap, SnapTimer};
use crate::widget::traits::Widget;

/// Rows shown by a column when the host does not say otherwise.
pub const DEFAULT_VISIBLE_ROWS: i32 = 5;

// ---------------------------------------------------------------------------
// AxisPicker
// ---------------------------------------------------------------------------

/// A single picker column over values of type `V`.
///
/// # Examples
///
/// ```
/// use shift_picker::{Axis, AxisConfig, AxisPicker};
///
/// let axis = Axis::new((0u8..24).collect(), 1.0).unwrap();
/// let mut hours = AxisPicker::new(axis, &AxisConfig::default());
/// hours.initialize(&9);
/// assert_eq!(hours.selected(), 9);
/// assert_eq!(hours.offset(), 9.0);
/// ```
pub struct AxisPicker<V: 'static> {
    axis: Axis<V>,
    scroll: ScrollState,
    index: usize,
    selected: ReadSignal<V>,
    set_selected: WriteSignal<V>,
    snap: SnapTimer,
    focused: bool,
}

impl<V> AxisPicker<V>
where
    V: Clone + PartialEq + fmt::Debug + 'static,
{
    /// Create a column showing the axis's first value.
    pub fn new(axis: Axis<V>, config: &AxisConfig) -> Self {
        let (selected, set_selected) = create_signal(axis.first().clone());
        Self {
            scroll: ScrollState::new(axis.max_offset()),
            axis,
            index: 0,
            selected,
            set_selected,
            snap: SnapTimer::new(config.settle_delay),
            focused: false,
        }
    }

    /// Build the axis from `values` with the config's item extent.
    pub fn from_values(values: Vec<V>, config: &AxisConfig) -> Result<Self, AxisError> {
        Ok(Self::new(Axis::new(values, config.item_extent)?, config))
    }

    // ── State ────────────────────────────────────────────────────────

    /// The selected value.
    pub fn selected(&self) -> V {
        self.axis.values()[self.index].clone()
    }

    /// The signal carrying the selected value.
    pub fn selected_signal(&self) -> ReadSignal<V> {
        self.selected
    }

    /// Index of the selected value.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn axis(&self) -> &Axis<V> {
        &self.axis
    }

    /// Current surface offset, aligned or not.
    pub fn offset(&self) -> f64 {
        self.scroll.offset
    }

    pub fn scroll(&self) -> &ScrollState {
        &self.scroll
    }

    pub fn snap_timer(&self) -> &SnapTimer {
        &self.snap
    }

    pub fn has_pending_snap(&self) -> bool {
        self.snap.is_pending()
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    // ── Operations ───────────────────────────────────────────────────

    /// Show `value` and move the surface to its aligned offset.
    ///
    /// Falls back to the first value when `value` is not on the axis; the
    /// fallback is logged, not reported.
    pub fn initialize(&mut self, value: &V) {
        if let Err(err) = self.try_initialize(value) {
            warn!(%err, fallback = ?self.axis.first(), "initial value not on axis");
            self.snap.cancel();
            self.set_index(0);
            self.scroll.snap_to(self.axis.offset_of(0));
        }
    }

    /// Like [`initialize`](Self::initialize), but reports a value that is not
    /// on the axis instead of falling back. State is untouched on error.
    pub fn try_initialize(&mut self, value: &V) -> Result<(), PickerError> {
        let index = self
            .axis
            .index_of(value)
            .ok_or_else(|| PickerError::ValueNotInDomain {
                value: format!("{value:?}"),
            })?;
        self.snap.cancel();
        self.set_index(index);
        self.scroll.snap_to(self.axis.offset_of(index));
        Ok(())
    }

    /// Handle a scroll report from the host.
    ///
    /// Resolves the value under `raw_offset` and (re)arms the snap timer for
    /// `now + settle_delay`. Returns whether the selected value changed.
    pub fn on_scroll(&mut self, raw_offset: f64, now: Instant) -> bool {
        self.scroll.report(raw_offset);
        let index = self.axis.resolve_index(raw_offset);
        let changed = self.set_index(index);
        let superseded = self.snap.schedule(now);
        let overscrolled = self.scroll.is_overscrolled();
        trace!(raw_offset, index, changed, superseded, overscrolled, "scroll");
        changed
    }

    /// Scroll by `delta` from the current offset. See [`on_scroll`](Self::on_scroll).
    pub fn scroll_by(&mut self, delta: f64, now: Instant) -> bool {
        self.on_scroll(self.scroll.offset + delta, now)
    }

    /// Fire the pending snap if its deadline has passed at `now`.
    pub fn tick(&mut self, now: Instant) -> Option<Snap> {
        if self.snap.poll(now) {
            Some(self.snap_now())
        } else {
            None
        }
    }

    /// Wait for the pending snap's deadline, then fire it.
    ///
    /// Returns `None` immediately when no snap is pending.
    pub async fn settle(&mut self) -> Option<Snap> {
        if !self.snap.is_pending() {
            return None;
        }
        self.snap.elapsed().await;
        self.tick(Instant::now())
    }

    /// Select `value` and snap at once, bypassing scroll resolution.
    ///
    /// Returns `None` (and changes nothing) when `value` is not on the axis.
    pub fn select_direct(&mut self, value: &V) -> Option<Snap> {
        let index = self.axis.index_of(value)?;
        Some(self.select_index(index))
    }

    /// Select by index (clamped into range) and snap at once.
    pub fn select_index(&mut self, index: usize) -> Snap {
        let index = self.axis.clamp_index(index);
        self.snap.cancel();
        self.set_index(index);
        self.snap_now()
    }

    /// Move the selection by `delta` items, stopping at either end.
    pub fn step(&mut self, delta: i32) -> Snap {
        let target = (self.index as i64 + delta as i64).clamp(0, self.axis.len() as i64 - 1);
        self.select_index(target as usize)
    }

    /// Drop any pending snap. Returns whether one was pending.
    pub fn cancel_snap(&mut self) -> bool {
        self.snap.cancel()
    }

    /// Swap in a new value sequence, keeping the item extent.
    ///
    /// The selected value survives when it is still present; otherwise the
    /// selection is clamped to the nearest valid index. A pending snap is
    /// fired immediately so the surface matches the new axis.
    pub fn replace_values(&mut self, values: Vec<V>) -> Result<(), AxisError> {
        let axis = self.axis.with_values(values)?;
        let current = self.selected();
        let index = axis
            .index_of(&current)
            .unwrap_or_else(|| axis.clamp_index(self.index));
        self.axis = axis;
        self.scroll.set_content_extent(self.axis.max_offset());
        // Force the index back in sync with the new axis before publishing.
        self.index = index;
        self.set_selected.set_if_changed(self.selected());
        if self.snap.cancel() || self.scroll.offset != self.axis.offset_of(index) {
            self.snap_now();
        }
        Ok(())
    }

    // ── Internals ────────────────────────────────────────────────────

    /// Point at `index` and publish its value. Returns whether it changed.
    fn set_index(&mut self, index: usize) -> bool {
        let changed = index != self.index;
        self.index = index;
        self.set_selected.set_if_changed(self.selected());
        changed
    }

    fn snap_now(&mut self) -> Snap {
        let offset = self.axis.offset_of(self.index);
        self.scroll.snap_to(offset);
        trace!(index = self.index, offset, "snap");
        Snap {
            index: self.index,
            offset,
        }
    }
}

impl<V> AxisPicker<V>
where
    V: Clone + PartialEq + fmt::Debug + AxisLabel + 'static,
{
    /// Width in cells of the widest label.
    pub fn label_width(&self) -> i32 {
        self.axis
            .values()
            .iter()
            .map(|v| v.label().chars().count() as i32)
            .max()
            .unwrap_or(0)
    }

    /// Apply a column-level key action. Focus actions are the owner's business
    /// and return `None`.
    pub fn apply(&mut self, action: PickerAction) -> Option<Snap> {
        match action {
            PickerAction::Step(delta) => Some(self.step(delta)),
            PickerAction::First => Some(self.select_index(0)),
            PickerAction::Last => Some(self.select_index(self.axis.len() - 1)),
            PickerAction::FocusNext | PickerAction::FocusPrevious => None,
        }
    }

    /// Handle a pointer event inside `region` (the column's area).
    ///
    /// The wheel scrolls by one item and goes through scroll resolution, so
    /// it snaps after the settle delay; a click selects the row under the
    /// pointer directly. Returns whether the event was consumed.
    pub fn handle_mouse(&mut self, event: &MouseEvent, region: Region, now: Instant) -> bool {
        let (x, y) = (event.x as i32, event.y as i32);
        if !region.contains(x, y) {
            return false;
        }
        let extent = self.axis.item_extent();
        match event.kind {
            MouseAction::ScrollUp => {
                self.scroll_by(-extent, now);
                true
            }
            MouseAction::ScrollDown => {
                self.scroll_by(extent, now);
                true
            }
            MouseAction::Click => match self.index_at_row(region, y) {
                Some(index) => {
                    self.select_index(index);
                    true
                }
                None => false,
            },
            MouseAction::Other => false,
        }
    }

    /// Index of the item drawn on row `y` of `region`, if any.
    pub fn index_at_row(&self, region: Region, y: i32) -> Option<usize> {
        if y < region.y || y >= region.bottom() {
            return None;
        }
        let index = self.index as i64 + (y - region.center_row()) as i64;
        (0..self.axis.len() as i64)
            .contains(&index)
            .then_some(index as usize)
    }
}

impl<V: 'static> Drop for AxisPicker<V> {
    fn drop(&mut self) {
        self.snap.cancel();
        dispose_signal(self.selected.id());
    }
}

impl<V> fmt::Debug for AxisPicker<V>
where
    V: Clone + PartialEq + fmt::Debug + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AxisPicker")
            .field("selected", &self.selected())
            .field("index", &self.index)
            .field("offset", &self.scroll.offset)
            .field("pending_snap", &self.snap.is_pending())
            .finish()
    }
}

impl<V> Widget for AxisPicker<V>
where
    V: Clone + PartialEq + fmt::Debug + AxisLabel + 'static,
{
    fn widget_type(&self) -> &str {
        "AxisPicker"
    }

    fn render(&self, region: Region) -> Vec<Strip> {
        if region.is_empty() {
            return Vec::new();
        }
        (region.y..region.bottom())
            .map(|y| {
                let mut strip = Strip::new(y, region.x);
                if let Some(index) = self.index_at_row(region, y) {
                    let style = if index != self.index {
                        CellStyle::neighbour()
                    } else if self.focused {
                        CellStyle::selected()
                    } else {
                        CellStyle::selected_unfocused()
                    };
                    let label = self.axis.values()[index].label();
                    strip.push_str(&label, style.clone());
                    strip.fill(region.width, style);
                } else {
                    strip.fill(region.width, CellStyle::new());
                }
                strip
            })
            .collect()
    }

    fn preferred_size(&self) -> (i32, i32) {
        (self.label_width(), DEFAULT_VISIBLE_ROWS)
    }

    fn can_focus(&self) -> bool {
        true
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::render_to_string;
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    const DELAY: Duration = Duration::from_millis(10);

    fn hours() -> AxisPicker<u8> {
        AxisPicker::from_values((0..24).collect(), &AxisConfig::new().with_item_extent(10.0))
            .unwrap()
    }

    #[test]
    fn starts_on_first_value() {
        let p = hours();
        assert_eq!(p.selected(), 0);
        assert_eq!(p.index(), 0);
        assert_eq!(p.offset(), 0.0);
        assert_eq!(p.selected_signal().get(), 0);
    }

    #[test]
    fn initialize_aligns_surface() {
        let mut p = hours();
        p.initialize(&23);
        assert_eq!(p.selected(), 23);
        assert_eq!(p.offset(), 230.0);
        assert_eq!(p.selected_signal().get(), 23);
        assert!(!p.has_pending_snap());
    }

    #[test]
    fn initialize_falls_back_to_first_value() {
        let mut p = hours();
        p.initialize(&12);
        p.initialize(&42);
        assert_eq!(p.selected(), 0);
        assert_eq!(p.offset(), 0.0);
    }

    #[test]
    fn try_initialize_reports_missing_value() {
        let mut p = hours();
        p.initialize(&5);
        let err = p.try_initialize(&42).unwrap_err();
        assert_eq!(
            err,
            PickerError::ValueNotInDomain {
                value: "42".to_owned()
            }
        );
        assert_eq!(p.selected(), 5);
    }

    #[test]
    fn scroll_resolves_immediately_and_snaps_later() {
        let t0 = Instant::now();
        let mut p = hours();
        assert!(p.on_scroll(93.0, t0));
        assert_eq!(p.selected(), 9);
        assert_eq!(p.offset(), 93.0);
        assert!(p.has_pending_snap());

        assert_eq!(p.tick(t0 + Duration::from_millis(5)), None);
        assert_eq!(p.offset(), 93.0);

        let snap = p.tick(t0 + DELAY).unwrap();
        assert_eq!(snap, Snap { index: 9, offset: 90.0 });
        assert_eq!(p.offset(), 90.0);
        assert_eq!(p.tick(t0 + DELAY * 3), None);
    }

    #[test]
    fn scroll_within_same_item_is_not_a_change() {
        let t0 = Instant::now();
        let mut p = hours();
        p.initialize(&4);
        assert!(!p.on_scroll(41.0, t0));
        assert!(!p.on_scroll(38.0, t0));
        assert_eq!(p.selected(), 4);
        assert!(p.has_pending_snap());
    }

    #[test]
    fn overscroll_clamps_selection_but_not_surface() {
        let t0 = Instant::now();
        let mut p = hours();
        p.on_scroll(-35.0, t0);
        assert_eq!(p.selected(), 0);
        assert_eq!(p.offset(), -35.0);
        p.on_scroll(400.0, t0);
        assert_eq!(p.selected(), 23);
        let snap = p.tick(t0 + DELAY).unwrap();
        assert_eq!(snap.offset, 230.0);
    }

    #[test]
    fn rapid_scrolls_coalesce_into_one_snap() {
        let t0 = Instant::now();
        let mut p = hours();
        p.on_scroll(50.0, t0);
        p.on_scroll(90.0, t0 + Duration::from_millis(4));
        p.on_scroll(121.0, t0 + Duration::from_millis(8));
        assert_eq!(p.snap_timer().superseded_count(), 2);

        // The first deadline (t0 + 10ms) was superseded.
        assert_eq!(p.tick(t0 + Duration::from_millis(12)), None);
        assert_eq!(
            p.tick(t0 + Duration::from_millis(18)),
            Some(Snap { index: 12, offset: 120.0 })
        );
        assert_eq!(p.snap_timer().fired_count(), 1);
    }

    #[test]
    fn select_direct_snaps_synchronously() {
        let t0 = Instant::now();
        let mut p = hours();
        p.on_scroll(33.0, t0);
        let snap = p.select_direct(&17).unwrap();
        assert_eq!(snap, Snap { index: 17, offset: 170.0 });
        assert_eq!(p.offset(), 170.0);
        assert!(!p.has_pending_snap());
        assert_eq!(p.tick(t0 + DELAY), None);
    }

    #[test]
    fn select_direct_ignores_foreign_values() {
        let mut p = hours();
        p.initialize(&3);
        assert_eq!(p.select_direct(&99), None);
        assert_eq!(p.selected(), 3);
    }

    #[test]
    fn step_stops_at_ends() {
        let mut p = hours();
        p.step(-1);
        assert_eq!(p.selected(), 0);
        p.step(5);
        assert_eq!(p.selected(), 5);
        p.step(100);
        assert_eq!(p.selected(), 23);
        assert_eq!(p.offset(), 230.0);
    }

    #[test]
    fn replace_values_keeps_or_clamps_selection() {
        let config = AxisConfig::new().with_item_extent(2.0);
        let mut days: AxisPicker<u32> = AxisPicker::from_values((1..=31).collect(), &config).unwrap();
        days.initialize(&15);
        days.replace_values((1..=28).collect()).unwrap();
        assert_eq!(days.selected(), 15);
        assert_eq!(days.axis().len(), 28);

        days.initialize(&28);
        days.replace_values((1..=31).collect()).unwrap();
        assert_eq!(days.selected(), 28);

        days.initialize(&31);
        days.replace_values((1..=30).collect()).unwrap();
        assert_eq!(days.selected(), 30);
        assert_eq!(days.selected_signal().get(), 30);
        assert_eq!(days.offset(), 29.0 * 2.0);
    }

    #[test]
    fn replace_values_rejects_empty() {
        let mut p = hours();
        assert_eq!(p.replace_values(vec![]), Err(AxisError::Empty));
        assert_eq!(p.axis().len(), 24);
    }

    #[test]
    fn drop_disposes_signal() {
        let p = hours();
        let signal = p.selected_signal();
        drop(p);
        assert_eq!(signal.try_get(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn settle_waits_for_the_delay() {
        let mut p = hours();
        let start = Instant::now();
        p.on_scroll(71.0, start);
        let snap = p.settle().await.unwrap();
        assert_eq!(snap, Snap { index: 7, offset: 70.0 });
        assert!(Instant::now() >= start + DELAY);
        assert_eq!(p.settle().await, None);
    }

    #[test]
    fn index_at_row_centers_selection() {
        let mut p = hours();
        p.initialize(&1);
        let region = Region::new(0, 0, 2, 5);
        assert_eq!(p.index_at_row(region, 0), None);
        assert_eq!(p.index_at_row(region, 1), Some(0));
        assert_eq!(p.index_at_row(region, 2), Some(1));
        assert_eq!(p.index_at_row(region, 4), Some(3));
        assert_eq!(p.index_at_row(region, 5), None);
    }

    #[test]
    fn renders_window_around_selection() {
        let mut p = hours();
        p.initialize(&12);
        insta::assert_snapshot!(render_to_string(&p, 2, 5), @r"
10
11
12
13
14
");
    }

    #[test]
    fn rows_past_the_ends_are_blank() {
        let mut p = hours();
        p.initialize(&22);
        assert_eq!(render_to_string(&p, 2, 5), "20\n21\n22\n23\n");
        p.initialize(&0);
        assert_eq!(render_to_string(&p, 2, 5), "\n\n00\n01\n02");
    }

    #[test]
    fn key_actions() {
        let mut p = hours();
        p.initialize(&10);
        assert_eq!(p.apply(PickerAction::Step(-3)).map(|s| s.index), Some(7));
        assert_eq!(p.apply(PickerAction::Last).map(|s| s.index), Some(23));
        assert_eq!(p.apply(PickerAction::First).map(|s| s.index), Some(0));
        assert_eq!(p.apply(PickerAction::FocusNext), None);
        assert_eq!(p.selected(), 0);
    }

    #[test]
    fn wheel_scrolls_one_item_and_defers_snap() {
        let t0 = Instant::now();
        let mut p = hours();
        p.initialize(&6);
        let region = Region::new(0, 0, 2, 5);
        let wheel = MouseEvent::new(MouseAction::ScrollDown, 1, 2);
        assert!(p.handle_mouse(&wheel, region, t0));
        assert!(p.handle_mouse(&wheel, region, t0));
        assert_eq!(p.selected(), 8);
        assert_eq!(p.offset(), 80.0);
        assert!(p.has_pending_snap());

        let up = MouseEvent::new(MouseAction::ScrollUp, 0, 0);
        assert!(p.handle_mouse(&up, region, t0));
        assert_eq!(p.selected(), 7);
    }

    #[test]
    fn click_selects_row_under_pointer() {
        let t0 = Instant::now();
        let mut p = hours();
        p.initialize(&6);
        let region = Region::new(4, 1, 2, 5);
        // Center row is y = 3; y = 1 is two rows above.
        let click = MouseEvent::new(MouseAction::Click, 5, 1);
        assert!(p.handle_mouse(&click, region, t0));
        assert_eq!(p.selected(), 4);
        assert_eq!(p.offset(), 40.0);
        assert!(!p.has_pending_snap());

        let outside = MouseEvent::new(MouseAction::Click, 9, 1);
        assert!(!p.handle_mouse(&outside, region, t0));
        assert_eq!(p.selected(), 4);
    }

    #[test]
    fn selected_row_style_follows_focus() {
        let mut p = hours();
        p.initialize(&5);
        let region = Region::new(0, 0, 2, 3);
        let strips = p.render(region);
        assert!(strips[0].cells[0].style.dim);
        assert!(!strips[1].cells[0].style.reverse);
        p.set_focused(true);
        let strips = p.render(region);
        assert!(strips[1].cells[0].style.reverse);
    }
}
