//! DatePicker: year, month and day columns behind one calendar date.
//!
//! The day column depends on the other two: whenever year or month moves,
//! the day sequence is rebuilt as `1..=days_in_month` and the day is clamped
//! down if it no longer exists. The rebuild happens inside the same reactive
//! batch as the change that caused it, so the emitted date is always valid.

use std::cell::Cell;
use std::rc::Rc;

use chrono::{Datelike, NaiveDate};
use tokio::time::Instant;
use tracing::{debug, trace, warn};

use crate::config::DatePickerConfig;
use crate::error::PickerError;
use crate::event::binding::{KeyBindingRegistry, PickerAction};
use crate::event::input::InputEvent;
use crate::geometry::Region;
use crate::reactive::{batch, create_effect_with_id, dispose_effect, EffectId};
use crate::render::strip::Strip;
use crate::value::date::{clamp_date, days_in_month, parse_date_lenient};
use crate::widget::lifecycle::{Lifecycle, LifecycleEvent, SyncPhase};
use crate::widget::snap::Snap;
use crate::widget::traits::{Interactive, Widget};

use super::axis_picker::{AxisPicker, DEFAULT_VISIBLE_ROWS};
use super::composite::{column_at, cycle, latest_deadline, ChangeCallback};

const YEAR_DX: i32 = 0;
const MONTH_DX: i32 = 5;
const DAY_DX: i32 = 8;
const WIDTH: i32 = 10;

/// Year the placeholder column starts from before a host value arrives.
const PLACEHOLDER_YEAR: i32 = 1970;

/// A column of the date picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateField {
    Year,
    Month,
    Day,
}

const FIELD_ORDER: [DateField; 3] = [DateField::Year, DateField::Month, DateField::Day];

/// Years shown for a picker anchored on `anchor`.
///
/// Starts at the minimum date's year when one is set (but never after the
/// anchor), otherwise `years_before` ahead of it. Ends `years_after` past the
/// later of the anchor and the minimum date's year. Both ends stay inside
/// the years chrono can represent.
fn year_range(config: &DatePickerConfig, anchor: i32) -> Vec<i32> {
    let bound = config.min_date.map(|min| min.year());
    let start = bound
        .unwrap_or(anchor.saturating_sub(config.years_before))
        .min(anchor);
    let end = bound
        .map_or(anchor, |year| year.max(anchor))
        .saturating_add(config.years_after);
    let (first, last) = (NaiveDate::MIN.year(), NaiveDate::MAX.year());
    (start.clamp(first, last)..=end.clamp(first, last)).collect()
}

// ---------------------------------------------------------------------------
// DatePicker
// ---------------------------------------------------------------------------

/// Year/month/day picker reporting [`NaiveDate`]s.
pub struct DatePicker {
    year: AxisPicker<i32>,
    month: AxisPicker<u32>,
    day: AxisPicker<u32>,
    lifecycle: Lifecycle,
    committed: Rc<Cell<Option<NaiveDate>>>,
    effect: EffectId,
    focus: DateField,
    bindings: KeyBindingRegistry,
    config: DatePickerConfig,
}

impl DatePicker {
    /// Create an unsynchronized picker. Nothing is reported until
    /// [`receive`](Self::receive) has applied the host's date.
    pub fn new(
        config: DatePickerConfig,
        on_change: impl FnMut(NaiveDate) + 'static,
    ) -> Result<Self, PickerError> {
        let anchor = config.min_date.map_or(PLACEHOLDER_YEAR, |min| min.year());
        let mut year = AxisPicker::from_values(year_range(&config, anchor), &config.axis)?;
        let month = AxisPicker::from_values((1..=12).collect(), &config.axis)?;
        let day = AxisPicker::from_values((1..=31).collect(), &config.axis)?;
        year.set_focused(true);

        let lifecycle = Lifecycle::new();
        let committed = Rc::new(Cell::new(None));
        let effect = Self::watch(&year, &month, &day, &lifecycle, &committed, Box::new(on_change));

        Ok(Self {
            year,
            month,
            day,
            lifecycle,
            committed,
            effect,
            focus: DateField::Year,
            bindings: KeyBindingRegistry::with_defaults(),
            config,
        })
    }

    /// Create a picker and synchronize it with `value` in one go.
    pub fn mount(
        value: NaiveDate,
        config: DatePickerConfig,
        on_change: impl FnMut(NaiveDate) + 'static,
    ) -> Result<Self, PickerError> {
        let mut picker = Self::new(config, on_change)?;
        picker.receive(value);
        Ok(picker)
    }

    fn watch(
        year: &AxisPicker<i32>,
        month: &AxisPicker<u32>,
        day: &AxisPicker<u32>,
        lifecycle: &Lifecycle,
        committed: &Rc<Cell<Option<NaiveDate>>>,
        mut on_change: ChangeCallback<NaiveDate>,
    ) -> EffectId {
        let (year, month, day) = (
            year.selected_signal(),
            month.selected_signal(),
            day.selected_signal(),
        );
        let phase = lifecycle.handle();
        let committed = Rc::clone(committed);

        create_effect_with_id(move || {
            let (Some(y), Some(m), Some(d)) = (year.try_get(), month.try_get(), day.try_get())
            else {
                return;
            };
            if !phase.is_live() {
                return;
            }
            let Some(value) = NaiveDate::from_ymd_opt(y, m, d) else {
                warn!(y, m, d, "inconsistent date columns");
                return;
            };
            if committed.get() == Some(value) {
                return;
            }
            committed.set(Some(value));
            debug!(%value, "date picker changed");
            on_change(value);
        })
    }

    // ── Host value ───────────────────────────────────────────────────

    /// Apply the host's date. Only the first call has any effect.
    ///
    /// The year column is rebuilt around `value` first. Returns whether the
    /// value was applied.
    pub fn receive(&mut self, value: NaiveDate) -> bool {
        if !self.lifecycle.begin_sync() {
            debug!(%value, phase = ?self.lifecycle.phase(), "host date after mount ignored");
            return false;
        }
        self.committed.set(Some(value));

        batch(|| {
            let years = year_range(&self.config, value.year());
            if let Err(err) = self.year.replace_values(years) {
                warn!(%err, "year column rebuild failed");
            }
            self.year.initialize(&value.year());
            self.month.initialize(&value.month());
            self.reconcile_days();
            self.day.initialize(&value.day());
        });

        self.lifecycle.finish_sync();
        debug!(%value, "date picker synchronized");
        true
    }

    /// Parse `YYYY-MM-DD` leniently against `fallback` and
    /// [`receive`](Self::receive) the result.
    pub fn receive_str(&mut self, input: &str, fallback: NaiveDate) -> bool {
        self.receive(parse_date_lenient(input, fallback))
    }

    /// The date the columns currently show.
    pub fn value(&self) -> NaiveDate {
        clamp_date(self.year.selected(), self.month.selected(), self.day.selected())
            .unwrap_or_default()
    }

    /// The date the host holds (received or last emitted).
    pub fn committed(&self) -> Option<NaiveDate> {
        self.committed.get()
    }

    /// Whether the shown date lies before the configured minimum. The bound
    /// is not enforced; hosts decide what to do with it.
    pub fn before_min_date(&self) -> bool {
        self.config.min_date.is_some_and(|min| self.value() < min)
    }

    pub fn phase(&self) -> SyncPhase {
        self.lifecycle.phase()
    }

    pub fn lifecycle_events(&mut self) -> Vec<LifecycleEvent> {
        self.lifecycle.pending_events()
    }

    // ── Columns ──────────────────────────────────────────────────────

    pub fn year(&self) -> &AxisPicker<i32> {
        &self.year
    }

    pub fn month(&self) -> &AxisPicker<u32> {
        &self.month
    }

    pub fn day(&self) -> &AxisPicker<u32> {
        &self.day
    }

    pub fn focus(&self) -> DateField {
        self.focus
    }

    pub fn set_focus(&mut self, field: DateField) {
        self.focus = field;
        self.year.set_focused(field == DateField::Year);
        self.month.set_focused(field == DateField::Month);
        self.day.set_focused(field == DateField::Day);
    }

    pub fn set_bindings(&mut self, bindings: KeyBindingRegistry) {
        self.bindings = bindings;
    }

    /// Rebuild the day column for the selected year and month.
    fn reconcile_days(&mut self) {
        let (year, month) = (self.year.selected(), self.month.selected());
        let days = days_in_month(year, month);
        if self.day.axis().len() == days as usize {
            return;
        }
        let before = self.day.selected();
        if let Err(err) = self.day.replace_values((1..=days).collect()) {
            warn!(%err, year, month, "day column rebuild failed");
            return;
        }
        trace!(year, month, days, before, after = self.day.selected(), "day column rebuilt");
    }

    /// Run `f` in one batch, reconciling the day column afterwards when a
    /// year or month column was touched.
    fn interact<R>(&mut self, field: DateField, f: impl FnOnce(&mut Self) -> R) -> R {
        batch(|| {
            let out = f(&mut *self);
            if field != DateField::Day {
                self.reconcile_days();
            }
            out
        })
    }

    // ── Interaction ──────────────────────────────────────────────────

    /// Report a raw scroll offset for one column.
    pub fn scroll(&mut self, field: DateField, raw_offset: f64, now: Instant) -> bool {
        self.interact(field, |p| match field {
            DateField::Year => p.year.on_scroll(raw_offset, now),
            DateField::Month => p.month.on_scroll(raw_offset, now),
            DateField::Day => p.day.on_scroll(raw_offset, now),
        })
    }

    /// Select a year directly. `None` when it is not on the column.
    pub fn select_year(&mut self, year: i32) -> Option<Snap> {
        self.interact(DateField::Year, |p| p.year.select_direct(&year))
    }

    /// Select a month (1-12) directly.
    pub fn select_month(&mut self, month: u32) -> Option<Snap> {
        self.interact(DateField::Month, |p| p.month.select_direct(&month))
    }

    /// Select a day directly. Days past the end of the month are rejected.
    pub fn select_day(&mut self, day: u32) -> Option<Snap> {
        self.interact(DateField::Day, |p| p.day.select_direct(&day))
    }

    /// Move one column's selection by `delta` items.
    pub fn step(&mut self, field: DateField, delta: i32) -> Snap {
        self.interact(field, |p| match field {
            DateField::Year => p.year.step(delta),
            DateField::Month => p.month.step(delta),
            DateField::Day => p.day.step(delta),
        })
    }

    /// Fire every snap whose deadline has passed at `now`.
    pub fn tick(&mut self, now: Instant) -> Vec<(DateField, Snap)> {
        [
            (DateField::Year, self.year.tick(now)),
            (DateField::Month, self.month.tick(now)),
            (DateField::Day, self.day.tick(now)),
        ]
        .into_iter()
        .filter_map(|(field, snap)| snap.map(|snap| (field, snap)))
        .collect()
    }

    /// Wait until every pending snap is due, then fire them.
    pub async fn settle(&mut self) -> Vec<(DateField, Snap)> {
        let deadline = latest_deadline([
            self.year.snap_timer().deadline(),
            self.month.snap_timer().deadline(),
            self.day.snap_timer().deadline(),
        ]);
        match deadline {
            Some(deadline) => {
                tokio::time::sleep_until(deadline).await;
                self.tick(Instant::now())
            }
            None => Vec::new(),
        }
    }

    fn columns(region: Region) -> [(DateField, Region); 3] {
        [
            (DateField::Year, region.column(YEAR_DX, 4)),
            (DateField::Month, region.column(MONTH_DX, 2)),
            (DateField::Day, region.column(DAY_DX, 2)),
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
                        self.interact(field, |p| match field {
                            DateField::Year => p.year.apply(action),
                            DateField::Month => p.month.apply(action),
                            DateField::Day => p.day.apply(action),
                        });
                    }
                }
                true
            }
            InputEvent::Mouse(mouse) => {
                let columns = Self::columns(region);
                let Some(field) = column_at(&columns, mouse.x as i32, mouse.y as i32) else {
                    return false;
                };
                let Some(&(_, column)) = columns.iter().find(|(f, _)| *f == field) else {
                    return false;
                };
                self.set_focus(field);
                self.interact(field, |p| match field {
                    DateField::Year => p.year.handle_mouse(mouse, column, now),
                    DateField::Month => p.month.handle_mouse(mouse, column, now),
                    DateField::Day => p.day.handle_mouse(mouse, column, now),
                })
            }
            InputEvent::Ignored => false,
        }
    }

    /// Tear the picker down and return the final lifecycle events.
    pub fn unmount(mut self) -> Vec<LifecycleEvent> {
        self.teardown();
        self.lifecycle.pending_events()
    }

    fn teardown(&mut self) {
        self.lifecycle.unmount();
        dispose_effect(self.effect);
        self.year.cancel_snap();
        self.month.cancel_snap();
        self.day.cancel_snap();
    }
}

impl Drop for DatePicker {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl Widget for DatePicker {
    fn widget_type(&self) -> &str {
        "DatePicker"
    }

    fn render(&self, region: Region) -> Vec<Strip> {
        if region.is_empty() {
            return Vec::new();
        }
        let [(_, year), (_, month), (_, day)] = Self::columns(region);
        let mut strips = self.year.render(year);
        strips.extend(self.month.render(month));
        strips.extend(self.day.render(day));
        strips
    }

    fn preferred_size(&self) -> (i32, i32) {
        (WIDTH, DEFAULT_VISIBLE_ROWS)
    }

    fn can_focus(&self) -> bool {
        true
    }
}

impl Interactive for DatePicker {
    fn handle_input(&mut self, event: &InputEvent, region: Region, now: Instant) -> bool {
        DatePicker::handle_input(self, event, region, now)
    }

    fn tick(&mut self, now: Instant) -> usize {
        DatePicker::tick(self, now).len()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
