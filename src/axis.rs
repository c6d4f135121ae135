//! Quantized axis: the ordered values of one picker column.
//!
//! An [`Axis`] pairs a non-empty, duplicate-free sequence of values with a
//! fixed item extent, and converts between scroll offsets and indices.
//! Offset resolution is total: any `f64` (out of range, infinite, NaN) maps
//! to a valid index.

use crate::error::AxisError;

// ---------------------------------------------------------------------------
// AxisLabel
// ---------------------------------------------------------------------------

/// How a column value is printed in the picker.
pub trait AxisLabel {
    fn label(&self) -> String;
}

impl AxisLabel for u8 {
    fn label(&self) -> String {
        format!("{self:02}")
    }
}

impl AxisLabel for u32 {
    fn label(&self) -> String {
        format!("{self:02}")
    }
}

impl AxisLabel for i32 {
    fn label(&self) -> String {
        self.to_string()
    }
}

// ---------------------------------------------------------------------------
// Axis
// ---------------------------------------------------------------------------

/// Ordered selectable values plus the display extent of one item.
///
/// Item `i` occupies scroll offsets centered on `i * item_extent`.
#[derive(Debug, Clone, PartialEq)]
pub struct Axis<V> {
    values: Vec<V>,
    item_extent: f64,
}

impl<V: PartialEq> Axis<V> {
    /// Build an axis.
    ///
    /// Fails when `values` is empty, holds duplicates, or `item_extent` is not
    /// a positive finite number.
    pub fn new(values: Vec<V>, item_extent: f64) -> Result<Self, AxisError> {
        if !(item_extent.is_finite() && item_extent > 0.0) {
            return Err(AxisError::InvalidExtent(item_extent));
        }
        if values.is_empty() {
            return Err(AxisError::Empty);
        }
        if let Some(index) = (1..values.len()).find(|&i| values[..i].contains(&values[i])) {
            return Err(AxisError::Duplicate { index });
        }
        Ok(Self {
            values,
            item_extent,
        })
    }

    /// A new axis with different values and the same item extent.
    pub fn with_values(&self, values: Vec<V>) -> Result<Self, AxisError> {
        Self::new(values, self.item_extent)
    }

    /// Position of `value`, if present.
    pub fn index_of(&self, value: &V) -> Option<usize> {
        self.values.iter().position(|v| v == value)
    }

    /// Whether `value` is one of the axis values.
    pub fn contains(&self, value: &V) -> bool {
        self.index_of(value).is_some()
    }
}

impl<V> Axis<V> {
    /// Index of the item under `offset`.
    ///
    /// `round(offset / item_extent)` with ties going to the larger index,
    /// clamped into `[0, len - 1]`. NaN resolves to 0.
    pub fn resolve_index(&self, offset: f64) -> usize {
        let raw = (offset / self.item_extent + 0.5).floor();
        let last = self.values.len() - 1;
        if raw.is_nan() || raw <= 0.0 {
            0
        } else if raw >= last as f64 {
            last
        } else {
            raw as usize
        }
    }

    /// The value under `offset`.
    pub fn resolve(&self, offset: f64) -> &V {
        &self.values[self.resolve_index(offset)]
    }

    /// The aligned scroll offset of `index` (clamped into range).
    pub fn offset_of(&self, index: usize) -> f64 {
        index.min(self.values.len() - 1) as f64 * self.item_extent
    }

    /// Index clamped into `[0, len - 1]`.
    pub fn clamp_index(&self, index: usize) -> usize {
        index.min(self.values.len() - 1)
    }

    pub fn get(&self, index: usize) -> Option<&V> {
        self.values.get(index)
    }

    pub fn values(&self) -> &[V] {
        &self.values
    }

    pub fn first(&self) -> &V {
        &self.values[0]
    }

    pub fn last(&self) -> &V {
        &self.values[self.values.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always `false`; an axis cannot be built empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn item_extent(&self) -> f64 {
        self.item_extent
    }

    /// Offset of the last item; the largest aligned offset.
    pub fn max_offset(&self) -> f64 {
        self.offset_of(self.values.len() - 1)
    }
}

// ===========================================================================
// Tests
// ===========================================================================
