//! Scroll surface of a picker column.
//!
//! `ScrollState` records the offset the host last reported for one column.
//! Reported offsets are kept as-is (they may overshoot during fast scrolling
//! or rubber-banding); only [`snap_to`](ScrollState::snap_to) writes an
//! aligned position.

// ---------------------------------------------------------------------------
// ScrollState
// ---------------------------------------------------------------------------

/// Offset of a one-dimensional scroll surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollState {
    /// Current offset in the host's scroll units.
    pub offset: f64,
    /// Total length of the scrollable content.
    pub content_extent: f64,
}

impl ScrollState {
    /// Create a scroll state at offset zero.
    pub fn new(content_extent: f64) -> Self {
        Self {
            offset: 0.0,
            content_extent: content_extent.max(0.0),
        }
    }

    /// Record a raw offset reported by the host. Not clamped.
    pub fn report(&mut self, offset: f64) {
        self.offset = offset;
    }

    /// Force the surface to an aligned offset.
    pub fn snap_to(&mut self, offset: f64) {
        self.offset = offset;
    }

    /// Scroll by a relative delta from the current offset.
    pub fn scroll_by(&mut self, delta: f64) {
        self.offset += delta;
    }

    /// Whether the current offset lies outside `[0, content_extent]`.
    pub fn is_overscrolled(&self) -> bool {
        self.offset < 0.0 || self.offset > self.content_extent
    }

    /// Scroll progress as a fraction in `[0.0, 1.0]`.
    ///
    /// Returns 0.0 when there is nothing to scroll.
    pub fn scroll_percent(&self) -> f64 {
        if self.content_extent <= 0.0 {
            0.0
        } else {
            (self.offset / self.content_extent).clamp(0.0, 1.0)
        }
    }

    /// Update the content extent. The offset is left alone.
    pub fn set_content_extent(&mut self, extent: f64) {
        self.content_extent = extent.max(0.0);
    }
}

impl Default for ScrollState {
    fn default() -> Self {
        Self::new(0.0)
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_zero() {
        let s = ScrollState::new(100.0);
        assert_eq!(s.offset, 0.0);
        assert_eq!(s.scroll_percent(), 0.0);
        assert!(!s.is_overscrolled());
    }

    #[test]
    fn reports_are_not_clamped() {
        let mut s = ScrollState::new(100.0);
        s.report(-12.5);
        assert_eq!(s.offset, -12.5);
        assert!(s.is_overscrolled());
        s.report(130.0);
        assert!(s.is_overscrolled());
        assert_eq!(s.scroll_percent(), 1.0);
    }

    #[test]
    fn scroll_by_and_snap() {
        let mut s = ScrollState::new(100.0);
        s.scroll_by(13.0);
        s.scroll_by(4.0);
        assert_eq!(s.offset, 17.0);
        s.snap_to(20.0);
        assert_eq!(s.offset, 20.0);
        assert_eq!(s.scroll_percent(), 0.2);
    }

    #[test]
    fn empty_content() {
        let mut s = ScrollState::default();
        s.report(5.0);
        assert_eq!(s.scroll_percent(), 0.0);
        s.set_content_extent(-3.0);
        assert_eq!(s.content_extent, 0.0);
    }
}
