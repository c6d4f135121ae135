//! Terminal-cell regions used for rendering pickers and routing pointer input.

// ---------------------------------------------------------------------------
// Region
// ---------------------------------------------------------------------------

/// A rectangle of terminal cells.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Region {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Region {
    /// An empty region at the origin.
    pub const EMPTY: Region = Region { x: 0, y: 0, width: 0, height: 0 };

    /// Create a new region.
    #[inline]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// The right edge (exclusive): `x + width`.
    #[inline]
    pub const fn right(self) -> i32 {
        self.x + self.width
    }

    /// The bottom edge (exclusive): `y + height`.
    #[inline]
    pub const fn bottom(self) -> i32 {
        self.y + self.height
    }

    /// Whether the region has no area.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Whether the point (x, y) lies inside this region.
    #[inline]
    pub const fn contains(self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// The row that holds the selected item of a picker column.
    ///
    /// For even heights the upper of the two middle rows is used.
    #[inline]
    pub const fn center_row(self) -> i32 {
        self.y + (self.height - 1) / 2
    }

    /// A full-height column starting `dx` cells from the left edge, clipped to
    /// this region.
    pub fn column(self, dx: i32, width: i32) -> Region {
        let x = (self.x + dx).min(self.right());
        let right = (x + width).min(self.right());
        Region::new(x, self.y, (right - x).max(0), self.height)
    }
}

// ===========================================================================
// Tests
// ===========================================================================
