//! Strip: a horizontal line of styled terminal cells.
//!
//! Widgets produce `Vec<Strip>` from their `render()` method; the host places
//! them on screen.

// ---------------------------------------------------------------------------
// CellStyle
// ---------------------------------------------------------------------------

/// Visual style for a single terminal cell.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CellStyle {
    pub bold: bool,
    pub dim: bool,
    pub reverse: bool,
}

impl CellStyle {
    /// Create a new `CellStyle` with all attributes unset/false.
    pub fn new() -> Self {
        Self::default()
    }

    /// Style of the selected row of a focused column.
    pub fn selected() -> Self {
        Self {
            bold: true,
            reverse: true,
            ..Self::default()
        }
    }

    /// Style of the selected row of an unfocused column.
    pub fn selected_unfocused() -> Self {
        Self {
            bold: true,
            ..Self::default()
        }
    }

    /// Style of the rows around the selection.
    pub fn neighbour() -> Self {
        Self {
            dim: true,
            ..Self::default()
        }
    }
}

// ---------------------------------------------------------------------------
// StyledCell
// ---------------------------------------------------------------------------

/// A single terminal cell: one character with associated style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledCell {
    pub ch: char,
    pub style: CellStyle,
}

impl StyledCell {
    pub fn new(ch: char, style: CellStyle) -> Self {
        Self { ch, style }
    }

    /// A blank (space) cell with the given style.
    pub fn blank_styled(style: CellStyle) -> Self {
        Self { ch: ' ', style }
    }
}

impl Default for StyledCell {
    fn default() -> Self {
        Self::blank_styled(CellStyle::default())
    }
}

// ---------------------------------------------------------------------------
// Strip
// ---------------------------------------------------------------------------

/// A horizontal run of styled cells at row `y`, starting at column `x_offset`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Strip {
    pub y: i32,
    pub x_offset: i32,
    pub cells: Vec<StyledCell>,
}

impl Strip {
    /// Create a new empty strip at the given row and x offset.
    pub fn new(y: i32, x_offset: i32) -> Self {
        Self {
            y,
            x_offset,
            cells: Vec::new(),
        }
    }

    /// Push a single character with the given style.
    pub fn push(&mut self, ch: char, style: CellStyle) {
        self.cells.push(StyledCell::new(ch, style));
    }

    /// Push every character of `text` with the same style.
    pub fn push_str(&mut self, text: &str, style: CellStyle) {
        for ch in text.chars() {
            self.cells.push(StyledCell::new(ch, style.clone()));
        }
    }

    /// The width of this strip in cells.
    pub fn width(&self) -> i32 {
        self.cells.len() as i32
    }

    /// Pad with styled blanks, or truncate, to exactly `width` cells.
    pub fn fill(&mut self, width: i32, style: CellStyle) {
        let w = width.max(0) as usize;
        if self.cells.len() < w {
            self.cells.resize(w, StyledCell::blank_styled(style));
        } else {
            self.cells.truncate(w);
        }
    }

    /// The rightmost x position (exclusive) of this strip.
    pub fn right(&self) -> i32 {
        self.x_offset + self.width()
    }

    /// The characters of this strip as a string.
    pub fn text(&self) -> String {
        self.cells.iter().map(|c| c.ch).collect()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
