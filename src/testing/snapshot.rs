//! Snapshot rendering helpers.
//!
//! Functions for converting rendered widget output into plain-text strings
//! suitable for snapshot testing and assertions.

use crate::geometry::Region;
use crate::render::strip::Strip;
use crate::widget::Widget;

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Render a widget to a plain text string.
///
/// The widget is rendered into a region of `width` x `height` cells starting at
/// the origin. Each row becomes one line in the output string, with trailing
/// spaces trimmed. Lines are separated by `'\n'`. The final line does not have
/// a trailing newline.
///
/// # Examples
///
/// ```
/// use shift_picker::testing::render_to_string;
/// use shift_picker::{AxisConfig, AxisPicker};
///
/// let mut months = AxisPicker::from_values((1u32..=12).collect(), &AxisConfig::default()).unwrap();
/// months.initialize(&6);
/// assert_eq!(render_to_string(&months, 2, 3), "05\n06\n07");
/// ```
pub fn render_to_string(widget: &dyn Widget, width: i32, height: i32) -> String {
    let region = Region::new(0, 0, width, height);
    let strips = widget.render(region);
    strips_to_string(&strips, width, height)
}

/// Convert raw strips to a plain text string.
///
/// Builds a `width` x `height` grid of spaces, then overlays each strip's cells
/// at the appropriate (x, y) positions. Each row is right-trimmed of spaces, and
/// rows are joined with `'\n'`.
pub fn strips_to_string(strips: &[Strip], width: i32, height: i32) -> String {
    if width <= 0 || height <= 0 {
        return String::new();
    }

    let mut grid: Vec<Vec<char>> = vec![vec![' '; width as usize]; height as usize];

    for strip in strips {
        if strip.y < 0 || strip.y >= height {
            continue;
        }
        let row = &mut grid[strip.y as usize];
        for (i, cell) in strip.cells.iter().enumerate() {
            let x = strip.x_offset + i as i32;
            if (0..width).contains(&x) {
                row[x as usize] = cell.ch;
            }
        }
    }

    grid.into_iter()
        .map(|row| row.into_iter().collect::<String>().trim_end().to_owned())
        .collect::<Vec<_>>()
        .join("\n")
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::strip::CellStyle;

    #[test]
    fn strips_to_string_with_offset() {
        let mut strip = Strip::new(0, 5);
        strip.push_str("XY", CellStyle::default());
        assert_eq!(strips_to_string(&[strip], 10, 1), "     XY");
    }

    #[test]
    fn strips_to_string_multirow() {
        let mut s0 = Strip::new(0, 0);
        s0.push_str("Row0", CellStyle::default());
        let mut s1 = Strip::new(1, 0);
        s1.push_str("Row1", CellStyle::default());
        assert_eq!(strips_to_string(&[s0, s1], 10, 2), "Row0\nRow1");
    }

    #[test]
    fn later_strips_overwrite_earlier_ones() {
        let mut a = Strip::new(0, 0);
        a.push_str("aaaa", CellStyle::default());
        let mut b = Strip::new(0, 1);
        b.push_str("bb", CellStyle::default());
        assert_eq!(strips_to_string(&[a, b], 4, 1), "abba");
    }

    #[test]
    fn strips_to_string_empty() {
        assert_eq!(strips_to_string(&[], 10, 3), "\n\n");
    }

    #[test]
    fn strips_to_string_zero_dimensions() {
        assert!(strips_to_string(&[], 0, 0).is_empty());
    }

    #[test]
    fn strips_to_string_clips_out_of_bounds() {
        let mut below = Strip::new(5, 0);
        below.push_str("Ghost", CellStyle::default());
        let mut left = Strip::new(0, -2);
        left.push_str("abcd", CellStyle::default());
        assert_eq!(strips_to_string(&[below, left], 10, 3), "cd\n\n");
    }
}
