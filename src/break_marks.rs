//! Diagonal marks drawn where a broken axis jumps from one range to the next.

use glam::DVec2;
use iced::{Color, Rectangle, Size};

use crate::gridspec::GridCell;

/// Appearance of break marks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BreakMarkStyle {
    /// Half-length of a mark as a fraction of the figure width. Zero disables marks.
    pub d: f64,
    /// Angle from horizontal, in degrees.
    pub tilt: f64,
    pub color: Color,
    /// Line width in points.
    pub line_width: f32,
}

impl Default for BreakMarkStyle {
    fn default() -> Self {
        Self {
            d: 0.015,
            tilt: 45.0,
            color: Color::BLACK,
            line_width: 0.8,
        }
    }
}

impl BreakMarkStyle {
    /// Half extents `(xlen, ylen)` of a mark on a figure of the given size.
    ///
    /// The vertical extent is scaled by the figure aspect so the mark keeps
    /// its angle on non-square figures.
    pub fn half_extents(&self, figure: Size<f64>) -> DVec2 {
        let angle = self.tilt.to_radians();
        DVec2::new(
            self.d * angle.cos(),
            self.d * angle.sin() * figure.width / figure.height,
        )
    }

    /// Start and end of the mark centred on `anchor`.
    pub fn segment(&self, anchor: DVec2, figure: Size<f64>) -> (DVec2, DVec2) {
        let half = self.half_extents(figure);
        (anchor - half, anchor + half)
    }
}

/// Corners of a region that get a break mark, in figure-relative coordinates.
///
/// Seams inside the grid are marked along the bottom row and the left
/// column. Without `despine` the top row and right column are marked too,
/// since their outer spines stay visible.
pub fn anchors(cell: GridCell, bounds: Rectangle<f64>, despine: bool) -> Vec<DVec2> {
    let left = bounds.x;
    let right = bounds.x + bounds.width;
    let bottom = bounds.y;
    let top = bounds.y + bounds.height;

    let mut out = Vec::new();

    if cell.is_last_row() {
        if !cell.is_last_col() {
            out.push(DVec2::new(right, bottom));
        }
        if !cell.is_first_col() {
            out.push(DVec2::new(left, bottom));
        }
    }

    if cell.is_first_col() {
        if !cell.is_first_row() {
            out.push(DVec2::new(left, top));
        }
        if !cell.is_last_row() {
            out.push(DVec2::new(left, bottom));
        }
    }

    if !despine {
        if cell.is_first_row() {
            if !cell.is_last_col() {
                out.push(DVec2::new(right, top));
            }
            if !cell.is_first_col() {
                out.push(DVec2::new(left, top));
            }
        }

        if cell.is_last_col() {
            if !cell.is_first_row() {
                out.push(DVec2::new(right, top));
            }
            if !cell.is_last_row() {
                out.push(DVec2::new(right, bottom));
            }
        }
    }

    out
}
