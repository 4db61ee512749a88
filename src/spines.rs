use std::fmt;

use iced::Color;

use crate::{gridspec::GridCell, region::Region};

/// One edge of a rectangular region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Top, Side::Right, Side::Bottom, Side::Left];
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Side::Top => "top",
            Side::Right => "right",
            Side::Bottom => "bottom",
            Side::Left => "left",
        })
    }
}

/// The line drawn along one edge of a region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spine {
    pub visible: bool,
    /// Line width in points.
    pub line_width: f32,
    pub color: Color,
}

impl Default for Spine {
    fn default() -> Self {
        Self {
            visible: true,
            line_width: 0.8,
            color: Color::BLACK,
        }
    }
}

/// The four spines of a region.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Spines {
    pub top: Spine,
    pub right: Spine,
    pub bottom: Spine,
    pub left: Spine,
}

impl Spines {
    /// All four spines hidden.
    pub fn hidden() -> Self {
        let hidden = Spine {
            visible: false,
            ..Spine::default()
        };
        Self {
            top: hidden,
            right: hidden,
            bottom: hidden,
            left: hidden,
        }
    }

    pub fn get(&self, side: Side) -> &Spine {
        match side {
            Side::Top => &self.top,
            Side::Right => &self.right,
            Side::Bottom => &self.bottom,
            Side::Left => &self.left,
        }
    }

    pub fn get_mut(&mut self, side: Side) -> &mut Spine {
        match side {
            Side::Top => &mut self.top,
            Side::Right => &mut self.right,
            Side::Bottom => &mut self.bottom,
            Side::Left => &mut self.left,
        }
    }
}

/// Hide the spines and tick decorations of `region` that face other cells.
///
/// Ticks are only ever drawn on the bottom/left edges. The bottom spine and
/// x tick marks survive only on the last row, the left spine and y tick marks
/// only on the first column. Top and right spines survive only on the outer border, and
/// not at all when `despine` is set.
pub(crate) fn trim(region: &mut Region, cell: GridCell, despine: bool) {
    if !cell.is_last_row() {
        region.spines_mut().bottom.visible = false;
        region.xaxis_mut().set_tick_elements_visible(false);
    }
    if despine || !cell.is_first_row() {
        region.spines_mut().top.visible = false;
    }
    if !cell.is_first_col() {
        region.spines_mut().left.visible = false;
        region.yaxis_mut().set_tick_elements_visible(false);
    }
    if despine || !cell.is_last_col() {
        region.spines_mut().right.visible = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iced::Rectangle;

    fn region(cell: GridCell) -> Region {
        Region::new(Rectangle::default(), cell)
    }

    #[test]
    fn interior_region_loses_everything() {
        // Middle cell of a 3x3 grid.
        let cell = GridCell::from_index(4, 3, 3);
        let mut r = region(cell);
        trim(&mut r, cell, false);
        for side in Side::ALL {
            assert!(!r.spines().get(side).visible, "{side} should be hidden");
        }
        assert!(!r.xaxis().tick_lines_visible());
        assert!(!r.yaxis().tick_labels_visible());
    }

    #[test]
    fn corner_keeps_outer_spines_without_despine() {
        let cell = GridCell::from_index(0, 2, 2);
        let mut r = region(cell);
        trim(&mut r, cell, false);
        assert!(r.spines().top.visible);
        assert!(r.spines().left.visible);
        assert!(!r.spines().bottom.visible);
        assert!(!r.spines().right.visible);
        assert!(!r.xaxis().tick_lines_visible());
        assert!(r.yaxis().tick_lines_visible());
    }

    #[test]
    fn despine_drops_top_and_right() {
        let cell = GridCell::single();
        let mut r = region(cell);
        trim(&mut r, cell, true);
        assert!(!r.spines().top.visible);
        assert!(!r.spines().right.visible);
        assert!(r.spines().bottom.visible);
        assert!(r.spines().left.visible);
        assert!(r.xaxis().tick_labels_visible());
    }
}
