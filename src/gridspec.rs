//! Grid geometry: splitting a figure-relative rectangle into cells.
//!
//! All rectangles are in figure-relative coordinates with the origin at the
//! bottom-left corner of the figure, so `y` is the bottom edge of a cell.

use iced::Rectangle;

/// Figure-level margins and default spacing between grid cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubplotParams {
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
    pub top: f64,
    /// Horizontal gap between cells, as a fraction of the average cell width.
    pub wspace: f64,
    /// Vertical gap between cells, as a fraction of the average cell height.
    pub hspace: f64,
}

impl Default for SubplotParams {
    fn default() -> Self {
        Self {
            left: 0.125,
            right: 0.9,
            bottom: 0.11,
            top: 0.88,
            wspace: 0.2,
            hspace: 0.2,
        }
    }
}

impl SubplotParams {
    /// The area inside the margins.
    pub fn area(&self) -> Rectangle<f64> {
        Rectangle {
            x: self.left,
            y: self.bottom,
            width: self.right - self.left,
            height: self.top - self.bottom,
        }
    }
}

/// Optional overrides for the spacing between grid cells.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GridSpacing {
    pub wspace: Option<f64>,
    pub hspace: Option<f64>,
}

/// Position of a region inside its grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridCell {
    pub row: usize,
    pub col: usize,
    pub nrows: usize,
    pub ncols: usize,
}

impl GridCell {
    /// Cell of a row-major grid at the given flat position.
    pub fn from_index(index: usize, nrows: usize, ncols: usize) -> Self {
        Self {
            row: index / ncols,
            col: index % ncols,
            nrows,
            ncols,
        }
    }

    /// The only cell of a 1x1 grid.
    pub fn single() -> Self {
        Self::from_index(0, 1, 1)
    }

    pub fn is_first_row(&self) -> bool {
        self.row == 0
    }

    pub fn is_last_row(&self) -> bool {
        self.row + 1 == self.nrows
    }

    pub fn is_first_col(&self) -> bool {
        self.col == 0
    }

    pub fn is_last_col(&self) -> bool {
        self.col + 1 == self.ncols
    }
}

/// A grid of `nrows` x `ncols` cells with relative sizes.
///
/// Row 0 is the top row. Height ratios are listed top to bottom and width
/// ratios left to right.
#[derive(Debug, Clone, PartialEq)]
pub struct GridSpec {
    width_ratios: Vec<f64>,
    height_ratios: Vec<f64>,
    wspace: Option<f64>,
    hspace: Option<f64>,
}

impl GridSpec {
    /// A grid of equally sized cells.
    pub fn new(nrows: usize, ncols: usize) -> Self {
        Self::with_ratios(vec![1.0; ncols], vec![1.0; nrows])
    }

    /// Cells sized by relative ratios. Each list must sum to a positive
    /// number, otherwise the cell bounds come out as NaN.
    pub fn with_ratios(width_ratios: Vec<f64>, height_ratios: Vec<f64>) -> Self {
        Self {
            width_ratios,
            height_ratios,
            wspace: None,
            hspace: None,
        }
    }

    pub fn with_spacing(mut self, spacing: GridSpacing) -> Self {
        self.wspace = spacing.wspace.or(self.wspace);
        self.hspace = spacing.hspace.or(self.hspace);
        self
    }

    pub fn nrows(&self) -> usize {
        self.height_ratios.len()
    }

    pub fn ncols(&self) -> usize {
        self.width_ratios.len()
    }

    /// Bounds of every cell inside `area`, row-major from the top-left cell.
    ///
    /// Spacing not set on the grid falls back to `defaults`.
    pub fn cell_bounds(&self, area: Rectangle<f64>, defaults: &SubplotParams) -> Vec<Rectangle<f64>> {
        let wspace = self.wspace.unwrap_or(defaults.wspace);
        let hspace = self.hspace.unwrap_or(defaults.hspace);

        // Offsets run from the top edge downwards and from the left edge rightwards.
        let rows = cell_offsets(&self.height_ratios, area.height, hspace);
        let cols = cell_offsets(&self.width_ratios, area.width, wspace);
        let top = area.y + area.height;

        rows.iter()
            .flat_map(|&(row_start, row_end)| {
                cols.iter().map(move |&(col_start, col_end)| Rectangle {
                    x: area.x + col_start,
                    y: top - row_end,
                    width: col_end - col_start,
                    height: row_end - row_start,
                })
            })
            .collect()
    }
}

/// Start and end offset of each cell along one dimension of length `total`.
fn cell_offsets(ratios: &[f64], total: f64, space: f64) -> Vec<(f64, f64)> {
    let n = ratios.len();
    if n == 0 {
        return Vec::new();
    }
    let cell = total / (n as f64 + space * (n as f64 - 1.0));
    let sep = space * cell;
    let sum: f64 = ratios.iter().sum();
    let norm = cell * n as f64 / sum;

    let mut offsets = Vec::with_capacity(n);
    let mut cursor = 0.0;
    for (i, ratio) in ratios.iter().enumerate() {
        if i > 0 {
            cursor += sep;
        }
        let start = cursor;
        cursor += ratio * norm;
        offsets.push((start, cursor));
    }
    offsets
}
