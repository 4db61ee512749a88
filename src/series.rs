use core::fmt;

use thiserror::Error;

use crate::Color;

/// How consecutive points of a series are joined. Also used for reference
/// and grid lines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineStyle {
    Solid,
    /// Dots `spacing` points apart.
    Dotted { spacing: f32 },
    /// Dashes `length` points long.
    Dashed { length: f32 },
}

/// Shape drawn at each data point of a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MarkerType {
    #[default]
    FilledCircle,
    /// Ring.
    EmptyCircle,
    Square,
    Star,
    Triangle,
}

/// Marker drawn at every point of a series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerStyle {
    /// Size in points.
    pub size: f32,
    pub marker_type: MarkerType,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            size: 5.0,
            marker_type: MarkerType::default(),
        }
    }
}

impl MarkerStyle {
    pub fn new(size: f32, marker_type: MarkerType) -> Self {
        Self { size, marker_type }
    }

    pub fn circle(size: f32) -> Self {
        Self::new(size, MarkerType::FilledCircle)
    }

    pub fn ring(size: f32) -> Self {
        Self::new(size, MarkerType::EmptyCircle)
    }

    pub fn square(size: f32) -> Self {
        Self::new(size, MarkerType::Square)
    }

    pub fn star(size: f32) -> Self {
        Self::new(size, MarkerType::Star)
    }

    pub fn triangle(size: f32) -> Self {
        Self::new(size, MarkerType::Triangle)
    }
}

/// Reasons a series cannot be drawn.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SeriesError {
    #[error("series has no points")]
    Empty,
    #[error("series draws neither markers nor lines")]
    NoMarkersAndNoLines,
    #[error("per-point colors do not match the number of points")]
    InvalidPointColorsLength,
}

/// Handle of an artist attached to a region or a figure.
///
/// Every attachment gets a fresh id, so the same [`Series`] forwarded to four
/// regions yields four handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeId(pub(crate) u64);

impl ShapeId {
    pub(crate) fn new() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static NEXT_ID: AtomicU64 = AtomicU64::new(0);
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Shape({})", self.0)
    }
}

/// Default color of a series.
const SERIES_COLOR: Color = Color {
    r: 0.3,
    g: 0.3,
    b: 0.9,
    a: 1.0,
};

/// Data drawn into a region as markers, a connecting line, or both.
///
/// Forwarding a series to a broken axis clones it into every region; each
/// region clips it to its own limits.
#[derive(Debug, Clone)]
pub struct Series {
    pub positions: Vec<[f64; 2]>,
    /// Per-point colors, one per position. Take precedence over `color`.
    pub point_colors: Option<Vec<Color>>,
    /// Legend label.
    pub label: Option<String>,
    pub color: Color,
    /// No markers when `None`.
    pub marker_style: Option<MarkerStyle>,
    /// No connecting line when `None`.
    pub line_style: Option<LineStyle>,
}

impl Series {
    fn styled(positions: Vec<[f64; 2]>, marker_style: Option<MarkerStyle>, line_style: Option<LineStyle>) -> Self {
        Self {
            positions,
            point_colors: None,
            label: None,
            color: SERIES_COLOR,
            marker_style,
            line_style,
        }
    }

    /// Markers joined by a line.
    pub fn new(positions: Vec<[f64; 2]>, marker_style: MarkerStyle, line_style: LineStyle) -> Self {
        Self::styled(positions, Some(marker_style), Some(line_style))
    }

    pub fn line_only(positions: Vec<[f64; 2]>, line_style: LineStyle) -> Self {
        Self::styled(positions, None, Some(line_style))
    }

    pub fn markers_only(positions: Vec<[f64; 2]>, marker_style: MarkerStyle) -> Self {
        Self::styled(positions, Some(marker_style), None)
    }

    /// Sample `f` at every `x` into a solid line.
    pub fn from_fn(xs: impl IntoIterator<Item = f64>, f: impl Fn(f64) -> f64) -> Self {
        let positions = xs.into_iter().map(|x| [x, f(x)]).collect();
        Self::line_only(positions, LineStyle::Solid)
    }

    /// Scatter of filled circles.
    pub fn circles(positions: Vec<[f64; 2]>, size: f32) -> Self {
        Self::markers_only(positions, MarkerStyle::circle(size))
    }

    pub fn squares(positions: Vec<[f64; 2]>, size: f32) -> Self {
        Self::markers_only(positions, MarkerStyle::square(size))
    }

    /// Label shown in the legend. An empty label is ignored.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        let label = label.into();
        if !label.is_empty() {
            self.label = Some(label);
        }
        self
    }

    pub fn with_marker_style(mut self, style: MarkerStyle) -> Self {
        self.marker_style = Some(style);
        self
    }

    pub fn with_color(mut self, color: impl Into<Color>) -> Self {
        self.color = color.into();
        self
    }

    pub fn with_point_colors(mut self, colors: Vec<Color>) -> Self {
        self.point_colors = Some(colors);
        self
    }

    pub fn line_style(mut self, style: LineStyle) -> Self {
        self.line_style = Some(style);
        self
    }

    pub fn line_dotted(self, spacing: f32) -> Self {
        self.line_style(LineStyle::Dotted { spacing })
    }

    pub fn line_dashed(self, length: f32) -> Self {
        self.line_style(LineStyle::Dashed { length })
    }

    /// Smallest box `[min, max]` holding every finite point.
    pub(crate) fn data_bounds(&self) -> Option<([f64; 2], [f64; 2])> {
        self.positions
            .iter()
            .filter(|p| p[0].is_finite() && p[1].is_finite())
            .fold(None, |acc, p| match acc {
                None => Some((*p, *p)),
                Some((min, max)) => Some((
                    [min[0].min(p[0]), min[1].min(p[1])],
                    [max[0].max(p[0]), max[1].max(p[1])],
                )),
            })
    }

    pub(crate) fn validate(&self) -> Result<(), SeriesError> {
        if self.positions.is_empty() {
            return Err(SeriesError::Empty);
        }
        if self.marker_style.is_none() && self.line_style.is_none() {
            return Err(SeriesError::NoMarkersAndNoLines);
        }
        if let Some(colors) = &self.point_colors
            && colors.len() != self.positions.len()
        {
            return Err(SeriesError::InvalidPointColorsLength);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_rejects_bad_series() {
        assert_eq!(
            Series::circles(vec![], 2.0).validate(),
            Err(SeriesError::Empty)
        );
        let mut s = Series::circles(vec![[0.0, 0.0]], 2.0);
        s.marker_style = None;
        assert_eq!(s.validate(), Err(SeriesError::NoMarkersAndNoLines));

        let s = Series::circles(vec![[0.0, 0.0]], 2.0)
            .with_point_colors(vec![Color::BLACK, Color::WHITE]);
        assert_eq!(s.validate(), Err(SeriesError::InvalidPointColorsLength));
    }

    #[test]
    fn bounds_skip_non_finite_points() {
        let s = Series::line_only(
            vec![[0.0, 1.0], [f64::NAN, 5.0], [2.0, -1.0]],
            LineStyle::Solid,
        );
        assert_eq!(s.data_bounds(), Some(([0.0, -1.0], [2.0, 1.0])));
    }

    #[test]
    fn shape_ids_are_unique() {
        assert_ne!(ShapeId::new(), ShapeId::new());
    }
}
