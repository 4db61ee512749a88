use iced::{Color, Rectangle};

use crate::AxisScale;
use crate::breaks::AxisBreaks;
use crate::broken_axes::BrokenAxes;
use crate::error::Result;
use crate::figure::Figure;
use crate::gridspec::GridSpacing;

/// Builder for configuring and composing a [`BrokenAxes`].
///
/// Every setting is optional. Without ranges an axis is unbroken, so the
/// default builder produces a single region.
///
/// # Example
///
/// ```ignore
/// let mut fig = Figure::default();
/// let bax = BrokenAxesBuilder::new()
///     .with_xlims([(0.0, 0.1), (0.4, 0.7)])
///     .with_ylims([(-1.0, 0.7), (0.79, 1.0)])
///     .with_hspace(0.05)
///     .build(&mut fig)?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct BrokenAxesBuilder {
    pub(crate) xlims: Option<AxisBreaks>,
    pub(crate) ylims: Option<AxisBreaks>,
    pub(crate) xscale: AxisScale,
    pub(crate) yscale: AxisScale,
    pub(crate) d: Option<f64>,
    pub(crate) tilt: Option<f64>,
    pub(crate) despine: Option<bool>,
    pub(crate) diag_color: Option<Color>,
    pub(crate) width_ratios: Option<Vec<f64>>,
    pub(crate) height_ratios: Option<Vec<f64>>,
    pub(crate) parent: Option<Rectangle<f64>>,
    pub(crate) spacing: GridSpacing,
}

impl BrokenAxesBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// X ranges, left to right. One column per range.
    pub fn with_xlims(mut self, ranges: impl Into<AxisBreaks>) -> Self {
        self.xlims = Some(ranges.into());
        self
    }

    /// Y ranges, bottom to top. One row per range.
    pub fn with_ylims(mut self, ranges: impl Into<AxisBreaks>) -> Self {
        self.ylims = Some(ranges.into());
        self
    }

    pub fn with_xscale(mut self, scale: AxisScale) -> Self {
        self.xscale = scale;
        self
    }

    pub fn with_yscale(mut self, scale: AxisScale) -> Self {
        self.yscale = scale;
        self
    }

    /// Half-length of the break marks as a fraction of the figure width.
    /// Zero disables them.
    pub fn with_d(mut self, d: f64) -> Self {
        self.d = Some(d);
        self
    }

    /// Angle of the break marks from horizontal, in degrees.
    pub fn with_tilt(mut self, tilt: f64) -> Self {
        self.tilt = Some(tilt);
        self
    }

    /// Remove the top and right spines. On by default.
    pub fn with_despine(mut self, despine: bool) -> Self {
        self.despine = Some(despine);
        self
    }

    pub fn with_diag_color(mut self, color: Color) -> Self {
        self.diag_color = Some(color);
        self
    }

    /// Column widths, overriding the ones derived from the x ranges.
    pub fn with_width_ratios(mut self, ratios: Vec<f64>) -> Self {
        self.width_ratios = Some(ratios);
        self
    }

    /// Row heights from top to bottom, overriding the ones derived from the
    /// y ranges.
    pub fn with_height_ratios(mut self, ratios: Vec<f64>) -> Self {
        self.height_ratios = Some(ratios);
        self
    }

    /// Lay the grid out inside `bounds` (figure-relative, origin bottom-left)
    /// instead of the figure's subplot area, e.g. a cell of
    /// [`Figure::grid`].
    pub fn with_parent(mut self, bounds: Rectangle<f64>) -> Self {
        self.parent = Some(bounds);
        self
    }

    /// Horizontal gap between columns, as a fraction of the average width.
    pub fn with_wspace(mut self, wspace: f64) -> Self {
        self.spacing.wspace = Some(wspace);
        self
    }

    /// Vertical gap between rows, as a fraction of the average height.
    pub fn with_hspace(mut self, hspace: f64) -> Self {
        self.spacing.hspace = Some(hspace);
        self
    }

    /// Compose the broken axis on `fig`.
    pub fn build(self, fig: &mut Figure) -> Result<BrokenAxes> {
        BrokenAxes::compose(fig, self)
    }

    /// Compose on a fresh default-sized figure and hand both back.
    pub fn build_with_default_figure(self) -> Result<(Figure, BrokenAxes)> {
        let mut fig = Figure::default();
        let axes = self.build(&mut fig)?;
        Ok((fig, axes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AxisName, BrokenAxesError};

    #[test]
    fn default_builder_is_a_single_region() {
        let (fig, bax) = BrokenAxesBuilder::new().build_with_default_figure().unwrap();
        assert_eq!(bax.regions().len(), 1);
        // One data region plus the overlay.
        assert_eq!(fig.regions().count(), 2);
        assert!(bax.diag_handles().is_empty());
        assert!(bax.despine());
    }

    #[test]
    fn mismatched_ratio_count_is_reported() {
        let mut fig = Figure::default();
        let err = BrokenAxesBuilder::new()
            .with_xlims([(0.0, 1.0), (2.0, 3.0)])
            .with_width_ratios(vec![1.0, 1.0, 1.0])
            .build(&mut fig)
            .unwrap_err();
        assert_eq!(
            err,
            BrokenAxesError::RangeCountMismatch {
                axis: AxisName::X,
                ranges: 2,
                cells: 3
            }
        );
        assert_eq!(fig.regions().count(), 0);
    }

    #[test]
    fn empty_ratios_are_rejected() {
        let mut fig = Figure::default();
        let err = BrokenAxesBuilder::new()
            .with_height_ratios(Vec::new())
            .build(&mut fig)
            .unwrap_err();
        assert_eq!(err, BrokenAxesError::EmptyRatios { axis: AxisName::Y });
    }

    #[test]
    fn settings_reach_the_composition() {
        let mut fig = Figure::default();
        let bax = BrokenAxesBuilder::new()
            .with_xlims([(0.0, 1.0), (2.0, 3.0)])
            .with_d(0.02)
            .with_tilt(60.0)
            .with_despine(false)
            .with_diag_color(Color::WHITE)
            .build(&mut fig)
            .unwrap();
        let style = bax.break_mark_style();
        assert_eq!(style.d, 0.02);
        assert_eq!(style.tilt, 60.0);
        assert_eq!(style.color, Color::WHITE);
        assert!(!bax.despine());
        assert!(
            bax.diag_handles()
                .iter()
                .all(|&h| fig.line(h).is_some_and(|line| line.color == Color::WHITE))
        );
    }
}
