//! A grid of regions composed to look like one axis with gaps in it.
//!
//! [`BrokenAxes`] owns no drawing state itself. Regions, their artists and
//! the break marks all live on the [`Figure`]; the composition remembers
//! which regions it created and how they relate, and every operation takes
//! the figure it was built on.

use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::{
    AxisScale,
    axes_labels::{AxisLabel, Text, X_LABEL_PAD, Y_LABEL_PAD},
    break_marks::{self, BreakMarkStyle},
    breaks::{AxisBreaks, calculate_ratios},
    broken_axes_builder::BrokenAxesBuilder,
    error::{AxisName, BrokenAxesError, Result},
    figure::{Figure, FigureId, FigureLine},
    grid::GridLines,
    gridspec::{GridCell, GridSpec},
    legend::{Legend, LegendLocation},
    reference_lines::ReferenceLine,
    region::{Axis, Region, RegionId},
    secondary_axis::{AxisFunctions, SecondaryAxis, SecondaryAxisId},
    series::{Series, ShapeId},
    spines::{self, Side, Spine},
    ticks::{Locator, tick_spacing},
};

/// Legend request for [`BrokenAxes::legend`].
///
/// Handles and labels left as `None` are taken from the region at
/// `source`, the first region by default.
#[derive(Debug, Clone, Default)]
pub struct LegendOptions {
    pub handles: Option<Vec<ShapeId>>,
    pub labels: Option<Vec<String>>,
    pub source: usize,
    pub location: LegendLocation,
}

/// Text placed by [`BrokenAxes::text`]: the region that received it and the
/// artist handle inside that region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedText {
    pub region: RegionId,
    pub handle: ShapeId,
}

/// A broken axis: an `nrows` x `ncols` grid of regions showing separate
/// value ranges, plus an invisible overlay region for whole-composition
/// labels, title and legend.
///
/// Regions are stored row-major from the top-left. X ranges map to columns
/// left to right and Y ranges to rows bottom to top.
///
/// # Panics
///
/// Every method taking a [`Figure`] expects the figure the composition was
/// built on and panics when handed another one.
#[derive(Debug)]
pub struct BrokenAxes {
    figure: FigureId,
    regions: Vec<RegionId>,
    overlay: RegionId,
    nrows: usize,
    ncols: usize,
    columns: Vec<Vec<RegionId>>,
    rows: Vec<Vec<RegionId>>,
    first_row: Vec<RegionId>,
    last_row: Vec<RegionId>,
    first_col: Vec<RegionId>,
    last_col: Vec<RegionId>,
    despine: bool,
    marks: BreakMarkStyle,
    diag_handles: Vec<ShapeId>,
}

impl BrokenAxes {
    pub fn builder() -> BrokenAxesBuilder {
        BrokenAxesBuilder::new()
    }

    /// Lay out, bind and decorate a new composition on `fig`.
    pub(crate) fn compose(fig: &mut Figure, config: BrokenAxesBuilder) -> Result<Self> {
        // Ranges are checked against their scale even when ratios are given.
        let width_ratios = resolve_ratios(
            config.width_ratios,
            calculate_ratios(config.xlims.as_ref(), config.xscale, AxisName::X)?,
            AxisName::X,
        )?;
        // Rows are allocated top to bottom, Y ranges run bottom to top.
        let mut computed_heights =
            calculate_ratios(config.ylims.as_ref(), config.yscale, AxisName::Y)?;
        computed_heights.reverse();
        let height_ratios = resolve_ratios(config.height_ratios, computed_heights, AxisName::Y)?;
        let ncols = width_ratios.len();
        let nrows = height_ratios.len();
        check_range_count(config.xlims.as_ref(), ncols, AxisName::X)?;
        check_range_count(config.ylims.as_ref(), nrows, AxisName::Y)?;

        debug!(nrows, ncols, ?width_ratios, ?height_ratios, "composing broken axes");

        let area = config
            .parent
            .unwrap_or_else(|| fig.subplot_params().area());
        let cells = GridSpec::with_ratios(width_ratios, height_ratios)
            .with_spacing(config.spacing)
            .cell_bounds(area, fig.subplot_params());

        let mut regions = Vec::with_capacity(cells.len());
        for (i, bounds) in cells.into_iter().enumerate() {
            let mut region = Region::new(bounds, GridCell::from_index(i, nrows, ncols));
            region.set_xscale(config.xscale);
            region.set_yscale(config.yscale);
            regions.push(fig.add_region(region));
        }
        let overlay = fig.add_region(Region::overlay(area));

        let at = |row: usize, col: usize| regions[row * ncols + col];
        let columns: Vec<Vec<RegionId>> = (0..ncols)
            .map(|c| (0..nrows).map(|r| at(r, c)).collect())
            .collect();
        let rows: Vec<Vec<RegionId>> = (0..nrows)
            .map(|r| (0..ncols).map(|c| at(r, c)).collect())
            .collect();
        let first_row = rows[0].clone();
        let last_row = rows[nrows - 1].clone();
        let first_col = columns[0].clone();
        let last_col = columns[ncols - 1].clone();

        let style = BreakMarkStyle {
            d: config.d.unwrap_or(BreakMarkStyle::default().d),
            tilt: config.tilt.unwrap_or(BreakMarkStyle::default().tilt),
            color: config.diag_color.unwrap_or(BreakMarkStyle::default().color),
            ..BreakMarkStyle::default()
        };

        let mut axes = Self {
            figure: fig.id(),
            regions,
            overlay,
            nrows,
            ncols,
            columns,
            rows,
            first_row,
            last_row,
            first_col,
            last_col,
            despine: config.despine.unwrap_or(true),
            marks: style,
            diag_handles: Vec::new(),
        };

        axes.bind(fig, config.xlims.as_ref(), config.ylims.as_ref());
        axes.standardize_ticks(fig, None, None);
        if axes.marks.d != 0.0 {
            axes.draw_diags(fig, None, None);
        }
        axes.set_spines(fig);

        Ok(axes)
    }

    /// Give every region its sub-range and link it to its row and column.
    ///
    /// Y axes follow the first region of their row, X axes the last region
    /// of their column.
    fn bind(&self, fig: &mut Figure, xlims: Option<&AxisBreaks>, ylims: Option<&AxisBreaks>) {
        for &id in &self.regions {
            let cell = fig[id].cell();
            if let Some(ranges) = ylims {
                // The first supplied range is the bottom row.
                let (lo, hi) = ranges.ranges()[self.nrows - 1 - cell.row].limits();
                fig[id].set_ylim(lo, hi);
            }
            if let Some(ranges) = xlims {
                let (lo, hi) = ranges.ranges()[cell.col].limits();
                fig[id].set_xlim(lo, hi);
            }
        }

        for &id in &self.regions {
            let cell = fig[id].cell();
            let y_leader = self.first_col[cell.row];
            if y_leader != id {
                let leader = fig[y_leader].yaxis().clone();
                fig[id].yaxis_mut().share(&leader);
            }
            let x_leader = self.last_row[cell.col];
            if x_leader != id {
                let leader = fig[x_leader].xaxis().clone();
                fig[id].xaxis_mut().share(&leader);
            }
        }
    }

    /// Apply one tick spacing to all border regions of each axis so adjacent
    /// segments line up.
    ///
    /// Without an explicit base the widest spacing among the border regions
    /// (last row for x, first column for y) is used. Regions with fewer than
    /// two ticks are left out; if none qualifies the axis keeps its
    /// automatic ticks.
    pub fn standardize_ticks(&self, fig: &mut Figure, xbase: Option<f64>, ybase: Option<f64>) {
        let xbase = xbase.or_else(|| shared_base(fig, &self.last_row, AxisName::X));
        if let Some(base) = xbase {
            for &id in &self.last_row {
                let axis = fig[id].xaxis_mut();
                axis.set_locator(Locator::with_base(axis.scale(), base));
            }
        }

        let ybase = ybase.or_else(|| shared_base(fig, &self.first_col, AxisName::Y));
        if let Some(base) = ybase {
            for &id in &self.first_col {
                let axis = fig[id].yaxis_mut();
                axis.set_locator(Locator::with_base(axis.scale(), base));
            }
        }
    }

    /// Hide the spines and tick decorations facing other regions.
    pub fn set_spines(&self, fig: &mut Figure) {
        for &id in &self.regions {
            let region = &mut fig[id];
            let cell = region.cell();
            spines::trim(region, cell, self.despine);
        }
    }

    /// Keep a single copy of each axis' offset text: y on the top-left
    /// region, x on the bottom-right one.
    pub fn fix_exponent(&self, fig: &mut Figure) {
        for &id in &self.regions {
            let region = &mut fig[id];
            let cell = region.cell();
            if !(cell.is_first_row() && cell.is_first_col()) {
                region.yaxis_mut().set_offset_text_visible(false);
            }
            if !(cell.is_last_row() && cell.is_last_col()) {
                region.xaxis_mut().set_offset_text_visible(false);
            }
        }
    }

    /// Remove the current break marks and draw a fresh set.
    ///
    /// `d` and `tilt` replace the stored values when given. A `d` of zero
    /// leaves the composition without marks.
    pub fn draw_diags(&mut self, fig: &mut Figure, d: Option<f64>, tilt: Option<f64>) -> &[ShapeId] {
        if let Some(d) = d {
            self.marks.d = d;
        }
        if let Some(tilt) = tilt {
            self.marks.tilt = tilt;
        }

        let removed = self.clear_diags(fig);
        if self.marks.d == 0.0 {
            debug!(removed, "break marks disabled");
            return &self.diag_handles;
        }

        let size = fig.size();
        let mut lines = Vec::new();
        for &id in &self.regions {
            let region = &fig[id];
            for anchor in break_marks::anchors(region.cell(), region.bounds(), self.despine) {
                let (start, end) = self.marks.segment(anchor, size);
                lines.push(FigureLine {
                    start,
                    end,
                    color: self.marks.color,
                    line_width: self.marks.line_width,
                    owner: Some(id),
                });
            }
        }
        self.diag_handles = lines.into_iter().map(|line| fig.add_line(line)).collect();

        debug!(removed, drawn = self.diag_handles.len(), "redrew break marks");
        &self.diag_handles
    }

    /// Remove every break mark this composition drew. Returns how many were
    /// still on the figure.
    fn clear_diags(&mut self, fig: &mut Figure) -> usize {
        self.diag_handles
            .drain(..)
            .filter(|&handle| fig.remove_line(handle).is_some())
            .count()
    }

    /// Run `op` on every region in order and collect its results.
    ///
    /// Locators are reset to automatic before the call so new data gets
    /// fresh ticks. Afterwards ticks are standardized, spines trimmed and
    /// duplicate offset text hidden again.
    pub fn forward<R>(&self, fig: &mut Figure, mut op: impl FnMut(&mut Region) -> R) -> Vec<R> {
        let mut results = Vec::with_capacity(self.regions.len());
        for &id in &self.regions {
            let region = &mut fig[id];
            let x_locator = Locator::auto_for(region.xaxis().scale());
            let y_locator = Locator::auto_for(region.yaxis().scale());
            region.xaxis_mut().set_locator(x_locator);
            region.yaxis_mut().set_locator(y_locator);
            results.push(op(region));
        }

        self.standardize_ticks(fig, None, None);
        self.set_spines(fig);
        self.fix_exponent(fig);

        trace!(regions = results.len(), "forwarded call to every region");
        results
    }

    /// Draw `series` in every region. The series is checked once up front,
    /// so an invalid one leaves every region untouched.
    pub fn plot(&self, fig: &mut Figure, series: Series) -> Result<Vec<ShapeId>> {
        series.validate()?;
        self.forward(fig, |region| region.plot(series.clone()))
            .into_iter()
            .map(|id| id.map_err(BrokenAxesError::from))
            .collect()
    }

    /// Switch both axes to a base 10 log scale, then draw `series`.
    pub fn loglog(&self, fig: &mut Figure, series: Series) -> Result<Vec<ShapeId>> {
        series.validate()?;
        self.forward(fig, |region| {
            region.set_xscale(AxisScale::LOG10);
            region.set_yscale(AxisScale::LOG10);
            region.plot(series.clone())
        })
        .into_iter()
        .map(|id| id.map_err(BrokenAxesError::from))
        .collect()
    }

    pub fn reference_line(&self, fig: &mut Figure, line: ReferenceLine) -> Vec<ShapeId> {
        self.forward(fig, |region| region.reference_line(line.clone()))
    }

    /// Horizontal line at `y` across every region.
    pub fn axhline(&self, fig: &mut Figure, y: f64) -> Vec<ShapeId> {
        self.reference_line(fig, ReferenceLine::horizontal(y))
    }

    /// Vertical line at `x` across every region.
    pub fn axvline(&self, fig: &mut Figure, x: f64) -> Vec<ShapeId> {
        self.reference_line(fig, ReferenceLine::vertical(x))
    }

    pub fn grid(&self, fig: &mut Figure, lines: GridLines) -> Vec<ShapeId> {
        self.forward(fig, |region| region.grid(lines))
    }

    pub fn set_xscale(&self, fig: &mut Figure, scale: AxisScale) {
        self.forward(fig, |region| region.set_xscale(scale));
    }

    pub fn set_yscale(&self, fig: &mut Figure, scale: AxisScale) {
        self.forward(fig, |region| region.set_yscale(scale));
    }

    /// Single x label centred under the whole composition.
    pub fn set_xlabel(&self, fig: &mut Figure, label: impl Into<String>) {
        self.set_xlabel_with_pad(fig, label, X_LABEL_PAD);
    }

    pub fn set_xlabel_with_pad(&self, fig: &mut Figure, label: impl Into<String>, labelpad: f64) {
        fig[self.overlay]
            .xaxis_mut()
            .set_label(AxisLabel::new(label, labelpad));
    }

    /// Single y label centred beside the whole composition.
    pub fn set_ylabel(&self, fig: &mut Figure, label: impl Into<String>) {
        self.set_ylabel_with_pad(fig, label, Y_LABEL_PAD);
    }

    pub fn set_ylabel_with_pad(&self, fig: &mut Figure, label: impl Into<String>, labelpad: f64) {
        fig[self.overlay]
            .yaxis_mut()
            .set_label(AxisLabel::new(label, labelpad));
    }

    pub fn set_title(&self, fig: &mut Figure, title: impl Into<String>) {
        fig[self.overlay].set_title(title);
    }

    /// Attach a legend to the overlay region.
    ///
    /// Fails with [`BrokenAxesError::UnknownRegion`] if `options.source` is
    /// not an index into [`Self::regions`].
    pub fn legend<'f>(&self, fig: &'f mut Figure, options: LegendOptions) -> Result<&'f Legend> {
        let source = self
            .regions
            .get(options.source)
            .copied()
            .ok_or(BrokenAxesError::UnknownRegion {
                index: options.source,
                regions: self.regions.len(),
            })?;
        let (handles, labels) = match (options.handles, options.labels) {
            (Some(handles), Some(labels)) => (handles, labels),
            (handles, labels) => {
                let (found_handles, found_labels) = fig[source].legend_handles_labels();
                (
                    handles.unwrap_or(found_handles),
                    labels.unwrap_or(found_labels),
                )
            }
        };
        Ok(fig[self.overlay].set_legend(Legend::new(handles, labels, options.location)))
    }

    /// Add a secondary x-axis along the top or bottom edge.
    ///
    /// Every border region on that edge gets the axis. The overlay gets a
    /// tickless, spineless mirror that only carries the label.
    pub fn secondary_xaxis(
        &self,
        fig: &mut Figure,
        location: Side,
        functions: Option<AxisFunctions>,
        label: Option<&str>,
    ) -> Result<SecondaryAxisId> {
        let border = match location {
            Side::Top => &self.first_row,
            Side::Bottom => &self.last_row,
            Side::Left | Side::Right => {
                return Err(BrokenAxesError::InvalidLocation {
                    axis: AxisName::X,
                    location,
                });
            }
        };
        Ok(self.add_secondary(fig, border, location, functions, label))
    }

    /// Add a secondary y-axis along the left or right edge.
    pub fn secondary_yaxis(
        &self,
        fig: &mut Figure,
        location: Side,
        functions: Option<AxisFunctions>,
        label: Option<&str>,
    ) -> Result<SecondaryAxisId> {
        let border = match location {
            Side::Left => &self.first_col,
            Side::Right => &self.last_col,
            Side::Top | Side::Bottom => {
                return Err(BrokenAxesError::InvalidLocation {
                    axis: AxisName::Y,
                    location,
                });
            }
        };
        Ok(self.add_secondary(fig, border, location, functions, label))
    }

    fn add_secondary(
        &self,
        fig: &mut Figure,
        border: &[RegionId],
        location: Side,
        functions: Option<AxisFunctions>,
        label: Option<&str>,
    ) -> SecondaryAxisId {
        for &id in border {
            fig[id].add_secondary_axis(location, functions.clone());
        }

        let overlay = &mut fig[self.overlay];
        let index = overlay.add_secondary_axis(location, functions);
        if let Some(mirror) = overlay.secondary_axis_mut(index) {
            mirror.spine_visible = false;
            mirror.locator = Locator::Fixed(Vec::new());
            mirror.face_color = None;
            mirror.label = label.map(|text| AxisLabel::new(text, Y_LABEL_PAD));
        }

        SecondaryAxisId {
            region: self.overlay,
            index,
        }
    }

    pub fn secondary_axis<'f>(&self, fig: &'f Figure, id: SecondaryAxisId) -> Option<&'f SecondaryAxis> {
        fig.region(id.region)?.secondary_axes().get(id.index)
    }

    /// Put `content` at `(x, y)` in data coordinates, in the first region
    /// whose current limits contain the point.
    pub fn text(&self, fig: &mut Figure, x: f64, y: f64, content: impl Into<String>) -> Result<PlacedText> {
        self.place_text(fig, Text::new(x, y, content))
    }

    /// Like [`Self::text`] with a pre-styled [`Text`].
    pub fn place_text(&self, fig: &mut Figure, text: Text) -> Result<PlacedText> {
        let (x, y) = (text.x, text.y);
        let region = self
            .regions
            .iter()
            .copied()
            .find(|&id| fig[id].contains_point(x, y))
            .ok_or(BrokenAxesError::OutOfBounds { x, y })?;
        let handle = fig[region].text(text);
        Ok(PlacedText { region, handle })
    }

    /// Spines along the outer silhouette, one list per edge.
    pub fn spines<'f>(&self, fig: &'f Figure) -> IndexMap<Side, Vec<&'f Spine>> {
        Side::ALL
            .into_iter()
            .map(|side| {
                let spines = self
                    .border(side)
                    .iter()
                    .map(|&id| fig[id].spines().get(side))
                    .collect();
                (side, spines)
            })
            .collect()
    }

    /// Mutable spines along one edge of the silhouette.
    pub fn spines_mut<'f>(&self, fig: &'f mut Figure, side: Side) -> Vec<&'f mut Spine> {
        assert_eq!(fig.id(), self.figure, "figure does not own this composition");
        let border = self.border(side);
        fig.regions_mut()
            .filter(|region| border.contains(&region.id()))
            .map(|region| region.spines_mut().get_mut(side))
            .collect()
    }

    fn border(&self, side: Side) -> &[RegionId] {
        match side {
            Side::Top => &self.first_row,
            Side::Right => &self.last_col,
            Side::Bottom => &self.last_row,
            Side::Left => &self.first_col,
        }
    }

    /// X axis of the overlay region, where the composition's label lives.
    pub fn xaxis<'f>(&self, fig: &'f Figure) -> &'f Axis {
        fig[self.overlay].xaxis()
    }

    pub fn yaxis<'f>(&self, fig: &'f Figure) -> &'f Axis {
        fig[self.overlay].yaxis()
    }

    pub fn current_legend<'f>(&self, fig: &'f Figure) -> Option<&'f Legend> {
        fig[self.overlay].legend()
    }

    pub fn title<'f>(&self, fig: &'f Figure) -> Option<&'f str> {
        fig[self.overlay].title()
    }

    pub fn xlabel<'f>(&self, fig: &'f Figure) -> Option<&'f str> {
        fig[self.overlay].xaxis().label().map(|label| label.text.as_str())
    }

    pub fn ylabel<'f>(&self, fig: &'f Figure) -> Option<&'f str> {
        fig[self.overlay].yaxis().label().map(|label| label.text.as_str())
    }

    /// Regions sharing x limits, one group per column.
    pub fn shared_x_axes(&self) -> &[Vec<RegionId>] {
        &self.columns
    }

    /// Regions sharing y limits, one group per row.
    pub fn shared_y_axes(&self) -> &[Vec<RegionId>] {
        &self.rows
    }

    pub fn figure_id(&self) -> FigureId {
        self.figure
    }

    /// Every data region, row-major from the top-left.
    pub fn regions(&self) -> &[RegionId] {
        &self.regions
    }

    pub fn overlay(&self) -> RegionId {
        self.overlay
    }

    pub fn first_row(&self) -> &[RegionId] {
        &self.first_row
    }

    pub fn last_row(&self) -> &[RegionId] {
        &self.last_row
    }

    pub fn first_col(&self) -> &[RegionId] {
        &self.first_col
    }

    pub fn last_col(&self) -> &[RegionId] {
        &self.last_col
    }

    pub fn nrows(&self) -> usize {
        self.nrows
    }

    pub fn ncols(&self) -> usize {
        self.ncols
    }

    pub fn despine(&self) -> bool {
        self.despine
    }

    pub fn break_mark_style(&self) -> &BreakMarkStyle {
        &self.marks
    }

    /// Handles of the break marks currently on the figure.
    pub fn diag_handles(&self) -> &[ShapeId] {
        &self.diag_handles
    }
}

/// Explicit ratios win over ratios computed from the ranges.
/// Pick explicit ratios over computed ones; either must leave room for the cells.
fn resolve_ratios(
    explicit: Option<Vec<f64>>,
    computed: Vec<f64>,
    axis: AxisName,
) -> Result<Vec<f64>> {
    let ratios = match explicit {
        Some(ratios) if ratios.is_empty() => return Err(BrokenAxesError::EmptyRatios { axis }),
        Some(ratios) => ratios,
        None => computed,
    };
    let sum: f64 = ratios.iter().sum();
    if !(sum.is_finite() && sum > 0.0) {
        return Err(BrokenAxesError::DegenerateRatios { axis, sum });
    }
    Ok(ratios)
}

fn check_range_count(breaks: Option<&AxisBreaks>, cells: usize, axis: AxisName) -> Result<()> {
    match breaks {
        Some(breaks) if breaks.len() != cells => Err(BrokenAxesError::RangeCountMismatch {
            axis,
            ranges: breaks.len(),
            cells,
        }),
        _ => Ok(()),
    }
}

/// Widest tick spacing among `border`, skipping regions with too few ticks.
fn shared_base(fig: &Figure, border: &[RegionId], axis: AxisName) -> Option<f64> {
    let base = border
        .iter()
        .filter_map(|&id| {
            let region = &fig[id];
            let a = match axis {
                AxisName::X => region.xaxis(),
                AxisName::Y => region.yaxis(),
            };
            match tick_spacing(&a.tick_locations(), a.scale()) {
                Ok(spacing) => Some(spacing),
                Err(degenerate) => {
                    debug!(
                        region = %id,
                        %axis,
                        ticks = degenerate.count,
                        "leaving region out of the shared tick base"
                    );
                    None
                }
            }
        })
        .reduce(f64::max);

    if base.is_none() {
        debug!(%axis, "no border region has two ticks, keeping automatic ticks");
    }
    base
}
