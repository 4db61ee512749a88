//! A single rectangular plotting area and the axis state it carries.

use std::fmt;

use iced::{Color, Rectangle};
use indexmap::IndexMap;

use crate::{
    AxisScale,
    axes_labels::{AxisLabel, Text},
    axis_link::AxisLink,
    grid::GridLines,
    gridspec::GridCell,
    legend::Legend,
    reference_lines::{Orientation, ReferenceLine},
    secondary_axis::{AxisFunctions, SecondaryAxis},
    series::{Series, SeriesError, ShapeId},
    spines::{Side, Spines},
    ticks::Locator,
};

/// Fraction of the data span added on each side when autoscaling.
const AUTOSCALE_MARGIN: f64 = 0.05;

/// Unique identifier of a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegionId(pub(crate) u64);

impl RegionId {
    pub(crate) fn new() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static NEXT_ID: AtomicU64 = AtomicU64::new(0);
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Region({})", self.0)
    }
}

/// One axis of a region: scale, shared view limits and tick decoration.
#[derive(Debug, Clone)]
pub struct Axis {
    scale: AxisScale,
    view: AxisLink,
    locator: Locator,
    tick_lines_visible: bool,
    tick_labels_visible: bool,
    offset_text_visible: bool,
    label: Option<AxisLabel>,
}

impl Default for Axis {
    fn default() -> Self {
        Self {
            scale: AxisScale::Linear,
            view: AxisLink::default(),
            locator: Locator::Auto,
            tick_lines_visible: true,
            tick_labels_visible: true,
            offset_text_visible: true,
            label: None,
        }
    }
}

impl Axis {
    pub fn scale(&self) -> AxisScale {
        self.scale
    }

    /// Change the scale and fall back to its automatic locator.
    pub fn set_scale(&mut self, scale: AxisScale) {
        self.scale = scale;
        self.locator = Locator::auto_for(scale);
    }

    pub fn limits(&self) -> (f64, f64) {
        self.view.get()
    }

    /// Set the view limits. Every axis sharing this one's link follows and
    /// stops autoscaling.
    pub fn set_limits(&mut self, lo: f64, hi: f64) {
        self.view.pin(lo, hi);
    }

    /// Whether the limits still follow the data.
    pub fn autoscale(&self) -> bool {
        self.view.autoscale()
    }

    pub fn link(&self) -> &AxisLink {
        &self.view
    }

    /// Adopt `leader`'s limits; from now on both report the same view.
    pub(crate) fn share(&mut self, leader: &Axis) {
        self.view = leader.view.clone();
    }

    pub fn is_shared_with(&self, other: &Axis) -> bool {
        self.view.is_linked_to(&other.view)
    }

    /// Shift the view by `fraction` of its span, in plot space.
    ///
    /// Returns `false` if the view cannot be represented on this scale.
    pub fn pan(&mut self, fraction: f64) -> bool {
        let (lo, hi) = self.limits();
        let (Some(a), Some(span)) = (self.scale.project(lo), self.scale.plot_span(lo, hi)) else {
            return false;
        };
        let shift = span * fraction;
        self.set_plot_limits(a + shift, a + span + shift)
    }

    /// Zoom by `factor` (greater than 1 zooms in) around `anchor`, a fraction
    /// of the current view.
    pub fn zoom(&mut self, factor: f64, anchor: f64) -> bool {
        if !factor.is_finite() || factor <= 0.0 {
            return false;
        }
        let Some((a, b)) = self.plot_limits() else {
            return false;
        };
        let center = a + (b - a) * anchor;
        self.set_plot_limits(center - (center - a) / factor, center + (b - center) / factor)
    }

    fn plot_limits(&self) -> Option<(f64, f64)> {
        let (lo, hi) = self.limits();
        Some((self.scale.project(lo)?, self.scale.project(hi)?))
    }

    fn set_plot_limits(&mut self, a: f64, b: f64) -> bool {
        match (self.scale.unproject(a), self.scale.unproject(b)) {
            (Some(lo), Some(hi)) => {
                self.set_limits(lo, hi);
                true
            }
            _ => false,
        }
    }

    pub fn locator(&self) -> &Locator {
        &self.locator
    }

    pub fn set_locator(&mut self, locator: Locator) {
        self.locator = locator;
    }

    /// Pin the ticks to exactly `locs`.
    pub fn set_ticks(&mut self, locs: Vec<f64>) {
        self.locator = Locator::Fixed(locs);
    }

    /// Current major tick locations.
    pub fn tick_locations(&self) -> Vec<f64> {
        let (lo, hi) = self.limits();
        self.locator.tick_locations(lo, hi)
    }

    pub fn tick_lines_visible(&self) -> bool {
        self.tick_lines_visible
    }

    pub fn tick_labels_visible(&self) -> bool {
        self.tick_labels_visible
    }

    /// Show or hide tick marks and tick labels together.
    pub fn set_tick_elements_visible(&mut self, visible: bool) {
        self.tick_lines_visible = visible;
        self.tick_labels_visible = visible;
    }

    /// Whether the shared exponent/offset text (e.g. `1e-10`) is drawn.
    pub fn offset_text_visible(&self) -> bool {
        self.offset_text_visible
    }

    pub fn set_offset_text_visible(&mut self, visible: bool) {
        self.offset_text_visible = visible;
    }

    pub fn label(&self) -> Option<&AxisLabel> {
        self.label.as_ref()
    }

    pub fn set_label(&mut self, label: AxisLabel) {
        self.label = Some(label);
    }

    /// Fit the limits to `[min, max]` plus a margin, if still autoscaling.
    fn fit(&mut self, min: f64, max: f64) {
        if !self.view.autoscale() {
            return;
        }
        let (Some(a), Some(b)) = (self.scale.project(min), self.scale.project(max)) else {
            return;
        };
        let margin = if b > a { (b - a) * AUTOSCALE_MARGIN } else { AUTOSCALE_MARGIN };
        if let (Some(lo), Some(hi)) = (
            self.scale.unproject(a - margin),
            self.scale.unproject(b + margin),
        ) {
            self.view.set(lo, hi);
        }
    }
}

/// Something drawn inside a region.
#[derive(Debug, Clone)]
pub enum Artist {
    Series(Series),
    ReferenceLine(ReferenceLine),
    Text(Text),
    Grid(GridLines),
}

impl Artist {
    /// Legend label, if the artist has one.
    pub fn label(&self) -> Option<&str> {
        match self {
            Self::Series(s) => s.label.as_deref(),
            Self::ReferenceLine(l) => l.label.as_deref(),
            Self::Text(_) | Self::Grid(_) => None,
        }
    }
}

/// A rectangular plotting area with its own axes, spines and artists.
///
/// Bounds are figure-relative with the origin at the bottom-left corner.
#[derive(Debug, Clone)]
pub struct Region {
    id: RegionId,
    bounds: Rectangle<f64>,
    cell: GridCell,
    x: Axis,
    y: Axis,
    spines: Spines,
    face_color: Option<Color>,
    artists: IndexMap<ShapeId, Artist>,
    title: Option<String>,
    legend: Option<Legend>,
    secondary: Vec<SecondaryAxis>,
}

impl Region {
    pub fn new(bounds: Rectangle<f64>, cell: GridCell) -> Self {
        Self {
            id: RegionId::new(),
            bounds,
            cell,
            x: Axis::default(),
            y: Axis::default(),
            spines: Spines::default(),
            face_color: Some(Color::WHITE),
            artists: IndexMap::new(),
            title: None,
            legend: None,
            secondary: Vec::new(),
        }
    }

    /// An invisible region: no spines, no ticks, transparent face.
    pub fn overlay(bounds: Rectangle<f64>) -> Self {
        let mut region = Self::new(bounds, GridCell::single());
        region.spines = Spines::hidden();
        region.x.set_ticks(Vec::new());
        region.y.set_ticks(Vec::new());
        region.face_color = None;
        region
    }

    pub fn id(&self) -> RegionId {
        self.id
    }

    pub fn bounds(&self) -> Rectangle<f64> {
        self.bounds
    }

    pub(crate) fn set_bounds(&mut self, bounds: Rectangle<f64>) {
        self.bounds = bounds;
    }

    pub fn cell(&self) -> GridCell {
        self.cell
    }

    pub fn xaxis(&self) -> &Axis {
        &self.x
    }

    pub fn xaxis_mut(&mut self) -> &mut Axis {
        &mut self.x
    }

    pub fn yaxis(&self) -> &Axis {
        &self.y
    }

    pub fn yaxis_mut(&mut self) -> &mut Axis {
        &mut self.y
    }

    pub fn xlim(&self) -> (f64, f64) {
        self.x.limits()
    }

    pub fn set_xlim(&mut self, lo: f64, hi: f64) {
        self.x.set_limits(lo, hi);
    }

    pub fn ylim(&self) -> (f64, f64) {
        self.y.limits()
    }

    pub fn set_ylim(&mut self, lo: f64, hi: f64) {
        self.y.set_limits(lo, hi);
    }

    pub fn set_xscale(&mut self, scale: AxisScale) {
        self.x.set_scale(scale);
    }

    pub fn set_yscale(&mut self, scale: AxisScale) {
        self.y.set_scale(scale);
    }

    pub fn spines(&self) -> &Spines {
        &self.spines
    }

    pub fn spines_mut(&mut self) -> &mut Spines {
        &mut self.spines
    }

    pub fn face_color(&self) -> Option<Color> {
        self.face_color
    }

    pub fn set_face_color(&mut self, color: Option<Color>) {
        self.face_color = color;
    }

    /// Draw a series and refit any autoscaling axis.
    pub fn plot(&mut self, series: Series) -> Result<ShapeId, SeriesError> {
        series.validate()?;
        let id = self.add_artist(Artist::Series(series));
        self.autoscale_view();
        Ok(id)
    }

    pub fn reference_line(&mut self, line: ReferenceLine) -> ShapeId {
        let id = self.add_artist(Artist::ReferenceLine(line));
        self.autoscale_view();
        id
    }

    pub fn grid(&mut self, lines: GridLines) -> ShapeId {
        self.add_artist(Artist::Grid(lines))
    }

    pub fn text(&mut self, text: Text) -> ShapeId {
        self.add_artist(Artist::Text(text))
    }

    fn add_artist(&mut self, artist: Artist) -> ShapeId {
        let id = ShapeId::new();
        self.artists.insert(id, artist);
        id
    }

    pub fn artist(&self, id: ShapeId) -> Option<&Artist> {
        self.artists.get(&id)
    }

    pub fn artists(&self) -> impl Iterator<Item = (ShapeId, &Artist)> {
        self.artists.iter().map(|(id, artist)| (*id, artist))
    }

    pub fn remove_artist(&mut self, id: ShapeId) -> Option<Artist> {
        self.artists.shift_remove(&id)
    }

    /// Handles and labels of every labelled artist, in drawing order.
    pub fn legend_handles_labels(&self) -> (Vec<ShapeId>, Vec<String>) {
        self.artists
            .iter()
            .filter_map(|(id, artist)| artist.label().map(|label| (*id, label.to_string())))
            .unzip()
    }

    pub fn legend(&self) -> Option<&Legend> {
        self.legend.as_ref()
    }

    pub fn set_legend(&mut self, legend: Legend) -> &Legend {
        self.legend.insert(legend)
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    /// Attach a secondary axis to one edge and return its slot.
    pub fn add_secondary_axis(&mut self, location: Side, functions: Option<AxisFunctions>) -> usize {
        self.secondary.push(SecondaryAxis::new(location, functions));
        self.secondary.len() - 1
    }

    pub fn secondary_axes(&self) -> &[SecondaryAxis] {
        &self.secondary
    }

    pub fn secondary_axis_mut(&mut self, index: usize) -> Option<&mut SecondaryAxis> {
        self.secondary.get_mut(index)
    }

    /// Whether `(x, y)` lies strictly inside the current limits.
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        let (x0, x1) = self.xlim();
        let (y0, y1) = self.ylim();
        x0 < x && x < x1 && y0 < y && y < y1
    }

    /// Refit autoscaling axes to the extent of the drawn data.
    fn autoscale_view(&mut self) {
        let mut x_range: Option<(f64, f64)> = None;
        let mut y_range: Option<(f64, f64)> = None;
        let grow = |range: &mut Option<(f64, f64)>, lo: f64, hi: f64| {
            *range = Some(match *range {
                Some((a, b)) => (a.min(lo), b.max(hi)),
                None => (lo, hi),
            });
        };

        for artist in self.artists.values() {
            match artist {
                Artist::Series(series) => {
                    if let Some((min, max)) = series.data_bounds() {
                        grow(&mut x_range, min[0], max[0]);
                        grow(&mut y_range, min[1], max[1]);
                    }
                }
                Artist::ReferenceLine(line) if line.value.is_finite() => match line.orientation {
                    Orientation::Horizontal => grow(&mut y_range, line.value, line.value),
                    Orientation::Vertical => grow(&mut x_range, line.value, line.value),
                },
                _ => {}
            }
        }

        if let Some((lo, hi)) = x_range {
            self.x.fit(lo, hi);
        }
        if let Some((lo, hi)) = y_range {
            self.y.fit(lo, hi);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LineStyle;

    fn region() -> Region {
        Region::new(Rectangle::default(), GridCell::single())
    }

    #[test]
    fn shared_axes_follow_each_other() {
        let mut a = region();
        let mut b = region();
        a.set_xlim(0.0, 0.1);
        b.xaxis_mut().share(a.xaxis());
        b.set_xlim(0.2, 0.3);
        assert_eq!(a.xlim(), (0.2, 0.3));
        assert!(a.xaxis().is_shared_with(b.xaxis()));
        assert!(!a.yaxis().is_shared_with(b.yaxis()));
    }

    #[test]
    fn panning_one_shared_axis_stops_autoscale_on_both() {
        let mut a = region();
        let mut b = region();
        b.xaxis_mut().share(a.xaxis());
        a.plot(Series::line_only(vec![[0.0, 0.0], [10.0, 1.0]], LineStyle::Solid))
            .unwrap();
        assert!(b.xaxis().autoscale());

        assert!(a.xaxis_mut().pan(0.5));
        let panned = a.xlim();
        assert!(!b.xaxis().autoscale());

        b.plot(Series::line_only(vec![[0.0, 0.0], [10.0, 1.0]], LineStyle::Solid))
            .unwrap();
        assert_eq!(b.xlim(), panned);
        assert!(b.yaxis().autoscale());
    }

    #[test]
    fn pan_and_zoom_linear() {
        let mut r = region();
        r.set_xlim(0.0, 10.0);
        assert!(r.xaxis_mut().pan(0.1));
        assert_eq!(r.xlim(), (1.0, 11.0));
        assert!(r.xaxis_mut().zoom(2.0, 0.5));
        assert_eq!(r.xlim(), (3.5, 8.5));
    }

    #[test]
    fn pan_log_preserves_ratio() {
        let mut r = region();
        r.set_xscale(AxisScale::LOG10);
        r.set_xlim(1.0, 100.0);
        assert!(r.xaxis_mut().pan(0.5));
        let (lo, hi) = r.xlim();
        assert!((lo - 10.0).abs() < 1e-9);
        assert!((hi - 1000.0).abs() < 1e-6);
    }

    #[test]
    fn plot_autoscales_until_limits_are_set() {
        let mut r = region();
        r.plot(Series::line_only(vec![[0.0, 0.0], [10.0, 2.0]], LineStyle::Solid))
            .unwrap();
        assert_eq!(r.xlim(), (-0.5, 10.5));

        r.set_xlim(0.0, 1.0);
        r.plot(Series::line_only(vec![[0.0, 0.0], [50.0, 2.0]], LineStyle::Solid))
            .unwrap();
        assert_eq!(r.xlim(), (0.0, 1.0));
    }

    #[test]
    fn invalid_series_is_not_drawn() {
        let mut r = region();
        assert_eq!(r.plot(Series::circles(vec![], 1.0)), Err(SeriesError::Empty));
        assert_eq!(r.artists().count(), 0);
    }

    #[test]
    fn legend_handles_follow_labels() {
        let mut r = region();
        let sin = r
            .plot(Series::circles(vec![[0.0, 0.0]], 1.0).with_label("sin"))
            .unwrap();
        r.plot(Series::circles(vec![[1.0, 1.0]], 1.0)).unwrap();
        let line = r.reference_line(ReferenceLine::horizontal(0.5).with_label("ref"));
        let (handles, labels) = r.legend_handles_labels();
        assert_eq!(handles, vec![sin, line]);
        assert_eq!(labels, vec!["sin".to_string(), "ref".to_string()]);
    }

    #[test]
    fn contains_point_is_strict() {
        let mut r = region();
        r.set_xlim(0.0, 1.0);
        r.set_ylim(0.0, 1.0);
        assert!(r.contains_point(0.5, 0.5));
        assert!(!r.contains_point(1.0, 0.5));
        assert!(!r.contains_point(0.5, -0.1));
    }

    #[test]
    fn overlay_is_invisible() {
        let r = Region::overlay(Rectangle::default());
        assert!(r.face_color().is_none());
        assert!(r.xaxis().tick_locations().is_empty());
        assert!(Side::ALL.iter().all(|side| !r.spines().get(*side).visible));
    }
}
