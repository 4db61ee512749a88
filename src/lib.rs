//! Broken axes: plots with gaps in their value ranges.
//!
//! - Splits a figure area into a grid of regions, one per declared x/y range
//! - Sizes every region in proportion to its range (linear, log or datetime)
//! - Links rows and columns so panning one segment moves its siblings
//! - Aligns tick spacing across segments and trims inner spines
//! - Draws diagonal break marks at the seams, exportable as a vertex buffer
//!
//! Quick start:
//!
//! ```
//! use broken_axes::{BrokenAxesBuilder, Figure, Series};
//!
//! let mut fig = Figure::default();
//! let bax = BrokenAxesBuilder::new()
//!     .with_xlims([(0.0, 0.1), (0.4, 0.7)])
//!     .with_ylims([(-1.0, 0.7), (0.79, 1.0)])
//!     .with_hspace(0.05)
//!     .build(&mut fig)?;
//!
//! let xs = (0..100).map(|i| i as f64 / 100.0);
//! bax.plot(&mut fig, Series::from_fn(xs, |x| (10.0 * x).sin()).with_label("sin"))?;
//! bax.set_xlabel(&mut fig, "time");
//! assert_eq!(bax.regions().len(), 4);
//! # Ok::<(), broken_axes::BrokenAxesError>(())
//! ```
pub mod axis_link;
pub mod axis_scale;
pub mod break_marks;
pub mod breaks;
pub mod broken_axes;
pub mod broken_axes_builder;
pub mod error;
pub mod figure;
pub mod gridspec;
pub mod reference_lines;
pub mod region;
pub mod secondary_axis;
pub mod series;
pub mod spines;
pub mod ticks;

pub(crate) mod axes_labels;
pub(crate) mod grid;
pub(crate) mod legend;

// Iced re-exports.
pub use iced::{Color, Rectangle, Size};

// Re-exports of public types.
pub use axes_labels::{AxisLabel, Text, X_LABEL_PAD, Y_LABEL_PAD};
pub use axis_link::AxisLink;
pub use axis_scale::AxisScale;
pub use break_marks::BreakMarkStyle;
pub use breaks::{AxisBreaks, BreakRange, BreakValue, Span, calculate_ratios};
pub use broken_axes::{BrokenAxes, LegendOptions, PlacedText};
pub use broken_axes_builder::BrokenAxesBuilder;
pub use error::{AxisName, BrokenAxesError, Result};
pub use figure::{Figure, FigureId, FigureLine, LineVertex};
pub use grid::{GridAxis, GridLines, TickWhich};
pub use gridspec::{GridCell, GridSpacing, GridSpec, SubplotParams};
pub use legend::{Legend, LegendEntry, LegendLocation};
pub use reference_lines::{Orientation, ReferenceLine};
pub use region::{Artist, Axis, Region, RegionId};
pub use secondary_axis::{AxisFunctions, AxisMapping, SecondaryAxis, SecondaryAxisId};
pub use series::{LineStyle, MarkerStyle, MarkerType, Series, SeriesError, ShapeId};
pub use spines::{Side, Spine, Spines};
pub use ticks::Locator;
