use std::fmt;
use std::sync::Arc;

use iced::Color;

use crate::{axes_labels::AxisLabel, region::RegionId, spines::Side, ticks::Locator};

/// A mapping between the values of a primary axis and its secondary axis.
pub type AxisMapping = Arc<dyn Fn(f64) -> f64 + Send + Sync>;

/// Forward (primary to secondary) and inverse mappings of a secondary axis.
#[derive(Clone)]
pub struct AxisFunctions {
    pub forward: AxisMapping,
    pub inverse: AxisMapping,
}

impl AxisFunctions {
    pub fn new<F, I>(forward: F, inverse: I) -> Self
    where
        F: Fn(f64) -> f64 + Send + Sync + 'static,
        I: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        Self {
            forward: Arc::new(forward),
            inverse: Arc::new(inverse),
        }
    }
}

impl fmt::Debug for AxisFunctions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AxisFunctions").finish_non_exhaustive()
    }
}

/// An extra axis along one edge of a region, showing the primary axis'
/// values through a mapping.
#[derive(Debug, Clone)]
pub struct SecondaryAxis {
    location: Side,
    functions: Option<AxisFunctions>,
    pub locator: Locator,
    pub spine_visible: bool,
    pub face_color: Option<Color>,
    pub label: Option<AxisLabel>,
}

impl SecondaryAxis {
    pub(crate) fn new(location: Side, functions: Option<AxisFunctions>) -> Self {
        Self {
            location,
            functions,
            locator: Locator::Auto,
            spine_visible: true,
            face_color: None,
            label: None,
        }
    }

    pub fn location(&self) -> Side {
        self.location
    }

    pub fn functions(&self) -> Option<&AxisFunctions> {
        self.functions.as_ref()
    }

    /// Whether the axis runs horizontally (top or bottom edge).
    pub fn is_x(&self) -> bool {
        matches!(self.location, Side::Top | Side::Bottom)
    }

    /// Map primary view limits onto this axis.
    pub fn map_limits(&self, (lo, hi): (f64, f64)) -> (f64, f64) {
        match &self.functions {
            Some(functions) => ((functions.forward)(lo), (functions.forward)(hi)),
            None => (lo, hi),
        }
    }

    /// Map a value on this axis back onto the primary axis.
    pub fn to_primary(&self, value: f64) -> f64 {
        match &self.functions {
            Some(functions) => (functions.inverse)(value),
            None => value,
        }
    }
}

/// Handle of a secondary axis: the region it hangs off and its slot there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SecondaryAxisId {
    pub region: RegionId,
    pub index: usize,
}
