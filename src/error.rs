//! Error types for composing and driving a broken axis.

use thiserror::Error;

use crate::{series::SeriesError, spines::Side};

/// Convenience alias for results returned by this crate.
pub type Result<T> = std::result::Result<T, BrokenAxesError>;

/// Which logical axis an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AxisName {
    X,
    Y,
}

impl std::fmt::Display for AxisName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::X => f.write_str("x"),
            Self::Y => f.write_str("y"),
        }
    }
}

/// Errors that can occur while building or using a [`BrokenAxes`](crate::BrokenAxes).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BrokenAxesError {
    /// A logarithmic scale was requested for a range with a non-positive bound.
    #[error("logarithmic {axis}-scale needs positive bounds, got ({lo}, {hi})")]
    Domain { axis: AxisName, lo: f64, hi: f64 },

    /// A secondary axis was requested on an edge that does not belong to its axis.
    #[error("a secondary {axis}-axis cannot be placed at the {location} edge")]
    InvalidLocation { axis: AxisName, location: Side },

    /// The number of declared ranges does not match the number of grid cells on that axis.
    #[error("{ranges} {axis}-ranges given for a grid with {cells} {axis}-cells")]
    RangeCountMismatch {
        axis: AxisName,
        ranges: usize,
        cells: usize,
    },

    /// An axis was declared broken with no ranges at all.
    #[error("{axis}-axis declared with an empty list of ranges")]
    EmptyRanges { axis: AxisName },

    /// Explicit size ratios were supplied as an empty list.
    #[error("{axis}-axis declared with an empty list of size ratios")]
    EmptyRatios { axis: AxisName },

    /// Size ratios that leave no room to lay out the cells.
    #[error("{axis}-axis size ratios must sum to a positive number, got {sum}")]
    DegenerateRatios { axis: AxisName, sum: f64 },

    /// A region index that the composition does not have.
    #[error("region {index} requested from a composition of {regions} regions")]
    UnknownRegion { index: usize, regions: usize },

    /// No region's current limits contain the requested point.
    #[error("({x}, {y}) is not within the limits of any region")]
    OutOfBounds { x: f64, y: f64 },

    /// A series forwarded to the regions was rejected.
    #[error(transparent)]
    Series(#[from] SeriesError),
}

impl BrokenAxesError {
    /// Whether the error stems from an invalid composition setup rather than a data value.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::InvalidLocation { .. }
                | Self::RangeCountMismatch { .. }
                | Self::EmptyRanges { .. }
                | Self::EmptyRatios { .. }
                | Self::DegenerateRatios { .. }
                | Self::UnknownRegion { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_axis() {
        let err = BrokenAxesError::Domain {
            axis: AxisName::X,
            lo: 0.0,
            hi: 10.0,
        };
        assert!(err.to_string().contains("x-scale"));
        assert!(!err.is_configuration());

        let err = BrokenAxesError::InvalidLocation {
            axis: AxisName::Y,
            location: Side::Top,
        };
        assert_eq!(
            err.to_string(),
            "a secondary y-axis cannot be placed at the top edge"
        );
        assert!(err.is_configuration());
    }

    #[test]
    fn out_of_bounds_reports_point() {
        let err = BrokenAxesError::OutOfBounds { x: -11.0, y: 2.5 };
        assert!(err.to_string().contains("(-11, 2.5)"));
        assert!(!err.is_configuration());
    }

    #[test]
    fn degenerate_ratios_are_a_setup_error() {
        let err = BrokenAxesError::DegenerateRatios {
            axis: AxisName::Y,
            sum: 0.0,
        };
        assert_eq!(
            err.to_string(),
            "y-axis size ratios must sum to a positive number, got 0"
        );
        assert!(err.is_configuration());
    }
}
