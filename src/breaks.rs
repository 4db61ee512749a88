//! Declared value ranges of a broken axis and the size ratios derived from them.

use chrono::{DateTime, NaiveDateTime, TimeDelta, Utc};

use crate::{
    AxisScale,
    error::{AxisName, BrokenAxesError, Result},
};

/// Extent of one declared range, before it is reduced to a size ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Span {
    /// Plain numeric difference `hi - lo`.
    Scalar(f64),
    /// Elapsed time between two datetime bounds.
    Duration(TimeDelta),
}

impl Span {
    /// The span as a plain number; durations become total elapsed seconds.
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Scalar(v) => v,
            Self::Duration(delta) => match delta.num_microseconds() {
                Some(us) => us as f64 / 1e6,
                None => delta.num_milliseconds() as f64 / 1e3,
            },
        }
    }
}

/// A value that can bound a range on a broken axis.
pub trait BreakValue: Copy {
    /// Position of the value on the axis.
    fn to_axis(self) -> f64;

    /// Extent between two values of this type.
    fn span(lo: Self, hi: Self) -> Span;
}

macro_rules! numeric_break_value {
    ($($ty:ty),*) => {
        $(
            impl BreakValue for $ty {
                fn to_axis(self) -> f64 {
                    self as f64
                }

                fn span(lo: Self, hi: Self) -> Span {
                    Span::Scalar(hi as f64 - lo as f64)
                }
            }
        )*
    };
}

numeric_break_value!(f64, f32, i32, i64, u32);

/// Datetimes sit on the axis as seconds since the Unix epoch.
impl BreakValue for NaiveDateTime {
    fn to_axis(self) -> f64 {
        self.and_utc().timestamp_millis() as f64 / 1e3
    }

    fn span(lo: Self, hi: Self) -> Span {
        Span::Duration(hi - lo)
    }
}

impl BreakValue for DateTime<Utc> {
    fn to_axis(self) -> f64 {
        self.timestamp_millis() as f64 / 1e3
    }

    fn span(lo: Self, hi: Self) -> Span {
        Span::Duration(hi - lo)
    }
}

/// One declared `(lo, hi)` range in axis coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BreakRange {
    pub lo: f64,
    pub hi: f64,
    pub span: Span,
}

impl BreakRange {
    pub fn new<T: BreakValue>(lo: T, hi: T) -> Self {
        Self {
            lo: lo.to_axis(),
            hi: hi.to_axis(),
            span: T::span(lo, hi),
        }
    }

    /// View limits for a region showing this range.
    pub fn limits(&self) -> (f64, f64) {
        (self.lo, self.hi)
    }
}

/// Ordered ranges of one broken axis.
///
/// Ranges are kept in supply order and are not checked for ordering or
/// overlap. X ranges map left to right, Y ranges bottom to top.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisBreaks {
    ranges: Vec<BreakRange>,
}

impl AxisBreaks {
    /// Collect `(lo, hi)` pairs of any [`BreakValue`].
    pub fn new<T, I>(ranges: I) -> Self
    where
        T: BreakValue,
        I: IntoIterator<Item = (T, T)>,
    {
        Self {
            ranges: ranges
                .into_iter()
                .map(|(lo, hi)| BreakRange::new(lo, hi))
                .collect(),
        }
    }

    pub fn ranges(&self) -> &[BreakRange] {
        &self.ranges
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}

impl<T: BreakValue, const N: usize> From<[(T, T); N]> for AxisBreaks {
    fn from(ranges: [(T, T); N]) -> Self {
        Self::new(ranges)
    }
}

impl<T: BreakValue> From<Vec<(T, T)>> for AxisBreaks {
    fn from(ranges: Vec<(T, T)>) -> Self {
        Self::new(ranges)
    }
}

/// Relative sizes of the cells along one axis, in declaration order.
///
/// An absent axis is unbroken and gets the single ratio `[1]`. A linear
/// scale uses `hi - lo`, a logarithmic one `ln(hi) - ln(lo)`.
pub fn calculate_ratios(
    breaks: Option<&AxisBreaks>,
    scale: AxisScale,
    axis: AxisName,
) -> Result<Vec<f64>> {
    let Some(breaks) = breaks else {
        return Ok(vec![1.0]);
    };
    if breaks.is_empty() {
        return Err(BrokenAxesError::EmptyRanges { axis });
    }

    breaks
        .ranges()
        .iter()
        .map(|range| {
            if scale.is_log() {
                if range.lo <= 0.0 || range.hi <= 0.0 {
                    return Err(BrokenAxesError::Domain {
                        axis,
                        lo: range.lo,
                        hi: range.hi,
                    });
                }
                Ok(range.hi.ln() - range.lo.ln())
            } else {
                Ok(range.span.as_f64())
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2020, 1, d)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .unwrap()
    }

    #[test]
    fn unbroken_axis_is_single_cell() {
        let ratios = calculate_ratios(None, AxisScale::Linear, AxisName::X).unwrap();
        assert_eq!(ratios, vec![1.0]);
    }

    #[test]
    fn linear_ratios_are_spans() {
        let breaks = AxisBreaks::from([(0.0, 0.1), (0.4, 0.7)]);
        let ratios = calculate_ratios(Some(&breaks), AxisScale::Linear, AxisName::X).unwrap();
        assert!((ratios[0] - 0.1).abs() < 1e-12);
        assert!((ratios[1] - 0.3).abs() < 1e-12);
    }

    #[test]
    fn integer_ranges_are_accepted() {
        let breaks = AxisBreaks::from([(0, 1), (2, 3), (4, 5)]);
        let ratios = calculate_ratios(Some(&breaks), AxisScale::Linear, AxisName::Y).unwrap();
        assert_eq!(ratios, vec![1.0, 1.0, 1.0]);
    }

    #[test]
    fn log_ratios_use_natural_log() {
        let breaks = AxisBreaks::from([(1.0, 500.0), (600.0, 10000.0)]);
        let ratios = calculate_ratios(Some(&breaks), AxisScale::LOG10, AxisName::X).unwrap();
        assert!((ratios[0] - 500f64.ln()).abs() < 1e-12);
        assert!((ratios[1] - (10000f64.ln() - 600f64.ln())).abs() < 1e-12);
    }

    #[test]
    fn log_rejects_non_positive_lower_bound() {
        let breaks = AxisBreaks::from([(0.0, 500.0), (600.0, 10000.0)]);
        let err = calculate_ratios(Some(&breaks), AxisScale::LOG10, AxisName::X).unwrap_err();
        assert_eq!(
            err,
            BrokenAxesError::Domain {
                axis: AxisName::X,
                lo: 0.0,
                hi: 500.0
            }
        );
    }

    #[test]
    fn datetime_spans_reduce_to_seconds() {
        let breaks = AxisBreaks::from([(day(1), day(3)), (day(6), day(20))]);
        let ratios = calculate_ratios(Some(&breaks), AxisScale::Linear, AxisName::X).unwrap();
        assert_eq!(ratios, vec![2.0 * 86_400.0, 14.0 * 86_400.0]);

        let range = breaks.ranges()[0];
        assert_eq!(range.hi - range.lo, 2.0 * 86_400.0);
    }

    #[test]
    fn empty_breaks_are_rejected() {
        let breaks = AxisBreaks::new(Vec::<(f64, f64)>::new());
        assert_eq!(
            calculate_ratios(Some(&breaks), AxisScale::Linear, AxisName::Y),
            Err(BrokenAxesError::EmptyRanges { axis: AxisName::Y })
        );
    }
}
