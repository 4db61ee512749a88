/// How data values are spread along an axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum AxisScale {
    #[default]
    Linear,

    /// Equal distances for equal ratios. Only positive values can be shown;
    /// `base` also sets where the automatic ticks go (one per power).
    Log { base: f64 },
}

impl AxisScale {
    pub const LOG10: Self = Self::Log { base: 10.0 };

    pub fn is_log(self) -> bool {
        matches!(self, Self::Log { .. })
    }

    /// Position of a data value in the scale's evenly spaced space, or
    /// `None` if the value cannot be shown on this scale.
    pub(crate) fn project(self, value: f64) -> Option<f64> {
        let projected = match self {
            Self::Linear => value,
            Self::Log { .. } if value <= 0.0 => return None,
            Self::Log { base } => value.log(base),
        };
        projected.is_finite().then_some(projected)
    }

    /// Inverse of [`Self::project`].
    pub(crate) fn unproject(self, position: f64) -> Option<f64> {
        if !position.is_finite() {
            return None;
        }
        match self {
            Self::Linear => Some(position),
            Self::Log { base } => {
                let value = base.powf(position);
                (value.is_finite() && value > 0.0).then_some(value)
            }
        }
    }

    /// Distance between two data values once projected.
    pub(crate) fn plot_span(self, lo: f64, hi: f64) -> Option<f64> {
        Some(self.project(hi)? - self.project(lo)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_projection_is_in_powers() {
        let scale = AxisScale::LOG10;
        assert!((scale.project(1000.0).unwrap() - 3.0).abs() < 1e-12);
        assert!((scale.unproject(2.0).unwrap() - 100.0).abs() < 1e-9);
        assert!((scale.plot_span(10.0, 1000.0).unwrap() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn values_outside_the_scale_are_rejected() {
        assert_eq!(AxisScale::LOG10.project(0.0), None);
        assert_eq!(AxisScale::LOG10.project(-5.0), None);
        assert_eq!(AxisScale::LOG10.plot_span(-1.0, 10.0), None);
        assert_eq!(AxisScale::Linear.project(-5.0), Some(-5.0));
        assert_eq!(AxisScale::Linear.project(f64::NAN), None);
        assert_eq!(AxisScale::Linear.unproject(f64::INFINITY), None);
    }
}
