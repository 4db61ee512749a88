use crate::AxisScale;

/// Upper bound on the number of ticks a locator produces for one view.
const MAX_TICKS: usize = 1000;

/// Relative slack when deciding whether a tick lies inside the view.
const TICK_EPSILON: f64 = 1e-9;

/// Target number of intervals for the automatic linear locator.
const AUTO_TARGET_INTERVALS: f64 = 5.0;

/// Strategy for placing major ticks along an axis.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Locator {
    /// Nice-step ticks (multiples of 1, 2, 5 or 10 times a power of ten).
    #[default]
    Auto,
    /// One tick per power of `base`.
    Log { base: f64 },
    /// Every multiple of the given spacing.
    Multiple(f64),
    /// Exactly the given locations, regardless of the view.
    Fixed(Vec<f64>),
}

impl Locator {
    /// The automatic locator appropriate for a scale.
    pub fn auto_for(scale: AxisScale) -> Self {
        match scale {
            AxisScale::Linear => Self::Auto,
            AxisScale::Log { base } => Self::Log { base },
        }
    }

    /// A fixed-interval locator for a shared tick base on the given scale.
    pub fn with_base(scale: AxisScale, base: f64) -> Self {
        if scale.is_log() {
            Self::Log { base }
        } else {
            Self::Multiple(base)
        }
    }

    /// Tick locations for the view `(lo, hi)`, ascending.
    pub fn tick_locations(&self, lo: f64, hi: f64) -> Vec<f64> {
        let (min, max) = if lo <= hi { (lo, hi) } else { (hi, lo) };
        if !min.is_finite() || !max.is_finite() {
            return Vec::new();
        }
        match self {
            Self::Auto => auto_ticks(min, max),
            Self::Log { base } => log_ticks(min, max, *base),
            Self::Multiple(step) => multiple_ticks(min, max, *step),
            Self::Fixed(locs) => locs.clone(),
        }
    }
}

fn auto_ticks(min: f64, max: f64) -> Vec<f64> {
    let span = max - min;
    if span <= 0.0 {
        return Vec::new();
    }
    multiple_ticks(min, max, nice_step(span / AUTO_TARGET_INTERVALS))
}

fn multiple_ticks(min: f64, max: f64, step: f64) -> Vec<f64> {
    if !step.is_finite() || step <= 0.0 {
        return Vec::new();
    }
    let slack = step * TICK_EPSILON;
    let first = ((min - slack) / step).ceil() as i64;
    let last = ((max + slack) / step).floor() as i64;
    (first..=last)
        .take(MAX_TICKS)
        .map(|i| {
            let value = i as f64 * step;
            // Keep the origin tick at exactly zero.
            if value.abs() < slack { 0.0 } else { value }
        })
        .collect()
}

fn log_ticks(min: f64, max: f64, base: f64) -> Vec<f64> {
    if !base.is_finite() || base <= 1.0 || max <= 0.0 {
        return Vec::new();
    }
    let min = if min > 0.0 { min } else { f64::MIN_POSITIVE };
    let first = (min.log(base) - TICK_EPSILON).ceil() as i64;
    let last = (max.log(base) + TICK_EPSILON).floor() as i64;
    (first..=last)
        .take(MAX_TICKS)
        .map(|k| base.powi(k as i32))
        .collect()
}

/// Calculate a "nice" step size for ticks based on the desired number of divisions.
/// Returns a value that is a multiple of 1, 2, 5, or 10 times a power of 10.
pub fn nice_step(raw: f64) -> f64 {
    const NICE_STEP_BASES: [f64; 4] = [1.0, 2.0, 5.0, 10.0];
    if !raw.is_finite() || raw <= 0.0 {
        return 1.0;
    }
    let exp = raw.log10().floor();
    let base = 10.0_f64.powf(exp);
    for &m in &NICE_STEP_BASES {
        if raw <= m * base {
            return m * base;
        }
    }
    base * 10.0
}

/// A region reported too few ticks to derive a spacing from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DegenerateTicks {
    pub(crate) count: usize,
}

/// Spacing between the first two ticks: a difference on linear scales and a
/// ratio on logarithmic ones.
pub(crate) fn tick_spacing(locs: &[f64], scale: AxisScale) -> Result<f64, DegenerateTicks> {
    let [first, second, ..] = locs else {
        return Err(DegenerateTicks { count: locs.len() });
    };
    let spacing = if scale.is_log() {
        second / first
    } else {
        second - first
    };
    // A shared base must advance the locator; anything else counts as degenerate.
    let usable = if scale.is_log() {
        spacing > 1.0
    } else {
        spacing > 0.0
    };
    if spacing.is_finite() && usable {
        Ok(spacing)
    } else {
        Err(DegenerateTicks { count: locs.len() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: &[f64], b: &[f64]) -> bool {
        a.len() == b.len() && a.iter().zip(b).all(|(x, y)| (x - y).abs() < 1e-9)
    }

    #[test]
    fn auto_ticks_cover_view() {
        let ticks = Locator::Auto.tick_locations(0.0, 0.1);
        assert!(close(&ticks, &[0.0, 0.02, 0.04, 0.06, 0.08, 0.1]));

        let ticks = Locator::Auto.tick_locations(0.4, 0.7);
        assert!(close(&ticks, &[0.4, 0.5, 0.6, 0.7]));
    }

    #[test]
    fn auto_ticks_handle_inverted_and_empty_views() {
        assert!(close(
            &Locator::Auto.tick_locations(1.0, 0.0),
            &[0.0, 0.2, 0.4, 0.6, 0.8, 1.0]
        ));
        assert!(Locator::Auto.tick_locations(1.0, 1.0).is_empty());
        assert!(Locator::Auto.tick_locations(f64::NAN, 1.0).is_empty());
    }

    #[test]
    fn multiple_ticks_are_multiples_of_base() {
        let ticks = Locator::Multiple(0.25).tick_locations(-0.3, 0.6);
        assert!(close(&ticks, &[-0.25, 0.0, 0.25, 0.5]));
        assert!(Locator::Multiple(0.0).tick_locations(0.0, 1.0).is_empty());
    }

    #[test]
    fn log_ticks_are_powers_of_base() {
        let ticks = Locator::Log { base: 10.0 }.tick_locations(1.0, 500.0);
        assert!(close(&ticks, &[1.0, 10.0, 100.0]));
        let ticks = Locator::Log { base: 10.0 }.tick_locations(600.0, 10000.0);
        assert!(close(&ticks, &[1000.0, 10000.0]));
    }

    #[test]
    fn fixed_ticks_ignore_view() {
        let ticks = Locator::Fixed(vec![0.5]).tick_locations(10.0, 20.0);
        assert_eq!(ticks, vec![0.5]);
    }

    #[test]
    fn nice_step_rounds_up() {
        assert_eq!(nice_step(0.3), 0.5);
        assert_eq!(nice_step(7.0), 10.0);
        assert_eq!(nice_step(-1.0), 1.0);
    }

    #[test]
    fn spacing_needs_two_ticks() {
        assert_eq!(
            tick_spacing(&[0.5], AxisScale::Linear),
            Err(DegenerateTicks { count: 1 })
        );
        assert_eq!(
            tick_spacing(&[], AxisScale::LOG10),
            Err(DegenerateTicks { count: 0 })
        );
        assert_eq!(tick_spacing(&[10.0, 100.0], AxisScale::LOG10), Ok(10.0));
        assert!(tick_spacing(&[0.2, 0.2], AxisScale::Linear).is_err());
    }
}
