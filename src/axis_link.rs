use std::cell::Cell;
use std::rc::Rc;

/// Shared view state for one logical axis.
///
/// Every region axis holds an [`AxisLink`]. Regions in the same column share
/// one X link and regions in the same row share one Y link, so setting limits
/// through any of them is seen by all of them. Whether the limits still follow
/// the data is part of the shared state too: once one member is pinned, the
/// whole group stops autoscaling.
#[derive(Clone, Debug)]
pub struct AxisLink {
    inner: Rc<Cell<AxisLinkInner>>,
}

#[derive(Debug, Clone, Copy)]
struct AxisLinkInner {
    /// Lower view limit
    lo: f64,
    /// Upper view limit
    hi: f64,
    /// Limits are refitted to new data while set
    autoscale: bool,
}

impl AxisLink {
    /// Create a new, autoscaling axis link with initial limits.
    pub fn new(lo: f64, hi: f64) -> Self {
        Self {
            inner: Rc::new(Cell::new(AxisLinkInner {
                lo,
                hi,
                autoscale: true,
            })),
        }
    }

    /// Get the current limits.
    pub fn get(&self) -> (f64, f64) {
        let inner = self.inner.get();
        (inner.lo, inner.hi)
    }

    /// Update the limits, keeping the autoscale state.
    pub fn set(&self, lo: f64, hi: f64) {
        let inner = self.inner.get();
        self.inner.set(AxisLinkInner { lo, hi, ..inner });
    }

    /// Update the limits and stop autoscaling for every holder of this link.
    pub fn pin(&self, lo: f64, hi: f64) {
        self.inner.set(AxisLinkInner {
            lo,
            hi,
            autoscale: false,
        });
    }

    pub fn autoscale(&self) -> bool {
        self.inner.get().autoscale
    }

    /// Whether both handles refer to the same shared limits.
    pub fn is_linked_to(&self, other: &AxisLink) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Default for AxisLink {
    fn default() -> Self {
        Self::new(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_limits() {
        let a = AxisLink::new(0.0, 1.0);
        let b = a.clone();
        b.set(2.0, 3.0);
        assert_eq!(a.get(), (2.0, 3.0));
        assert!(a.autoscale());
        assert!(a.is_linked_to(&b));
        assert!(!a.is_linked_to(&AxisLink::default()));
    }

    #[test]
    fn pinning_stops_autoscale_for_every_clone() {
        let a = AxisLink::new(0.0, 1.0);
        let b = a.clone();
        let other = AxisLink::default();
        b.pin(4.0, 5.0);
        assert_eq!(a.get(), (4.0, 5.0));
        assert!(!a.autoscale());
        assert!(other.autoscale());

        a.set(6.0, 7.0);
        assert!(!b.autoscale());
    }
}
