//! Control points with stable identities.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_POINT_ID: AtomicU64 = AtomicU64::new(1);

/// Stable identity of a control point.
///
/// Ids are allocated from a monotonically increasing counter when a point is
/// created, so a selection survives the point list being re-sorted or spliced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PointId(u64);

impl PointId {
    pub(crate) fn next() -> Self {
        PointId(NEXT_POINT_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the raw id value.
    pub fn get(self) -> u64 {
        self.0
    }
}

/// A vertex of a piecewise-linear curve.
///
/// `x` is always in [0, 1]. `y` is clamped to [0, 1] whenever a point is
/// created by a generator or moved interactively.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlPoint {
    id: PointId,
    pub x: f64,
    pub y: f64,
}

impl ControlPoint {
    /// Creates a point with a freshly allocated id.
    pub(crate) fn new(x: f64, y: f64) -> Self {
        Self {
            id: PointId::next(),
            x,
            y,
        }
    }

    /// The identity of this point.
    pub fn id(&self) -> PointId {
        self.id
    }

    /// Returns the point as an `[x, y]` pair.
    pub fn pair(&self) -> [f64; 2] {
        [self.x, self.y]
    }

    /// Euclidean distance to `(x, y)` in normalized units.
    pub fn distance_to(&self, x: f64, y: f64) -> f64 {
        ((self.x - x).powi(2) + (self.y - y).powi(2)).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique_and_increasing() {
        let a = ControlPoint::new(0.0, 0.0);
        let b = ControlPoint::new(0.0, 0.0);
        assert_ne!(a.id(), b.id());
        assert!(b.id() > a.id());
    }

    #[test]
    fn test_equal_coordinates_different_identity() {
        let a = ControlPoint::new(0.5, 0.5);
        let b = ControlPoint::new(0.5, 0.5);
        assert_ne!(a, b);
    }

    #[test]
    fn test_distance() {
        let p = ControlPoint::new(0.0, 0.0);
        assert!((p.distance_to(0.3, 0.4) - 0.5).abs() < 1e-12);
    }
}
