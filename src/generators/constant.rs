//! Shapes that ignore frequency and offset.

/// The identity ramp.
pub(super) fn ramp() -> Vec<(f64, f64)> {
    vec![(0.0, 0.0), (1.0, 1.0)]
}

/// A flat line at `y`.
pub(super) fn level(y: f64) -> Vec<(f64, f64)> {
    vec![(0.0, y), (1.0, y)]
}
