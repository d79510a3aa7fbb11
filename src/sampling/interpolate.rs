//! Piecewise-linear curve sampling.

use super::clamp_unit;
use crate::curves::ControlPoint;

/// Output value used when there are too few points to define a curve.
const FALLBACK_LEVEL: f64 = 0.5;

/// Anything that can act as an `(x, y)` vertex for [`sample`].
pub trait SamplePoint {
    /// Returns the vertex coordinates.
    fn xy(&self) -> (f64, f64);
}

impl SamplePoint for ControlPoint {
    fn xy(&self) -> (f64, f64) {
        (self.x, self.y)
    }
}

impl SamplePoint for (f64, f64) {
    fn xy(&self) -> (f64, f64) {
        *self
    }
}

impl SamplePoint for [f64; 2] {
    fn xy(&self) -> (f64, f64) {
        (self[0], self[1])
    }
}

/// Samples a piecewise-linear curve at `resolution` evenly spaced x positions.
///
/// Output index `i` samples `x = i / (resolution - 1)`:
/// - before the first point or after the last, the boundary y is held (flat
///   extrapolation)
/// - the first segment whose x range contains `x` is used, so a boundary
///   shared by two segments takes the earlier one; when that first segment
///   is vertical its second point's y wins
/// - every sample is clamped to [0, 1]
///
/// Fewer than two points yields a flat table at 0.5. This is a pure function
/// of its input; points are sorted by x on a private copy.
///
/// # Examples
///
/// ```
/// use tonecurve::sample;
///
/// let table = sample(&[(0.0, 0.0), (0.5, 1.0), (1.0, 0.0)], 5);
/// assert_eq!(table, vec![0.0, 0.5, 1.0, 0.5, 0.0]);
///
/// // Degenerate input falls back to a flat mid-level table
/// assert_eq!(sample(&[(0.0, 0.2)], 3), vec![0.5, 0.5, 0.5]);
/// ```
pub fn sample<P: SamplePoint>(points: &[P], resolution: usize) -> Vec<f64> {
    if points.len() < 2 {
        return vec![FALLBACK_LEVEL; resolution];
    }

    let mut sorted: Vec<(f64, f64)> = points.iter().map(SamplePoint::xy).collect();
    sorted.sort_by(|a, b| a.0.total_cmp(&b.0));

    let last = resolution.saturating_sub(1).max(1) as f64;
    (0..resolution)
        .map(|i| clamp_unit(value_at(&sorted, i as f64 / last)))
        .collect()
}

/// Evaluates sorted vertices at `x`.
fn value_at(points: &[(f64, f64)], x: f64) -> f64 {
    let (first, last) = (points[0], points[points.len() - 1]);
    if x < first.0 {
        return first.1;
    }
    if x > last.0 {
        return last.1;
    }

    for segment in points.windows(2) {
        let (a, b) = (segment[0], segment[1]);
        if a.0 <= x && x <= b.0 {
            if a.0 == b.0 {
                return b.1;
            }
            let t = (x - a.0) / (b.0 - a.0);
            return a.1 + t * (b.1 - a.1);
        }
    }

    last.1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Curve;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_identity_is_ramp() {
        let table = sample(Curve::identity().points(), 256);
        assert_eq!(table.len(), 256);
        for (i, v) in table.iter().enumerate() {
            assert!((v - i as f64 / 255.0).abs() < EPSILON);
        }
    }

    #[test]
    fn test_flat_extrapolation() {
        let table = sample(&[(0.25, 0.2), (0.75, 0.8)], 5);
        assert_eq!(table[0], 0.2);
        assert_eq!(table[4], 0.8);
        assert!((table[2] - 0.5).abs() < EPSILON);
    }

    #[test]
    fn test_shared_boundary_uses_first_segment() {
        let table = sample(&[(0.0, 0.0), (0.5, 0.0), (0.5, 1.0), (1.0, 1.0)], 3);
        assert_eq!(table, vec![0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_vertical_segment_second_point_wins() {
        // two points share x = 0, so the first segment is vertical
        let table = sample(&[(0.0, 0.2), (0.0, 0.8), (1.0, 0.8)], 3);
        assert_eq!(table, vec![0.8, 0.8, 0.8]);

        let table = sample(&[[0.5, 0.3], [0.5, 0.6]], 3);
        assert_eq!(table, vec![0.3, 0.6, 0.6]);
    }

    #[test]
    fn test_unsorted_input_is_sorted() {
        let table = sample(&[[1.0, 1.0], [0.0, 0.0]], 3);
        assert_eq!(table, vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn test_samples_are_clamped() {
        let table = sample(&[(0.0, -1.0), (1.0, 2.0)], 5);
        assert_eq!(table, vec![0.0, 0.0, 0.5, 1.0, 1.0]);
    }

    #[test]
    fn test_resolution_edge_cases() {
        let curve = Curve::identity();
        assert!(sample(curve.points(), 0).is_empty());
        assert_eq!(sample(curve.points(), 1), vec![0.0]);
    }

    #[test]
    fn test_scenario_inserted_point() {
        let mut curve = Curve::identity();
        curve.insert_point(0.5, 0.8).unwrap();
        let table = curve.sample(256);
        let x = 127.0 / 255.0;
        let expected = 0.8 * x / 0.5;
        assert!((table[127] - expected).abs() < EPSILON);
        assert!(table[127] > 0.79 && table[127] < 0.8);
    }

    #[test]
    fn test_idempotent() {
        let curve = Curve::from_points([(0.0, 0.3), (0.4, 0.9), (1.0, 0.1)]);
        assert_eq!(curve.sample(256), curve.sample(256));
    }
}
