//! Saw wave with vertical falling edges.

use super::{
    GENERATOR_EPSILON, PHASE_ZERO, cycle_indices, cycle_phase, is_interior_edge, phase_at,
    segment_count,
};

/// Saw wave points: the phase itself, with a pair `(wrap - GENERATOR_EPSILON, 1)`,
/// `(wrap, 0)` at every cycle wrap inside the domain.
///
/// A wrap too close to x = 1 for a full pair still falls vertically: the
/// curve reaches 1 at `1 - GENERATOR_EPSILON` and ends at the new cycle's
/// phase. Likewise a wrap just after x = 0 starts the curve with a drop
/// between x = 0 and `GENERATOR_EPSILON`.
///
/// Base samples closer than `2 * GENERATOR_EPSILON` to an edge are dropped
/// so the edge points keep strict x ordering.
pub(super) fn points(frequency: f64, offset: f64) -> Vec<(f64, f64)> {
    let mut wraps: Vec<f64> = Vec::new();
    let mut closing = false;
    let mut opening = false;
    for n in cycle_indices(frequency, offset) {
        let w = (n as f64 + offset) / frequency;
        if is_interior_edge(w) {
            wraps.push(w);
        } else if w >= 1.0 - GENERATOR_EPSILON && w < 1.0 {
            closing = phase_at(frequency, offset, 1.0) >= PHASE_ZERO;
        } else if w > 0.0 && w <= GENERATOR_EPSILON {
            opening = true;
        }
    }

    // (x, y) of points that are not base samples
    let mut edges: Vec<(f64, f64)> = Vec::with_capacity(2 * wraps.len() + 2);
    for &w in &wraps {
        edges.push((w - GENERATOR_EPSILON, 1.0));
        edges.push((w, 0.0));
    }
    if closing {
        edges.push((1.0 - GENERATOR_EPSILON, 1.0));
    }
    if opening {
        edges.push((GENERATOR_EPSILON, phase_at(frequency, offset, GENERATOR_EPSILON)));
    }

    let n = segment_count(frequency);
    let mut points: Vec<(f64, f64)> = Vec::with_capacity(n + 1 + edges.len());
    for i in 0..=n {
        let x = i as f64 / n as f64;
        let interior = i > 0 && i < n;
        if interior
            && edges
                .iter()
                .any(|(e, _)| (x - e).abs() < 2.0 * GENERATOR_EPSILON)
        {
            continue;
        }
        points.push((x, cycle_phase(frequency, offset, x)));
    }
    points.extend(edges);

    points.sort_by(|a, b| a.0.total_cmp(&b.0));
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampling::sample;

    #[test]
    fn test_single_cycle_is_ramp() {
        let pts = points(1.0, 0.0);
        assert_eq!(pts.len(), 33);
        assert_eq!(pts[0], (0.0, 0.0));
        assert_eq!(pts[32], (1.0, 1.0));
    }

    #[test]
    fn test_wrap_has_vertical_fall() {
        let pts = points(2.0, 0.0);
        let wrap = pts.iter().position(|p| p.0 == 0.5).unwrap();
        assert_eq!(pts[wrap], (0.5, 0.0));
        assert_eq!(pts[wrap - 1], (0.5 - GENERATOR_EPSILON, 1.0));
        // the sample that used to sit on the wrap is gone
        assert_eq!(pts.iter().filter(|p| (p.0 - 0.5).abs() < 1e-9).count(), 1);
    }

    #[test]
    fn test_offset_shifts_wraps() {
        let pts = points(1.0, 0.25);
        assert!(pts.contains(&(0.25, 0.0)));
        assert!((pts[0].1 - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_wrap_next_to_end_stays_vertical() {
        let pts = points(1.0, 0.999995);
        let tail = &pts[pts.len() - 2..];
        assert_eq!(tail[0], (1.0 - GENERATOR_EPSILON, 1.0));
        assert_eq!(tail[1].0, 1.0);
        assert!(tail[1].1 < 1e-4);
        for pair in pts.windows(2) {
            assert!(pair[0].0 < pair[1].0, "{pair:?}");
        }

        let table = sample(&pts, 256);
        // still rising right up to the last entry, then the drop
        assert!(table[254] > 0.99, "{:?}", &table[250..]);
        assert!(table[255] < 1e-4);
    }

    #[test]
    fn test_wrap_next_to_start_stays_vertical() {
        let pts = points(1.0, -0.999995);
        assert_eq!(pts[0].0, 0.0);
        assert!(pts[0].1 > 0.9999);
        assert_eq!(pts[1].0, GENERATOR_EPSILON);
        assert!(pts[1].1 < 1e-4);
        for pair in pts.windows(2) {
            assert!(pair[0].0 < pair[1].0, "{pair:?}");
        }

        let table = sample(&pts, 256);
        assert!(table[1] < 0.01, "{:?}", &table[..4]);
    }
}
