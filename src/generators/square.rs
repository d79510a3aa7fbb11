//! Square wave with vertical edges.

use super::{GENERATOR_EPSILON, cycle_indices, cycle_phase, is_interior_edge, phase_at};

fn level(phase: f64) -> f64 {
    if phase >= 0.5 { 1.0 } else { 0.0 }
}

/// Edges past x = 0 and short of the closing step at `1 - GENERATOR_EPSILON`.
fn is_drawable_edge(x: f64) -> bool {
    x > 0.0 && x < 1.0 - GENERATOR_EPSILON
}

/// Square wave points.
///
/// Each cycle rises at phase 0.5 and falls at the cycle boundary. Every
/// toggle becomes a pair `(edge - GENERATOR_EPSILON, before)`,
/// `(edge, after)` so linear interpolation draws a vertical step. No
/// intermediate samples are needed between edges.
pub(super) fn points(frequency: f64, offset: f64) -> Vec<(f64, f64)> {
    let mut edges: Vec<(f64, f64)> = Vec::new();
    for n in cycle_indices(frequency, offset) {
        let n = n as f64;
        let rise = (n + 0.5 + offset) / frequency;
        let fall = (n + 1.0 + offset) / frequency;
        if is_drawable_edge(rise) {
            edges.push((rise, 1.0));
        }
        if is_drawable_edge(fall) {
            edges.push((fall, 0.0));
        }
    }
    edges.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut current = level(phase_at(frequency, offset, 0.0));
    let mut points = vec![(0.0, current)];
    for (x, next) in edges {
        if next != current {
            if is_interior_edge(x) {
                points.push((x - GENERATOR_EPSILON, current));
                points.push((x, next));
            } else {
                // too close to x = 0 for a pair: step right after the start
                points.push((GENERATOR_EPSILON, next));
            }
            current = next;
        }
    }

    // an edge too close to x = 1 to draw still has to land before the end
    let end = level(cycle_phase(frequency, offset, 1.0));
    if end != current {
        points.push((1.0 - GENERATOR_EPSILON, current));
    }
    points.push((1.0, end));
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_cycle() {
        let pts = points(1.0, 0.0);
        assert_eq!(
            pts,
            vec![
                (0.0, 0.0),
                (0.5 - GENERATOR_EPSILON, 0.0),
                (0.5, 1.0),
                (1.0, 1.0)
            ]
        );
    }

    #[test]
    fn test_two_cycles_edges() {
        let pts = points(2.0, 0.0);
        let edges: Vec<f64> = pts
            .windows(2)
            .filter(|w| w[0].1 != w[1].1)
            .map(|w| w[1].0)
            .collect();
        assert_eq!(edges, vec![0.25, 0.5, 0.75]);
        assert_eq!(pts.last(), Some(&(1.0, 1.0)));
    }

    #[test]
    fn test_offset_starts_high() {
        let pts = points(1.0, 0.5);
        assert_eq!(pts[0], (0.0, 1.0));
        assert_eq!(pts[1], (0.5 - GENERATOR_EPSILON, 1.0));
        assert_eq!(pts[2], (0.5, 0.0));
    }

    #[test]
    fn test_rise_next_to_start_is_kept() {
        let pts = points(1.0, -0.499995);
        assert_eq!(pts[0], (0.0, 0.0));
        assert_eq!(pts[1], (GENERATOR_EPSILON, 1.0));
        assert_eq!(pts.last(), Some(&(1.0, 0.0)));
        for pair in pts.windows(2) {
            assert!(pair[0].0 < pair[1].0, "{pair:?}");
        }
        assert_eq!(pts.iter().filter(|p| p.1 == 1.0).count(), 2);
    }

    #[test]
    fn test_edges_are_vertical() {
        let pts = points(3.0, 0.2);
        for w in pts.windows(2) {
            if w[0].1 != w[1].1 {
                assert!((w[1].0 - w[0].0 - GENERATOR_EPSILON).abs() < 1e-12);
            }
        }
    }
}
