//! A single editable piecewise-linear curve.

use super::point::{ControlPoint, PointId};
use crate::sampling::{self, Lut};
use serde::{Deserialize, Serialize};

/// Minimum Euclidean distance (normalized units) between an inserted point
/// and any existing point.
pub const MIN_POINT_DISTANCE: f64 = 0.02;

/// Gap kept between an interactively dragged point and its neighbours.
pub const DRAG_EPSILON: f64 = 1e-3;

/// Fallback y used when an endpoint has to be re-created without a neighbour.
const REPAIR_Y: f64 = 0.5;

/// The canonical curve a channel starts from and returns to on reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DefaultCurve {
    /// Straight line from (0, 0) to (1, 1)
    #[default]
    Identity,
    /// Flat line at 0.5
    Half,
}

impl DefaultCurve {
    /// The two endpoint pairs of this default.
    pub fn pairs(self) -> [(f64, f64); 2] {
        match self {
            DefaultCurve::Identity => [(0.0, 0.0), (1.0, 1.0)],
            DefaultCurve::Half => [(0.0, 0.5), (1.0, 0.5)],
        }
    }
}

/// An ordered list of control points spanning x = 0 to x = 1.
///
/// The endpoints are permanent: they can be moved vertically but never
/// removed. All mutating methods are no-ops when a request would break the
/// curve invariants.
///
/// # Examples
///
/// ```
/// use tonecurve::Curve;
///
/// let mut curve = Curve::identity();
/// let id = curve.insert_point(0.5, 0.8).unwrap();
/// assert_eq!(curve.pairs(), vec![[0.0, 0.0], [0.5, 0.8], [1.0, 1.0]]);
///
/// // Endpoints cannot be deleted, interior points can
/// let first = curve.first().id();
/// assert!(!curve.delete_point(first));
/// assert!(curve.delete_point(id));
/// assert_eq!(curve.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    /// Invariant: len >= 2, points[0].x == 0, points[len - 1].x == 1, strictly ascending x
    points: Vec<ControlPoint>,
}

impl Default for Curve {
    fn default() -> Self {
        Self::identity()
    }
}

impl Curve {
    /// The identity line `[[0, 0], [1, 1]]`.
    pub fn identity() -> Self {
        Self::from_default(DefaultCurve::Identity)
    }

    /// The flat mid-value line `[[0, 0.5], [1, 0.5]]`.
    pub fn half() -> Self {
        Self::from_default(DefaultCurve::Half)
    }

    /// Creates the canonical curve for `kind`.
    pub fn from_default(kind: DefaultCurve) -> Self {
        let [(x0, y0), (x1, y1)] = kind.pairs();
        Self {
            points: vec![ControlPoint::new(x0, y0), ControlPoint::new(x1, y1)],
        }
    }

    /// Builds a curve from raw `(x, y)` pairs, repairing anything that would
    /// violate the curve invariants.
    ///
    /// Non-finite pairs are dropped, coordinates are clamped to [0, 1], a
    /// missing x = 0 or x = 1 endpoint is re-created from its nearest
    /// neighbour's y (0.5 when there is none), points are sorted by x, and
    /// pairs sharing an x collapse to the later one.
    ///
    /// # Examples
    ///
    /// ```
    /// use tonecurve::Curve;
    ///
    /// let curve = Curve::from_points([(0.7, 0.2), (0.3, 0.9)]);
    /// assert_eq!(
    ///     curve.pairs(),
    ///     vec![[0.0, 0.9], [0.3, 0.9], [0.7, 0.2], [1.0, 0.2]]
    /// );
    /// ```
    pub fn from_points<I>(points: I) -> Self
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let mut pairs: Vec<(f64, f64)> = points
            .into_iter()
            .filter(|(x, y)| x.is_finite() && y.is_finite())
            .map(|(x, y)| (x.clamp(0.0, 1.0), y.clamp(0.0, 1.0)))
            .collect();
        pairs.sort_by(|a, b| a.0.total_cmp(&b.0));

        if pairs.first().is_none_or(|p| p.0 != 0.0) {
            let y = pairs.first().map_or(REPAIR_Y, |p| p.1);
            pairs.insert(0, (0.0, y));
        }
        if pairs.last().is_none_or(|p| p.0 != 1.0) {
            let y = pairs.last().map_or(REPAIR_Y, |p| p.1);
            pairs.push((1.0, y));
        }

        let mut points: Vec<ControlPoint> = Vec::with_capacity(pairs.len());
        for (x, y) in pairs {
            match points.last_mut() {
                Some(last) if last.x == x => last.y = y,
                _ => points.push(ControlPoint::new(x, y)),
            }
        }

        Self { points }
    }

    /// All points in ascending x order.
    pub fn points(&self) -> &[ControlPoint] {
        &self.points
    }

    /// Number of points (always at least 2).
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false; a curve keeps both endpoints.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The x = 0 endpoint.
    pub fn first(&self) -> &ControlPoint {
        &self.points[0]
    }

    /// The x = 1 endpoint.
    pub fn last(&self) -> &ControlPoint {
        &self.points[self.points.len() - 1]
    }

    /// Returns the point at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&ControlPoint> {
        self.points.get(index)
    }

    /// Resolves a point identity to its current index.
    pub fn index_of(&self, id: PointId) -> Option<usize> {
        self.points.iter().position(|p| p.id() == id)
    }

    /// Returns true if `index` refers to the first or last point.
    pub fn is_endpoint(&self, index: usize) -> bool {
        index == 0 || index == self.points.len() - 1
    }

    /// Inserts a new interior point and returns its identity.
    ///
    /// Rejected (returns `None`) when `x` is outside the open interval (0, 1),
    /// when an existing point lies within [`MIN_POINT_DISTANCE`], or when a
    /// point already occupies exactly the same x. `y` is clamped to [0, 1].
    pub fn insert_point(&mut self, x: f64, y: f64) -> Option<PointId> {
        if !(x > 0.0 && x < 1.0) || !y.is_finite() {
            tracing::trace!(x, y, "insert rejected: outside the open unit interval");
            return None;
        }
        let y = y.clamp(0.0, 1.0);
        if self
            .points
            .iter()
            .any(|p| p.x == x || p.distance_to(x, y) < MIN_POINT_DISTANCE)
        {
            tracing::trace!(x, y, "insert rejected: too close to an existing point");
            return None;
        }

        let point = ControlPoint::new(x, y);
        let id = point.id();
        self.points.push(point);
        self.resort();
        Some(id)
    }

    /// Removes an interior point. Endpoints and unknown ids are ignored.
    ///
    /// Returns true if a point was removed.
    pub fn delete_point(&mut self, id: PointId) -> bool {
        match self.index_of(id) {
            Some(index) if !self.is_endpoint(index) => {
                self.points.remove(index);
                true
            }
            _ => false,
        }
    }

    /// Moves the point at `index` towards `(x, y)` within the curve constraints.
    ///
    /// Endpoints keep their x and only take the new y. Interior points are
    /// clamped to `(prev.x + epsilon, next.x - epsilon)`; when the neighbours
    /// are closer than `2 * epsilon` the point is centred between them. `y` is
    /// clamped to [0, 1].
    ///
    /// Returns true if the point was updated.
    ///
    /// # Examples
    ///
    /// ```
    /// use tonecurve::{Curve, DRAG_EPSILON};
    ///
    /// let mut curve = Curve::from_points([(0.0, 0.0), (0.5, 0.5), (1.0, 1.0)]);
    /// curve.move_point(1, 2.0, 0.25, DRAG_EPSILON);
    /// assert_eq!(curve.points()[1].x, 1.0 - DRAG_EPSILON);
    /// assert_eq!(curve.points()[1].y, 0.25);
    /// ```
    pub fn move_point(&mut self, index: usize, x: f64, y: f64, epsilon: f64) -> bool {
        let len = self.points.len();
        if index >= len || !y.is_finite() {
            return false;
        }
        let y = y.clamp(0.0, 1.0);

        let x = if index == 0 {
            0.0
        } else if index == len - 1 {
            1.0
        } else {
            if !x.is_finite() {
                return false;
            }
            let prev = self.points[index - 1].x;
            let next = self.points[index + 1].x;
            let (lo, hi) = (prev + epsilon, next - epsilon);
            if lo <= hi {
                x.clamp(lo, hi)
            } else {
                (prev + next) / 2.0
            }
        };

        let point = &mut self.points[index];
        point.x = x;
        point.y = y;
        true
    }

    /// Stable ascending sort by x.
    pub fn resort(&mut self) {
        self.points.sort_by(|a, b| a.x.total_cmp(&b.x));
    }

    /// Points as `[x, y]` pairs, in order.
    pub fn pairs(&self) -> Vec<[f64; 2]> {
        self.points.iter().map(ControlPoint::pair).collect()
    }

    /// Raw piecewise-linear samples of this curve (see [`sampling::sample`]).
    pub fn sample(&self, resolution: usize) -> Vec<f64> {
        sampling::sample(&self.points, resolution)
    }

    /// The normalized 256-entry lookup table for this curve.
    pub fn lut(&self) -> Lut {
        Lut::from_points(&self.points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_invariants(curve: &Curve) {
        assert!(curve.len() >= 2);
        assert_eq!(curve.first().x, 0.0);
        assert_eq!(curve.last().x, 1.0);
        for pair in curve.points().windows(2) {
            assert!(pair[0].x < pair[1].x, "not strictly sorted: {:?}", curve.pairs());
        }
    }

    #[test]
    fn test_defaults() {
        assert_eq!(Curve::identity().pairs(), vec![[0.0, 0.0], [1.0, 1.0]]);
        assert_eq!(Curve::half().pairs(), vec![[0.0, 0.5], [1.0, 0.5]]);
        assert_eq!(Curve::default(), Curve::default().clone());
    }

    #[test]
    fn test_insert_sorts() {
        let mut curve = Curve::identity();
        curve.insert_point(0.7, 0.1).unwrap();
        curve.insert_point(0.3, 0.9).unwrap();
        assert_eq!(
            curve.pairs(),
            vec![[0.0, 0.0], [0.3, 0.9], [0.7, 0.1], [1.0, 1.0]]
        );
        assert_invariants(&curve);
    }

    #[test]
    fn test_insert_rejects_boundaries() {
        let mut curve = Curve::identity();
        assert!(curve.insert_point(0.0, 0.5).is_none());
        assert!(curve.insert_point(1.0, 0.5).is_none());
        assert!(curve.insert_point(-0.2, 0.5).is_none());
        assert!(curve.insert_point(f64::NAN, 0.5).is_none());
        assert_eq!(curve.len(), 2);
    }

    #[test]
    fn test_insert_rejects_nearby_point() {
        let mut curve = Curve::identity();
        curve.insert_point(0.5, 0.5).unwrap();
        assert!(curve.insert_point(0.51, 0.51).is_none());
        assert!(curve.insert_point(0.5, 0.9).is_none());
        assert!(curve.insert_point(0.53, 0.5).is_some());
    }

    #[test]
    fn test_insert_clamps_y() {
        let mut curve = Curve::identity();
        curve.insert_point(0.5, 3.0).unwrap();
        assert_eq!(curve.points()[1].y, 1.0);
    }

    #[test]
    fn test_delete_endpoints_is_noop() {
        let mut curve = Curve::identity();
        let first = curve.first().id();
        let last = curve.last().id();
        assert!(!curve.delete_point(first));
        assert!(!curve.delete_point(last));
        assert_eq!(curve.len(), 2);
    }

    #[test]
    fn test_delete_unknown_id_is_noop() {
        let mut curve = Curve::identity();
        let stranger = Curve::identity().first().id();
        assert!(!curve.delete_point(stranger));
    }

    #[test]
    fn test_move_endpoint_pins_x() {
        let mut curve = Curve::identity();
        curve.move_point(0, 0.4, 0.3, DRAG_EPSILON);
        curve.move_point(1, 0.4, 0.6, DRAG_EPSILON);
        assert_eq!(curve.pairs(), vec![[0.0, 0.3], [1.0, 0.6]]);
    }

    #[test]
    fn test_move_interior_clamps_between_neighbours() {
        let mut curve = Curve::from_points([(0.0, 0.0), (0.4, 0.4), (0.6, 0.6), (1.0, 1.0)]);
        curve.move_point(1, 0.9, -1.0, DRAG_EPSILON);
        assert!((curve.points()[1].x - (0.6 - DRAG_EPSILON)).abs() < 1e-12);
        assert_eq!(curve.points()[1].y, 0.0);
        curve.move_point(2, 0.0, 0.5, DRAG_EPSILON);
        assert!(curve.points()[2].x > curve.points()[1].x);
        assert_invariants(&curve);
    }

    #[test]
    fn test_move_between_tight_neighbours_centres() {
        let mut curve = Curve::from_points([
            (0.0, 0.0),
            (0.5, 0.0),
            (0.5005, 1.0),
            (0.501, 1.0),
            (1.0, 1.0),
        ]);
        curve.move_point(2, 0.9, 0.5, DRAG_EPSILON);
        assert!((curve.points()[2].x - 0.5005).abs() < 1e-12);
        assert_invariants(&curve);
    }

    #[test]
    fn test_move_out_of_range_index() {
        let mut curve = Curve::identity();
        assert!(!curve.move_point(5, 0.5, 0.5, DRAG_EPSILON));
    }

    #[test]
    fn test_from_points_repairs_endpoints() {
        let curve = Curve::from_points([(0.5, 0.25)]);
        assert_eq!(curve.pairs(), vec![[0.0, 0.25], [0.5, 0.25], [1.0, 0.25]]);
        let empty = Curve::from_points(std::iter::empty());
        assert_eq!(empty.pairs(), vec![[0.0, 0.5], [1.0, 0.5]]);
    }

    #[test]
    fn test_from_points_collapses_duplicates_and_drops_nan() {
        let curve = Curve::from_points([
            (0.0, 0.1),
            (0.0, 0.2),
            (f64::NAN, 0.3),
            (0.5, f64::INFINITY),
            (1.0, 0.9),
            (2.0, 0.7),
        ]);
        assert_eq!(curve.pairs(), vec![[0.0, 0.2], [1.0, 0.7]]);
    }

    #[test]
    fn test_selection_survives_resort() {
        let mut curve = Curve::identity();
        let id = curve.insert_point(0.8, 0.2).unwrap();
        curve.insert_point(0.2, 0.8).unwrap();
        assert_eq!(curve.index_of(id), Some(2));
    }
}
