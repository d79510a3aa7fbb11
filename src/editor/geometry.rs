//! Widget-local coordinates and the data <-> canvas mapping.

/// A position in the widget's local pixel space (y grows downwards).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pos {
    pub x: f64,
    pub y: f64,
}

impl Pos {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared distance to `other`, in pixels.
    pub fn distance_squared(self, other: Pos) -> f64 {
        (self.x - other.x).powi(2) + (self.y - other.y).powi(2)
    }

    pub fn offset(self, dx: f64, dy: f64) -> Pos {
        Pos::new(self.x + dx, self.y + dy)
    }
}

impl From<(f64, f64)> for Pos {
    fn from((x, y): (f64, f64)) -> Self {
        Pos::new(x, y)
    }
}

/// An axis-aligned rectangle in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Returns true if `pos` is inside the rectangle, edges included.
    pub fn contains(&self, pos: Pos) -> bool {
        pos.x >= self.x
            && pos.x <= self.x + self.width
            && pos.y >= self.y
            && pos.y <= self.y + self.height
    }

    pub fn center(&self) -> Pos {
        Pos::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Shrinks the rectangle by `margin` on every side.
    pub fn inset(&self, margin: f64) -> Rect {
        Rect::new(
            self.x + margin,
            self.y + margin,
            (self.width - 2.0 * margin).max(0.0),
            (self.height - 2.0 * margin).max(0.0),
        )
    }

    /// Maps normalized `(u, v)` to a canvas position; v = 1 is the top edge.
    ///
    /// # Examples
    ///
    /// ```
    /// use tonecurve::editor::{Pos, Rect};
    ///
    /// let rect = Rect::new(10.0, 40.0, 200.0, 120.0);
    /// assert_eq!(rect.to_canvas(0.0, 0.0), Pos::new(10.0, 160.0));
    /// assert_eq!(rect.to_canvas(1.0, 1.0), Pos::new(210.0, 40.0));
    /// ```
    pub fn to_canvas(&self, u: f64, v: f64) -> Pos {
        Pos::new(
            self.x + u * self.width,
            self.y + self.height - v * self.height,
        )
    }

    /// Inverse of [`to_canvas`](Self::to_canvas), with both results clamped
    /// to [0, 1]. A degenerate rectangle maps everything to 0.
    pub fn to_data(&self, pos: Pos) -> (f64, f64) {
        if self.width <= 0.0 || self.height <= 0.0 {
            return (0.0, 0.0);
        }
        let u = (pos.x - self.x) / self.width;
        let v = 1.0 - (pos.y - self.y) / self.height;
        (clamp01(u), clamp01(v))
    }
}

fn clamp01(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_is_inclusive() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(rect.contains(Pos::new(0.0, 0.0)));
        assert!(rect.contains(Pos::new(10.0, 10.0)));
        assert!(!rect.contains(Pos::new(10.1, 5.0)));
    }

    #[test]
    fn test_mapping_round_trip() {
        let rect = Rect::new(10.0, 40.0, 180.0, 120.0);
        let pos = rect.to_canvas(0.25, 0.75);
        let (u, v) = rect.to_data(pos);
        assert!((u - 0.25).abs() < 1e-12);
        assert!((v - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_to_data_clamps() {
        let rect = Rect::new(10.0, 40.0, 180.0, 120.0);
        assert_eq!(rect.to_data(Pos::new(-50.0, 500.0)), (0.0, 0.0));
        assert_eq!(rect.to_data(Pos::new(500.0, -50.0)), (1.0, 1.0));
    }

    #[test]
    fn test_degenerate_rect() {
        let rect = Rect::new(0.0, 0.0, 0.0, 10.0);
        assert_eq!(rect.to_data(Pos::new(5.0, 5.0)), (0.0, 0.0));
    }

    #[test]
    fn test_inset() {
        let rect = Rect::new(0.0, 0.0, 100.0, 50.0).inset(10.0);
        assert_eq!(rect, Rect::new(10.0, 10.0, 80.0, 30.0));
    }
}
