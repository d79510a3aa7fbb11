//! Curve model: control points, channels, curves and the per-channel curve set.
//!
//! This module owns the editable state. Every mutation keeps the curve
//! invariants intact:
//! - the first point sits at x = 0 and the last at x = 1
//! - points are strictly sorted by x
//! - interior points lie strictly between their neighbours

mod channel;
mod curve;
mod point;
mod set;
mod state;

pub use channel::Channel;
pub use curve::{Curve, DRAG_EPSILON, DefaultCurve, MIN_POINT_DISTANCE};
pub use point::{ControlPoint, PointId};
pub use set::CurveSet;
