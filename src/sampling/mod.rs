//! Resampling curves into fixed-length lookup tables.
//!
//! This module provides:
//! - `sample` - piecewise-linear lookup with flat extrapolation
//! - `normalize` - rescale/clamp a table into [0, 1]
//! - `Lut` and `ChannelLuts` - the exported 256-entry tables

mod interpolate;
mod lut;
mod normalize;

pub use interpolate::{SamplePoint, sample};
pub use lut::{ChannelLuts, LUT_SIZE, Lut};
pub use normalize::{NORMALIZE_EPSILON, normalize};

/// Clamps to [0, 1], mapping NaN to 0.
pub(crate) fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}
