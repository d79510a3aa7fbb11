//! In-place normalization of sampled tables.

use super::clamp_unit;

/// Ranges narrower than this are treated as flat.
pub const NORMALIZE_EPSILON: f64 = 1e-5;

/// Maps a table into [0, 1] while keeping its shape where possible.
///
/// Tables already inside [0, 1] are only clamped. Otherwise the values are
/// linearly rescaled so that a violated bound lands exactly on 0 or 1 and an
/// unviolated bound keeps its original value. A table whose range is narrower
/// than [`NORMALIZE_EPSILON`] cannot be rescaled and becomes a constant: 0 if
/// it dipped below zero, else 1 if it rose above one. A final clamp always
/// runs; NaN entries become 0.
///
/// # Examples
///
/// ```
/// use tonecurve::normalize;
///
/// let mut table = vec![-0.5, 0.0, 0.5];
/// normalize(&mut table);
/// assert_eq!(table, vec![0.0, 0.25, 0.5]);
///
/// let mut flat = vec![1.5, 1.5];
/// normalize(&mut flat);
/// assert_eq!(flat, vec![1.0, 1.0]);
/// ```
pub fn normalize(table: &mut [f64]) {
    if table.is_empty() {
        return;
    }

    let min = table.iter().copied().fold(f64::INFINITY, f64::min);
    let max = table.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let below = min < 0.0;
    let above = max > 1.0;

    if below || above {
        if min < max - NORMALIZE_EPSILON {
            let target_min = if below { 0.0 } else { min };
            let target_max = if above { 1.0 } else { max };
            let scale = (target_max - target_min) / (max - min);
            for value in table.iter_mut() {
                *value = (*value - min) * scale + target_min;
            }
        } else {
            let constant = if below { 0.0 } else { 1.0 };
            tracing::trace!(min, max, constant, "flattening out-of-range table");
            table.fill(constant);
        }
    }

    for value in table.iter_mut() {
        *value = clamp_unit(*value);
    }
}
