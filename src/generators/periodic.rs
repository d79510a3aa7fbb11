//! Smooth periodic shapes, sampled at evenly spaced x.

use super::{cycle_phase, phase_at, segment_count};
use std::f64::consts::{E, TAU};

/// Samples `shape` at `segment_count(frequency) + 1` evenly spaced x values,
/// including both endpoints.
pub(super) fn sampled<F>(frequency: f64, shape: F) -> Vec<(f64, f64)>
where
    F: Fn(f64) -> f64,
{
    let n = segment_count(frequency);
    (0..=n)
        .map(|i| {
            let x = i as f64 / n as f64;
            (x, shape(x))
        })
        .collect()
}

/// Raised cosine: 0 at the start of each cycle, 1 halfway through.
pub(super) fn sine(frequency: f64, offset: f64, x: f64) -> f64 {
    0.5 * (1.0 - (TAU * (frequency * x - offset)).cos())
}

pub(super) fn triangle(frequency: f64, offset: f64, x: f64) -> f64 {
    let phase = phase_at(frequency, offset, x);
    1.0 - (2.0 * phase - 1.0).abs()
}

/// `ln(1 + (e - 1) * phase)`, rising from 0 to 1 over each cycle.
pub(super) fn log(frequency: f64, offset: f64, x: f64) -> f64 {
    let phase = cycle_phase(frequency, offset, x);
    (1.0 + (E - 1.0) * phase).ln()
}

/// `(e^phase - 1) / (e - 1)`, rising from 0 to 1 over each cycle.
pub(super) fn exponential(frequency: f64, offset: f64, x: f64) -> f64 {
    let phase = cycle_phase(frequency, offset, x);
    (phase.exp() - 1.0) / (E - 1.0)
}
