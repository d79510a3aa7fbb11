//! Parametric waveform curve generators.
//!
//! This module provides:
//! - Sampled shapes: sine, triangle, log and exponential
//! - Sharp-edged shapes: square and saw, drawn with epsilon-spaced point pairs
//! - Constants: linear ramp, max and half
//!
//! Every generator works in normalized units: x spans [0, 1] once and
//! `frequency` cycles fit inside it. The phase at x is the fractional part of
//! `frequency * x - offset`.

mod constant;
mod params;
mod periodic;
mod saw;
mod square;

pub use params::{MAX_FREQUENCY, WaveformKind, WaveformParameters};

use crate::curves::Curve;
use crate::sampling::clamp_unit;

/// Horizontal gap between the two points of a synthesized vertical edge.
pub const GENERATOR_EPSILON: f64 = 1e-5;

/// Sample points per cycle for the curved shapes.
const SEGMENTS_PER_CYCLE: f64 = 32.0;

/// Phases below this are treated as exactly on a cycle boundary.
const PHASE_ZERO: f64 = 1e-9;

/// Builds the curve described by `params`.
///
/// Parameters are sanitized first (see [`WaveformParameters::sanitized`]).
/// The result always spans x = 0 to x = 1 with every y in [0, 1].
///
/// # Examples
///
/// ```
/// use tonecurve::{WaveformKind, WaveformParameters, generate};
///
/// let curve = generate(&WaveformParameters::new(WaveformKind::Linear).with_invert(true));
/// assert_eq!(curve.pairs(), vec![[0.0, 1.0], [1.0, 0.0]]);
///
/// let square = generate(&WaveformParameters::square());
/// let lut = square.lut();
/// assert_eq!(lut.values()[0], 0.0);
/// assert_eq!(lut.values()[255], 1.0);
/// ```
pub fn generate(params: &WaveformParameters) -> Curve {
    Curve::from_points(generate_points(params))
}

/// Raw `(x, y)` points for `params`, sorted by x, before they become a
/// [`Curve`].
pub fn generate_points(params: &WaveformParameters) -> Vec<(f64, f64)> {
    let WaveformParameters {
        kind,
        frequency,
        offset,
        invert,
    } = params.sanitized();

    let base = match kind {
        WaveformKind::Linear => constant::ramp(),
        WaveformKind::Max => constant::level(1.0),
        WaveformKind::Half => constant::level(0.5),
        WaveformKind::Sine => periodic::sampled(frequency, |x| periodic::sine(frequency, offset, x)),
        WaveformKind::Triangle => {
            periodic::sampled(frequency, |x| periodic::triangle(frequency, offset, x))
        }
        WaveformKind::Log => periodic::sampled(frequency, |x| periodic::log(frequency, offset, x)),
        WaveformKind::Exponential => {
            periodic::sampled(frequency, |x| periodic::exponential(frequency, offset, x))
        }
        WaveformKind::Square => square::points(frequency, offset),
        WaveformKind::Saw => saw::points(frequency, offset),
    };

    tracing::debug!(
        %kind,
        frequency,
        offset,
        invert,
        points = base.len(),
        "generated waveform"
    );

    base.into_iter()
        .map(|(x, y)| (x, clamp_unit(if invert { 1.0 - y } else { y })))
        .collect()
}

/// Number of segments used when sampling a curved shape.
fn segment_count(frequency: f64) -> usize {
    ((frequency * SEGMENTS_PER_CYCLE).ceil() as usize).max(4)
}

/// Fractional cycle position at `x`, always in [0, 1).
fn phase_at(frequency: f64, offset: f64, x: f64) -> f64 {
    let phase = (frequency * x - offset).rem_euclid(1.0);
    if phase >= 1.0 { 0.0 } else { phase }
}

/// Like [`phase_at`], but a phase landing on a cycle boundary anywhere past
/// x = 0 reads as 1.0, the value at the end of the finished cycle.
fn cycle_phase(frequency: f64, offset: f64, x: f64) -> f64 {
    let phase = phase_at(frequency, offset, x);
    if x > 0.0 && phase < PHASE_ZERO {
        1.0
    } else {
        phase
    }
}

/// Integer cycle indices `n` whose boundary `frequency * x - offset = n + shift`
/// can fall inside the unit domain.
fn cycle_indices(frequency: f64, offset: f64) -> std::ops::RangeInclusive<i64> {
    let first = (-offset).floor() as i64 - 1;
    let last = (frequency - offset).ceil() as i64 + 1;
    first..=last
}

/// Returns true if an edge at `x` is far enough from both endpoints to draw.
fn is_interior_edge(x: f64) -> bool {
    x > GENERATOR_EPSILON && x < 1.0 - GENERATOR_EPSILON
}
