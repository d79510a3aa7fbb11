//! Waveform names and parameters.

use crate::CurveError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Highest frequency a generator will honour. Cycles above this are narrower
/// than one LUT entry.
pub const MAX_FREQUENCY: f64 = 256.0;

/// The named curve shapes a generator can synthesize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum WaveformKind {
    /// Straight ramp from 0 to 1
    #[default]
    Linear,
    /// Raised cosine, starting at 0
    Sine,
    /// Rising ramp per cycle with a vertical fall at each wrap
    Saw,
    /// Symmetric rise and fall per cycle
    Triangle,
    /// Low for the first half of each cycle, high for the second
    Square,
    /// Logarithmic rise per cycle
    Log,
    /// Exponential rise per cycle
    Exponential,
    /// Constant 1
    Max,
    /// Constant 0.5
    Half,
}

impl WaveformKind {
    /// All shapes, in the order a host would list them.
    pub const ALL: [WaveformKind; 9] = [
        WaveformKind::Linear,
        WaveformKind::Sine,
        WaveformKind::Saw,
        WaveformKind::Triangle,
        WaveformKind::Square,
        WaveformKind::Log,
        WaveformKind::Exponential,
        WaveformKind::Max,
        WaveformKind::Half,
    ];

    /// Display name, as persisted in `curve_type`.
    pub fn name(self) -> &'static str {
        match self {
            WaveformKind::Linear => "Linear",
            WaveformKind::Sine => "Sine",
            WaveformKind::Saw => "Saw",
            WaveformKind::Triangle => "Triangle",
            WaveformKind::Square => "Square",
            WaveformKind::Log => "Log",
            WaveformKind::Exponential => "Exponential",
            WaveformKind::Max => "Max",
            WaveformKind::Half => "Half",
        }
    }

    /// Returns true if the shape depends on frequency and offset.
    pub fn is_periodic(self) -> bool {
        !matches!(
            self,
            WaveformKind::Linear | WaveformKind::Max | WaveformKind::Half
        )
    }
}

impl fmt::Display for WaveformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for WaveformKind {
    type Err = CurveError;

    /// Parses a shape name, ignoring case.
    ///
    /// # Examples
    ///
    /// ```
    /// use tonecurve::WaveformKind;
    ///
    /// assert_eq!("sine".parse::<WaveformKind>().unwrap(), WaveformKind::Sine);
    /// assert!("wobble".parse::<WaveformKind>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WaveformKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CurveError::UnknownWaveform(s.to_string()))
    }
}

/// Parameters for [`generate`](super::generate).
///
/// Out-of-range values are accepted here and clamped at generation time (see
/// [`WaveformParameters::sanitized`]). Serializes with the shape under
/// `curve_type`, matching the persisted editor state.
///
/// # Examples
///
/// ```
/// use tonecurve::{WaveformKind, WaveformParameters};
///
/// let params = WaveformParameters::new(WaveformKind::Triangle)
///     .with_frequency(3.0)
///     .with_offset(0.25)
///     .with_invert(true);
/// assert_eq!(params.frequency, 3.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveformParameters {
    #[serde(rename = "curve_type")]
    pub kind: WaveformKind,
    /// Cycles across the unit domain, at least 1
    pub frequency: f64,
    /// Phase shift in cycles, within [-1, 1]
    pub offset: f64,
    /// Mirror the generated shape vertically (y -> 1 - y)
    pub invert: bool,
}

impl Default for WaveformParameters {
    fn default() -> Self {
        Self::new(WaveformKind::Linear)
    }
}

impl WaveformParameters {
    /// One cycle of `kind`, no offset, not inverted.
    pub fn new(kind: WaveformKind) -> Self {
        Self {
            kind,
            frequency: 1.0,
            offset: 0.0,
            invert: false,
        }
    }

    /// The fixed square-wave preset: one cycle, no offset, not inverted.
    pub fn square() -> Self {
        Self::new(WaveformKind::Square)
    }

    pub fn with_kind(mut self, kind: WaveformKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_frequency(mut self, frequency: f64) -> Self {
        self.frequency = frequency;
        self
    }

    pub fn with_offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_invert(mut self, invert: bool) -> Self {
        self.invert = invert;
        self
    }

    /// Returns a copy with frequency clamped to [1, MAX_FREQUENCY] and offset
    /// to [-1, 1]. Non-finite values fall back to 1 and 0 respectively.
    ///
    /// # Examples
    ///
    /// ```
    /// use tonecurve::{WaveformKind, WaveformParameters};
    ///
    /// let params = WaveformParameters::new(WaveformKind::Sine)
    ///     .with_frequency(0.2)
    ///     .with_offset(-4.0)
    ///     .sanitized();
    /// assert_eq!((params.frequency, params.offset), (1.0, -1.0));
    /// ```
    pub fn sanitized(self) -> Self {
        let frequency = if self.frequency.is_nan() {
            1.0
        } else {
            self.frequency.clamp(1.0, MAX_FREQUENCY)
        };
        let offset = if self.offset.is_finite() {
            self.offset.clamp(-1.0, 1.0)
        } else {
            0.0
        };
        Self {
            frequency,
            offset,
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_parse_back() {
        for kind in WaveformKind::ALL {
            assert_eq!(kind.name().parse::<WaveformKind>().unwrap(), kind);
            assert_eq!(kind.to_string(), kind.name());
        }
    }

    #[test]
    fn test_unknown_name_error() {
        let err = "Noise".parse::<WaveformKind>().unwrap_err();
        assert!(matches!(err, CurveError::UnknownWaveform(ref name) if name == "Noise"));
    }

    #[test]
    fn test_sanitize_non_finite() {
        let params = WaveformParameters::new(WaveformKind::Saw)
            .with_frequency(f64::NAN)
            .with_offset(f64::INFINITY)
            .sanitized();
        assert_eq!(params.frequency, 1.0);
        assert_eq!(params.offset, 0.0);

        let huge = WaveformParameters::default()
            .with_frequency(f64::INFINITY)
            .sanitized();
        assert_eq!(huge.frequency, MAX_FREQUENCY);
    }

    #[test]
    fn test_serde_field_names() {
        let params = WaveformParameters::new(WaveformKind::Exponential).with_frequency(2.0);
        let value = serde_json::to_value(params).unwrap();
        assert_eq!(value["curve_type"], "Exponential");
        assert_eq!(value["frequency"], 2.0);
        assert_eq!(value["invert"], false);

        let back: WaveformParameters =
            serde_json::from_value(serde_json::json!({ "curve_type": "Log" })).unwrap();
        assert_eq!(back, WaveformParameters::new(WaveformKind::Log));
    }

    #[test]
    fn test_periodic_shapes() {
        assert!(WaveformKind::Sine.is_periodic());
        assert!(!WaveformKind::Half.is_periodic());
    }
}
