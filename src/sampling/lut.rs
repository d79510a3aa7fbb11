//! Fixed-length lookup tables and the per-channel output payload.

use super::{SamplePoint, clamp_unit, normalize, sample};
use crate::curves::Channel;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Number of entries in every lookup table.
pub const LUT_SIZE: usize = 256;

/// A normalized lookup table of [`LUT_SIZE`] values in [0, 1].
///
/// Entry `i` is the curve value at input level `i / 255`. Tables are derived
/// on demand and never cached; construct one from a curve with
/// [`Curve::lut`](crate::Curve::lut) or [`Lut::from_points`].
///
/// Deserializing accepts an array of any length, which is resampled and
/// clipped the same way as [`Lut::from_values`].
///
/// # Examples
///
/// ```
/// use tonecurve::{Curve, LUT_SIZE};
///
/// let lut = Curve::identity().lut();
/// assert_eq!(lut.values().len(), LUT_SIZE);
/// assert!((lut.apply(0.5) - 0.5).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Lut(#[serde(deserialize_with = "deserialize_values")] Vec<f64>);

fn deserialize_values<'de, D>(deserializer: D) -> Result<Vec<f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let values = Vec::<f64>::deserialize(deserializer)?;
    Ok(Lut::from_values(&values).0)
}

impl Default for Lut {
    fn default() -> Self {
        Self::identity()
    }
}

impl Lut {
    /// Samples and normalizes a piecewise-linear curve.
    pub fn from_points<P: SamplePoint>(points: &[P]) -> Self {
        let mut table = sample(points, LUT_SIZE);
        normalize(&mut table);
        Lut(table)
    }

    /// The identity ramp `i / 255`.
    pub fn identity() -> Self {
        let last = (LUT_SIZE - 1) as f64;
        Lut((0..LUT_SIZE).map(|i| i as f64 / last).collect())
    }

    /// Builds a table from externally supplied values.
    ///
    /// Values are clipped to [0, 1] (NaN becomes 0). A slice that is not
    /// exactly [`LUT_SIZE`] long is resampled by linear lookup; a single value
    /// becomes a constant table and an empty slice the identity ramp.
    ///
    /// # Examples
    ///
    /// ```
    /// use tonecurve::Lut;
    ///
    /// let lut = Lut::from_values(&[0.0, 2.0]);
    /// assert_eq!(lut.values()[0], 0.0);
    /// assert_eq!(lut.values()[255], 1.0);
    /// ```
    pub fn from_values(values: &[f64]) -> Self {
        match values.len() {
            0 => Self::identity(),
            1 => Lut(vec![clamp_unit(values[0]); LUT_SIZE]),
            LUT_SIZE => Lut(values.iter().copied().map(clamp_unit).collect()),
            len => {
                tracing::trace!(len, "resampling table to {LUT_SIZE} entries");
                let last = (len - 1) as f64;
                let points: Vec<(f64, f64)> = values
                    .iter()
                    .enumerate()
                    .map(|(i, v)| (i as f64 / last, clamp_unit(*v)))
                    .collect();
                Lut(sample(&points, LUT_SIZE))
            }
        }
    }

    /// All table entries.
    pub fn values(&self) -> &[f64] {
        &self.0
    }

    /// Consumes the table, returning its entries.
    pub fn into_values(self) -> Vec<f64> {
        self.0
    }

    /// Evaluates the table at an input level in [0, 1], interpolating
    /// linearly between neighbouring entries.
    ///
    /// Out-of-range levels are clamped; NaN is treated as 0.
    pub fn apply(&self, level: f64) -> f64 {
        let position = clamp_unit(level) * (LUT_SIZE - 1) as f64;
        let index = position.floor() as usize;
        if index >= LUT_SIZE - 1 {
            return self.0[LUT_SIZE - 1];
        }
        let frac = position - index as f64;
        let (a, b) = (self.0[index], self.0[index + 1]);
        a + frac * (b - a)
    }
}

/// The three per-channel lookup tables emitted as the computed output.
///
/// Serializes as `{"red": [...], "green": [...], "blue": [...]}`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChannelLuts {
    pub red: Lut,
    pub green: Lut,
    pub blue: Lut,
}

impl ChannelLuts {
    /// Identity ramps on every channel.
    pub fn identity() -> Self {
        Self::default()
    }

    /// The table for `channel`.
    pub fn get(&self, channel: Channel) -> &Lut {
        match channel {
            Channel::Red => &self.red,
            Channel::Green => &self.green,
            Channel::Blue => &self.blue,
        }
    }

    /// Iterates over `(channel, table)` in display order.
    pub fn iter(&self) -> impl Iterator<Item = (Channel, &Lut)> {
        Channel::ALL.into_iter().map(|c| (c, self.get(c)))
    }

    /// Applies the three channel tables to an `[r, g, b]` pixel.
    ///
    /// # Examples
    ///
    /// ```
    /// use tonecurve::{Channel, CurveSet};
    ///
    /// let mut set = CurveSet::default();
    /// set.move_point(Channel::Red, 1, 1.0, 0.5, 1e-3);
    /// let [r, g, b] = set.luts().apply_rgb([1.0, 1.0, 0.0]);
    /// assert_eq!((r, g, b), (0.5, 1.0, 0.0));
    /// ```
    pub fn apply_rgb(&self, [r, g, b]: [f64; 3]) -> [f64; 3] {
        [self.red.apply(r), self.green.apply(g), self.blue.apply(b)]
    }

    /// Reads a payload produced by an editor, recovering from anything
    /// malformed.
    ///
    /// A non-object payload yields identity ramps on every channel. A missing
    /// channel (or one that is not an array) gets an identity ramp. Non-numeric
    /// entries are skipped and the rest go through [`Lut::from_values`].
    ///
    /// # Examples
    ///
    /// ```
    /// use tonecurve::ChannelLuts;
    /// use serde_json::json;
    ///
    /// let luts = ChannelLuts::from_payload(&json!({ "red": [0.5, 0.5] }));
    /// assert_eq!(luts.red.apply(0.9), 0.5);
    /// assert!((luts.green.apply(0.9) - 0.9).abs() < 1e-12);
    /// ```
    pub fn from_payload(payload: &Value) -> Self {
        let Some(map) = payload.as_object() else {
            tracing::warn!("payload is not an object, using identity tables");
            return Self::identity();
        };

        let read = |channel: Channel| match map.get(channel.name()).and_then(Value::as_array) {
            Some(entries) => {
                let values: Vec<f64> = entries.iter().filter_map(Value::as_f64).collect();
                if values.len() != entries.len() {
                    tracing::warn!(
                        %channel,
                        skipped = entries.len() - values.len(),
                        "skipping non-numeric table entries"
                    );
                }
                Lut::from_values(&values)
            }
            None => {
                tracing::warn!(%channel, "channel missing from payload, using identity table");
                Lut::identity()
            }
        };

        Self {
            red: read(Channel::Red),
            green: read(Channel::Green),
            blue: read(Channel::Blue),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Curve;
    use serde_json::json;

    #[test]
    fn test_identity_endpoints() {
        let lut = Lut::identity();
        assert_eq!(lut.values().len(), LUT_SIZE);
        assert_eq!(lut.values()[0], 0.0);
        assert_eq!(lut.values()[255], 1.0);
    }

    #[test]
    fn test_apply_interpolates_between_entries() {
        let lut = Curve::from_points([(0.0, 1.0), (1.0, 0.0)]).lut();
        assert!((lut.apply(0.25) - 0.75).abs() < 1e-9);
        assert_eq!(lut.apply(-3.0), 1.0);
        assert_eq!(lut.apply(7.0), 0.0);
        assert_eq!(lut.apply(f64::NAN), 1.0);
    }

    #[test]
    fn test_from_values_resamples() {
        let lut = Lut::from_values(&[0.0, 1.0, 0.0]);
        assert_eq!(lut.values().len(), LUT_SIZE);
        assert_eq!(lut.values()[0], 0.0);
        assert_eq!(lut.values()[255], 0.0);
        assert!(lut.values()[127] > 0.99);
    }

    #[test]
    fn test_from_values_clips() {
        let values: Vec<f64> = (0..LUT_SIZE).map(|i| i as f64 / 100.0 - 1.0).collect();
        let lut = Lut::from_values(&values);
        assert!(lut.values().iter().all(|v| (0.0..=1.0).contains(v)));
        assert_eq!(lut.values()[0], 0.0);
        assert_eq!(lut.values()[255], 1.0);
    }

    #[test]
    fn test_single_value_is_constant() {
        let lut = Lut::from_values(&[0.3]);
        assert!(lut.values().iter().all(|v| *v == 0.3));
    }

    #[test]
    fn test_payload_non_object() {
        assert_eq!(ChannelLuts::from_payload(&json!([1, 2, 3])), ChannelLuts::identity());
    }

    #[test]
    fn test_payload_skips_non_numeric() {
        let luts = ChannelLuts::from_payload(&json!({
            "red": [0.0, "x", 1.0],
            "green": "nope",
            "blue": [1.0, 0.0],
        }));
        assert_eq!(luts.red, Lut::identity());
        assert_eq!(luts.green, Lut::identity());
        assert_eq!(luts.blue.apply(0.0), 1.0);
        assert_eq!(luts.blue.apply(1.0), 0.0);
    }

    #[test]
    fn test_serialize_shape() {
        let value = serde_json::to_value(ChannelLuts::identity()).unwrap();
        let map = value.as_object().unwrap();
        assert_eq!(map.len(), 3);
        assert_eq!(map["green"].as_array().unwrap().len(), LUT_SIZE);
    }

    #[test]
    fn test_deserialize_resamples() {
        let luts: ChannelLuts =
            serde_json::from_value(json!({ "red": [0, 1], "green": [1], "blue": [] })).unwrap();
        assert_eq!(luts.red.values().len(), LUT_SIZE);
        assert!(luts.green.values().iter().all(|v| *v == 1.0));
        assert_eq!(luts.blue, Lut::identity());
    }

    #[test]
    fn test_apply_rgb_identity() {
        let pixel = [0.1, 0.5, 0.9];
        let out = ChannelLuts::identity().apply_rgb(pixel);
        for (a, b) in pixel.iter().zip(out) {
            assert!((a - b).abs() < 1e-12);
        }
    }
}
