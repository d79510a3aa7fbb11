//! One curve per channel.

use super::channel::Channel;
use super::curve::{Curve, DefaultCurve};
use super::point::PointId;
use crate::generators::{self, WaveformParameters};
use crate::sampling::ChannelLuts;

/// Mapping from [`Channel`] to [`Curve`], with exactly one curve per channel.
///
/// This is the curve model the editing session mutates. Every operation is
/// keyed by channel and silently ignores requests that would break a curve's
/// invariants.
///
/// # Examples
///
/// ```
/// use tonecurve::{Channel, CurveSet, DefaultCurve};
///
/// let mut set = CurveSet::new(DefaultCurve::Identity);
/// set.insert_point(Channel::Red, 0.5, 0.8);
/// assert_eq!(set.curve(Channel::Red).len(), 3);
/// assert_eq!(set.curve(Channel::Green).len(), 2);
///
/// set.reset_channel(Channel::Red);
/// assert_eq!(set.curve(Channel::Red).len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CurveSet {
    curves: [Curve; 3],
    default: DefaultCurve,
}

impl Default for CurveSet {
    fn default() -> Self {
        Self::new(DefaultCurve::default())
    }
}

impl CurveSet {
    /// Creates a set where every channel holds the `default` curve.
    pub fn new(default: DefaultCurve) -> Self {
        Self {
            curves: [
                Curve::from_default(default),
                Curve::from_default(default),
                Curve::from_default(default),
            ],
            default,
        }
    }

    /// The canonical curve used for reset and fallback.
    pub fn default_curve(&self) -> DefaultCurve {
        self.default
    }

    /// The curve of `channel`.
    pub fn curve(&self, channel: Channel) -> &Curve {
        &self.curves[channel.index()]
    }

    pub(crate) fn curve_mut(&mut self, channel: Channel) -> &mut Curve {
        &mut self.curves[channel.index()]
    }

    /// Iterates over `(channel, curve)` in display order.
    pub fn iter(&self) -> impl Iterator<Item = (Channel, &Curve)> {
        Channel::ALL.into_iter().zip(self.curves.iter())
    }

    /// Inserts a point into `channel`'s curve. See [`Curve::insert_point`].
    pub fn insert_point(&mut self, channel: Channel, x: f64, y: f64) -> Option<PointId> {
        let id = self.curve_mut(channel).insert_point(x, y);
        if let Some(id) = id {
            tracing::trace!(%channel, point = id.get(), x, y, "inserted point");
        }
        id
    }

    /// Deletes a point from `channel`'s curve. See [`Curve::delete_point`].
    pub fn delete_point(&mut self, channel: Channel, id: PointId) -> bool {
        self.curve_mut(channel).delete_point(id)
    }

    /// Moves a point of `channel`'s curve. See [`Curve::move_point`].
    pub fn move_point(
        &mut self,
        channel: Channel,
        index: usize,
        x: f64,
        y: f64,
        epsilon: f64,
    ) -> bool {
        self.curve_mut(channel).move_point(index, x, y, epsilon)
    }

    /// Replaces `channel`'s curve with the canonical default.
    pub fn reset_channel(&mut self, channel: Channel) {
        tracing::debug!(%channel, default = ?self.default, "reset channel");
        self.replace(channel, Curve::from_default(self.default));
    }

    /// Re-sorts `channel`'s curve by x.
    pub fn resort(&mut self, channel: Channel) {
        self.curve_mut(channel).resort();
    }

    /// Replaces `channel`'s curve with a generated waveform.
    pub fn apply_waveform(&mut self, channel: Channel, params: &WaveformParameters) {
        tracing::debug!(%channel, kind = %params.kind, "apply waveform");
        self.replace(channel, generators::generate(params));
    }

    /// Replaces `channel`'s curve wholesale.
    pub fn replace(&mut self, channel: Channel, curve: Curve) {
        self.curves[channel.index()] = curve;
    }

    /// The three normalized lookup tables, recomputed from the current curves.
    pub fn luts(&self) -> ChannelLuts {
        ChannelLuts {
            red: self.curve(Channel::Red).lut(),
            green: self.curve(Channel::Green).lut(),
            blue: self.curve(Channel::Blue).lut(),
        }
    }
}
