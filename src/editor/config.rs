//! Editor configuration and the two preset variants.

use super::layout::{Command, LayoutMetrics};
use crate::curves::{DRAG_EPSILON, DefaultCurve};
use crate::generators::WaveformParameters;
use serde::{Deserialize, Serialize};

/// Which of the two editor flavours to present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditorVariant {
    /// Identity default curve and a fixed square-wave preset button
    #[default]
    Basic,
    /// Flat default curve and a button applying the session's waveform
    Advanced,
}

impl EditorVariant {
    /// The label of a top button in this variant.
    pub fn label(self, command: Command) -> &'static str {
        match (self, command) {
            (EditorVariant::Basic, Command::ResetChannel) => "Reset Linear",
            (EditorVariant::Advanced, Command::ResetChannel) => "Reset Channel",
            (_, Command::DeletePoint) => "Delete Point",
            (EditorVariant::Basic, Command::ApplyWaveform) => "Square Wave",
            (EditorVariant::Advanced, Command::ApplyWaveform) => "Apply Curve",
        }
    }

    /// The parameters the apply button generates from, given the session's
    /// current ones.
    pub fn apply_parameters(self, current: &WaveformParameters) -> WaveformParameters {
        match self {
            EditorVariant::Basic => WaveformParameters::square(),
            EditorVariant::Advanced => *current,
        }
    }

    /// Returns true if the variant persists its waveform parameters.
    pub fn has_waveform(self) -> bool {
        matches!(self, EditorVariant::Advanced)
    }
}

/// Settings for an [`EditSession`](super::EditSession).
///
/// When deserialized, fields left out of the document take the value of
/// the chosen variant's preset, not of [`EditorConfig::default`].
///
/// # Examples
///
/// ```
/// use tonecurve::{DefaultCurve, EditorConfig, EditorVariant};
///
/// let config = EditorConfig::advanced().with_hit_tolerance(14.0);
/// assert_eq!(config.variant, EditorVariant::Advanced);
/// assert_eq!(config.default_curve, DefaultCurve::Half);
/// assert_eq!(config.hit_tolerance, 14.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "PartialEditorConfig")]
pub struct EditorConfig {
    pub variant: EditorVariant,
    /// Curve used at construction, on reset and as the configure fallback
    pub default_curve: DefaultCurve,
    /// Pointer-to-point hit radius, in pixels
    pub hit_tolerance: f64,
    /// Gap kept between a dragged point and its neighbours
    pub drag_epsilon: f64,
    /// Clicks must land in `(insert_margin, 1 - insert_margin)` to insert
    pub insert_margin: f64,
    pub metrics: LayoutMetrics,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self::basic()
    }
}

impl EditorConfig {
    /// The preset for `variant`.
    pub fn for_variant(variant: EditorVariant) -> Self {
        match variant {
            EditorVariant::Basic => Self::basic(),
            EditorVariant::Advanced => Self::advanced(),
        }
    }

    /// The simple editor: identity curves, "Reset Linear", "Square Wave".
    pub fn basic() -> Self {
        Self {
            variant: EditorVariant::Basic,
            default_curve: DefaultCurve::Identity,
            hit_tolerance: 10.0,
            drag_epsilon: DRAG_EPSILON,
            insert_margin: 0.01,
            metrics: LayoutMetrics {
                min_width: 150.0,
                ..LayoutMetrics::default()
            },
        }
    }

    /// The richer editor: flat mid-level curves, "Reset Channel", "Apply Curve".
    pub fn advanced() -> Self {
        Self {
            variant: EditorVariant::Advanced,
            default_curve: DefaultCurve::Half,
            metrics: LayoutMetrics::default(),
            ..Self::basic()
        }
    }

    pub fn with_default_curve(mut self, default_curve: DefaultCurve) -> Self {
        self.default_curve = default_curve;
        self
    }

    pub fn with_hit_tolerance(mut self, hit_tolerance: f64) -> Self {
        self.hit_tolerance = hit_tolerance;
        self
    }

    pub fn with_drag_epsilon(mut self, drag_epsilon: f64) -> Self {
        self.drag_epsilon = drag_epsilon;
        self
    }

    pub fn with_insert_margin(mut self, insert_margin: f64) -> Self {
        self.insert_margin = insert_margin;
        self
    }

    pub fn with_metrics(mut self, metrics: LayoutMetrics) -> Self {
        self.metrics = metrics;
        self
    }
}

/// Deserialized form of [`EditorConfig`]: every field optional.
#[derive(Deserialize)]
struct PartialEditorConfig {
    #[serde(default)]
    variant: EditorVariant,
    default_curve: Option<DefaultCurve>,
    hit_tolerance: Option<f64>,
    drag_epsilon: Option<f64>,
    insert_margin: Option<f64>,
    #[serde(default)]
    metrics: PartialMetrics,
}

#[derive(Default, Deserialize)]
struct PartialMetrics {
    pad: Option<f64>,
    top_button_height: Option<f64>,
    curve_area_height: Option<f64>,
    channel_button_height: Option<f64>,
    point_radius: Option<f64>,
    min_width: Option<f64>,
}

impl From<PartialEditorConfig> for EditorConfig {
    fn from(partial: PartialEditorConfig) -> Self {
        let preset = Self::for_variant(partial.variant);
        let m = partial.metrics;
        let base = preset.metrics;
        Self {
            variant: partial.variant,
            default_curve: partial.default_curve.unwrap_or(preset.default_curve),
            hit_tolerance: partial.hit_tolerance.unwrap_or(preset.hit_tolerance),
            drag_epsilon: partial.drag_epsilon.unwrap_or(preset.drag_epsilon),
            insert_margin: partial.insert_margin.unwrap_or(preset.insert_margin),
            metrics: LayoutMetrics {
                pad: m.pad.unwrap_or(base.pad),
                top_button_height: m.top_button_height.unwrap_or(base.top_button_height),
                curve_area_height: m.curve_area_height.unwrap_or(base.curve_area_height),
                channel_button_height: m
                    .channel_button_height
                    .unwrap_or(base.channel_button_height),
                point_radius: m.point_radius.unwrap_or(base.point_radius),
                min_width: m.min_width.unwrap_or(base.min_width),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WaveformKind;

    #[test]
    fn test_presets() {
        let basic = EditorConfig::basic();
        assert_eq!(basic.default_curve, DefaultCurve::Identity);
        assert_eq!(basic.metrics.min_width, 150.0);
        let advanced = EditorConfig::advanced();
        assert_eq!(advanced.hit_tolerance, 10.0);
        assert_eq!(advanced.metrics.min_width, 200.0);
        assert_eq!(EditorConfig::default(), basic);
    }

    #[test]
    fn test_labels() {
        let labels: Vec<&str> = Command::ALL
            .iter()
            .map(|c| EditorVariant::Advanced.label(*c))
            .collect();
        assert_eq!(labels, vec!["Reset Channel", "Delete Point", "Apply Curve"]);
        assert_eq!(EditorVariant::Basic.label(Command::ApplyWaveform), "Square Wave");
    }

    #[test]
    fn test_apply_parameters() {
        let sine = WaveformParameters::new(WaveformKind::Sine).with_frequency(4.0);
        assert_eq!(EditorVariant::Basic.apply_parameters(&sine), WaveformParameters::square());
        assert_eq!(EditorVariant::Advanced.apply_parameters(&sine), sine);
    }

    #[test]
    fn test_deserialize_partial() {
        let config: EditorConfig =
            serde_json::from_str(r#"{ "variant": "advanced", "hit_tolerance": 6 }"#).unwrap();
        assert_eq!(config.variant, EditorVariant::Advanced);
        assert_eq!(config.hit_tolerance, 6.0);
        // missing fields come from the advanced preset
        assert_eq!(config.default_curve, DefaultCurve::Half);
        assert_eq!(config.metrics.min_width, 200.0);
    }

    #[test]
    fn test_deserialize_partial_metrics() {
        let config: EditorConfig =
            serde_json::from_str(r#"{ "metrics": { "pad": 4 } }"#).unwrap();
        assert_eq!(config.variant, EditorVariant::Basic);
        assert_eq!(config.default_curve, DefaultCurve::Identity);
        assert_eq!(config.metrics.pad, 4.0);
        assert_eq!(config.metrics.min_width, 150.0);
    }

    #[test]
    fn test_serde_round_trip_keeps_overrides() {
        let config = EditorConfig::advanced()
            .with_default_curve(DefaultCurve::Identity)
            .with_insert_margin(0.05);
        let back: EditorConfig =
            serde_json::from_value(serde_json::to_value(config).unwrap()).unwrap();
        assert_eq!(back, config);
    }
}
