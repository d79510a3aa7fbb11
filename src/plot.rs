//! A read-only line plot for inspecting sampled sequences such as LUTs.

use crate::editor::{Color, Pos, Rect, RenderSurface, TextAlign, TextBaseline, TextStyle};
use serde_json::Value;

const MARGIN: f64 = 10.0;
const LINE_WIDTH: f64 = 1.5;
const MESSAGE_SIZE: f64 = 12.0;
const LABEL_SIZE: f64 = 10.0;
const LABEL_INSET: f64 = 3.0;
const RANGE_PADDING: f64 = 0.05;

/// Displays a sequence of numbers as an autoscaled polyline.
///
/// # Examples
///
/// ```
/// use tonecurve::CurvePlot;
/// use tonecurve::editor::Recording;
/// use serde_json::json;
///
/// let plot = CurvePlot::from_json(&json!([0.0, 0.5, [1.0, "x"]]));
/// assert_eq!(plot.values(), &[0.0, 0.5, 1.0]);
///
/// let mut surface = Recording::default();
/// plot.draw(&mut surface, 300.0, 0.0);
/// assert_eq!(surface.paths().count(), 1);
/// assert!(surface.texts().any(|t| t == "3 pts"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CurvePlot {
    values: Vec<f64>,
}

impl CurvePlot {
    pub const HEIGHT: f64 = 120.0;

    pub fn new() -> Self {
        Self::default()
    }

    /// Non-finite values are dropped.
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Self {
        let mut plot = Self::new();
        plot.set_values(values);
        plot
    }

    /// Builds a plot from an arbitrary JSON payload, see [`coerce_sequence`].
    pub fn from_json(payload: &Value) -> Self {
        Self::from_values(coerce_sequence(payload))
    }

    pub fn set_values(&mut self, values: impl IntoIterator<Item = f64>) {
        self.values = values.into_iter().filter(|v| v.is_finite()).collect();
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// `(width, height)` the plot wants; it takes whatever width it is given.
    pub fn compute_size(&self, width: f64) -> (f64, f64) {
        (width, Self::HEIGHT)
    }

    /// The padded vertical range the polyline is scaled into, or `None`
    /// when there are fewer than two values to draw.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        if self.values.len() < 2 {
            return None;
        }
        let (min, max) = self
            .values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        if max == min {
            Some((min - 0.5, max + 0.5))
        } else {
            let pad = (max - min) * RANGE_PADDING;
            Some((min - pad, max + pad))
        }
    }

    pub fn draw<S: RenderSurface + ?Sized>(&self, surface: &mut S, width: f64, y: f64) {
        let bounds = Rect::new(0.0, y, width, Self::HEIGHT);
        let area = bounds.inset(MARGIN);

        surface.fill_rect(bounds, Color::BACKGROUND);
        surface.fill_rect(area, Color::PLOT_DARK);
        surface.stroke_rect(area, Color::BUTTON, 1.0);

        let message = TextStyle::new(Color::GREY, MESSAGE_SIZE);
        let Some((lo, hi)) = self.value_range() else {
            let text = match self.values.first() {
                Some(v) => format!("Scalar Value: {v:.4}"),
                None => "No Data Received".to_string(),
            };
            surface.text(&text, area.center(), message);
            return;
        };

        let last = (self.values.len() - 1) as f64;
        let path: Vec<Pos> = self
            .values
            .iter()
            .enumerate()
            .map(|(i, v)| area.to_canvas(i as f64 / last, (v - lo) / (hi - lo)))
            .collect();
        surface.stroke_path(&path, Color::ORANGE, LINE_WIDTH);

        let label = TextStyle::new(Color::GREY, LABEL_SIZE).with_align(TextAlign::Left);
        surface.text(
            &format!("Max: {hi:.3}"),
            Pos::new(area.x + LABEL_INSET, area.y + LABEL_INSET),
            label.with_baseline(TextBaseline::Top),
        );
        let bottom = area.bottom() - LABEL_INSET;
        surface.text(
            &format!("Min: {lo:.3}"),
            Pos::new(area.x + LABEL_INSET, bottom),
            label.with_baseline(TextBaseline::Bottom),
        );
        surface.text(
            &format!("{} pts", self.values.len()),
            Pos::new(area.right() - LABEL_INSET, bottom),
            label
                .with_align(TextAlign::Right)
                .with_baseline(TextBaseline::Bottom),
        );
    }
}

/// Turns an arbitrary JSON payload into a flat sequence of numbers.
///
/// A number becomes a one-element sequence and arrays are flattened
/// recursively. Non-numeric array entries are skipped with a warning, and
/// any other payload yields an empty sequence.
pub fn coerce_sequence(payload: &Value) -> Vec<f64> {
    let mut out = Vec::new();
    match payload {
        Value::Number(_) | Value::Array(_) => flatten_into(payload, &mut out),
        other => tracing::warn!(payload = %other, "plot input is not numeric"),
    }
    out
}

fn flatten_into(value: &Value, out: &mut Vec<f64>) {
    match value {
        Value::Array(items) => items.iter().for_each(|item| flatten_into(item, out)),
        Value::Number(n) => match n.as_f64() {
            Some(v) => out.push(v),
            None => tracing::warn!(%n, "skipping unrepresentable plot value"),
        },
        other => tracing::warn!(entry = %other, "skipping non-numeric plot value"),
    }
}
