//! Widget layout: command buttons, the curve area and channel buttons.

use super::geometry::{Pos, Rect};
use crate::Channel;
use serde::{Deserialize, Serialize};

/// Fixed widget metrics, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutMetrics {
    pub pad: f64,
    pub top_button_height: f64,
    pub curve_area_height: f64,
    pub channel_button_height: f64,
    pub point_radius: f64,
    /// Narrowest width a host should give the widget
    pub min_width: f64,
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        Self {
            pad: 10.0,
            top_button_height: 20.0,
            curve_area_height: 120.0,
            channel_button_height: 25.0,
            point_radius: 5.0,
            min_width: 200.0,
        }
    }
}

impl LayoutMetrics {
    /// Total widget height.
    ///
    /// # Examples
    ///
    /// ```
    /// use tonecurve::editor::LayoutMetrics;
    ///
    /// assert_eq!(LayoutMetrics::default().height(), 205.0);
    /// ```
    pub fn height(&self) -> f64 {
        self.pad
            + self.top_button_height
            + self.pad
            + self.curve_area_height
            + self.pad
            + self.channel_button_height
            + self.pad
    }
}

/// A discrete action bound to one of the top buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Replace the active curve with the default curve
    ResetChannel,
    /// Delete the selected point, unless it is an endpoint
    DeletePoint,
    /// Replace the active curve with a generated waveform
    ApplyWaveform,
}

impl Command {
    /// Top buttons, left to right.
    pub const ALL: [Command; 3] = [
        Command::ResetChannel,
        Command::DeletePoint,
        Command::ApplyWaveform,
    ];
}

/// Button and plot rectangles for one widget width and vertical offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub bounds: Rect,
    pub commands: [(Command, Rect); 3],
    pub plot: Rect,
    pub channels: [(Channel, Rect); 3],
}

impl Layout {
    /// Lays out a widget `width` pixels wide whose top edge sits at `y`.
    ///
    /// Three equal-width buttons share each button row, separated and framed
    /// by `pad`. The curve area spans the full width minus `pad` on each side.
    pub fn new(width: f64, y: f64, metrics: &LayoutMetrics) -> Self {
        let pad = metrics.pad;
        let row = |top: f64, height: f64| {
            let button_width = ((width - pad * 4.0) / 3.0).max(0.0);
            [0.0, 1.0, 2.0].map(|i| Rect::new(pad + i * (button_width + pad), top, button_width, height))
        };

        let top = y + pad;
        let [a, b, c] = row(top, metrics.top_button_height);
        let plot_top = top + metrics.top_button_height + pad;
        let plot = Rect::new(
            pad,
            plot_top,
            (width - pad * 2.0).max(0.0),
            metrics.curve_area_height,
        );
        let channel_top = plot_top + metrics.curve_area_height + pad;
        let [r, g, bl] = row(channel_top, metrics.channel_button_height);

        Self {
            bounds: Rect::new(0.0, y, width, metrics.height()),
            commands: [
                (Command::ResetChannel, a),
                (Command::DeletePoint, b),
                (Command::ApplyWaveform, c),
            ],
            plot,
            channels: [(Channel::Red, r), (Channel::Green, g), (Channel::Blue, bl)],
        }
    }

    /// The command button under `pos`, if any.
    pub fn command_at(&self, pos: Pos) -> Option<Command> {
        self.commands
            .iter()
            .find(|(_, rect)| rect.contains(pos))
            .map(|(command, _)| *command)
    }

    /// The channel button under `pos`, if any.
    pub fn channel_at(&self, pos: Pos) -> Option<Channel> {
        self.channels
            .iter()
            .find(|(_, rect)| rect.contains(pos))
            .map(|(channel, _)| *channel)
    }

    pub fn plot_contains(&self, pos: Pos) -> bool {
        self.plot.contains(pos)
    }
}
