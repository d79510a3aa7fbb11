//! Drawing primitives the editor needs from its host.

use super::geometry::{Pos, Rect};
use crate::Channel;

/// An RGBA colour with alpha in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Color {
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);
    /// Widget background
    pub const BACKGROUND: Color = Color::rgb(0x22, 0x22, 0x22);
    /// Idle button fill and plot border
    pub const BUTTON: Color = Color::rgb(0x55, 0x55, 0x55);
    /// Curve area fill
    pub const PLOT: Color = Color::rgb(0x22, 0x22, 0x22);
    /// Passive plot area fill
    pub const PLOT_DARK: Color = Color::rgb(0x11, 0x11, 0x11);
    pub const ORANGE: Color = Color::rgb(0xff, 0xa5, 0x00);
    pub const GREY: Color = Color::rgb(0xaa, 0xaa, 0xaa);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn with_alpha(self, a: f64) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    /// The colour a channel's curve and active button are drawn in.
    pub fn channel(channel: Channel) -> Self {
        match channel {
            Channel::Red => Color::rgb(0xff, 0x00, 0x00),
            Channel::Green => Color::rgb(0x00, 0x80, 0x00),
            Channel::Blue => Color::rgb(0x00, 0x00, 0xff),
        }
    }

    /// `#rrggbb`, ignoring alpha.
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextBaseline {
    Top,
    #[default]
    Middle,
    Bottom,
}

/// How a string is placed relative to its anchor position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub color: Color,
    /// Font size in pixels
    pub size: f64,
    pub align: TextAlign,
    pub baseline: TextBaseline,
}

impl TextStyle {
    /// Centered on both axes.
    pub fn new(color: Color, size: f64) -> Self {
        Self {
            color,
            size,
            align: TextAlign::default(),
            baseline: TextBaseline::default(),
        }
    }

    pub fn with_align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    pub fn with_baseline(mut self, baseline: TextBaseline) -> Self {
        self.baseline = baseline;
        self
    }
}

/// A canvas region the host lends the editor for one draw call.
///
/// Coordinates are in the widget's local pixel space, the same space pointer
/// events arrive in. The editor never keeps a surface between calls.
pub trait RenderSurface {
    fn fill_rect(&mut self, rect: Rect, color: Color);

    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f64);

    /// Strokes an open polyline through `points`.
    fn stroke_path(&mut self, points: &[Pos], color: Color, width: f64);

    fn fill_circle(&mut self, center: Pos, radius: f64, color: Color);

    fn stroke_circle(&mut self, center: Pos, radius: f64, color: Color, width: f64);

    fn text(&mut self, text: &str, at: Pos, style: TextStyle);
}

/// One recorded [`RenderSurface`] call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect(Rect, Color),
    StrokeRect(Rect, Color, f64),
    StrokePath(Vec<Pos>, Color, f64),
    FillCircle(Pos, f64, Color),
    StrokeCircle(Pos, f64, Color, f64),
    Text(String, Pos, TextStyle),
}

/// A surface that records every call, for headless hosts and tests.
///
/// # Examples
///
/// ```
/// use tonecurve::editor::{Recording, RenderSurface};
/// use tonecurve::EditSession;
///
/// let mut session = EditSession::default();
/// let mut surface = Recording::default();
/// session.draw(&mut surface, 300.0, 0.0);
/// assert!(surface.texts().any(|t| t == "Delete Point"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Recording {
    pub commands: Vec<DrawCommand>,
}

impl Recording {
    /// All strings drawn, in order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text(text, _, _) => Some(text.as_str()),
            _ => None,
        })
    }

    /// All polylines drawn, in order.
    pub fn paths(&self) -> impl Iterator<Item = (&[Pos], Color)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::StrokePath(points, color, _) => Some((points.as_slice(), *color)),
            _ => None,
        })
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl RenderSurface for Recording {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::FillRect(rect, color));
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f64) {
        self.commands.push(DrawCommand::StrokeRect(rect, color, width));
    }

    fn stroke_path(&mut self, points: &[Pos], color: Color, width: f64) {
        self.commands
            .push(DrawCommand::StrokePath(points.to_vec(), color, width));
    }

    fn fill_circle(&mut self, center: Pos, radius: f64, color: Color) {
        self.commands.push(DrawCommand::FillCircle(center, radius, color));
    }

    fn stroke_circle(&mut self, center: Pos, radius: f64, color: Color, width: f64) {
        self.commands
            .push(DrawCommand::StrokeCircle(center, radius, color, width));
    }

    fn text(&mut self, text: &str, at: Pos, style: TextStyle) {
        self.commands
            .push(DrawCommand::Text(text.to_string(), at, style));
    }
}
