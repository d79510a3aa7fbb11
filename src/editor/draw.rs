//! Rendering an [`EditSession`] onto a [`RenderSurface`].

use super::geometry::{Pos, Rect};
use super::layout::Layout;
use super::render::{Color, RenderSurface, TextStyle};
use super::session::EditSession;
use crate::curves::{Channel, Curve};

const CURVE_WIDTH: f64 = 2.0;
const INACTIVE_ALPHA: f64 = 0.5;
const OUTLINE_WIDTH: f64 = 0.5;
const SELECTED_SCALE: f64 = 1.5;

impl EditSession {
    /// Lays the widget out at `width` x `y` and draws it.
    ///
    /// The layout is cached for subsequent pointer events.
    pub fn draw<S: RenderSurface + ?Sized>(&mut self, surface: &mut S, width: f64, y: f64) {
        self.set_bounds(width, y);
        let Some(layout) = self.layout else {
            return;
        };

        surface.fill_rect(layout.bounds, Color::BACKGROUND);
        self.draw_commands(surface, &layout);

        surface.fill_rect(layout.plot, Color::PLOT);
        for channel in Channel::ALL.into_iter().filter(|c| *c != self.active) {
            let color = Color::channel(channel).with_alpha(INACTIVE_ALPHA);
            stroke_curve(surface, &layout.plot, self.curves.curve(channel), color);
        }
        self.draw_active(surface, &layout.plot);

        self.draw_channel_buttons(surface, &layout);
    }

    fn draw_commands<S: RenderSurface + ?Sized>(&self, surface: &mut S, layout: &Layout) {
        let size = self.config.metrics.top_button_height * 0.6;
        for (command, rect) in &layout.commands {
            surface.fill_rect(*rect, Color::BUTTON);
            surface.text(
                self.config.variant.label(*command),
                rect.center(),
                TextStyle::new(Color::WHITE, size),
            );
        }
    }

    fn draw_active<S: RenderSurface + ?Sized>(&self, surface: &mut S, plot: &Rect) {
        let curve = self.curves.curve(self.active);
        let color = Color::channel(self.active);
        stroke_curve(surface, plot, curve, color);

        let radius = self.config.metrics.point_radius;
        for point in curve.points() {
            let center = plot.to_canvas(point.x, point.y);
            let r = if self.selected == Some(point.id()) {
                radius * SELECTED_SCALE
            } else {
                radius
            };
            surface.fill_circle(center, r, color);
            surface.stroke_circle(center, r, Color::WHITE, OUTLINE_WIDTH);
        }
    }

    fn draw_channel_buttons<S: RenderSurface + ?Sized>(&self, surface: &mut S, layout: &Layout) {
        let size = self.config.metrics.channel_button_height * 0.7;
        for (channel, rect) in &layout.channels {
            let fill = if *channel == self.active {
                Color::channel(*channel)
            } else {
                Color::BUTTON
            };
            surface.fill_rect(*rect, fill);
            surface.text(
                &channel.initial().to_string(),
                rect.center(),
                TextStyle::new(Color::WHITE, size),
            );
        }
    }
}

fn stroke_curve<S: RenderSurface + ?Sized>(surface: &mut S, plot: &Rect, curve: &Curve, color: Color) {
    let path: Vec<Pos> = curve
        .points()
        .iter()
        .map(|p| plot.to_canvas(p.x, p.y))
        .collect();
    surface.stroke_path(&path, color, CURVE_WIDTH);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::render::{DrawCommand, Recording};
    use crate::editor::{EditorConfig, PointerEvent};

    #[test]
    fn test_draw_caches_layout() {
        let mut session = EditSession::default();
        assert!(session.layout().is_none());
        session.draw(&mut Recording::default(), 300.0, 25.0);
        assert_eq!(session.layout().map(|l| l.bounds.y), Some(25.0));
    }

    #[test]
    fn test_labels_per_variant() {
        let mut rec = Recording::default();
        EditSession::new(EditorConfig::advanced()).draw(&mut rec, 300.0, 0.0);
        let texts: Vec<&str> = rec.texts().collect();
        assert_eq!(
            texts,
            vec!["Reset Channel", "Delete Point", "Apply Curve", "R", "G", "B"]
        );
    }

    #[test]
    fn test_active_curve_drawn_last_and_opaque() {
        let mut session = EditSession::default();
        session.set_active_channel(Channel::Green);
        let mut rec = Recording::default();
        session.draw(&mut rec, 300.0, 0.0);
        let paths: Vec<Color> = rec.paths().map(|(_, c)| c).collect();
        assert_eq!(paths.len(), 3);
        assert_eq!(paths[0], Color::channel(Channel::Red).with_alpha(0.5));
        assert_eq!(paths[2], Color::channel(Channel::Green));
    }

    #[test]
    fn test_selected_point_is_larger() {
        let mut session = EditSession::default();
        session.set_bounds(340.0, 0.0);
        session.handle_pointer(PointerEvent::down((170.0, 100.0)));
        let mut rec = Recording::default();
        session.draw(&mut rec, 340.0, 0.0);
        let radii: Vec<f64> = rec
            .commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::FillCircle(_, r, _) => Some(*r),
                _ => None,
            })
            .collect();
        assert_eq!(radii, vec![5.0, 7.5, 5.0]);
    }

    #[test]
    fn test_active_channel_button_filled() {
        let mut rec = Recording::default();
        EditSession::default().draw(&mut rec, 300.0, 0.0);
        let layout = Layout::new(300.0, 0.0, &EditorConfig::default().metrics);
        assert!(rec.commands.contains(&DrawCommand::FillRect(
            layout.channels[0].1,
            Color::channel(Channel::Red)
        )));
        assert!(rec.commands.contains(&DrawCommand::FillRect(
            layout.channels[1].1,
            Color::BUTTON
        )));
    }
}
