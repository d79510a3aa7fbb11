//! The interactive editing state machine.

use super::config::EditorConfig;
use super::geometry::{Pos, Rect};
use super::input::{EventStatus, InputRouter, PointerEvent, PointerKind};
use super::layout::{Command, Layout};
use crate::curves::{Channel, Curve, CurveSet, PointId};
use crate::generators::WaveformParameters;
use crate::sampling::ChannelLuts;

/// Drag lifecycle of an [`EditSession`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    /// A point is following the pointer.
    Dragging {
        channel: Channel,
        point: PointId,
        /// Pointer position minus the point's canvas position at drag start
        offset: (f64, f64),
    },
}

/// One editor instance: the curves it owns plus selection, drag and layout
/// state.
///
/// The session is the only mutator of its [`CurveSet`]. Hosts feed it
/// pointer events (directly or through an [`InputRouter`]), call
/// [`draw`](Self::draw) with a [`RenderSurface`](super::RenderSurface), and
/// read the lookup tables with [`output`](Self::output).
///
/// Pointer events are ignored until the widget has been laid out by `draw` or
/// [`set_bounds`](Self::set_bounds).
///
/// # Examples
///
/// ```
/// use tonecurve::{Channel, EditSession, EditorConfig, PointerEvent};
///
/// let mut session = EditSession::new(EditorConfig::basic());
/// session.set_bounds(340.0, 0.0);
///
/// // The curve area spans x 10..330, y 40..160: click at its centre
/// session.handle_pointer(PointerEvent::down((170.0, 100.0)));
/// session.handle_pointer(PointerEvent::moved((170.0, 70.0)));
/// session.handle_pointer(PointerEvent::up((170.0, 70.0)));
///
/// let curve = session.curve(Channel::Red);
/// assert_eq!(curve.len(), 3);
/// assert!((curve.points()[1].y - 0.75).abs() < 1e-9);
/// assert!(session.take_dirty());
/// ```
#[derive(Debug, Clone)]
pub struct EditSession {
    pub(super) config: EditorConfig,
    pub(super) curves: CurveSet,
    pub(super) active: Channel,
    pub(super) selected: Option<PointId>,
    pub(super) drag: DragState,
    pub(super) waveform: WaveformParameters,
    pub(super) layout: Option<Layout>,
    pub(super) dirty: bool,
}

impl Default for EditSession {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl EditSession {
    /// Creates a session whose channels all hold the configured default curve.
    pub fn new(config: EditorConfig) -> Self {
        Self {
            curves: CurveSet::new(config.default_curve),
            config,
            active: Channel::default(),
            selected: None,
            drag: DragState::Idle,
            waveform: WaveformParameters::default(),
            layout: None,
            dirty: false,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn curves(&self) -> &CurveSet {
        &self.curves
    }

    pub fn curve(&self, channel: Channel) -> &Curve {
        self.curves.curve(channel)
    }

    pub fn active_channel(&self) -> Channel {
        self.active
    }

    /// The selected point of the active channel, if any.
    pub fn selected(&self) -> Option<PointId> {
        self.selected
    }

    /// Current index of the selected point.
    pub fn selected_index(&self) -> Option<usize> {
        self.selected
            .and_then(|id| self.curves.curve(self.active).index_of(id))
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging { .. })
    }

    /// Parameters used by the apply button of the advanced variant.
    pub fn waveform(&self) -> &WaveformParameters {
        &self.waveform
    }

    /// Stores `params` in their [`sanitized`](WaveformParameters::sanitized)
    /// form, so the persisted waveform is always finite.
    pub fn set_waveform(&mut self, params: WaveformParameters) {
        self.waveform = params.sanitized();
    }

    /// The layout cached by the last `draw` or `set_bounds`.
    pub fn layout(&self) -> Option<&Layout> {
        self.layout.as_ref()
    }

    /// Width and height the widget needs at `width`.
    pub fn compute_size(&self, width: f64) -> (f64, f64) {
        (width, self.config.metrics.height())
    }

    /// Smallest size a host should allocate.
    pub fn min_size(&self) -> (f64, f64) {
        self.compute_size(self.config.metrics.min_width)
    }

    /// Lays the widget out without drawing it.
    pub fn set_bounds(&mut self, width: f64, y: f64) {
        self.layout = Some(Layout::new(width, y, &self.config.metrics));
    }

    /// Returns and clears the "needs redraw" flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// The three normalized lookup tables for the current curves.
    pub fn output(&self) -> ChannelLuts {
        self.curves.luts()
    }

    /// Makes `channel` the edited channel.
    ///
    /// Any drag in progress is aborted and the selection cleared, even when
    /// `channel` is already active, so a drag can never outlive a channel
    /// button press.
    pub fn set_active_channel(&mut self, channel: Channel) {
        if self.selected.is_some() || self.is_dragging() {
            self.clear_interaction();
            self.dirty = true;
        }
        if channel == self.active {
            return;
        }
        tracing::debug!(from = %self.active, to = %channel, "switch channel");
        self.active = channel;
        self.dirty = true;
    }

    /// Runs a top-button command on the active channel.
    pub fn execute(&mut self, command: Command) {
        match command {
            Command::ResetChannel => self.reset_channel(),
            Command::DeletePoint => {
                self.delete_selected();
            }
            Command::ApplyWaveform => self.apply_waveform(),
        }
    }

    /// Replaces the active curve with the default curve.
    pub fn reset_channel(&mut self) {
        self.curves.reset_channel(self.active);
        self.clear_interaction();
        self.dirty = true;
    }

    /// Deletes the selected point unless it is an endpoint.
    ///
    /// The selection is cleared either way. Returns true if a point was
    /// removed.
    pub fn delete_selected(&mut self) -> bool {
        let removed = self
            .selected
            .is_some_and(|id| self.curves.delete_point(self.active, id));
        self.clear_interaction();
        if removed {
            self.dirty = true;
        }
        removed
    }

    /// Replaces the active curve with the variant's waveform: the square
    /// preset for [`Basic`](super::EditorVariant::Basic), the session's
    /// parameters for [`Advanced`](super::EditorVariant::Advanced).
    pub fn apply_waveform(&mut self) {
        let params = self.config.variant.apply_parameters(&self.waveform);
        self.apply_parameters(&params);
    }

    /// Replaces the active curve with the waveform described by `params`.
    pub fn apply_parameters(&mut self, params: &WaveformParameters) {
        self.curves.apply_waveform(self.active, params);
        self.clear_interaction();
        self.dirty = true;
    }

    /// Classifies a native event with `router` and handles it.
    ///
    /// Events the router cannot classify are ignored.
    pub fn route<R: InputRouter>(&mut self, router: &mut R, raw: &R::Raw) -> EventStatus {
        match router.classify(raw) {
            Some(event) => self.handle_pointer(event),
            None => EventStatus::Ignored,
        }
    }

    /// Handles one classified pointer event.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> EventStatus {
        let Some(layout) = self.layout else {
            return EventStatus::Ignored;
        };
        match event.kind {
            PointerKind::Down => self.pointer_down(&layout, event.pos),
            PointerKind::Move => self.pointer_move(&layout.plot, event.pos),
            PointerKind::Up => self.pointer_up(),
            PointerKind::DoubleClick => self.double_click(&layout.plot, event.pos),
        }
    }

    fn pointer_down(&mut self, layout: &Layout, pos: Pos) -> EventStatus {
        if let Some(command) = layout.command_at(pos) {
            tracing::debug!(?command, variant = ?self.config.variant, "command button");
            self.execute(command);
            return EventStatus::Consumed;
        }
        if let Some(channel) = layout.channel_at(pos) {
            self.set_active_channel(channel);
            return EventStatus::Consumed;
        }
        if !layout.plot_contains(pos) {
            return EventStatus::Ignored;
        }

        let plot = &layout.plot;
        if let Some(index) = self.hit_test(plot, pos, false) {
            self.begin_drag(plot, index, pos);
            return EventStatus::Consumed;
        }

        let (x, y) = plot.to_data(pos);
        let margin = self.config.insert_margin;
        if x > margin && x < 1.0 - margin {
            if let Some(id) = self.curves.insert_point(self.active, x, y) {
                if let Some(index) = self.curves.curve(self.active).index_of(id) {
                    self.begin_drag(plot, index, pos);
                }
            }
        } else {
            tracing::trace!(x, y, "click outside the insert margin");
        }
        EventStatus::Consumed
    }

    fn pointer_move(&mut self, plot: &Rect, pos: Pos) -> EventStatus {
        let DragState::Dragging {
            channel,
            point,
            offset,
        } = self.drag
        else {
            return EventStatus::Ignored;
        };

        let index = match self.curves.curve(channel).index_of(point) {
            Some(index) if channel == self.active => index,
            _ => {
                self.drag = DragState::Idle;
                return EventStatus::Ignored;
            }
        };

        let (x, y) = plot.to_data(pos.offset(-offset.0, -offset.1));
        self.curves
            .move_point(channel, index, x, y, self.config.drag_epsilon);
        self.dirty = true;
        EventStatus::Consumed
    }

    fn pointer_up(&mut self) -> EventStatus {
        if !self.is_dragging() {
            return EventStatus::Ignored;
        }
        self.drag = DragState::Idle;
        self.curves.resort(self.active);
        self.dirty = true;
        EventStatus::Consumed
    }

    fn double_click(&mut self, plot: &Rect, pos: Pos) -> EventStatus {
        if !plot.contains(pos) {
            return EventStatus::Ignored;
        }
        let Some(index) = self.hit_test(plot, pos, true) else {
            return EventStatus::Consumed;
        };
        let Some(id) = self.curves.curve(self.active).get(index).map(|p| p.id()) else {
            return EventStatus::Consumed;
        };

        if self.curves.delete_point(self.active, id) {
            tracing::debug!(channel = %self.active, point = id.get(), "deleted point");
            if self.selected == Some(id) {
                self.selected = None;
            }
            if matches!(self.drag, DragState::Dragging { point, .. } if point == id) {
                self.drag = DragState::Idle;
            }
            self.dirty = true;
        }
        EventStatus::Consumed
    }

    /// Finds the topmost point of the active curve within the hit tolerance.
    ///
    /// Points are scanned last to first so the most recently drawn point
    /// wins. With `interior_only` the endpoints are skipped.
    fn hit_test(&self, plot: &Rect, pos: Pos, interior_only: bool) -> Option<usize> {
        let curve = self.curves.curve(self.active);
        let tolerance_sq = self.config.hit_tolerance.powi(2);
        let hit = curve
            .points()
            .iter()
            .enumerate()
            .rev()
            .filter(|(i, _)| !interior_only || !curve.is_endpoint(*i))
            .find(|(_, p)| plot.to_canvas(p.x, p.y).distance_squared(pos) <= tolerance_sq)
            .map(|(i, _)| i);
        if hit.is_none() {
            tracing::trace!(x = pos.x, y = pos.y, "hit test missed");
        }
        hit
    }

    fn begin_drag(&mut self, plot: &Rect, index: usize, pos: Pos) {
        let Some(point) = self.curves.curve(self.active).get(index) else {
            return;
        };
        let anchor = plot.to_canvas(point.x, point.y);
        self.selected = Some(point.id());
        self.drag = DragState::Dragging {
            channel: self.active,
            point: point.id(),
            offset: (pos.x - anchor.x, pos.y - anchor.y),
        };
        self.dirty = true;
    }

    pub(super) fn clear_interaction(&mut self) {
        self.selected = None;
        self.drag = DragState::Idle;
    }
}
