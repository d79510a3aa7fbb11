//! Pointer events and the host-side classifier trait.

use super::geometry::Pos;

/// The four pointer gestures the editor reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerKind {
    Down,
    Move,
    Up,
    DoubleClick,
}

/// A classified pointer event in widget-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub pos: Pos,
}

impl PointerEvent {
    pub fn new(kind: PointerKind, pos: impl Into<Pos>) -> Self {
        Self {
            kind,
            pos: pos.into(),
        }
    }

    pub fn down(pos: impl Into<Pos>) -> Self {
        Self::new(PointerKind::Down, pos)
    }

    pub fn moved(pos: impl Into<Pos>) -> Self {
        Self::new(PointerKind::Move, pos)
    }

    pub fn up(pos: impl Into<Pos>) -> Self {
        Self::new(PointerKind::Up, pos)
    }

    pub fn double_click(pos: impl Into<Pos>) -> Self {
        Self::new(PointerKind::DoubleClick, pos)
    }
}

/// Whether the editor handled an event.
///
/// `Consumed` means the host should stop propagating it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventStatus {
    Consumed,
    Ignored,
}

impl EventStatus {
    pub fn is_consumed(self) -> bool {
        self == EventStatus::Consumed
    }
}

/// Translates a host's native input events into [`PointerEvent`]s.
///
/// Implementations own whatever state classification needs, such as the
/// time of the last press for double-click detection, and return `None` for
/// events the editor should not see.
///
/// # Examples
///
/// ```
/// use tonecurve::{EditSession, EventStatus, InputRouter, PointerEvent};
///
/// struct Taps;
///
/// impl InputRouter for Taps {
///     type Raw = (f64, f64);
///
///     fn classify(&mut self, raw: &(f64, f64)) -> Option<PointerEvent> {
///         Some(PointerEvent::down(*raw))
///     }
/// }
///
/// let mut session = EditSession::default();
/// session.set_bounds(300.0, 0.0);
/// assert_eq!(session.route(&mut Taps, &(150.0, 100.0)), EventStatus::Consumed);
/// ```
pub trait InputRouter {
    /// The host's native event type.
    type Raw;

    fn classify(&mut self, raw: &Self::Raw) -> Option<PointerEvent>;
}
