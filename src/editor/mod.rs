//! Interactive curve editing.
//!
//! This module provides:
//! - `EditSession` - the state machine that owns a `CurveSet` and reacts to
//!   pointer events
//! - `RenderSurface` and `InputRouter` - the two seams a host implements
//! - `Layout` and `LayoutMetrics` - button and plot placement
//! - `EditorConfig` - variant, default curve and interaction tolerances
//!
//! Persistence (`serialize` / `configure`) lives on `EditSession` as well.

mod config;
mod draw;
mod geometry;
mod input;
mod layout;
mod persist;
mod render;
mod session;

pub use config::{EditorConfig, EditorVariant};
pub use geometry::{Pos, Rect};
pub use input::{EventStatus, InputRouter, PointerEvent, PointerKind};
pub use layout::{Command, Layout, LayoutMetrics};
pub use render::{Color, DrawCommand, Recording, RenderSurface, TextAlign, TextBaseline, TextStyle};
pub use session::{DragState, EditSession};
