//! Tonecurve - editable tone curves and lookup tables for Rust
//!
//! This library keeps one piecewise-linear curve per colour channel, synthesizes
//! curves from parametric waveforms, and resamples any curve into a fixed-length
//! lookup table. With the `editor` feature it also provides the interactive
//! editing session that drives those curves from pointer input.

pub mod curves;
pub mod error;
pub mod generators;
pub mod sampling;

#[cfg(feature = "editor")]
pub mod editor;
#[cfg(feature = "editor")]
pub mod plot;

// Re-export commonly used types at the crate root
pub use curves::{
    Channel, ControlPoint, Curve, CurveSet, DRAG_EPSILON, DefaultCurve, MIN_POINT_DISTANCE, PointId,
};
pub use error::{CurveError, Result};
pub use generators::{
    GENERATOR_EPSILON, WaveformKind, WaveformParameters, generate, generate_points,
};
pub use sampling::{ChannelLuts, LUT_SIZE, Lut, normalize, sample};

#[cfg(feature = "editor")]
pub use editor::{
    EditSession, EditorConfig, EditorVariant, EventStatus, InputRouter, PointerEvent, PointerKind,
    RenderSurface,
};
#[cfg(feature = "editor")]
pub use plot::CurvePlot;
