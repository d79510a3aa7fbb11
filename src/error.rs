//! Error types for parsing persisted curve state and waveform names.
//!
//! Editing and sampling never fail; only the strict parsing entry points
//! return these errors. The lenient `configure` paths recover from them.

use thiserror::Error;

/// All errors that can occur while parsing `tonecurve` data.
#[derive(Error, Debug)]
pub enum CurveError {
    /// The waveform name is not one of the supported shapes.
    #[error("unknown waveform type: {0}")]
    UnknownWaveform(String),

    /// Persisted state has the wrong shape.
    #[error("malformed curve state: {0}")]
    MalformedState(String),

    /// JSON serialization/deserialization error.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// A convenience result type for `tonecurve` parsing operations.
pub type Result<T> = std::result::Result<T, CurveError>;
