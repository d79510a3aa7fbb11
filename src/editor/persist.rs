//! Saving and restoring an [`EditSession`].
//!
//! The persisted document is
//!
//! ```json
//! {
//!   "curves": { "red": [[0, 0], [1, 1]], "green": [...], "blue": [...] },
//!   "waveform": { "curve_type": "Sine", "frequency": 2, "offset": 0, "invert": false }
//! }
//! ```
//!
//! `waveform` is only written by the advanced variant. When reading, the
//! `curves` wrapper is optional and a bare channel map is accepted too.

use super::session::EditSession;
use crate::curves::CurveSet;
use crate::generators::WaveformParameters;
use crate::{CurveError, Result};
use serde_json::{Map, Value};

const CURVES_KEY: &str = "curves";
const WAVEFORM_KEY: &str = "waveform";

impl EditSession {
    /// The persisted document for this session.
    pub fn serialize(&self) -> Value {
        let mut doc = Map::new();
        doc.insert(CURVES_KEY.to_string(), self.curves.to_value());
        if self.config.variant.has_waveform() {
            match serde_json::to_value(self.waveform.sanitized()) {
                Ok(waveform) => {
                    doc.insert(WAVEFORM_KEY.to_string(), waveform);
                }
                Err(err) => tracing::warn!(%err, "waveform parameters not written"),
            }
        }
        Value::Object(doc)
    }

    /// [`serialize`](Self::serialize) as a JSON string.
    pub fn to_json(&self) -> String {
        self.serialize().to_string()
    }

    /// Restores persisted state, repairing or defaulting whatever is
    /// malformed. Never fails.
    ///
    /// - a non-object document, or a `curves` entry that is not an object,
    ///   resets every channel to the default curve
    /// - channels are repaired one by one as in
    ///   [`CurveSet::from_value_lenient`]
    /// - waveform parameters are restored when present and valid, otherwise
    ///   the current ones are kept
    ///
    /// Selection and drag state are cleared.
    ///
    /// # Examples
    ///
    /// ```
    /// use tonecurve::{Channel, EditSession, EditorConfig};
    /// use serde_json::json;
    ///
    /// let mut session = EditSession::new(EditorConfig::advanced());
    /// session.configure(&json!({ "curves": { "red": [[0, 1], [1, 0]] } }));
    /// assert_eq!(session.curve(Channel::Red).pairs(), vec![[0.0, 1.0], [1.0, 0.0]]);
    /// // green was missing, so it falls back to the default flat curve
    /// assert_eq!(session.curve(Channel::Green).pairs(), vec![[0.0, 0.5], [1.0, 0.5]]);
    /// ```
    pub fn configure(&mut self, doc: &Value) {
        let default = self.config.default_curve;
        self.curves = match curves_section(doc) {
            Some(curves) => CurveSet::from_value_lenient(curves, default),
            None => {
                tracing::warn!("malformed editor state, resetting all channels");
                CurveSet::new(default)
            }
        };

        if let Some(waveform) = doc.get(WAVEFORM_KEY) {
            match serde_json::from_value::<WaveformParameters>(waveform.clone()) {
                Ok(params) => self.set_waveform(params),
                Err(err) => tracing::warn!(%err, "ignoring malformed waveform parameters"),
            }
        }

        self.clear_interaction();
        self.dirty = true;
    }

    /// [`configure`](Self::configure) from JSON text. Unparseable text resets
    /// every channel to the default curve.
    pub fn configure_json(&mut self, json: &str) {
        match serde_json::from_str::<Value>(json) {
            Ok(doc) => self.configure(&doc),
            Err(err) => {
                tracing::warn!(%err, "unparseable editor state, resetting all channels");
                self.configure(&Value::Null);
            }
        }
    }

    /// Strictly restores persisted state.
    ///
    /// Unlike [`configure_json`](Self::configure_json), nothing is repaired:
    /// any malformed channel or waveform is an error and the session is left
    /// untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use tonecurve::{EditSession, EditorConfig};
    ///
    /// let mut saved = EditSession::new(EditorConfig::advanced());
    /// saved.apply_waveform();
    /// let json = saved.to_json();
    ///
    /// let mut restored = EditSession::new(EditorConfig::advanced());
    /// restored.restore_json(&json).unwrap();
    /// assert_eq!(restored.curves().to_value(), saved.curves().to_value());
    ///
    /// assert!(restored.restore_json(r#"{"curves": []}"#).is_err());
    /// ```
    pub fn restore_json(&mut self, json: &str) -> Result<()> {
        let doc: Value = serde_json::from_str(json)?;
        let curves = curves_section(&doc)
            .ok_or_else(|| CurveError::MalformedState("expected an object of curves".into()))?;
        let curves = CurveSet::from_value(curves, self.config.default_curve)?;
        let waveform = match doc.get(WAVEFORM_KEY) {
            Some(waveform) => serde_json::from_value(waveform.clone())?,
            None => self.waveform,
        };

        self.curves = curves;
        self.set_waveform(waveform);
        self.clear_interaction();
        self.dirty = true;
        Ok(())
    }
}

/// The channel map of a document: `doc.curves` if present, else `doc`
/// itself. `None` when either is not an object.
fn curves_section(doc: &Value) -> Option<&Value> {
    let root = doc.as_object()?;
    match root.get(CURVES_KEY) {
        Some(curves) => curves.is_object().then_some(curves),
        None => Some(doc),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::EditorConfig;
    use crate::{Channel, WaveformKind};
    use serde_json::json;

    #[test]
    fn test_serialize_basic_has_no_waveform() {
        let doc = EditSession::new(EditorConfig::basic()).serialize();
        assert!(doc.get(WAVEFORM_KEY).is_none());
        assert_eq!(doc[CURVES_KEY]["blue"], json!([[0.0, 0.0], [1.0, 1.0]]));
    }

    #[test]
    fn test_serialize_advanced_waveform() {
        let mut session = EditSession::new(EditorConfig::advanced());
        session.set_waveform(WaveformParameters::new(WaveformKind::Sine).with_frequency(2.0));
        let doc = session.serialize();
        assert_eq!(doc[WAVEFORM_KEY]["curve_type"], "Sine");
        assert_eq!(doc[WAVEFORM_KEY]["frequency"], 2.0);
    }

    #[test]
    fn test_serialize_writes_finite_waveform() {
        let mut session = EditSession::new(EditorConfig::advanced());
        session.set_waveform(
            WaveformParameters::new(WaveformKind::Saw)
                .with_frequency(f64::NAN)
                .with_offset(f64::INFINITY),
        );
        let doc = session.serialize();
        assert_eq!(doc[WAVEFORM_KEY]["frequency"], 1.0);
        assert_eq!(doc[WAVEFORM_KEY]["offset"], 0.0);

        let mut restored = EditSession::new(EditorConfig::advanced());
        restored.restore_json(&doc.to_string()).unwrap();
        assert_eq!(restored.waveform(), &WaveformParameters::new(WaveformKind::Saw));
    }

    #[test]
    fn test_configure_round_trip() {
        let mut source = EditSession::new(EditorConfig::advanced());
        source.set_waveform(WaveformParameters::new(WaveformKind::Triangle).with_invert(true));
        source.apply_waveform();

        let mut target = EditSession::new(EditorConfig::advanced());
        target.configure_json(&source.to_json());
        assert_eq!(target.curves().to_value(), source.curves().to_value());
        assert_eq!(target.waveform(), source.waveform());
    }

    #[test]
    fn test_configure_bare_channel_map() {
        let mut session = EditSession::default();
        session.configure(&json!({ "blue": [[0, 0.2], [1, 0.4]] }));
        assert_eq!(session.curve(Channel::Blue).pairs(), vec![[0.0, 0.2], [1.0, 0.4]]);
    }

    #[test]
    fn test_configure_garbage_resets_everything() {
        let mut session = EditSession::default();
        session.apply_waveform();
        session.configure_json("{{{{");
        for (_, curve) in session.curves().iter() {
            assert_eq!(curve.pairs(), vec![[0.0, 0.0], [1.0, 1.0]]);
        }

        session.apply_waveform();
        session.configure(&json!({ "curves": [1, 2, 3] }));
        assert_eq!(session.curve(Channel::Red).len(), 2);
    }

    #[test]
    fn test_configure_keeps_waveform_on_error() {
        let mut session = EditSession::new(EditorConfig::advanced());
        let params = WaveformParameters::new(WaveformKind::Saw);
        session.set_waveform(params);
        session.configure(&json!({ "curves": {}, "waveform": { "curve_type": "Wobble" } }));
        assert_eq!(session.waveform(), &params);
    }

    #[test]
    fn test_configure_clears_selection() {
        let mut session = EditSession::default();
        session.set_bounds(340.0, 0.0);
        session.handle_pointer(crate::PointerEvent::down((170.0, 100.0)));
        assert!(session.selected().is_some());
        session.configure(&json!({}));
        assert!(session.selected().is_none());
        assert!(!session.is_dragging());
    }

    #[test]
    fn test_restore_is_atomic() {
        let mut session = EditSession::new(EditorConfig::advanced());
        session.apply_parameters(&WaveformParameters::square());
        let before = session.curves().to_value();
        let err = session
            .restore_json(r#"{"red": [[0, 0], [1, 1]], "green": [[0, 0], [1, 1]], "blue": [[0.5, 0]]}"#)
            .unwrap_err();
        assert!(matches!(err, CurveError::MalformedState(_)));
        assert_eq!(session.curves().to_value(), before);
    }

    #[test]
    fn test_restore_rejects_bad_waveform() {
        let mut session = EditSession::new(EditorConfig::advanced());
        let doc = json!({
            "curves": session.curves().to_value(),
            "waveform": { "curve_type": "Wobble" },
        });
        assert!(matches!(
            session.restore_json(&doc.to_string()),
            Err(CurveError::Json(_))
        ));
    }
}
