//! Persisted form of a curve set: channel name -> list of `[x, y]` pairs.

use super::channel::Channel;
use super::curve::{Curve, DefaultCurve};
use super::set::CurveSet;
use crate::{CurveError, Result};
use serde::ser::{Serialize, Serializer};
use serde_json::{Map, Value};

impl Serialize for CurveSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

impl CurveSet {
    /// The persisted form `{"red": [[x, y], ...], "green": ..., "blue": ...}`.
    pub fn to_value(&self) -> Value {
        let map: Map<String, Value> = self
            .iter()
            .map(|(channel, curve)| {
                let pairs = curve
                    .points()
                    .iter()
                    .map(|p| Value::from(vec![p.x, p.y]))
                    .collect();
                (channel.name().to_string(), Value::Array(pairs))
            })
            .collect();
        Value::Object(map)
    }

    /// [`to_value`](Self::to_value) as a JSON string.
    pub fn to_json(&self) -> String {
        self.to_value().to_string()
    }

    /// Strictly parses a persisted curve set.
    ///
    /// Every channel must be present and already satisfy the curve
    /// invariants: at least two finite `[x, y]` pairs inside [0, 1], strictly
    /// ascending x, first x = 0 and last x = 1. Anything else is an error;
    /// use [`from_value_lenient`](Self::from_value_lenient) to repair instead.
    ///
    /// # Examples
    ///
    /// ```
    /// use tonecurve::{Channel, CurveSet, DefaultCurve};
    ///
    /// let mut set = CurveSet::default();
    /// set.insert_point(Channel::Blue, 0.5, 0.9);
    /// let restored = CurveSet::from_json(&set.to_json(), DefaultCurve::Identity).unwrap();
    /// assert_eq!(restored.curve(Channel::Blue).pairs(), set.curve(Channel::Blue).pairs());
    ///
    /// assert!(CurveSet::from_json(r#"{"red": [[0, 0]]}"#, DefaultCurve::Identity).is_err());
    /// ```
    pub fn from_value(value: &Value, default: DefaultCurve) -> Result<Self> {
        let map = value
            .as_object()
            .ok_or_else(|| CurveError::MalformedState("expected an object of channels".into()))?;

        let mut set = CurveSet::new(default);
        for channel in Channel::ALL {
            let entry = map.get(channel.name()).ok_or_else(|| {
                CurveError::MalformedState(format!("missing channel: {channel}"))
            })?;
            set.replace(channel, strict_curve(channel, entry)?);
        }
        Ok(set)
    }

    /// Strictly parses a persisted curve set from JSON text.
    pub fn from_json(json: &str, default: DefaultCurve) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(&value, default)
    }

    /// Parses a persisted curve set, repairing whatever it can.
    ///
    /// - a non-object value yields the default set
    /// - a channel that is missing or not an array gets the default curve
    /// - points that are not 2-element arrays of finite numbers are dropped
    /// - survivors are clamped, sorted and given x = 0 / x = 1 endpoints as
    ///   in [`Curve::from_points`]
    ///
    /// Every repair is logged at `warn` level.
    ///
    /// # Examples
    ///
    /// ```
    /// use tonecurve::{Channel, CurveSet, DefaultCurve};
    /// use serde_json::json;
    ///
    /// let set = CurveSet::from_value_lenient(
    ///     &json!({ "red": [[0, 0], ["bad"], [0.5, 2.0]], "green": [[0, 1], [1, 0]] }),
    ///     DefaultCurve::Identity,
    /// );
    /// assert_eq!(set.curve(Channel::Red).pairs(), vec![[0.0, 0.0], [0.5, 1.0], [1.0, 1.0]]);
    /// assert_eq!(set.curve(Channel::Green).pairs(), vec![[0.0, 1.0], [1.0, 0.0]]);
    /// assert_eq!(set.curve(Channel::Blue).pairs(), vec![[0.0, 0.0], [1.0, 1.0]]);
    /// ```
    pub fn from_value_lenient(value: &Value, default: DefaultCurve) -> Self {
        let Some(map) = value.as_object() else {
            tracing::warn!("curve state is not an object, using defaults");
            return CurveSet::new(default);
        };

        let mut set = CurveSet::new(default);
        for channel in Channel::ALL {
            match map.get(channel.name()).and_then(Value::as_array) {
                Some(entries) => set.replace(channel, lenient_curve(channel, entries)),
                None => {
                    tracing::warn!(%channel, "channel missing from curve state, using default");
                }
            }
        }
        set
    }
}

fn parse_pair(value: &Value) -> Option<(f64, f64)> {
    match value.as_array()?.as_slice() {
        [x, y] => {
            let (x, y) = (x.as_f64()?, y.as_f64()?);
            (x.is_finite() && y.is_finite()).then_some((x, y))
        }
        _ => None,
    }
}

fn strict_curve(channel: Channel, value: &Value) -> Result<Curve> {
    let malformed = |what: &str| CurveError::MalformedState(format!("{channel}: {what}"));

    let entries = value.as_array().ok_or_else(|| malformed("expected an array"))?;
    let pairs = entries
        .iter()
        .map(|entry| parse_pair(entry).ok_or_else(|| malformed("invalid point")))
        .collect::<Result<Vec<_>>>()?;

    if pairs.len() < 2 {
        return Err(malformed("fewer than two points"));
    }
    if pairs
        .iter()
        .any(|(x, y)| !(0.0..=1.0).contains(x) || !(0.0..=1.0).contains(y))
    {
        return Err(malformed("point outside the unit square"));
    }
    if pairs[0].0 != 0.0 || pairs[pairs.len() - 1].0 != 1.0 {
        return Err(malformed("missing endpoint"));
    }
    if pairs.windows(2).any(|w| w[0].0 >= w[1].0) {
        return Err(malformed("points not strictly ascending in x"));
    }

    Ok(Curve::from_points(pairs))
}

fn lenient_curve(channel: Channel, entries: &[Value]) -> Curve {
    let pairs: Vec<(f64, f64)> = entries.iter().filter_map(parse_pair).collect();
    if pairs.len() != entries.len() {
        tracing::warn!(
            %channel,
            dropped = entries.len() - pairs.len(),
            "dropped invalid points"
        );
    }

    let has_start = pairs.iter().any(|(x, _)| *x <= 0.0);
    let has_end = pairs.iter().any(|(x, _)| *x >= 1.0);
    if !has_start || !has_end {
        tracing::warn!(%channel, has_start, has_end, "repairing missing endpoints");
    }

    Curve::from_points(pairs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_to_value_shape() {
        let value = CurveSet::new(DefaultCurve::Half).to_value();
        assert_eq!(value["red"], json!([[0.0, 0.5], [1.0, 0.5]]));
        assert_eq!(value.as_object().unwrap().len(), 3);
    }

    #[test]
    fn test_serialize_matches_to_value() {
        let mut set = CurveSet::default();
        set.insert_point(Channel::Green, 0.4, 0.1);
        assert_eq!(serde_json::to_value(&set).unwrap(), set.to_value());
        assert_eq!(serde_json::to_string(&set).unwrap(), set.to_json());
    }

    #[test]
    fn test_strict_rejects_missing_channel() {
        let err = CurveSet::from_value(
            &json!({ "red": [[0, 0], [1, 1]], "green": [[0, 0], [1, 1]] }),
            DefaultCurve::Identity,
        )
        .unwrap_err();
        assert!(err.to_string().contains("blue"));
    }

    #[test]
    fn test_strict_rejects_unsorted() {
        let value = json!({
            "red": [[0, 0], [0.6, 0.5], [0.4, 0.5], [1, 1]],
            "green": [[0, 0], [1, 1]],
            "blue": [[0, 0], [1, 1]],
        });
        assert!(CurveSet::from_value(&value, DefaultCurve::Identity).is_err());
    }

    #[test]
    fn test_strict_reports_json_errors() {
        let err = CurveSet::from_json("{not json", DefaultCurve::Identity).unwrap_err();
        assert!(matches!(err, CurveError::Json(_)));
    }

    #[test]
    fn test_lenient_non_object_falls_back() {
        let set = CurveSet::from_value_lenient(&json!("nope"), DefaultCurve::Half);
        assert_eq!(set.default_curve(), DefaultCurve::Half);
        for (_, curve) in set.iter() {
            assert_eq!(curve.pairs(), vec![[0.0, 0.5], [1.0, 0.5]]);
        }
    }

    #[test]
    fn test_lenient_drops_wrong_arity_and_nan() {
        let set = CurveSet::from_value_lenient(
            &json!({ "red": [[0, 0.2], [0.3], [0.5, 0.5, 0.5], [null, 1], [1, 0.8]] }),
            DefaultCurve::Identity,
        );
        assert_eq!(set.curve(Channel::Red).pairs(), vec![[0.0, 0.2], [1.0, 0.8]]);
    }

    #[test]
    fn test_lenient_repairs_endpoints_from_neighbours() {
        let set = CurveSet::from_value_lenient(
            &json!({ "blue": [[0.25, 0.1], [0.75, 0.9]] }),
            DefaultCurve::Identity,
        );
        assert_eq!(
            set.curve(Channel::Blue).pairs(),
            vec![[0.0, 0.1], [0.25, 0.1], [0.75, 0.9], [1.0, 0.9]]
        );
    }

    #[test]
    fn test_parse_pair() {
        assert_eq!(parse_pair(&json!([0.5, 1])), Some((0.5, 1.0)));
        assert_eq!(parse_pair(&json!([0.5])), None);
        assert_eq!(parse_pair(&json!({"x": 0.5, "y": 1})), None);
    }
}
