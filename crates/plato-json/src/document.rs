use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::attributes::PrimitiveKind;

/// A complete scene: framing metadata, feature flags and the primitive list.
///
/// Only `primitives` carries geometry; everything else configures the camera,
/// the lights and the navigation mode. Missing fields take the defaults of the
/// Python `Scene` constructor.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SceneDocument {
    /// Width and height of the visible region in scene units.
    #[serde(default = "default_size")]
    pub size: [f32; 2],

    /// Scene translation; `None` when absent or `null`.
    #[serde(default)]
    pub translation: Option<[f32; 3]>,

    /// Scene rotation as a scalar-first quaternion `(w, x, y, z)`.
    #[serde(default)]
    pub rotation: Option<[f32; 4]>,

    #[serde(default = "default_zoom")]
    pub zoom: f32,

    /// Pixels per scene unit, used to size the initial window.
    #[serde(default)]
    pub pixel_scale: Option<f32>,

    #[serde(default)]
    pub features: BTreeMap<String, Feature>,

    #[serde(default)]
    pub primitives: Vec<PrimitiveEntry>,
}

fn default_size() -> [f32; 2] {
    [40.0, 30.0]
}

fn default_zoom() -> f32 {
    1.0
}

impl Default for SceneDocument {
    fn default() -> Self {
        Self {
            size: default_size(),
            translation: None,
            rotation: None,
            zoom: default_zoom(),
            pixel_scale: None,
            features: BTreeMap::new(),
            primitives: Vec::new(),
        }
    }
}

impl SceneDocument {
    pub fn feature(&self, name: &str) -> Option<&Feature> {
        self.features.get(name)
    }

    /// The `value` of an enabled feature.
    pub fn feature_value(&self, name: &str) -> Option<&Value> {
        self.feature(name).and_then(Feature::value)
    }

    /// Initial window size in pixels, when the document sets `pixel_scale`.
    pub fn size_pixels(&self) -> Option<[f32; 2]> {
        let scale = self.pixel_scale.filter(|s| s.is_finite() && *s > 0.0)?;
        Some([self.size[0] * scale, self.size[1] * scale])
    }
}

/// One named feature flag.
///
/// Documents write features either as `{"value": ..., <params>}` or as a bare
/// value, which is shorthand for `{"value": <bare>}`. An object without a
/// `value` key enables the feature with parameters only.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub struct Feature {
    value: Option<Value>,
    params: Map<String, Value>,
}

impl From<Value> for Feature {
    fn from(raw: Value) -> Self {
        match raw {
            Value::Object(mut params) => {
                let value = params.remove("value");
                Self { value, params }
            }
            bare => Self {
                value: Some(bare),
                params: Map::new(),
            },
        }
    }
}

impl Feature {
    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    /// Extra parameters besides `value`.
    pub fn param(&self, name: &str) -> Option<&Value> {
        self.params.get(name)
    }

    pub fn as_f32(&self) -> Option<f32> {
        self.value.as_ref()?.as_f64().map(|v| v as f32)
    }

    /// JavaScript-style truthiness of `value`; a feature without one is falsy.
    pub fn is_truthy(&self) -> bool {
        match &self.value {
            None | Some(Value::Null) => false,
            Some(Value::Bool(b)) => *b,
            Some(Value::Number(n)) => n.as_f64().is_some_and(|v| v != 0.0 && !v.is_nan()),
            Some(Value::String(s)) => !s.is_empty(),
            Some(Value::Array(_)) | Some(Value::Object(_)) => true,
        }
    }
}

/// `{ "class": ..., "attributes": {...} }`.
///
/// Attributes stay as raw JSON so an unknown class can be reported and skipped
/// without rejecting the whole document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PrimitiveEntry {
    pub class: String,
    #[serde(default)]
    pub attributes: Value,
}

impl PrimitiveEntry {
    pub fn kind(&self) -> Option<PrimitiveKind> {
        self.class.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn feature(v: Value) -> Feature { serde_json::from_value(v).unwrap() }

    #[test] fn object_feature_keeps_value_and_params() {
        let f = feature(json!({"value": 0.5, "lights": 2}));
        assert_eq!(f.as_f32(), Some(0.5));
        assert_eq!(f.param("lights"), Some(&json!(2)));
    }
    #[test] fn bare_feature_is_value() {
        assert_eq!(feature(json!(true)).value(), Some(&json!(true)));
        assert_eq!(feature(json!([0, 1, 0])).value(), Some(&json!([0, 1, 0])));
    }
    #[test] fn object_without_value_is_falsy() {
        assert!(!feature(json!({"lights": 2})).is_truthy());
    }
    #[test] fn truthiness() {
        assert!(feature(json!({"value": 1})).is_truthy());
        assert!(feature(json!({"value": "yes"})).is_truthy());
        assert!(!feature(json!({"value": 0})).is_truthy());
        assert!(!feature(json!({"value": false})).is_truthy());
        assert!(!feature(json!({"value": null})).is_truthy());
        assert!(!feature(json!({"value": ""})).is_truthy());
    }
    #[test] fn defaults_fill_missing_fields() {
        let doc: SceneDocument = serde_json::from_str("{}").unwrap();
        assert_eq!(doc, SceneDocument::default());
    }
    #[test] fn null_optionals_are_none() {
        let doc: SceneDocument =
            serde_json::from_str(r#"{"translation": null, "pixel_scale": null}"#).unwrap();
        assert!(doc.translation.is_none());
        assert!(doc.size_pixels().is_none());
    }
    #[test] fn size_pixels_scales_size() {
        let doc = SceneDocument { size: [10.0, 5.0], pixel_scale: Some(20.0), ..Default::default() };
        assert_eq!(doc.size_pixels(), Some([200.0, 100.0]));
    }
    #[test] fn nonpositive_pixel_scale_is_ignored() {
        let doc = SceneDocument { pixel_scale: Some(0.0), ..Default::default() };
        assert!(doc.size_pixels().is_none());
    }
    #[test] fn entry_kind_lookup() {
        let e = PrimitiveEntry { class: "Spheres".into(), attributes: Value::Null };
        assert_eq!(e.kind(), Some(PrimitiveKind::Spheres));
        let e = PrimitiveEntry { class: "Tetrahedra".into(), attributes: Value::Null };
        assert_eq!(e.kind(), None);
    }
}
