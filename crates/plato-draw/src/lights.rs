use glam::{Quat, Vec3};
use plato_engine::render::{DirectionalLight, MAX_DIRECTIONAL_LIGHTS};
use plato_json::SceneDocument;
use serde_json::Value;

use crate::camera::Projection;

const DEFAULT_LIGHT_VECTOR: [f32; 3] = [0.0, 1.0, 0.0];

/// Ambient intensity when the document does not set `ambient_light`.
pub fn default_ambient(projection: Projection) -> f32 {
    match projection {
        Projection::Orthographic => 1.0,
        Projection::Perspective => 0.25,
    }
}

/// Lights derived from the document's `ambient_light` and `directional_light`
/// features.
///
/// Directional lights live in camera space: they follow the view as it is
/// rotated, so the lit side of the scene always faces the viewer the same way.
#[derive(Debug, Clone, PartialEq)]
pub struct LightRig {
    pub ambient: f32,
    /// Camera-space unit vectors pointing toward each light, with intensity.
    pub directional: Vec<(Vec3, f32)>,
}

impl LightRig {
    pub fn from_document(doc: &SceneDocument, projection: Projection) -> Self {
        let ambient = match doc.feature("ambient_light") {
            Some(f) => f.as_f32().unwrap_or_else(|| {
                log::warn!("ambient_light value is not a number; using default");
                default_ambient(projection)
            }),
            None => default_ambient(projection),
        };

        let vectors = match doc.feature_value("directional_light") {
            Some(v) => light_vectors(v).unwrap_or_else(|| {
                log::warn!("directional_light value is not a vector or list of vectors; using default");
                vec![DEFAULT_LIGHT_VECTOR]
            }),
            None => vec![DEFAULT_LIGHT_VECTOR],
        };

        if vectors.len() > MAX_DIRECTIONAL_LIGHTS {
            log::warn!(
                "{} directional lights requested; only the first {MAX_DIRECTIONAL_LIGHTS} are used",
                vectors.len()
            );
        }

        let directional = vectors
            .into_iter()
            .take(MAX_DIRECTIONAL_LIGHTS)
            .filter_map(|v| directional_from_vector(Vec3::from(v)))
            .collect();

        Self { ambient: ambient.max(0.0), directional }
    }

    /// World-space lights for a camera with the given orientation.
    pub fn world_lights(&self, camera_orientation: Quat) -> Vec<DirectionalLight> {
        self.directional
            .iter()
            .map(|&(toward, intensity)| DirectionalLight {
                direction: camera_orientation * toward,
                intensity,
            })
            .collect()
    }
}

/// The configured vector points the way the light travels; its length is the
/// intensity. Zero vectors produce no light.
fn directional_from_vector(v: Vec3) -> Option<(Vec3, f32)> {
    let intensity = v.length();
    if !intensity.is_finite() || intensity <= f32::EPSILON {
        return None;
    }
    Some((-v / intensity, intensity))
}

/// `[x, y, z]` or `[[x, y, z], ...]`.
fn light_vectors(value: &Value) -> Option<Vec<[f32; 3]>> {
    let items = value.as_array()?;
    if let Some(single) = vector3(items) {
        return Some(vec![single]);
    }
    items
        .iter()
        .map(|item| item.as_array().and_then(|a| vector3(a)))
        .collect()
}

fn vector3(items: &[Value]) -> Option<[f32; 3]> {
    match items {
        [x, y, z] => Some([x.as_f64()? as f32, y.as_f64()? as f32, z.as_f64()? as f32]),
        _ => None,
    }
}
