use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

/// Upper bound on directional lights forwarded to the shaders.
pub const MAX_DIRECTIONAL_LIGHTS: usize = 4;

/// White directional light.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DirectionalLight {
    /// World-space unit vector pointing from the surface toward the light.
    pub direction: Vec3,
    pub intensity: f32,
}

/// Per-frame values shared by every renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameUniforms {
    pub view_proj: Mat4,
    /// White ambient light intensity.
    pub ambient: f32,
    /// Only the first [`MAX_DIRECTIONAL_LIGHTS`] entries are used.
    pub lights: Vec<DirectionalLight>,
}

impl Default for FrameUniforms {
    fn default() -> Self {
        Self {
            view_proj: Mat4::IDENTITY,
            ambient: 1.0,
            lights: Vec::new(),
        }
    }
}

impl FrameUniforms {
    pub(super) fn to_raw(&self) -> GlobalsUniform {
        let mut lights = [[0.0f32; 4]; MAX_DIRECTIONAL_LIGHTS];
        let count = self.lights.len().min(MAX_DIRECTIONAL_LIGHTS);
        for (slot, light) in lights.iter_mut().zip(&self.lights) {
            *slot = light.direction.normalize_or_zero().extend(light.intensity).to_array();
        }
        GlobalsUniform {
            view_proj: self.view_proj.to_cols_array_2d(),
            ambient: [self.ambient, count as f32, 0.0, 0.0],
            lights,
        }
    }
}

/// GPU layout of [`FrameUniforms`] (144 bytes):
///
///  offset   0  view_proj  mat4x4<f32>
///  offset  64  ambient    vec4<f32>   (.x = intensity, .y = light count)
///  offset  80  lights     array<vec4<f32>, 4>  (.xyz = direction, .w = intensity)
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct GlobalsUniform {
    pub view_proj: [[f32; 4]; 4],
    pub ambient: [f32; 4],
    pub lights: [[f32; 4]; MAX_DIRECTIONAL_LIGHTS],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_layout_is_144_bytes() {
        assert_eq!(std::mem::size_of::<GlobalsUniform>(), 144);
    }

    #[test]
    fn extra_lights_are_dropped() {
        let light = DirectionalLight { direction: Vec3::new(0.0, 2.0, 0.0), intensity: 0.5 };
        let uniforms = FrameUniforms {
            lights: vec![light; 6],
            ..Default::default()
        };
        let raw = uniforms.to_raw();
        assert_eq!(raw.ambient[1], 4.0);
        assert_eq!(raw.lights[3], [0.0, 1.0, 0.0, 0.5]);
    }
}
