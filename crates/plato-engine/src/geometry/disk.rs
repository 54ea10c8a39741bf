use std::f32::consts::TAU;

use glam::Vec3;

use super::{MeshData, Vertex};

/// Unit disk centered at the origin in the XY plane, facing +Z.
///
/// Vertex 0 is the center, followed by `segments + 1` rim vertices (the seam
/// vertex is duplicated).
pub fn disk(segments: u32) -> MeshData {
    let segments = segments.max(3);
    let mut mesh = MeshData::new();

    mesh.vertices.push(Vertex::new(Vec3::ZERO, Vec3::Z));
    for s in 0..=segments {
        let angle = s as f32 / segments as f32 * TAU;
        mesh.vertices
            .push(Vertex::new(Vec3::new(angle.cos(), angle.sin(), 0.0), Vec3::Z));
    }
    for i in 1..=segments {
        mesh.indices.extend([i, i + 1, 0]);
    }

    mesh
}
