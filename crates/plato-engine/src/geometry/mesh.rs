use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// Interleaved mesh vertex (24 bytes).
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl Vertex {
    #[inline]
    pub fn new(position: Vec3, normal: Vec3) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
        }
    }
}

/// Indexed triangle list with per-vertex normals.
///
/// Triangles are counter-clockwise when seen from the side their normal points to.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Appends a flat-shaded triangle with its own three vertices.
    pub fn push_flat_triangle(&mut self, a: Vec3, b: Vec3, c: Vec3) {
        let normal = (b - a).cross(c - a).normalize_or_zero();
        let base = self.vertices.len() as u32;
        self.vertices.extend([
            Vertex::new(a, normal),
            Vertex::new(b, normal),
            Vertex::new(c, normal),
        ]);
        self.indices.extend([base, base + 1, base + 2]);
    }

    /// Builds a flat-shaded mesh from a shared position list and index triples.
    ///
    /// Triangles referencing a missing vertex are dropped; the number dropped is
    /// returned alongside the mesh.
    pub fn from_triangles(positions: &[Vec3], triangles: &[[u32; 3]]) -> (Self, usize) {
        let mut mesh = Self::new();
        let mut dropped = 0;
        for tri in triangles {
            let [Some(a), Some(b), Some(c)] = tri.map(|i| positions.get(i as usize).copied()) else {
                dropped += 1;
                continue;
            };
            mesh.push_flat_triangle(a, b, c);
        }
        (mesh, dropped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_triangle_normal_follows_winding() {
        let mut mesh = MeshData::new();
        mesh.push_flat_triangle(Vec3::ZERO, Vec3::X, Vec3::Y);
        assert_eq!(mesh.vertices[0].normal, [0.0, 0.0, 1.0]);
        assert_eq!(mesh.indices, vec![0, 1, 2]);
    }

    #[test]
    fn out_of_range_triangles_are_dropped() {
        let positions = [Vec3::ZERO, Vec3::X, Vec3::Y];
        let (mesh, dropped) = MeshData::from_triangles(&positions, &[[0, 1, 2], [0, 1, 7]]);
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(dropped, 1);
    }
}
