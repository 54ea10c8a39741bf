use std::f32::consts::{PI, TAU};

use glam::Vec3;

use super::{MeshData, Vertex};

/// Unit-radius UV sphere with smooth normals.
///
/// `width_segments` slices run around the Y axis, `height_segments` stacks run
/// pole to pole. The pole rows are triangle fans, so the triangle count is
/// `width_segments * (2 * height_segments - 2)`.
pub fn uv_sphere(width_segments: u32, height_segments: u32) -> MeshData {
    let w = width_segments.max(3);
    let h = height_segments.max(2);

    let mut mesh = MeshData::new();
    mesh.vertices.reserve(((w + 1) * (h + 1)) as usize);

    for iy in 0..=h {
        let v = iy as f32 / h as f32;
        let theta = v * PI;
        for ix in 0..=w {
            let u = ix as f32 / w as f32;
            let phi = u * TAU;
            let p = Vec3::new(-phi.cos() * theta.sin(), theta.cos(), phi.sin() * theta.sin());
            mesh.vertices.push(Vertex::new(p, p.normalize_or_zero()));
        }
    }

    let row = w + 1;
    for iy in 0..h {
        for ix in 0..w {
            let a = iy * row + ix + 1;
            let b = iy * row + ix;
            let c = (iy + 1) * row + ix;
            let d = (iy + 1) * row + ix + 1;
            if iy != 0 {
                mesh.indices.extend([a, b, d]);
            }
            if iy != h - 1 {
                mesh.indices.extend([b, c, d]);
            }
        }
    }

    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn counts_match_segment_layout() {
        let mesh = uv_sphere(48, 24);
        assert_eq!(mesh.vertices.len(), 49 * 25);
        assert_eq!(mesh.triangle_count(), 48 * 46);
    }

    #[test]
    fn vertices_lie_on_unit_sphere() {
        let mesh = uv_sphere(12, 6);
        for v in &mesh.vertices {
            assert_relative_eq!(Vec3::from(v.position).length(), 1.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn triangles_face_outward() {
        let mesh = uv_sphere(16, 8);
        for tri in mesh.indices.chunks_exact(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| Vec3::from(mesh.vertices[i as usize].position));
            let centroid = (a + b + c) / 3.0;
            assert!((b - a).cross(c - a).dot(centroid) > 0.0);
        }
    }
}
