use glam::Vec3;

use super::MeshData;

/// Hull face: three point indices, counter-clockwise seen from outside.
#[derive(Debug, Copy, Clone)]
struct Face {
    v: [usize; 3],
    normal: Vec3,
    offset: f32,
}

impl Face {
    fn new(points: &[Vec3], v: [usize; 3]) -> Self {
        let [a, b, c] = v.map(|i| points[i]);
        let normal = (b - a).cross(c - a).normalize_or_zero();
        Self { v, normal, offset: normal.dot(a) }
    }

    #[inline]
    fn distance(&self, p: Vec3) -> f32 {
        self.normal.dot(p) - self.offset
    }

    #[inline]
    fn edges(&self) -> [(usize, usize); 3] {
        let [a, b, c] = self.v;
        [(a, b), (b, c), (c, a)]
    }
}

/// Incremental 3D convex hull.
///
/// Returns outward-facing triangles as index triples into `points`, or `None`
/// when the input has fewer than four points or is flat (all points coplanar,
/// collinear or coincident).
pub fn convex_hull(points: &[Vec3]) -> Option<Vec<[usize; 3]>> {
    if points.len() < 4 {
        return None;
    }
    let eps = tolerance(points);

    let [i0, i1, i2, i3] = initial_simplex(points, eps)?;

    let base = Face::new(points, [i0, i1, i2]);
    let base = if base.distance(points[i3]) > 0.0 { [i0, i2, i1] } else { [i0, i1, i2] };
    let mut faces = vec![Face::new(points, base)];
    for (a, b) in Face::new(points, base).edges() {
        faces.push(Face::new(points, [b, a, i3]));
    }

    for (p, &point) in points.iter().enumerate() {
        if p == i0 || p == i1 || p == i2 || p == i3 {
            continue;
        }

        let visible: Vec<bool> = faces.iter().map(|f| f.distance(point) > eps).collect();
        if !visible.contains(&true) {
            continue;
        }

        let visible_edges: Vec<(usize, usize)> = faces
            .iter()
            .zip(&visible)
            .filter(|(_, v)| **v)
            .flat_map(|(f, _)| f.edges())
            .collect();

        let horizon: Vec<(usize, usize)> = visible_edges
            .iter()
            .copied()
            .filter(|&(a, b)| !visible_edges.contains(&(b, a)))
            .collect();

        let mut keep = visible.iter().map(|v| !v);
        faces.retain(|_| keep.next().unwrap_or(true));
        faces.extend(horizon.into_iter().map(|(a, b)| Face::new(points, [a, b, p])));
    }

    Some(faces.into_iter().map(|f| f.v).collect())
}

/// Flat-shaded mesh of the convex hull of `points`; see [`convex_hull`].
pub fn convex_hull_mesh(points: &[Vec3]) -> Option<MeshData> {
    let faces = convex_hull(points)?;
    let mut mesh = MeshData::new();
    for [a, b, c] in faces {
        mesh.push_flat_triangle(points[a], points[b], points[c]);
    }
    Some(mesh)
}

/// Distance threshold scaled to the point cloud extent.
fn tolerance(points: &[Vec3]) -> f32 {
    let extent = points
        .iter()
        .fold(0.0f32, |m, p| m.max(p.abs().max_element()));
    extent.max(1.0) * 1e-5
}

/// Four affinely independent points spanning the widest initial tetrahedron.
fn initial_simplex(points: &[Vec3], eps: f32) -> Option<[usize; 4]> {
    let farthest = |score: &dyn Fn(Vec3) -> f32| -> Option<(usize, f32)> {
        points
            .iter()
            .enumerate()
            .map(|(i, &p)| (i, score(p)))
            .max_by(|a, b| a.1.total_cmp(&b.1))
    };

    let (i0, _) = farthest(&|p| -p.x)?;
    let p0 = points[i0];

    let (i1, d1) = farthest(&|p| p.distance(p0))?;
    if d1 <= eps {
        return None;
    }
    let dir = (points[i1] - p0).normalize();

    let (i2, d2) = farthest(&|p| (p - p0).cross(dir).length())?;
    if d2 <= eps {
        return None;
    }
    let normal = (points[i1] - p0).cross(points[i2] - p0).normalize();

    let (i3, d3) = farthest(&|p| normal.dot(p - p0).abs())?;
    if d3 <= eps {
        return None;
    }

    Some([i0, i1, i2, i3])
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn cube() -> Vec<Vec3> {
        let mut pts = Vec::new();
        for x in [-1.0, 1.0] {
            for y in [-1.0, 1.0] {
                for z in [-1.0, 1.0] {
                    pts.push(Vec3::new(x, y, z));
                }
            }
        }
        pts
    }

    fn assert_encloses(points: &[Vec3], faces: &[[usize; 3]]) {
        for &v in faces {
            let face = Face::new(points, v);
            for &p in points {
                assert!(face.distance(p) <= 1e-4, "{p} outside face {v:?}");
            }
        }
    }

    #[test]
    fn tetrahedron_has_four_faces() {
        let pts = [Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::Z];
        let faces = convex_hull(&pts).unwrap();
        assert_eq!(faces.len(), 4);
        assert_encloses(&pts, &faces);
    }

    #[test]
    fn cube_has_twelve_outward_triangles() {
        let pts = cube();
        let faces = convex_hull(&pts).unwrap();
        assert_eq!(faces.len(), 12);
        assert_encloses(&pts, &faces);
        for v in faces {
            let n = Face::new(&pts, v).normal;
            assert_relative_eq!(n.abs().max_element(), 1.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn interior_points_are_ignored() {
        let mut pts = cube();
        pts.push(Vec3::ZERO);
        pts.push(Vec3::splat(0.5));
        let faces = convex_hull(&pts).unwrap();
        assert_eq!(faces.len(), 12);
        assert!(faces.iter().flatten().all(|&i| i < 8));
    }

    #[test]
    fn flat_input_has_no_hull() {
        let square = [Vec3::ZERO, Vec3::X, Vec3::new(1.0, 1.0, 0.0), Vec3::Y];
        assert!(convex_hull(&square).is_none());
        assert!(convex_hull(&[Vec3::ZERO, Vec3::X, Vec3::Y]).is_none());
    }

    #[test]
    fn hull_mesh_is_flat_shaded() {
        let mesh = convex_hull_mesh(&cube()).unwrap();
        assert_eq!(mesh.triangle_count(), 12);
        assert_eq!(mesh.vertices.len(), 36);
    }
}
