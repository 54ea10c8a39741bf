use glam::{Vec2, Vec3};

use super::{MeshData, Vertex};

const AREA_EPSILON: f32 = 1e-9;

/// Ear-clipping triangulation of a simple polygon.
///
/// Accepts either winding; the returned triangles index into `points` and are
/// always counter-clockwise. Self-intersecting input still terminates, with
/// degenerate ears clipped in order.
pub fn triangulate(points: &[Vec2]) -> Vec<[u32; 3]> {
    let n = points.len();
    if n < 3 {
        return Vec::new();
    }

    let mut ring: Vec<usize> = (0..n).collect();
    if signed_area(points) < 0.0 {
        ring.reverse();
    }

    let mut triangles = Vec::with_capacity(n - 2);
    let mut i = 0;
    let mut misses = 0;

    while ring.len() > 3 {
        let len = ring.len();
        i %= len;
        let (p, c, nx) = (ring[(i + len - 1) % len], ring[i], ring[(i + 1) % len]);

        if is_ear(points, &ring, p, c, nx) {
            triangles.push([p as u32, c as u32, nx as u32]);
            ring.remove(i);
            misses = 0;
            continue;
        }

        misses += 1;
        if misses > len {
            // No ear anywhere: the outline is degenerate or self-intersecting.
            if triangle_area(points[p], points[c], points[nx]) > AREA_EPSILON {
                triangles.push([p as u32, c as u32, nx as u32]);
            }
            ring.remove(i);
            misses = 0;
            continue;
        }
        i += 1;
    }

    let (a, b, c) = (ring[0], ring[1], ring[2]);
    if triangle_area(points[a], points[b], points[c]) > AREA_EPSILON {
        triangles.push([a as u32, b as u32, c as u32]);
    }
    triangles
}

/// Triangulated polygon in the XY plane at z = 0, facing +Z.
pub fn flat_polygon(points: &[Vec2]) -> MeshData {
    let mut mesh = MeshData::new();
    mesh.vertices = points
        .iter()
        .map(|p| Vertex::new(p.extend(0.0), Vec3::Z))
        .collect();
    mesh.indices = triangulate(points).into_iter().flatten().collect();
    mesh
}

/// Twice the signed area; positive for counter-clockwise loops.
fn signed_area(points: &[Vec2]) -> f32 {
    let n = points.len();
    (0..n)
        .map(|i| points[i].perp_dot(points[(i + 1) % n]))
        .sum()
}

/// Signed area of a triangle; positive when counter-clockwise.
fn triangle_area(a: Vec2, b: Vec2, c: Vec2) -> f32 {
    (b - a).perp_dot(c - a) * 0.5
}

fn is_ear(points: &[Vec2], ring: &[usize], p: usize, c: usize, nx: usize) -> bool {
    let (a, b, d) = (points[p], points[c], points[nx]);
    if triangle_area(a, b, d) <= AREA_EPSILON {
        return false;
    }
    ring.iter()
        .filter(|&&q| q != p && q != c && q != nx)
        .map(|&q| points[q])
        .filter(|&q| q != a && q != b && q != d)
        .all(|q| !contains(a, b, d, q))
}

/// Inclusive point-in-triangle test for a counter-clockwise triangle.
fn contains(a: Vec2, b: Vec2, c: Vec2, q: Vec2) -> bool {
    (b - a).perp_dot(q - a) >= 0.0 && (c - b).perp_dot(q - b) >= 0.0 && (a - c).perp_dot(q - c) >= 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn area_of(points: &[Vec2], tris: &[[u32; 3]]) -> f32 {
        tris.iter()
            .map(|t| triangle_area(points[t[0] as usize], points[t[1] as usize], points[t[2] as usize]))
            .sum()
    }

    #[test]
    fn square_yields_two_triangles() {
        let square = [Vec2::ZERO, Vec2::X, Vec2::ONE, Vec2::Y];
        let tris = triangulate(&square);
        assert_eq!(tris.len(), 2);
        assert_relative_eq!(area_of(&square, &tris), 1.0);
    }

    #[test]
    fn clockwise_input_produces_ccw_triangles() {
        let square = [Vec2::ZERO, Vec2::Y, Vec2::ONE, Vec2::X];
        let tris = triangulate(&square);
        assert_eq!(tris.len(), 2);
        for t in &tris {
            let [a, b, c] = t.map(|i| square[i as usize]);
            assert!(triangle_area(a, b, c) > 0.0);
        }
    }

    #[test]
    fn concave_arrow_covers_its_area() {
        let arrow = [
            Vec2::new(0.0, -0.1),
            Vec2::new(0.6, -0.1),
            Vec2::new(0.6, -0.3),
            Vec2::new(1.0, 0.0),
            Vec2::new(0.6, 0.3),
            Vec2::new(0.6, 0.1),
            Vec2::new(0.0, 0.1),
        ];
        let tris = triangulate(&arrow);
        assert_eq!(tris.len(), arrow.len() - 2);
        assert_relative_eq!(area_of(&arrow, &tris), signed_area(&arrow) * 0.5, epsilon = 1e-5);
    }

    #[test]
    fn too_few_points_yield_nothing() {
        assert!(triangulate(&[Vec2::ZERO, Vec2::X]).is_empty());
    }

    #[test]
    fn flat_polygon_faces_positive_z() {
        let mesh = flat_polygon(&[Vec2::ZERO, Vec2::X, Vec2::Y]);
        assert_eq!(mesh.triangle_count(), 1);
        assert!(mesh.vertices.iter().all(|v| v.normal == [0.0, 0.0, 1.0]));
    }
}
