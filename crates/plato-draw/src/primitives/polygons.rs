//! Flat 2D shapes: `Arrows2D`, `Polygons` and `Spheropolygons`.
//!
//! All three share one outline geometry per primitive, triangulated in the
//! z = 0 plane and drawn double-sided; instances are translated in x/y and
//! rotated.

use glam::{Mat4, Quat, Vec2, Vec3};
use plato_engine::geometry::{ARC_DIVISIONS, MeshData, Path2D, flat_polygon};
use plato_engine::paint::Material;
use plato_engine::scene::{DrawList, GeometryId};
use plato_json::attributes::decode;
use plato_json::{
    ArrowsAttributes, AttributeError, Point, PolygonsAttributes, PrimitiveKind, Rgba,
    SpheropolygonsAttributes,
};
use serde_json::Value;

use super::PrimitiveRenderer;
use super::attrs::{self, DEFAULT_MAGNITUDE};

pub fn render_arrows(
    _r: &mut PrimitiveRenderer,
    attributes: &Value,
    list: &mut DrawList,
) -> Result<usize, AttributeError> {
    let a: ArrowsAttributes = decode(PrimitiveKind::Arrows2D, attributes)?;
    let placement = Placement::new(&a.positions, &a.orientations, &a.colors);
    attrs::check_lengths(
        PrimitiveKind::Arrows2D,
        placement.count(),
        &[
            ("orientations", a.orientations.len()),
            ("colors", a.colors.len()),
            ("magnitudes", a.magnitudes.len()),
        ],
    );
    if placement.count() == 0 {
        return Ok(0);
    }

    let geometry = outline_geometry(PrimitiveKind::Arrows2D, &Path2D::polygon(&plane(&a.vertices)), list);
    Ok(placement.push(list, geometry, |i| {
        let m = attrs::instance(&a.magnitudes, i, DEFAULT_MAGNITUDE);
        Vec3::new(m, m, 1.0)
    }))
}

pub fn render_polygons(
    _r: &mut PrimitiveRenderer,
    attributes: &Value,
    list: &mut DrawList,
) -> Result<usize, AttributeError> {
    let a: PolygonsAttributes = decode(PrimitiveKind::Polygons, attributes)?;
    let placement = Placement::new(&a.positions, &a.orientations, &a.colors);
    placement.check(PrimitiveKind::Polygons);
    if placement.count() == 0 {
        return Ok(0);
    }

    let geometry = outline_geometry(PrimitiveKind::Polygons, &Path2D::polygon(&plane(&a.vertices)), list);
    Ok(placement.push(list, geometry, |_| Vec3::ONE))
}

pub fn render_spheropolygons(
    _r: &mut PrimitiveRenderer,
    attributes: &Value,
    list: &mut DrawList,
) -> Result<usize, AttributeError> {
    let a: SpheropolygonsAttributes = decode(PrimitiveKind::Spheropolygons, attributes)?;
    let placement = Placement::new(&a.positions, &a.orientations, &a.colors);
    placement.check(PrimitiveKind::Spheropolygons);
    if placement.count() == 0 {
        return Ok(0);
    }

    let outline = spheropolygon_outline(&plane(&a.vertices), a.radius);
    let geometry = outline_geometry(PrimitiveKind::Spheropolygons, &outline, list);
    Ok(placement.push(list, geometry, |_| Vec3::ONE))
}

/// Rounded outline of a polygon swept by a disk of `radius`.
///
/// For each vertex triple `(v0, v1, v2)` taken cyclically: a line along edge
/// `v0 → v1` pushed outward by `radius`, then an arc around `v1` from that
/// edge's outward normal to the next edge's. Vertices are expected in
/// counter-clockwise order.
pub fn spheropolygon_outline(vertices: &[Vec2], radius: f32) -> Path2D {
    let n = vertices.len();
    let mut path = Path2D::new();
    for k in 0..n {
        let (v0, v1, v2) = (vertices[k], vertices[(k + 1) % n], vertices[(k + 2) % n]);
        let e01 = edge_expand(radius, v0, v1);
        let e12 = edge_expand(radius, v1, v2);
        path.line(v0 + e01, v1 + e01);
        path.arc(v1, radius, angle(e01), angle(e12));
    }
    path
}

/// Edge direction rotated by -π/2, scaled to `radius`.
fn edge_expand(radius: f32, v0: Vec2, v1: Vec2) -> Vec2 {
    let d = (v1 - v0).normalize_or_zero();
    Vec2::new(d.y, -d.x) * radius
}

fn angle(v: Vec2) -> f32 {
    v.y.atan2(v.x)
}

fn plane(points: &[Point]) -> Vec<Vec2> {
    points.iter().map(|p| Vec2::new(p.0[0], p.0[1])).collect()
}

fn outline_geometry(kind: PrimitiveKind, outline: &Path2D, list: &mut DrawList) -> GeometryId {
    let points = outline.flatten(ARC_DIVISIONS);
    let mesh = if points.len() < 3 {
        log::warn!("{kind}: outline has {} distinct points; nothing to draw", points.len());
        MeshData::new()
    } else {
        flat_polygon(&points)
    };
    list.add_geometry(mesh)
}

/// Per-instance position, orientation and color arrays shared by the 2D kinds.
struct Placement<'a> {
    positions: &'a [Point],
    orientations: &'a [[f32; 4]],
    colors: &'a [Rgba],
}

impl<'a> Placement<'a> {
    fn new(positions: &'a [Point], orientations: &'a [[f32; 4]], colors: &'a [Rgba]) -> Self {
        Self { positions, orientations, colors }
    }

    fn count(&self) -> usize {
        self.positions.len()
    }

    fn check(&self, kind: PrimitiveKind) {
        attrs::check_lengths(
            kind,
            self.count(),
            &[("orientations", self.orientations.len()), ("colors", self.colors.len())],
        );
    }

    /// Pushes `translate(x, y, 0) · rotate · scale(i)` instances.
    fn push(&self, list: &mut DrawList, geometry: GeometryId, scale: impl Fn(usize) -> Vec3) -> usize {
        for i in 0..self.count() {
            let p = attrs::point(self.positions, i);
            let rotation: Quat = attrs::orientation(self.orientations, i);
            let transform = Mat4::from_scale_rotation_translation(
                scale(i),
                rotation,
                Vec3::new(p.x, p.y, 0.0),
            );
            list.push_mesh(geometry, transform, Material::double_sided(attrs::color(self.colors, i)));
        }
        self.count()
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::{FRAC_PI_2, PI};

    use approx::assert_relative_eq;
    use plato_engine::geometry::PathSegment;
    use plato_engine::paint::Side;
    use serde_json::json;

    use super::*;

    fn square() -> Vec<Vec2> {
        vec![Vec2::new(-1.0, -1.0), Vec2::new(1.0, -1.0), Vec2::new(1.0, 1.0), Vec2::new(-1.0, 1.0)]
    }

    #[test]
    fn square_spheropolygon_has_four_lines_and_quarter_arcs() {
        let path = spheropolygon_outline(&square(), 0.5);
        let segments = path.segments();
        assert_eq!(segments.len(), 8);

        let lines = segments.iter().filter(|s| matches!(s, PathSegment::Line { .. })).count();
        assert_eq!(lines, 4);
        for s in segments {
            if let PathSegment::Arc { radius, sweep, .. } = s {
                assert_relative_eq!(*sweep, FRAC_PI_2, epsilon = 1e-5);
                assert_eq!(*radius, 0.5);
            }
        }
    }

    #[test]
    fn first_edge_is_pushed_outward() {
        let path = spheropolygon_outline(&square(), 0.5);
        match path.segments()[0] {
            PathSegment::Line { from, to } => {
                assert_eq!(from, Vec2::new(-1.0, -1.5));
                assert_eq!(to, Vec2::new(1.0, -1.5));
            }
            ref other => panic!("expected a line, got {other:?}"),
        }
        match path.segments()[1] {
            PathSegment::Arc { center, start_angle, .. } => {
                assert_eq!(center, Vec2::new(1.0, -1.0));
                assert_relative_eq!(start_angle, -FRAC_PI_2, epsilon = 1e-6);
            }
            ref other => panic!("expected an arc, got {other:?}"),
        }
    }

    #[test]
    fn rounded_square_area() {
        // Square of side 2 swept by r = 0.5: 4 + 4·(2·0.5) + π·0.25.
        let points = spheropolygon_outline(&square(), 0.5).flatten(64);
        let twice: f32 = (0..points.len())
            .map(|i| points[i].perp_dot(points[(i + 1) % points.len()]))
            .sum();
        assert_relative_eq!(twice * 0.5, 8.0 + PI * 0.25, epsilon = 1e-2);
    }

    #[test]
    fn spheropolygons_instance_per_position() {
        let mut list = DrawList::new();
        let attrs = json!({
            "vertices": [[-1, -1], [1, -1], [1, 1], [-1, 1]],
            "radius": 0.25,
            "positions": [[0, 0], [3, 3]],
            "orientations": [[1, 0, 0, 0]],
            "colors": [[0.2, 0.4, 0.8, 1]]
        });
        let n = render_spheropolygons(&mut PrimitiveRenderer::new(), &attrs, &mut list).unwrap();
        assert_eq!(n, 2);
        assert_eq!(list.geometries().len(), 1);
        assert!(!list.geometries()[0].is_empty());
        assert!(list.meshes().all(|m| m.material.side == Side::Double));
    }

    #[test]
    fn polygon_outline_is_closed_and_triangulated() {
        let mut list = DrawList::new();
        let attrs = json!({"vertices": [[0, 0], [1, 0], [0, 1]], "positions": [[0, 0]]});
        assert_eq!(render_polygons(&mut PrimitiveRenderer::new(), &attrs, &mut list).unwrap(), 1);
        let mesh = &list.geometries()[0];
        assert_eq!(mesh.vertices.len(), 3);
        assert_eq!(mesh.triangle_count(), 1);
    }

    #[test]
    fn polygons_translate_in_plane_and_rotate() {
        let mut list = DrawList::new();
        let h = FRAC_PI_2 * 0.5;
        let attrs = json!({
            "vertices": [[0, 0], [1, 0], [0, 1]],
            "positions": [[2, 3, 7]],
            "orientations": [[h.cos(), 0, 0, h.sin()]]
        });
        render_polygons(&mut PrimitiveRenderer::new(), &attrs, &mut list).unwrap();
        let m = list.meshes().next().unwrap();
        let moved = m.transform.transform_point3(Vec3::X);
        assert_relative_eq!(moved.x, 2.0, epsilon = 1e-5);
        assert_relative_eq!(moved.y, 4.0, epsilon = 1e-5);
        assert_relative_eq!(moved.z, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn arrows_scale_by_magnitude() {
        let mut list = DrawList::new();
        let attrs = json!({
            "vertices": [[0, -0.1], [0.6, -0.1], [0.6, -0.3], [1, 0], [0.6, 0.3], [0.6, 0.1], [0, 0.1]],
            "positions": [[0, 0], [1, 1], [2, 2]],
            "orientations": [[1, 0, 0, 0]],
            "magnitudes": [1, 2, 3]
        });
        assert_eq!(render_arrows(&mut PrimitiveRenderer::new(), &attrs, &mut list).unwrap(), 3);
        let (scale, _, translation) = list.meshes().nth(2).unwrap().transform.to_scale_rotation_translation();
        assert_relative_eq!(scale.x, 3.0, epsilon = 1e-6);
        assert_relative_eq!(scale.y, 3.0, epsilon = 1e-6);
        assert_relative_eq!(scale.z, 1.0, epsilon = 1e-6);
        assert_eq!(translation, Vec3::new(2.0, 2.0, 0.0));
        assert_eq!(list.geometries()[0].triangle_count(), 5);
    }

    #[test]
    fn degenerate_outline_draws_nothing_but_counts() {
        let mut list = DrawList::new();
        let attrs = json!({"vertices": [[0, 0], [1, 0]], "positions": [[0, 0]]});
        assert_eq!(render_polygons(&mut PrimitiveRenderer::new(), &attrs, &mut list).unwrap(), 1);
        assert!(list.geometries()[0].is_empty());
    }
}
