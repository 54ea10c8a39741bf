use glam::{Mat4, Vec3};
use plato_engine::geometry::{MeshData, convex_hull_mesh};
use plato_engine::paint::Material;
use plato_engine::scene::DrawList;
use plato_json::attributes::decode;
use plato_json::{AttributeError, PolyhedraAttributes, PrimitiveKind};
use serde_json::Value;

use super::PrimitiveRenderer;
use super::attrs;

/// `ConvexPolyhedra`: the hull of `vertices`, placed and rotated per instance.
pub fn render_polyhedra(
    _r: &mut PrimitiveRenderer,
    attributes: &Value,
    list: &mut DrawList,
) -> Result<usize, AttributeError> {
    let a: PolyhedraAttributes = decode(PrimitiveKind::ConvexPolyhedra, attributes)?;
    Ok(build(PrimitiveKind::ConvexPolyhedra, &a, list))
}

/// `ConvexSpheropolyhedra`: drawn as the unrounded hull; `radius` is read but
/// not applied.
pub fn render_spheropolyhedra(
    _r: &mut PrimitiveRenderer,
    attributes: &Value,
    list: &mut DrawList,
) -> Result<usize, AttributeError> {
    let a: PolyhedraAttributes = decode(PrimitiveKind::ConvexSpheropolyhedra, attributes)?;
    if a.radius != 0.0 {
        log::debug!("ConvexSpheropolyhedra: rounding radius {} not applied", a.radius);
    }
    Ok(build(PrimitiveKind::ConvexSpheropolyhedra, &a, list))
}

fn build(kind: PrimitiveKind, a: &PolyhedraAttributes, list: &mut DrawList) -> usize {
    let n = a.positions.len();
    attrs::check_lengths(
        kind,
        n,
        &[("orientations", a.orientations.len()), ("colors", a.colors.len())],
    );
    if n == 0 {
        return 0;
    }

    let points: Vec<Vec3> = a.vertices.iter().map(|p| Vec3::from(p.0)).collect();
    let hull = convex_hull_mesh(&points).unwrap_or_else(|| {
        log::warn!("{kind}: {} vertices do not span a volume; nothing to draw", points.len());
        MeshData::new()
    });

    let geometry = list.add_geometry(hull);
    for i in 0..n {
        let transform = Mat4::from_rotation_translation(
            attrs::orientation(&a.orientations, i),
            attrs::point(&a.positions, i),
        );
        list.push_mesh(geometry, transform, Material::front(attrs::color(&a.colors, i)));
    }
    n
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_1_SQRT_2;

    use approx::assert_relative_eq;
    use serde_json::json;

    use super::*;

    fn cube() -> Value {
        json!([[-1, -1, -1], [1, -1, -1], [-1, 1, -1], [1, 1, -1],
               [-1, -1, 1], [1, -1, 1], [-1, 1, 1], [1, 1, 1]])
    }

    #[test]
    fn hull_shared_and_instances_placed() {
        let mut list = DrawList::new();
        let attrs = json!({
            "vertices": cube(),
            "positions": [[0, 0, 0], [5, 0, 0], [0, 5, 0]],
            // 90° about z, scalar first and unnormalized.
            "orientations": [[1, 0, 0, 0], [2, 0, 0, 2], [1, 0, 0, 0]],
            "colors": [[1, 0, 0]]
        });
        let n = render_polyhedra(&mut PrimitiveRenderer::new(), &attrs, &mut list).unwrap();
        assert_eq!(n, 3);
        assert_eq!(list.geometries().len(), 1);
        assert_eq!(list.geometries()[0].triangle_count(), 12);

        let m = list.meshes().nth(1).unwrap();
        let (_, rotation, translation) = m.transform.to_scale_rotation_translation();
        assert_eq!(translation, Vec3::new(5.0, 0.0, 0.0));
        assert_relative_eq!(rotation.z.abs(), FRAC_1_SQRT_2, epsilon = 1e-5);
        assert_relative_eq!(rotation.w.abs(), FRAC_1_SQRT_2, epsilon = 1e-5);
    }

    #[test]
    fn spheropolyhedra_use_the_plain_hull() {
        let mut list = DrawList::new();
        let attrs = json!({"vertices": cube(), "positions": [[0, 0, 0]], "radius": 0.5});
        let n = render_spheropolyhedra(&mut PrimitiveRenderer::new(), &attrs, &mut list).unwrap();
        assert_eq!(n, 1);
        assert_eq!(list.geometries()[0].triangle_count(), 12);
    }

    #[test]
    fn flat_vertices_still_count_instances() {
        let mut list = DrawList::new();
        let attrs = json!({"vertices": [[0, 0, 0], [1, 0, 0], [0, 1, 0]], "positions": [[0, 0, 0], [1, 1, 1]]});
        assert_eq!(render_polyhedra(&mut PrimitiveRenderer::new(), &attrs, &mut list).unwrap(), 2);
        assert!(list.geometries()[0].is_empty());
    }
}
