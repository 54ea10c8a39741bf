use glam::{Mat4, Vec3};
use plato_engine::paint::Material;
use plato_engine::scene::DrawList;
use plato_json::attributes::decode;
use plato_json::{AttributeError, EllipsoidsAttributes, PrimitiveKind};
use serde_json::Value;

use super::PrimitiveRenderer;
use super::attrs;

/// Unit spheres stretched to the shared semi-axes `(a, b, c)`, then rotated
/// and placed per instance.
pub fn render(
    r: &mut PrimitiveRenderer,
    attributes: &Value,
    list: &mut DrawList,
) -> Result<usize, AttributeError> {
    let a: EllipsoidsAttributes = decode(PrimitiveKind::Ellipsoids, attributes)?;
    let n = a.positions.len();
    attrs::check_lengths(
        PrimitiveKind::Ellipsoids,
        n,
        &[("orientations", a.orientations.len()), ("colors", a.colors.len())],
    );
    if n == 0 {
        return Ok(0);
    }

    let geometry = r.unit_sphere(list);
    let axes = Vec3::new(a.a, a.b, a.c);
    for i in 0..n {
        let transform = Mat4::from_scale_rotation_translation(
            axes,
            attrs::orientation(&a.orientations, i),
            attrs::point(&a.positions, i),
        );
        list.push_mesh(geometry, transform, Material::front(attrs::color(&a.colors, i)));
    }
    Ok(n)
}
