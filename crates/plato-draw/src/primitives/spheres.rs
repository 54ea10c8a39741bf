use glam::{Mat4, Quat, Vec3};
use plato_engine::paint::Material;
use plato_engine::scene::DrawList;
use plato_json::attributes::decode;
use plato_json::{AttributeError, PrimitiveKind, SpheresAttributes};
use serde_json::Value;

use super::PrimitiveRenderer;
use super::attrs::{self, DEFAULT_RADIUS};

/// One unit sphere per position, scaled by its radius.
pub fn render(
    r: &mut PrimitiveRenderer,
    attributes: &Value,
    list: &mut DrawList,
) -> Result<usize, AttributeError> {
    let a: SpheresAttributes = decode(PrimitiveKind::Spheres, attributes)?;
    let n = a.positions.len();
    attrs::check_lengths(
        PrimitiveKind::Spheres,
        n,
        &[("colors", a.colors.len()), ("radii", a.radii.len())],
    );
    if n == 0 {
        return Ok(0);
    }

    let geometry = r.unit_sphere(list);
    for i in 0..n {
        let radius = attrs::instance(&a.radii, i, DEFAULT_RADIUS);
        let transform = Mat4::from_scale_rotation_translation(
            Vec3::splat(radius),
            Quat::IDENTITY,
            attrs::point(&a.positions, i),
        );
        list.push_mesh(geometry, transform, Material::front(attrs::color(&a.colors, i)));
    }
    Ok(n)
}
