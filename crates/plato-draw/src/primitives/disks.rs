use glam::{Mat4, Quat, Vec3};
use plato_engine::paint::Material;
use plato_engine::scene::DrawList;
use plato_json::attributes::decode;
use plato_json::{AttributeError, DisksAttributes, PrimitiveKind};
use serde_json::Value;

use super::PrimitiveRenderer;
use super::attrs::{self, DEFAULT_RADIUS};

/// Double-sided unit disks in the z = 0 plane, scaled by radius in x and y.
/// Any z coordinate in the positions is ignored.
pub fn render(
    r: &mut PrimitiveRenderer,
    attributes: &Value,
    list: &mut DrawList,
) -> Result<usize, AttributeError> {
    let a: DisksAttributes = decode(PrimitiveKind::Disks, attributes)?;
    let n = a.positions.len();
    attrs::check_lengths(
        PrimitiveKind::Disks,
        n,
        &[("colors", a.colors.len()), ("radii", a.radii.len())],
    );
    if n == 0 {
        return Ok(0);
    }

    let geometry = r.unit_disk(list);
    for i in 0..n {
        let p = attrs::point(&a.positions, i);
        let radius = attrs::instance(&a.radii, i, DEFAULT_RADIUS);
        let transform = Mat4::from_scale_rotation_translation(
            Vec3::new(radius, radius, 1.0),
            Quat::IDENTITY,
            Vec3::new(p.x, p.y, 0.0),
        );
        list.push_mesh(geometry, transform, Material::double_sided(attrs::color(&a.colors, i)));
    }
    Ok(n)
}

#[cfg(test)]
mod tests {
    use plato_engine::paint::Side;
    use serde_json::json;

    use super::*;

    #[test]
    fn disks_scale_in_plane_and_sit_at_z0() {
        let mut list = DrawList::new();
        let attrs = json!({
            "positions": [[1, 2], [3, 4, 5]],
            "colors": [[0, 0, 1, 1]],
            "radii": [0.25, 2]
        });
        assert_eq!(render(&mut PrimitiveRenderer::new(), &attrs, &mut list).unwrap(), 2);

        let meshes: Vec<_> = list.meshes().collect();
        let (scale, _, translation) = meshes[1].transform.to_scale_rotation_translation();
        assert_eq!(scale, Vec3::new(2.0, 2.0, 1.0));
        assert_eq!(translation, Vec3::new(3.0, 4.0, 0.0));
        assert_eq!(meshes[0].transform.x_axis.x, 0.25);
        assert_eq!(meshes[0].transform.z_axis.z, 1.0);
        assert!(meshes.iter().all(|m| m.material.side == Side::Double));
    }
}
