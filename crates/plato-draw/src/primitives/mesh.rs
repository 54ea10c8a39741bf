use glam::{Mat4, Vec3};
use plato_engine::geometry::MeshData;
use plato_engine::paint::Material;
use plato_engine::scene::DrawList;
use plato_json::attributes::decode;
use plato_json::{AttributeError, MeshAttributes, PrimitiveKind};
use serde_json::Value;

use super::PrimitiveRenderer;
use super::attrs;

/// One shared triangle mesh, instanced once per entry of `colors` at the
/// identity transform.
pub fn render(
    _r: &mut PrimitiveRenderer,
    attributes: &Value,
    list: &mut DrawList,
) -> Result<usize, AttributeError> {
    let a: MeshAttributes = decode(PrimitiveKind::Mesh, attributes)?;
    let n = a.colors.len();
    if n == 0 {
        return Ok(0);
    }

    let positions: Vec<Vec3> = a.vertices.iter().map(|p| Vec3::from(p.0)).collect();
    let (mesh, dropped) = MeshData::from_triangles(&positions, &a.indices.triangles());
    if dropped > 0 {
        log::warn!("Mesh: dropped {dropped} triangles referencing missing vertices");
    }
    if a.indices.0.len() % 3 != 0 {
        log::warn!("Mesh: {} indices is not a multiple of 3", a.indices.0.len());
    }

    let geometry = list.add_geometry(mesh);
    for i in 0..n {
        list.push_mesh(geometry, Mat4::IDENTITY, Material::front(attrs::color(&a.colors, i)));
    }
    Ok(n)
}
