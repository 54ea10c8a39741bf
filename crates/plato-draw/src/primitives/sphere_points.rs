use glam::{Mat4, Quat, Vec3};
use plato_engine::paint::{Color, Material};
use plato_engine::scene::DrawList;
use plato_json::attributes::decode;
use plato_json::{AttributeError, PrimitiveKind, SpherePointsAttributes};
use serde_json::Value;

use super::PrimitiveRenderer;
use super::attrs;

/// World radius of a point marker per unit of `blur`.
pub const POINT_RADIUS_PER_BLUR: f32 = 0.01;
/// Marker color at full density (sRGB); sparse points fade toward white.
const DENSE_COLOR: [f32; 3] = [0.05, 0.1, 0.45];

/// One small unit-sphere marker per point.
///
/// The shade of every marker comes from the intensity share of one point,
/// `intensity / n / (blur² / 16)`, clamped to `[0, 1]`.
pub fn render(
    r: &mut PrimitiveRenderer,
    attributes: &Value,
    list: &mut DrawList,
) -> Result<usize, AttributeError> {
    let a: SpherePointsAttributes = decode(PrimitiveKind::SpherePoints, attributes)?;
    let n = a.points.len();
    if n == 0 {
        return Ok(0);
    }

    let blur = a.blur.max(0.0);
    let radius = blur * POINT_RADIUS_PER_BLUR;
    let color = point_color(point_density(a.intensity, blur, n));

    let geometry = r.unit_sphere(list);
    for i in 0..n {
        let mut p = attrs::point(&a.points, i);
        if a.on_surface.0 {
            p = p.normalize_or_zero();
        }
        let transform = Mat4::from_scale_rotation_translation(Vec3::splat(radius), Quat::IDENTITY, p);
        list.push_mesh(geometry, transform, Material::front(color));
    }
    Ok(n)
}

/// Brightness share of one point in `[0, 1]`.
pub fn point_density(intensity: f32, blur: f32, count: usize) -> f32 {
    let area = 0.0625 * blur * blur;
    if count == 0 || !intensity.is_finite() {
        return 0.0;
    }
    if area <= f32::EPSILON {
        return 1.0;
    }
    (intensity / count as f32 / area).clamp(0.0, 1.0)
}

fn point_color(density: f32) -> Color {
    let [r, g, b] = DENSE_COLOR.map(|c| 1.0 + (c - 1.0) * density);
    Color::from_srgb(r, g, b, 1.0)
}
