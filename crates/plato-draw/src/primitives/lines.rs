use plato_engine::scene::DrawList;
use plato_json::attributes::decode;
use plato_json::{AttributeError, LinesAttributes, PrimitiveKind};
use serde_json::Value;

use super::PrimitiveRenderer;
use super::attrs::{self, DEFAULT_WIDTH};

/// One segment per start point. Widths are recorded but lines rasterize one
/// pixel wide.
pub fn render(
    _r: &mut PrimitiveRenderer,
    attributes: &Value,
    list: &mut DrawList,
) -> Result<usize, AttributeError> {
    let a: LinesAttributes = decode(PrimitiveKind::Lines, attributes)?;
    let n = a.start_points.len();
    attrs::check_lengths(
        PrimitiveKind::Lines,
        n,
        &[
            ("end_points", a.end_points.len()),
            ("colors", a.colors.len()),
            ("widths", a.widths.len()),
        ],
    );

    for i in 0..n {
        list.push_line(
            attrs::point(&a.start_points, i),
            attrs::point(&a.end_points, i),
            attrs::color(&a.colors, i),
            attrs::instance(&a.widths, i, DEFAULT_WIDTH),
        );
    }
    Ok(n)
}

#[cfg(test)]
mod tests {
    use glam::Vec3;
    use plato_engine::paint::Color;
    use serde_json::json;

    use super::*;

    #[test]
    fn one_segment_per_start_point() {
        let mut list = DrawList::new();
        let attrs = json!({
            "start_points": [[0, 0, 0], [1, 1, 1]],
            "end_points": [[1, 0, 0], [2, 2, 2]],
            "colors": [[0, 0, 0, 1]],
            "widths": [0.5, 2]
        });
        assert_eq!(render(&mut PrimitiveRenderer::new(), &attrs, &mut list).unwrap(), 2);

        let lines: Vec<_> = list.lines().collect();
        assert_eq!(lines[1].start, Vec3::ONE);
        assert_eq!(lines[1].end, Vec3::splat(2.0));
        assert_eq!(lines[1].color, Color::BLACK);
        assert_eq!(lines[1].width, 2.0);
        assert!(list.geometries().is_empty());
    }
}
