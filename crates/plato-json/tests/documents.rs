use plato_json::attributes::decode;
use plato_json::*;

const MIXED: &str = r#"{
    "size": [40, 30],
    "translation": [0, 0, -20],
    "rotation": [1, 0, 0, 0],
    "zoom": 2,
    "pixel_scale": 20,
    "features": {
        "ambient_light": {"value": 0.25},
        "directional_light": {"value": [[0.4, -0.4, -0.4], [-0.25, -0.0625, -0.25]]},
        "pan": true
    },
    "primitives": [
        {"class": "Spheres", "attributes": {
            "positions": [[0, 0, 0], [1, 1, 1], [2, 2, 2]],
            "colors": [[1, 0, 0, 1], [0, 1, 0, 1], [0, 0, 1, 0.5]],
            "radii": [0.5, 0.75, 1]}},
        {"class": "Lines", "attributes": {
            "start_points": [[0, 0, 0]], "end_points": [[1, 0, 0]],
            "colors": [[0, 0, 0]], "widths": [0.1]}},
        {"class": "Mesh", "attributes": {
            "vertices": [[0, 0, 0], [1, 0, 0], [0, 1, 0], [0, 0, 1]],
            "indices": [[0, 2, 1], [0, 1, 3], [0, 3, 2], [1, 2, 3]],
            "colors": [[0.5, 0.5, 0.5, 1]]}},
        {"class": "Tetrahedra", "attributes": {"positions": [[0, 0, 0]]}},
        {"class": "Spheropolygons", "attributes": {
            "vertices": [[-1, -1], [1, -1], [1, 1], [-1, 1]],
            "radius": 0.25,
            "positions": [[3, 3], [-3, 3]],
            "orientations": [[1, 0, 0, 0]],
            "colors": [[0.2, 0.4, 0.8, 1]]}}
    ]
}"#;

#[test]
fn mixed_document_parses() {
    let doc = parse_scene(MIXED).unwrap();
    assert_eq!(doc.size, [40.0, 30.0]);
    assert_eq!(doc.translation, Some([0.0, 0.0, -20.0]));
    assert_eq!(doc.rotation, Some([1.0, 0.0, 0.0, 0.0]));
    assert_eq!(doc.zoom, 2.0);
    assert_eq!(doc.size_pixels(), Some([800.0, 600.0]));
    assert_eq!(doc.primitives.len(), 5);
}

#[test]
fn features_resolve() {
    let doc = parse_scene(MIXED).unwrap();
    assert_eq!(doc.feature("ambient_light").and_then(Feature::as_f32), Some(0.25));
    assert!(doc.feature("pan").is_some_and(Feature::is_truthy));
    let lights = doc.feature_value("directional_light").and_then(|v| v.as_array()).unwrap();
    assert_eq!(lights.len(), 2);
    assert!(doc.feature("wireframe").is_none());
}

#[test]
fn unknown_class_survives_parsing() {
    let doc = parse_scene(MIXED).unwrap();
    let classes: Vec<_> = doc.primitives.iter().map(|p| p.kind()).collect();
    assert_eq!(
        classes,
        vec![
            Some(PrimitiveKind::Spheres),
            Some(PrimitiveKind::Lines),
            Some(PrimitiveKind::Mesh),
            None,
            Some(PrimitiveKind::Spheropolygons),
        ]
    );
}

#[test]
fn attributes_decode_per_kind() {
    let doc = parse_scene(MIXED).unwrap();

    let spheres: SpheresAttributes = decode(PrimitiveKind::Spheres, &doc.primitives[0].attributes).unwrap();
    assert_eq!(spheres.positions[2], Point([2.0, 2.0, 2.0]));
    assert_eq!(spheres.colors[2], Rgba([0.0, 0.0, 1.0, 0.5]));

    let lines: LinesAttributes = decode(PrimitiveKind::Lines, &doc.primitives[1].attributes).unwrap();
    assert_eq!(lines.colors[0], Rgba([0.0, 0.0, 0.0, 1.0]));

    let mesh: MeshAttributes = decode(PrimitiveKind::Mesh, &doc.primitives[2].attributes).unwrap();
    assert_eq!(mesh.indices.triangles().len(), 4);

    let sp: SpheropolygonsAttributes =
        decode(PrimitiveKind::Spheropolygons, &doc.primitives[4].attributes).unwrap();
    assert_eq!(sp.radius, 0.25);
    assert_eq!(sp.positions[1], Point([-3.0, 3.0, 0.0]));
    assert_eq!(sp.orientations.len(), 1);
}

#[test]
fn bytes_and_str_agree() {
    assert_eq!(parse_scene(MIXED).unwrap(), parse_scene_slice(MIXED.as_bytes()).unwrap());
}

#[test]
fn json_export_shape_parses() {
    // Layout written by the plato json exporter: no features, explicit nulls.
    let doc = parse_scene(
        r#"{"size": [1, 1], "translation": [0, 0, 0], "rotation": [1, 0, 0, 0],
            "zoom": 1, "pixel_scale": null, "primitives": []}"#,
    )
    .unwrap();
    assert!(doc.features.is_empty());
    assert!(doc.pixel_scale.is_none());
}

#[test]
fn exported_sphere_points_decode() {
    let doc = parse_scene(
        r#"{"size": [4, 4], "primitives": [
            {"class": "SpherePoints", "attributes": {
                "points": [[1, 0, 0], [0, 1, 0], [0, 0, 1], [0.5, 0.5, 0]],
                "blur": 2, "intensity": 100, "on_surface": 1}}
        ]}"#,
    )
    .unwrap();
    let entry = &doc.primitives[0];
    assert_eq!(entry.kind(), Some(PrimitiveKind::SpherePoints));
    let points: SpherePointsAttributes = decode(PrimitiveKind::SpherePoints, &entry.attributes).unwrap();
    assert_eq!(points.points.len(), 4);
    assert_eq!(points.intensity, 100.0);
    assert!(points.on_surface.0);
}
