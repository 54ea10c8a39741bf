//! Typed attribute sets, one per primitive kind.
//!
//! Every array is optional in the document and decodes to an empty `Vec`
//! when missing; the renderer resolves per-instance values (including length-1
//! broadcast and defaults) itself.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{AttributeError, UnknownKind};

/// Every primitive class the renderer understands.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Spheres,
    Lines,
    Mesh,
    ConvexPolyhedra,
    ConvexSpheropolyhedra,
    Disks,
    Arrows2D,
    Polygons,
    Spheropolygons,
    Ellipsoids,
    SpherePoints,
}

impl PrimitiveKind {
    pub const ALL: [PrimitiveKind; 11] = [
        PrimitiveKind::Spheres,
        PrimitiveKind::Lines,
        PrimitiveKind::Mesh,
        PrimitiveKind::ConvexPolyhedra,
        PrimitiveKind::ConvexSpheropolyhedra,
        PrimitiveKind::Disks,
        PrimitiveKind::Arrows2D,
        PrimitiveKind::Polygons,
        PrimitiveKind::Spheropolygons,
        PrimitiveKind::Ellipsoids,
        PrimitiveKind::SpherePoints,
    ];

    /// The `class` string used in documents.
    pub fn as_str(self) -> &'static str {
        match self {
            PrimitiveKind::Spheres => "Spheres",
            PrimitiveKind::Lines => "Lines",
            PrimitiveKind::Mesh => "Mesh",
            PrimitiveKind::ConvexPolyhedra => "ConvexPolyhedra",
            PrimitiveKind::ConvexSpheropolyhedra => "ConvexSpheropolyhedra",
            PrimitiveKind::Disks => "Disks",
            PrimitiveKind::Arrows2D => "Arrows2D",
            PrimitiveKind::Polygons => "Polygons",
            PrimitiveKind::Spheropolygons => "Spheropolygons",
            PrimitiveKind::Ellipsoids => "Ellipsoids",
            PrimitiveKind::SpherePoints => "SpherePoints",
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PrimitiveKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PrimitiveKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| UnknownKind(s.to_string()))
    }
}

/// Decodes the `attributes` object of a known primitive.
///
/// `null` (a primitive with no attributes at all) decodes to the defaults.
pub fn decode<T>(kind: PrimitiveKind, attributes: &Value) -> Result<T, AttributeError>
where
    T: DeserializeOwned + Default,
{
    if attributes.is_null() {
        return Ok(T::default());
    }
    T::deserialize(attributes).map_err(|source| AttributeError {
        kind: kind.as_str(),
        source,
    })
}

/// A 2D or 3D coordinate; 2D input gets `z = 0`.
#[derive(Debug, Copy, Clone, PartialEq, Default, Deserialize)]
#[serde(try_from = "Vec<f32>")]
pub struct Point(pub [f32; 3]);

impl TryFrom<Vec<f32>> for Point {
    type Error = String;

    fn try_from(v: Vec<f32>) -> Result<Self, Self::Error> {
        match v.as_slice() {
            [x, y] => Ok(Point([*x, *y, 0.0])),
            [x, y, z] => Ok(Point([*x, *y, *z])),
            _ => Err(format!("expected 2 or 3 coordinates, got {}", v.len())),
        }
    }
}

/// An RGB or RGBA color in `[0, 1]`; RGB input is opaque.
#[derive(Debug, Copy, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Vec<f32>")]
pub struct Rgba(pub [f32; 4]);

impl TryFrom<Vec<f32>> for Rgba {
    type Error = String;

    fn try_from(v: Vec<f32>) -> Result<Self, Self::Error> {
        match v.as_slice() {
            [r, g, b] => Ok(Rgba([*r, *g, *b, 1.0])),
            [r, g, b, a] => Ok(Rgba([*r, *g, *b, *a])),
            _ => Err(format!("expected 3 or 4 color channels, got {}", v.len())),
        }
    }
}

/// Triangle indices, written either flat or as `[[i, j, k], ...]`.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(from = "IndexList")]
pub struct Indices(pub Vec<u32>);

#[derive(Deserialize)]
#[serde(untagged)]
enum IndexList {
    Flat(Vec<u32>),
    Nested(Vec<Vec<u32>>),
}

impl From<IndexList> for Indices {
    fn from(list: IndexList) -> Self {
        match list {
            IndexList::Flat(v) => Indices(v),
            IndexList::Nested(v) => Indices(v.into_iter().flatten().collect()),
        }
    }
}

impl Indices {
    /// Complete triangles; a trailing partial triangle is dropped.
    pub fn triangles(&self) -> Vec<[u32; 3]> {
        self.0
            .chunks_exact(3)
            .map(|c| [c[0], c[1], c[2]])
            .collect()
    }
}

/// `Spheres`: one sphere per position.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct SpheresAttributes {
    pub positions: Vec<Point>,
    pub colors: Vec<Rgba>,
    pub radii: Vec<f32>,
}

/// `Lines`: one segment per start point.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct LinesAttributes {
    pub start_points: Vec<Point>,
    pub end_points: Vec<Point>,
    pub colors: Vec<Rgba>,
    pub widths: Vec<f32>,
}

/// `Mesh`: one shared triangle mesh, drawn once per color.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct MeshAttributes {
    pub vertices: Vec<Point>,
    pub indices: Indices,
    pub colors: Vec<Rgba>,
}

/// `ConvexPolyhedra` and `ConvexSpheropolyhedra`: the hull of `vertices`,
/// replicated per position.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PolyhedraAttributes {
    pub vertices: Vec<Point>,
    pub positions: Vec<Point>,
    /// Scalar-first quaternions.
    pub orientations: Vec<[f32; 4]>,
    pub colors: Vec<Rgba>,
    /// Rounding radius; only meaningful for `ConvexSpheropolyhedra`.
    pub radius: f32,
}

impl Default for PolyhedraAttributes {
    fn default() -> Self {
        Self {
            vertices: Vec::new(),
            positions: Vec::new(),
            orientations: Vec::new(),
            colors: Vec::new(),
            radius: 1.0,
        }
    }
}

/// `Disks`: flat circles in the z = 0 plane.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct DisksAttributes {
    pub positions: Vec<Point>,
    pub colors: Vec<Rgba>,
    pub radii: Vec<f32>,
}

/// `Arrows2D`: a shared 2D outline scaled by each magnitude.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct ArrowsAttributes {
    pub vertices: Vec<Point>,
    pub positions: Vec<Point>,
    pub orientations: Vec<[f32; 4]>,
    pub colors: Vec<Rgba>,
    pub magnitudes: Vec<f32>,
}

/// `Polygons`: a shared 2D outline (counterclockwise).
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct PolygonsAttributes {
    pub vertices: Vec<Point>,
    pub positions: Vec<Point>,
    pub orientations: Vec<[f32; 4]>,
    pub colors: Vec<Rgba>,
}

/// `Spheropolygons`: a polygon outline swept by a disk of `radius`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SpheropolygonsAttributes {
    pub vertices: Vec<Point>,
    pub radius: f32,
    pub positions: Vec<Point>,
    pub orientations: Vec<[f32; 4]>,
    pub colors: Vec<Rgba>,
}

impl Default for SpheropolygonsAttributes {
    fn default() -> Self {
        Self {
            vertices: Vec::new(),
            radius: 1.0,
            positions: Vec::new(),
            orientations: Vec::new(),
            colors: Vec::new(),
        }
    }
}

/// `Ellipsoids`: unit spheres scaled by the shared semi-axes `a`, `b`, `c`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EllipsoidsAttributes {
    pub positions: Vec<Point>,
    pub orientations: Vec<[f32; 4]>,
    pub colors: Vec<Rgba>,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl Default for EllipsoidsAttributes {
    fn default() -> Self {
        Self {
            positions: Vec::new(),
            orientations: Vec::new(),
            colors: Vec::new(),
            a: 0.5,
            b: 0.5,
            c: 0.5,
        }
    }
}

/// A boolean written as JSON `true`/`false` or as a number (non-zero = set).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "FlagValue")]
pub struct Flag(pub bool);

#[derive(Deserialize)]
#[serde(untagged)]
enum FlagValue {
    Bool(bool),
    Number(f64),
}

impl From<FlagValue> for Flag {
    fn from(v: FlagValue) -> Self {
        match v {
            FlagValue::Bool(b) => Flag(b),
            FlagValue::Number(n) => Flag(n != 0.0),
        }
    }
}

/// `SpherePoints`: a point cloud, usually a density map over a sphere.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SpherePointsAttributes {
    pub points: Vec<Point>,
    /// Point size, in pixels at the document's pixel scale.
    pub blur: f32,
    /// Total brightness shared between all points.
    pub intensity: f32,
    /// Project every point onto the unit sphere.
    pub on_surface: Flag,
}

impl Default for SpherePointsAttributes {
    fn default() -> Self {
        Self {
            points: Vec::new(),
            blur: 3.0,
            intensity: 1e3,
            on_surface: Flag(true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test] fn kind_names_round_trip() {
        for kind in PrimitiveKind::ALL {
            assert_eq!(kind.as_str().parse::<PrimitiveKind>(), Ok(kind));
        }
    }
    #[test] fn unknown_kind_is_rejected() {
        assert_eq!("Tetrahedra".parse::<PrimitiveKind>(), Err(UnknownKind("Tetrahedra".into())));
    }
    #[test] fn kind_names_are_case_sensitive() {
        assert!("spheres".parse::<PrimitiveKind>().is_err());
    }
    #[test] fn point_pads_2d() {
        let p: Point = serde_json::from_value(json!([1, 2])).unwrap();
        assert_eq!(p, Point([1.0, 2.0, 0.0]));
    }
    #[test] fn point_rejects_4d() {
        assert!(serde_json::from_value::<Point>(json!([1, 2, 3, 4])).is_err());
    }
    #[test] fn rgb_is_opaque() {
        let c: Rgba = serde_json::from_value(json!([0.1, 0.2, 0.3])).unwrap();
        assert_eq!(c, Rgba([0.1, 0.2, 0.3, 1.0]));
    }
    #[test] fn nested_and_flat_indices_agree() {
        let nested: Indices = serde_json::from_value(json!([[0, 1, 2], [2, 1, 3]])).unwrap();
        let flat: Indices = serde_json::from_value(json!([0, 1, 2, 2, 1, 3])).unwrap();
        assert_eq!(nested, flat);
        assert_eq!(flat.triangles(), vec![[0, 1, 2], [2, 1, 3]]);
    }
    #[test] fn partial_triangle_is_dropped() {
        assert_eq!(Indices(vec![0, 1, 2, 3]).triangles().len(), 1);
    }
    #[test] fn missing_arrays_decode_empty() {
        let a: SpheresAttributes = decode(PrimitiveKind::Spheres, &json!({})).unwrap();
        assert!(a.positions.is_empty() && a.colors.is_empty() && a.radii.is_empty());
    }
    #[test] fn null_attributes_use_defaults() {
        let a: EllipsoidsAttributes = decode(PrimitiveKind::Ellipsoids, &Value::Null).unwrap();
        assert_eq!((a.a, a.b, a.c), (0.5, 0.5, 0.5));
    }
    #[test] fn spheropolygon_radius_defaults_to_one() {
        let a: SpheropolygonsAttributes =
            decode(PrimitiveKind::Spheropolygons, &json!({"vertices": [[0, 0], [1, 0], [0, 1]]})).unwrap();
        assert_eq!(a.radius, 1.0);
        assert_eq!(a.vertices.len(), 3);
    }
    #[test] fn sphere_points_defaults_and_numeric_flag() {
        let a: SpherePointsAttributes = decode(PrimitiveKind::SpherePoints, &json!({})).unwrap();
        assert_eq!((a.blur, a.intensity, a.on_surface), (3.0, 1e3, Flag(true)));

        let a: SpherePointsAttributes = decode(
            PrimitiveKind::SpherePoints,
            &json!({"points": [[1, 0, 0], [0, 2, 0]], "on_surface": 0}),
        )
        .unwrap();
        assert_eq!(a.points.len(), 2);
        assert_eq!(a.on_surface, Flag(false));
        assert_eq!(serde_json::from_value::<Flag>(json!(true)).unwrap(), Flag(true));
    }
    #[test] fn unknown_attribute_fields_are_ignored() {
        let a: DisksAttributes =
            decode(PrimitiveKind::Disks, &json!({"radii": [1], "outline": 0.1})).unwrap();
        assert_eq!(a.radii, vec![1.0]);
    }
    #[test] fn bad_shape_names_the_kind() {
        let err = decode::<SpheresAttributes>(PrimitiveKind::Spheres, &json!({"radii": "big"}))
            .unwrap_err();
        assert_eq!(err.kind, "Spheres");
        assert!(err.to_string().starts_with("invalid attributes for Spheres"));
    }
}
