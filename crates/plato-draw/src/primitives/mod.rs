//! Primitive kind → draw command dispatch.
//!
//! | Kind | Builder | Shared geometry |
//! |------|---------|-----------------|
//! | `Spheres` | [`spheres`] | unit UV sphere |
//! | `Ellipsoids` | [`ellipsoids`] | unit UV sphere |
//! | `SpherePoints` | [`sphere_points`] | unit UV sphere (small markers) |
//! | `Lines` | [`lines`] | none (line commands) |
//! | `Mesh` | [`mesh`] | vertices + indices |
//! | `ConvexPolyhedra`, `ConvexSpheropolyhedra` | [`polyhedra`] | convex hull |
//! | `Disks` | [`disks`] | unit disk |
//! | `Arrows2D`, `Polygons`, `Spheropolygons` | [`polygons`] | flat outline |
//!
//! Every builder creates one instance per entry of its placement array and
//! returns how many it created. A kind missing from [`DISPATCH`] is logged and
//! skipped; the rest of the document still renders.

mod attrs;

pub mod disks;
pub mod ellipsoids;
pub mod lines;
pub mod mesh;
pub mod polygons;
pub mod polyhedra;
pub mod sphere_points;
pub mod spheres;

use plato_engine::geometry::{disk, uv_sphere};
use plato_engine::scene::{DrawList, GeometryId};
use plato_json::{AttributeError, PrimitiveKind, SceneDocument, UnknownKind};
use serde_json::Value;
use thiserror::Error;

/// Sphere tessellation (around, pole to pole).
pub const SPHERE_SEGMENTS: (u32, u32) = (48, 24);
/// Disk rim segments.
pub const DISK_SEGMENTS: u32 = 48;

/// Builds the draw commands of one primitive; returns the instance count.
pub type RenderFn = fn(&mut PrimitiveRenderer, &Value, &mut DrawList) -> Result<usize, AttributeError>;

/// Kind → builder table.
pub const DISPATCH: [(PrimitiveKind, RenderFn); 11] = [
    (PrimitiveKind::Spheres, spheres::render),
    (PrimitiveKind::Lines, lines::render),
    (PrimitiveKind::Mesh, mesh::render),
    (PrimitiveKind::ConvexPolyhedra, polyhedra::render_polyhedra),
    (PrimitiveKind::ConvexSpheropolyhedra, polyhedra::render_spheropolyhedra),
    (PrimitiveKind::Disks, disks::render),
    (PrimitiveKind::Arrows2D, polygons::render_arrows),
    (PrimitiveKind::Polygons, polygons::render_polygons),
    (PrimitiveKind::Spheropolygons, polygons::render_spheropolygons),
    (PrimitiveKind::Ellipsoids, ellipsoids::render),
    (PrimitiveKind::SpherePoints, sphere_points::render),
];

/// Why a primitive produced no instances.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("primitive {0} is not supported")]
    Unsupported(#[from] UnknownKind),
    #[error(transparent)]
    Attributes(#[from] AttributeError),
}

/// Outcome of [`PrimitiveRenderer::render_document`].
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct RenderSummary {
    /// Primitives in the document.
    pub primitives: usize,
    /// Draw instances created.
    pub instances: usize,
    /// Primitives skipped with a logged error.
    pub skipped: usize,
}

/// Turns document primitives into draw commands.
///
/// Holds the geometries shared between primitives (unit sphere, unit disk),
/// which are added to the target list on first use.
#[derive(Debug, Default)]
pub struct PrimitiveRenderer {
    unit_sphere: Option<GeometryId>,
    unit_disk: Option<GeometryId>,
}

impl PrimitiveRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders one primitive, logging and swallowing failures.
    pub fn render(&mut self, kind: &str, attributes: &Value, list: &mut DrawList) -> usize {
        match self.try_render(kind, attributes, list) {
            Ok(n) => n,
            Err(err) => {
                log::error!("{err}");
                0
            }
        }
    }

    pub fn try_render(
        &mut self,
        kind: &str,
        attributes: &Value,
        list: &mut DrawList,
    ) -> Result<usize, RenderError> {
        let kind: PrimitiveKind = kind.parse()?;
        let Some((_, build)) = DISPATCH.iter().find(|(k, _)| *k == kind) else {
            return Err(UnknownKind(kind.to_string()).into());
        };

        log::debug!("creating {kind}...");
        let count = build(self, attributes, list)?;
        log::debug!("{kind}: {count} instances");
        Ok(count)
    }

    /// Renders every primitive of `doc` in order.
    pub fn render_document(&mut self, doc: &SceneDocument, list: &mut DrawList) -> RenderSummary {
        let mut summary = RenderSummary {
            primitives: doc.primitives.len(),
            ..Default::default()
        };

        for entry in &doc.primitives {
            match self.try_render(&entry.class, &entry.attributes, list) {
                Ok(n) => summary.instances += n,
                Err(err) => {
                    log::error!("{err}");
                    summary.skipped += 1;
                }
            }
        }

        log::info!(
            "rendered {} instances from {} primitives ({} skipped)",
            summary.instances,
            summary.primitives,
            summary.skipped
        );
        summary
    }

    pub(crate) fn unit_sphere(&mut self, list: &mut DrawList) -> GeometryId {
        *self
            .unit_sphere
            .get_or_insert_with(|| list.add_geometry(uv_sphere(SPHERE_SEGMENTS.0, SPHERE_SEGMENTS.1)))
    }

    pub(crate) fn unit_disk(&mut self, list: &mut DrawList) -> GeometryId {
        *self
            .unit_disk
            .get_or_insert_with(|| list.add_geometry(disk(DISK_SEGMENTS)))
    }
}

#[cfg(test)]
mod tests {
    use plato_json::parse_scene;
    use serde_json::json;

    use super::*;

    #[test]
    fn every_kind_has_a_builder() {
        for kind in PrimitiveKind::ALL {
            assert!(DISPATCH.iter().any(|(k, _)| *k == kind), "{kind} missing");
        }
    }

    #[test]
    fn unknown_kind_creates_nothing() {
        let mut list = DrawList::new();
        let n = PrimitiveRenderer::new().render("Tetrahedra", &json!({"positions": [[0, 0, 0]]}), &mut list);
        assert_eq!(n, 0);
        assert!(list.is_empty());
    }

    #[test]
    fn unknown_kind_is_skipped_and_later_primitives_render() {
        let doc = parse_scene(
            r#"{"primitives": [
                {"class": "Tetrahedra", "attributes": {"positions": [[0, 0, 0]]}},
                {"class": "Spheres", "attributes": {"positions": [[0, 0, 0], [1, 0, 0]]}}
            ]}"#,
        )
        .unwrap();
        let mut list = DrawList::new();
        let summary = PrimitiveRenderer::new().render_document(&doc, &mut list);
        assert_eq!(summary, RenderSummary { primitives: 2, instances: 2, skipped: 1 });
        assert_eq!(list.meshes().count(), 2);
    }

    #[test]
    fn sphere_points_render_from_a_document() {
        let doc = parse_scene(
            r#"{"primitives": [
                {"class": "SpherePoints", "attributes": {"points": [[1, 0, 0], [0, 1, 0], [0, 0, 1]]}}
            ]}"#,
        )
        .unwrap();
        let mut list = DrawList::new();
        let summary = PrimitiveRenderer::new().render_document(&doc, &mut list);
        assert_eq!(summary, RenderSummary { primitives: 1, instances: 3, skipped: 0 });
    }

    #[test]
    fn bad_attributes_are_skipped() {
        let mut r = PrimitiveRenderer::new();
        let mut list = DrawList::new();
        let err = r.try_render("Disks", &json!({"radii": "wide"}), &mut list).unwrap_err();
        assert!(matches!(err, RenderError::Attributes(_)));
        assert!(list.is_empty());
    }

    #[test]
    fn unit_geometries_are_shared() {
        let mut r = PrimitiveRenderer::new();
        let mut list = DrawList::new();
        r.render("Spheres", &json!({"positions": [[0, 0, 0]]}), &mut list);
        r.render("Spheres", &json!({"positions": [[1, 0, 0]]}), &mut list);
        r.render("Ellipsoids", &json!({"positions": [[2, 0, 0]]}), &mut list);
        assert_eq!(list.geometries().len(), 1);
    }

    #[test]
    fn empty_placement_adds_no_geometry() {
        let mut list = DrawList::new();
        assert_eq!(PrimitiveRenderer::new().render("Spheres", &json!({}), &mut list), 0);
        assert!(list.geometries().is_empty());
    }
}
