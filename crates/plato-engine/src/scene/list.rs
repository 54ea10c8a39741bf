use crate::geometry::MeshData;

use super::{DrawCmd, GeometryId};

/// Recorded draw stream plus the geometries it instances.
///
/// Geometries are immutable once added; commands refer to them by
/// [`GeometryId`]. Items keep insertion order.
#[derive(Debug, Default)]
pub struct DrawList {
    geometries: Vec<MeshData>,
    items: Vec<DrawCmd>,
    revision: u64,
}

impl DrawList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops all commands and geometries.
    pub fn clear(&mut self) {
        self.geometries.clear();
        self.items.clear();
        self.bump();
    }

    /// Registers a model-space geometry for instancing.
    pub fn add_geometry(&mut self, mesh: MeshData) -> GeometryId {
        let id = GeometryId(self.geometries.len() as u32);
        self.geometries.push(mesh);
        self.bump();
        id
    }

    #[inline]
    pub fn geometry(&self, id: GeometryId) -> Option<&MeshData> {
        self.geometries.get(id.index())
    }

    #[inline]
    pub fn geometries(&self) -> &[MeshData] {
        &self.geometries
    }

    /// Returns items in insertion order.
    #[inline]
    pub fn items(&self) -> &[DrawCmd] {
        &self.items
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn push(&mut self, cmd: DrawCmd) {
        self.items.push(cmd);
        self.bump();
    }

    /// Monotonic content counter; changes on every mutation.
    #[inline]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    #[inline]
    fn bump(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use glam::{Mat4, Vec3};

    use super::*;
    use crate::geometry::disk;
    use crate::paint::{Color, Material};

    #[test]
    fn geometry_ids_are_sequential() {
        let mut list = DrawList::new();
        let a = list.add_geometry(disk(8));
        let b = list.add_geometry(disk(16));
        assert_eq!((a.index(), b.index()), (0, 1));
        assert_eq!(list.geometry(b).map(|m| m.triangle_count()), Some(16));
    }

    #[test]
    fn every_mutation_bumps_revision() {
        let mut list = DrawList::new();
        let r0 = list.revision();
        let g = list.add_geometry(disk(8));
        let r1 = list.revision();
        list.push_mesh(g, Mat4::IDENTITY, Material::front(Color::WHITE));
        list.push_line(Vec3::ZERO, Vec3::X, Color::BLACK, 1.0);
        assert!(r1 != r0 && list.revision() != r1);
        assert_eq!(list.len(), 2);

        list.clear();
        assert!(list.is_empty());
        assert!(list.geometries().is_empty());
    }
}
