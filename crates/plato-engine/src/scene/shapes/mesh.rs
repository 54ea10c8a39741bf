use glam::Mat4;

use crate::paint::Material;
use crate::scene::{DrawCmd, DrawList, GeometryId};

/// One instance of a registered geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshCmd {
    pub geometry: GeometryId,
    /// Model-to-world transform.
    pub transform: Mat4,
    pub material: Material,
}

impl MeshCmd {
    #[inline]
    pub fn new(geometry: GeometryId, transform: Mat4, material: Material) -> Self {
        Self { geometry, transform, material }
    }
}

impl DrawList {
    /// Records an instance of `geometry`.
    #[inline]
    pub fn push_mesh(&mut self, geometry: GeometryId, transform: Mat4, material: Material) {
        self.push(DrawCmd::Mesh(MeshCmd::new(geometry, transform, material)));
    }

    /// Iterates mesh commands in insertion order.
    pub fn meshes(&self) -> impl Iterator<Item = &MeshCmd> {
        self.items().iter().filter_map(|cmd| match cmd {
            DrawCmd::Mesh(m) => Some(m),
            _ => None,
        })
    }
}
