use crate::scene::shapes::line::LineCmd;
use crate::scene::shapes::mesh::MeshCmd;

/// Handle to a geometry registered with [`DrawList::add_geometry`](super::DrawList::add_geometry).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct GeometryId(pub(crate) u32);

impl GeometryId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Renderer-agnostic draw command stream.
///
/// Extending the scene:
/// - add a new command module under `scene::shapes::*`
/// - add a new variant here
/// - implement push helpers inside that module
/// - add a matching renderer under `render::*`
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Mesh(MeshCmd),
    Line(LineCmd),
}
