//! Scene (draw stream) types.
//!
//! Responsibilities:
//! - own the shared model-space geometries referenced by draw commands
//! - store renderer-agnostic draw commands in insertion order
//! - keep command-specific helpers isolated per file under `scene::shapes`
//!
//! A `DrawList` is built once per loaded document and replayed every frame;
//! its `revision` changes whenever the recorded content does, so renderers can
//! skip re-uploading unchanged data.

mod cmd;
mod list;

pub mod shapes;

pub use cmd::{DrawCmd, GeometryId};
pub use list::DrawList;
pub use shapes::line::LineCmd;
pub use shapes::mesh::MeshCmd;
