//! GPU rendering subsystem.
//!
//! Renderers consume a `scene::DrawList` and issue GPU commands via wgpu.
//! Each renderer is responsible for its own GPU resources (pipelines, buffers).
//!
//! Convention:
//! - CPU geometry is in world space (right-handed, +Y up).
//! - Shaders receive a shared `FrameUniforms` block (view-projection + lights).
//! - Every pass loads the color and depth attachments cleared by `FrameCtx::render`.

mod common;
mod ctx;
mod line;
mod mesh;
mod uniforms;

pub use ctx::{RenderCtx, RenderTarget};
pub use line::LineRenderer;
pub use mesh::MeshRenderer;
pub use uniforms::{DirectionalLight, FrameUniforms, MAX_DIRECTIONAL_LIGHTS};
