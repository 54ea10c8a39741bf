//! Plato draw — turns a [`plato_json::SceneDocument`] into an interactive
//! window on top of `plato-engine`.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use plato_draw::{Projection, Viewer};
//!
//! let doc = plato_json::load_scene(&"scene.json".into())?;
//! Viewer::new(doc)
//!     .title("scene")
//!     .projection(Projection::Perspective)
//!     .run()?;
//! ```
//!
//! # Pieces
//!
//! | Module | Role |
//! |--------|------|
//! | [`camera`] | framing from `size` / `translation` / `rotation` / `zoom` |
//! | [`lights`] | ambient + camera-attached directional lights |
//! | [`controls`] | pointer / wheel / key navigation |
//! | [`primitives`] | primitive kind → draw command builders |
//! | [`app`] | window, frame loop and redraw |
//!
//! The pieces other than [`app`] are usable without a window: render a
//! document into a [`DrawList`](plato_engine::scene::DrawList) with
//! [`PrimitiveRenderer::render_document`] and feed it to your own renderers.

pub mod app;
pub mod camera;
pub mod controls;
pub mod lights;
pub mod primitives;

pub use app::{Viewer, ViewerConfig};
pub use camera::{CameraRig, Projection};
pub use controls::{NavigationMode, OrbitControls};
pub use lights::LightRig;
pub use primitives::{PrimitiveRenderer, RenderError, RenderSummary};
