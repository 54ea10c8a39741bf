//! Plato engine crate.
//!
//! Owns the platform + GPU runtime pieces used by the viewer: window loop,
//! input, GPU device, a 3D draw list, mesh/line renderers and the CPU geometry
//! builders that feed them.

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod geometry;
pub mod render;
pub mod paint;
pub mod scene;
