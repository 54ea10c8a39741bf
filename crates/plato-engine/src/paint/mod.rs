//! Surface appearance shared between the scene and renderers.
//!
//! Scope:
//! - color representation (linear, straight alpha)
//! - materials (color + face sidedness)

pub mod color;
pub mod material;

pub use color::Color;
pub use material::{Material, Side};
