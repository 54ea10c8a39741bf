//! Document model and loader for **plato** JSON scenes.
//!
//! A scene document carries framing metadata (`size`, `translation`,
//! `rotation`, `zoom`), feature flags, and a list of primitives, each a
//! `class` name plus an `attributes` object. This crate has no GPU or
//! windowing dependencies; rendering lives in `plato-draw`.
//!
//! # Structure
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`document`] | `SceneDocument`, `Feature`, `PrimitiveEntry` |
//! | [`attributes`] | `PrimitiveKind`, per-kind attribute sets, `decode` |
//! | [`error`] | `LoadError`, `AttributeError`, `UnknownKind` |
//! | [`loader`] | `SceneSource`, `load_scene`, `parse_scene` |
//!
//! # Quick start
//!
//! ```rust
//! use plato_json::{parse_scene, PrimitiveKind, SpheresAttributes};
//!
//! let doc = parse_scene(r#"{
//!     "size": [10, 5],
//!     "features": {"ambient_light": {"value": 0.4}},
//!     "primitives": [
//!         {"class": "Spheres",
//!          "attributes": {"positions": [[0, 0, 0], [1, 0, 0]], "radii": [0.5]}}
//!     ]
//! }"#).unwrap();
//!
//! let entry = &doc.primitives[0];
//! assert_eq!(entry.kind(), Some(PrimitiveKind::Spheres));
//!
//! let spheres: SpheresAttributes =
//!     plato_json::attributes::decode(PrimitiveKind::Spheres, &entry.attributes).unwrap();
//! assert_eq!(spheres.positions.len(), 2);
//! ```

pub mod attributes;
pub mod document;
pub mod error;
pub mod loader;

pub use attributes::{
    ArrowsAttributes, DisksAttributes, EllipsoidsAttributes, Flag, Indices, LinesAttributes,
    MeshAttributes, Point, PolygonsAttributes, PolyhedraAttributes, PrimitiveKind, Rgba,
    SpherePointsAttributes, SpheresAttributes, SpheropolygonsAttributes,
};
pub use document::{Feature, PrimitiveEntry, SceneDocument};
pub use error::{AttributeError, LoadError, UnknownKind};
pub use loader::{SceneSource, load_scene, parse_scene, parse_scene_slice};
