//! CPU-side geometry builders.
//!
//! Everything here produces [`MeshData`] (or plain index lists) in model space and
//! never touches the GPU. Renderers upload the results once and instance them.
//!
//! | builder | output |
//! |---|---|
//! | [`uv_sphere`] | smooth unit sphere |
//! | [`disk`] | unit disk in the XY plane, normal +Z |
//! | [`Path2D`] | line + arc outline, flattened to a point loop |
//! | [`triangulate`] / [`flat_polygon`] | ear-clipped simple polygon |
//! | [`convex_hull`] / [`convex_hull_mesh`] | 3D hull of a point cloud |

mod disk;
mod hull;
mod mesh;
mod path;
mod sphere;
mod triangulate;

pub use disk::disk;
pub use hull::{convex_hull, convex_hull_mesh};
pub use mesh::{MeshData, Vertex};
pub use path::{ARC_DIVISIONS, Path2D, PathSegment, arc_sweep};
pub use sphere::uv_sphere;
pub use triangulate::{flat_polygon, triangulate};
