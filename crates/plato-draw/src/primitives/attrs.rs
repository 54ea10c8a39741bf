//! Per-instance attribute resolution.
//!
//! Parallel arrays should have one entry per instance. A single entry is
//! broadcast to every instance and a missing array falls back to the
//! attribute's default; any other length is reported once per primitive.

use glam::{Quat, Vec3};
use plato_engine::paint::Color;
use plato_json::{Point, PrimitiveKind, Rgba};

use crate::camera::quat_from_wxyz;

pub(crate) const DEFAULT_COLOR: Rgba = Rgba([0.5, 0.5, 0.5, 1.0]);
pub(crate) const DEFAULT_RADIUS: f32 = 0.5;
pub(crate) const DEFAULT_MAGNITUDE: f32 = 1.0;
pub(crate) const DEFAULT_WIDTH: f32 = 0.1;
pub(crate) const IDENTITY_WXYZ: [f32; 4] = [1.0, 0.0, 0.0, 0.0];

/// Value for instance `i`: indexed, broadcast, or `default`.
pub(crate) fn instance<T: Copy>(values: &[T], i: usize, default: T) -> T {
    match values {
        [] => default,
        [only] => *only,
        _ => values.get(i).copied().unwrap_or(default),
    }
}

pub(crate) fn point(values: &[Point], i: usize) -> Vec3 {
    Vec3::from(instance(values, i, Point::default()).0)
}

pub(crate) fn color(values: &[Rgba], i: usize) -> Color {
    Color::from_srgb_array(instance(values, i, DEFAULT_COLOR).0)
}

pub(crate) fn orientation(values: &[[f32; 4]], i: usize) -> Quat {
    quat_from_wxyz(instance(values, i, IDENTITY_WXYZ))
}

/// Logs a single warning naming every array whose length is neither 0, 1 nor
/// `count`. Returns whether all lengths were consistent.
pub(crate) fn check_lengths(kind: PrimitiveKind, count: usize, arrays: &[(&str, usize)]) -> bool {
    let bad: Vec<String> = arrays
        .iter()
        .filter(|&&(_, len)| len > 1 && len != count)
        .map(|(name, len)| format!("{name} ({len})"))
        .collect();

    if bad.is_empty() {
        return true;
    }
    log::warn!(
        "{kind}: {count} instances but {}; missing entries use defaults",
        bad.join(", ")
    );
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indexed_broadcast_default() {
        assert_eq!(instance(&[1, 2, 3], 2, 0), 3);
        assert_eq!(instance(&[7], 5, 0), 7);
        assert_eq!(instance::<i32>(&[], 1, 9), 9);
        assert_eq!(instance(&[1, 2], 4, 0), 0);
    }

    #[test]
    fn default_color_is_grey() {
        let c = color(&[], 0);
        assert_eq!(c, Color::from_srgb(0.5, 0.5, 0.5, 1.0));
    }

    #[test]
    fn missing_orientation_is_identity() {
        assert_eq!(orientation(&[], 3), Quat::IDENTITY);
    }

    #[test]
    fn length_check() {
        assert!(check_lengths(PrimitiveKind::Spheres, 3, &[("colors", 3), ("radii", 1), ("x", 0)]));
        assert!(!check_lengths(PrimitiveKind::Spheres, 3, &[("colors", 2)]));
    }
}
