use std::f32::consts::TAU;

use glam::Vec2;

/// Points generated per arc when an outline is flattened.
pub const ARC_DIVISIONS: usize = 12;

/// Angles closer than this are treated as identical.
const ANGLE_EPSILON: f32 = 1e-6;

/// Outline segment in the XY plane.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum PathSegment {
    Line {
        from: Vec2,
        to: Vec2,
    },
    /// Counter-clockwise circular arc starting at `start_angle` (radians).
    Arc {
        center: Vec2,
        radius: f32,
        start_angle: f32,
        sweep: f32,
    },
}

impl PathSegment {
    /// Position at `t` in `[0, 1]` along the segment.
    pub fn point_at(&self, t: f32) -> Vec2 {
        match *self {
            PathSegment::Line { from, to } => from.lerp(to, t),
            PathSegment::Arc { center, radius, start_angle, sweep } => {
                let angle = start_angle + sweep * t;
                center + Vec2::new(angle.cos(), angle.sin()) * radius
            }
        }
    }
}

/// Closed 2D outline made of line and arc segments.
///
/// The outline is implicitly closed: flattening never repeats the first point
/// at the end.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path2D {
    segments: Vec<PathSegment>,
}

impl Path2D {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Outline visiting `points` in order and returning to the first one.
    pub fn polygon(points: &[Vec2]) -> Self {
        let mut path = Self::new();
        for (i, &from) in points.iter().enumerate() {
            let to = points[(i + 1) % points.len()];
            path.line(from, to);
        }
        path
    }

    pub fn line(&mut self, from: Vec2, to: Vec2) -> &mut Self {
        self.segments.push(PathSegment::Line { from, to });
        self
    }

    /// Counter-clockwise arc from `start_angle` to `end_angle`; see [`arc_sweep`].
    pub fn arc(&mut self, center: Vec2, radius: f32, start_angle: f32, end_angle: f32) -> &mut Self {
        self.segments.push(PathSegment::Arc {
            center,
            radius,
            start_angle,
            sweep: arc_sweep(start_angle, end_angle),
        });
        self
    }

    #[inline]
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Samples the outline into a point loop.
    ///
    /// Lines contribute their endpoints, arcs `arc_divisions + 1` evenly spaced
    /// points. Consecutive duplicates and the closing point are removed.
    pub fn flatten(&self, arc_divisions: usize) -> Vec<Vec2> {
        let divisions = arc_divisions.max(1);
        let mut points: Vec<Vec2> = Vec::new();
        let mut emit = |p: Vec2| {
            if points.last().is_none_or(|last| last.distance_squared(p) > f32::EPSILON) {
                points.push(p);
            }
        };

        for seg in &self.segments {
            match seg {
                PathSegment::Line { from, to } => {
                    emit(*from);
                    emit(*to);
                }
                PathSegment::Arc { .. } => {
                    for k in 0..=divisions {
                        emit(seg.point_at(k as f32 / divisions as f32));
                    }
                }
            }
        }

        while points.len() > 1 {
            let (first, last) = (points[0], points[points.len() - 1]);
            if first.distance_squared(last) > f32::EPSILON {
                break;
            }
            points.pop();
        }
        points
    }
}

/// Counter-clockwise sweep from `start` to `end`, in `[0, 2π]`.
///
/// Identical angles sweep nothing; angles that differ by a whole turn sweep a
/// full circle.
pub fn arc_sweep(start: f32, end: f32) -> f32 {
    let raw = end - start;
    if raw.abs() < ANGLE_EPSILON {
        return 0.0;
    }
    let sweep = raw.rem_euclid(TAU);
    if sweep < ANGLE_EPSILON || TAU - sweep < ANGLE_EPSILON { TAU } else { sweep }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::{FRAC_PI_2, PI};

    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn polygon_closes_back_to_first_vertex() {
        let pts = [Vec2::ZERO, Vec2::X, Vec2::ONE];
        let path = Path2D::polygon(&pts);
        assert_eq!(path.segments().len(), 3);
        assert_eq!(
            path.segments()[2],
            PathSegment::Line { from: Vec2::ONE, to: Vec2::ZERO }
        );
        assert_eq!(path.flatten(ARC_DIVISIONS), pts.to_vec());
    }

    #[test]
    fn sweep_wraps_negative_differences() {
        assert_relative_eq!(arc_sweep(0.0, FRAC_PI_2), FRAC_PI_2);
        assert_relative_eq!(arc_sweep(PI, -FRAC_PI_2), FRAC_PI_2, epsilon = 1e-6);
        assert_eq!(arc_sweep(1.0, 1.0), 0.0);
        assert_relative_eq!(arc_sweep(0.0, TAU), TAU);
    }

    #[test]
    fn arc_flattens_into_divisions_plus_one_points() {
        let mut path = Path2D::new();
        path.arc(Vec2::ZERO, 1.0, 0.0, FRAC_PI_2);
        let pts = path.flatten(12);
        assert_eq!(pts.len(), 13);
        assert_relative_eq!(pts[0].x, 1.0);
        assert_relative_eq!(pts[12].y, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn zero_sweep_arc_collapses_to_one_point() {
        let mut path = Path2D::new();
        path.line(Vec2::ZERO, Vec2::X).arc(Vec2::X, 0.0, 0.0, 0.0);
        assert_eq!(path.flatten(12), vec![Vec2::ZERO, Vec2::X]);
    }
}
