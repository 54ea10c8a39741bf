//! Camera derived from scene metadata.
//!
//! Two variants exist: an orthographic camera framed by the document's
//! `size`, `translation`, `rotation` and `zoom`, and a perspective camera with
//! a fixed placement that ignores scene framing entirely.

use glam::{Mat4, Quat, Vec3};
use plato_json::SceneDocument;

/// Vertical field of view of the perspective variant, in degrees.
pub const PERSPECTIVE_FOV_Y_DEG: f32 = 60.0;
const PERSPECTIVE_NEAR: f32 = 0.1;
const PERSPECTIVE_FAR: f32 = 1000.0;
const PERSPECTIVE_DISTANCE: f32 = 10.0;

const DEFAULT_TRANSLATION: [f32; 3] = [0.0, 0.0, -1.0];

const MIN_ZOOM: f32 = 1e-3;
const MAX_ZOOM: f32 = 1e3;
const MIN_DISTANCE: f32 = 1e-2;

/// Projection variant, chosen once at startup.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum Projection {
    #[default]
    Orthographic,
    Perspective,
}

/// Scalar-first `(w, x, y, z)` to a normalized quaternion.
///
/// A zero or non-finite input yields the identity.
pub fn quat_from_wxyz(q: [f32; 4]) -> Quat {
    let raw = Quat::from_xyzw(q[1], q[2], q[3], q[0]);
    if raw.is_finite() && raw.length_squared() > f32::EPSILON {
        raw.normalize()
    } else {
        Quat::IDENTITY
    }
}

/// Inverse of [`quat_from_wxyz`] (up to normalization).
pub fn quat_to_wxyz(q: Quat) -> [f32; 4] {
    [q.w, q.x, q.y, q.z]
}

/// Orthographic half extents `[x, y]` fitting a scene of `size` into a window
/// of `window_aspect` (width / height).
///
/// The axis along which the window is relatively larger is widened by the
/// aspect ratio between the two; the result is divided by `zoom`.
pub fn frustum_half_extents(size: [f32; 2], window_aspect: f32, zoom: f32) -> [f32; 2] {
    let [w, h] = sanitize_size(size);
    let window_aspect = positive_or(window_aspect, 1.0);
    let zoom = positive_or(zoom, 1.0);
    let scene_aspect = w / h;

    [
        w / 2.0 * (scene_aspect / window_aspect).max(1.0) / zoom,
        h / 2.0 * (window_aspect / scene_aspect).max(1.0) / zoom,
    ]
}

fn positive_or(v: f32, fallback: f32) -> f32 {
    if v.is_finite() && v > 0.0 { v } else { fallback }
}

fn sanitize_size(size: [f32; 2]) -> [f32; 2] {
    [positive_or(size[0], 1.0), positive_or(size[1], 1.0)]
}

/// Camera placement plus the interactive zoom factor.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    /// Camera-to-world rotation; the camera looks down its local -Z.
    pub orientation: Quat,
    /// Orbit center.
    pub target: Vec3,
    /// Orthographic magnification on top of the document zoom.
    pub zoom: f32,
}

impl Pose {
    pub fn distance(&self) -> f32 {
        self.position.distance(self.target).max(MIN_DISTANCE)
    }
}

/// Camera state for one viewport.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraRig {
    projection: Projection,
    size: [f32; 2],
    doc_zoom: f32,
    aspect: f32,
    half_extents: [f32; 2],
    near: f32,
    far: f32,
    pose: Pose,
    home: Pose,
}

impl CameraRig {
    pub fn from_document(doc: &SceneDocument, projection: Projection, window_aspect: f32) -> Self {
        let aspect = positive_or(window_aspect, 1.0);
        let size = sanitize_size(doc.size);
        let doc_zoom = positive_or(doc.zoom, 1.0);

        let (pose, near, far) = match projection {
            Projection::Orthographic => {
                let t = Vec3::from(doc.translation.unwrap_or(DEFAULT_TRANSLATION));
                let q = quat_from_wxyz(doc.rotation.unwrap_or([1.0, 0.0, 0.0, 0.0]));
                let orientation = q.inverse();
                let position = orientation * -t;

                let depth = if -t.z > MIN_DISTANCE { -t.z } else { 1.0 };
                let target = position + orientation * Vec3::new(0.0, 0.0, -depth);

                let far = t.length() + 2.0 * Vec3::new(size[0], size[1], 0.0).length() + 1.0;
                let pose = Pose { position, orientation, target, zoom: 1.0 };
                (pose, -far, far)
            }
            Projection::Perspective => {
                let pose = Pose {
                    position: Vec3::new(0.0, 0.0, PERSPECTIVE_DISTANCE),
                    orientation: Quat::IDENTITY,
                    target: Vec3::ZERO,
                    zoom: 1.0,
                };
                (pose, PERSPECTIVE_NEAR, PERSPECTIVE_FAR)
            }
        };

        log::debug!(
            "camera: {projection:?}, position {:?}, target {:?}",
            pose.position,
            pose.target
        );

        Self {
            projection,
            size,
            doc_zoom,
            aspect,
            half_extents: frustum_half_extents(size, aspect, doc_zoom),
            near,
            far,
            pose,
            home: pose,
        }
    }

    #[inline]
    pub fn projection(&self) -> Projection {
        self.projection
    }

    #[inline]
    pub fn pose(&self) -> &Pose {
        &self.pose
    }

    #[inline]
    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// Orthographic half extents at document zoom (interactive zoom excluded).
    #[inline]
    pub fn half_extents(&self) -> [f32; 2] {
        self.half_extents
    }

    /// Applies a new window aspect ratio.
    ///
    /// The orthographic frustum is refitted; the perspective camera only
    /// stretches its aspect.
    pub fn resize(&mut self, window_aspect: f32) {
        self.aspect = positive_or(window_aspect, self.aspect);
        if self.projection == Projection::Orthographic {
            self.half_extents = frustum_half_extents(self.size, self.aspect, self.doc_zoom);
        }
    }

    pub fn view(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.pose.orientation, self.pose.position).inverse()
    }

    pub fn projection_matrix(&self) -> Mat4 {
        match self.projection {
            Projection::Orthographic => {
                let [hx, hy] = self.half_extents;
                let z = self.pose.zoom;
                Mat4::orthographic_rh(-hx / z, hx / z, -hy / z, hy / z, self.near, self.far)
            }
            Projection::Perspective => Mat4::perspective_rh(
                PERSPECTIVE_FOV_Y_DEG.to_radians(),
                self.aspect,
                self.near,
                self.far,
            ),
        }
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view()
    }

    /// World units covered by one pixel at the target, for a viewport
    /// `viewport_height` pixels tall.
    pub fn world_per_pixel(&self, viewport_height: f32) -> f32 {
        let h = positive_or(viewport_height, 1.0);
        match self.projection {
            Projection::Orthographic => 2.0 * self.half_extents[1] / (self.pose.zoom * h),
            Projection::Perspective => {
                let half_fov = PERSPECTIVE_FOV_Y_DEG.to_radians() * 0.5;
                2.0 * self.pose.distance() * half_fov.tan() / h
            }
        }
    }

    /// Rotates the camera about the target, around its own up (`yaw`) and
    /// right (`pitch`) axes. The target distance is preserved.
    pub fn orbit(&mut self, yaw: f32, pitch: f32) {
        let distance = self.pose.distance();
        let orientation =
            (self.pose.orientation * Quat::from_rotation_y(yaw) * Quat::from_rotation_x(pitch))
                .normalize();
        self.pose.orientation = orientation;
        self.pose.position = self.pose.target + orientation * Vec3::new(0.0, 0.0, distance);
    }

    /// Moves camera and target together so the scene follows a drag of
    /// `(dx, dy)` pixels (+Y down).
    pub fn pan(&mut self, dx: f32, dy: f32, viewport_height: f32) {
        let scale = self.world_per_pixel(viewport_height);
        let delta = self.pose.orientation * Vec3::new(-dx * scale, dy * scale, 0.0);
        self.pose.position += delta;
        self.pose.target += delta;
    }

    /// Magnifies the view by `factor` (> 1 zooms in).
    ///
    /// Orthographic cameras scale the frustum; perspective cameras dolly toward
    /// the target.
    pub fn zoom_by(&mut self, factor: f32) {
        if !(factor.is_finite() && factor > 0.0) {
            return;
        }
        match self.projection {
            Projection::Orthographic => {
                self.pose.zoom = (self.pose.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);
            }
            Projection::Perspective => {
                let distance = (self.pose.distance() / factor).clamp(MIN_DISTANCE, self.far);
                self.pose.position =
                    self.pose.target + self.pose.orientation * Vec3::new(0.0, 0.0, distance);
            }
        }
    }

    /// Restores the pose derived from the document.
    pub fn reset(&mut self) {
        self.pose = self.home;
    }
}
