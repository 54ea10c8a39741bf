//! Trackball-style navigation.
//!
//! Pointer drags rotate, pan or zoom depending on the button (and on the held
//! A / S / D mode keys; Shift, Ctrl or Meta make a left drag pan), the wheel zooms, arrow keys pan and R returns to the
//! document's framing. In pan mode, rotation is disabled and the left button
//! pans.

use plato_engine::input::{InputFrame, InputState, Key, MouseButton};

use crate::camera::CameraRig;

/// Radians of rotation per pixel dragged.
const ROTATE_PER_PIXEL: f32 = 0.01;
/// Zoom factor applied per wheel line.
const ZOOM_PER_LINE: f32 = 0.95;
/// Pixels of vertical drag equivalent to one wheel line.
const DRAG_PIXELS_PER_LINE: f32 = 20.0;
/// Pixels panned per frame while an arrow key is held.
const KEY_PAN_PIXELS: f32 = 7.0;

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum NavigationMode {
    #[default]
    Orbit,
    Pan,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DragAction {
    Rotate,
    Zoom,
    Pan,
}

/// Input relevant to navigation, collected for one frame.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct ControlInput {
    /// Pointer motion in logical pixels (+Y down).
    pub pointer_delta: (f32, f32),
    pub left: bool,
    pub middle: bool,
    pub right: bool,
    /// Held A / S / D override for the left button.
    pub mode_key: Option<DragAction>,
    /// Shift / Ctrl / Meta held: a left drag pans.
    pub pan_modifier: bool,
    /// Wheel lines (+ = away from user).
    pub scroll: f32,
    /// Held arrow keys as a pan direction in drag pixels.
    pub arrows: (f32, f32),
    pub reset: bool,
}

impl ControlInput {
    pub fn from_frame(state: &InputState, frame: &InputFrame) -> Self {
        let mode_key = if state.key_down(Key::A) {
            Some(DragAction::Rotate)
        } else if state.key_down(Key::S) {
            Some(DragAction::Zoom)
        } else if state.key_down(Key::D) {
            Some(DragAction::Pan)
        } else {
            None
        };

        let axis = |neg: Key, pos: Key| {
            let mut v = 0.0;
            if state.key_down(neg) {
                v -= KEY_PAN_PIXELS;
            }
            if state.key_down(pos) {
                v += KEY_PAN_PIXELS;
            }
            v
        };

        Self {
            pointer_delta: frame.pointer_delta,
            left: state.button_down(MouseButton::Left),
            middle: state.button_down(MouseButton::Middle),
            right: state.button_down(MouseButton::Right),
            mode_key,
            pan_modifier: state.modifiers.shift || state.modifiers.ctrl || state.modifiers.meta,
            scroll: frame.scroll_delta,
            // Arrow keys move the view, i.e. drag the scene the opposite way.
            arrows: (axis(Key::ArrowRight, Key::ArrowLeft), axis(Key::ArrowDown, Key::ArrowUp)),
            reset: frame.keys_pressed.contains(&Key::R),
        }
    }
}

/// Applies [`ControlInput`] to a [`CameraRig`].
#[derive(Debug, Clone, Default)]
pub struct OrbitControls {
    mode: NavigationMode,
}

impl OrbitControls {
    pub fn new(mode: NavigationMode) -> Self {
        Self { mode }
    }

    #[inline]
    pub fn mode(&self) -> NavigationMode {
        self.mode
    }

    /// What a drag does with the current buttons and mode keys.
    pub fn drag_action(&self, input: &ControlInput) -> Option<DragAction> {
        let action = if input.left {
            Some(match (input.mode_key, input.pan_modifier, self.mode) {
                (Some(key_action), _, _) => key_action,
                (None, true, _) | (None, false, NavigationMode::Pan) => DragAction::Pan,
                (None, false, NavigationMode::Orbit) => DragAction::Rotate,
            })
        } else if input.right {
            Some(DragAction::Pan)
        } else if input.middle {
            Some(DragAction::Zoom)
        } else {
            None
        };

        match (self.mode, action) {
            (NavigationMode::Pan, Some(DragAction::Rotate)) => Some(DragAction::Pan),
            (_, a) => a,
        }
    }

    /// Updates the camera; returns whether anything changed.
    ///
    /// `viewport_height` is in the same (logical) pixels as the pointer delta.
    pub fn update(&mut self, rig: &mut CameraRig, input: &ControlInput, viewport_height: f32) -> bool {
        if input.reset {
            rig.reset();
            return true;
        }

        let mut changed = false;
        let (dx, dy) = input.pointer_delta;

        if (dx, dy) != (0.0, 0.0) {
            match self.drag_action(input) {
                Some(DragAction::Rotate) => {
                    rig.orbit(-dx * ROTATE_PER_PIXEL, -dy * ROTATE_PER_PIXEL);
                    changed = true;
                }
                Some(DragAction::Pan) => {
                    rig.pan(dx, dy, viewport_height);
                    changed = true;
                }
                Some(DragAction::Zoom) => {
                    rig.zoom_by(zoom_factor(-dy / DRAG_PIXELS_PER_LINE));
                    changed = true;
                }
                None => {}
            }
        }

        if input.scroll != 0.0 {
            rig.zoom_by(zoom_factor(input.scroll));
            changed = true;
        }

        if input.arrows != (0.0, 0.0) {
            rig.pan(input.arrows.0, input.arrows.1, viewport_height);
            changed = true;
        }

        changed
    }
}

/// Magnification for `lines` of wheel motion; each line away from the user
/// zooms in by `1 / 0.95`.
fn zoom_factor(lines: f32) -> f32 {
    ZOOM_PER_LINE.powf(-lines)
}
