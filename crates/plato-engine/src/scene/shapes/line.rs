use glam::Vec3;

use crate::paint::Color;
use crate::scene::{DrawCmd, DrawList};

/// World-space line segment.
///
/// `width` is recorded but rasterized lines are always one pixel wide.
#[derive(Debug, Clone, PartialEq)]
pub struct LineCmd {
    pub start: Vec3,
    pub end: Vec3,
    pub color: Color,
    pub width: f32,
}

impl DrawList {
    /// Records a line segment.
    #[inline]
    pub fn push_line(&mut self, start: Vec3, end: Vec3, color: Color, width: f32) {
        self.push(DrawCmd::Line(LineCmd { start, end, color, width }));
    }

    /// Iterates line commands in insertion order.
    pub fn lines(&self) -> impl Iterator<Item = &LineCmd> {
        self.items().iter().filter_map(|cmd| match cmd {
            DrawCmd::Line(l) => Some(l),
            _ => None,
        })
    }
}
