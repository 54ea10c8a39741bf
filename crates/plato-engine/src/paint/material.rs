use super::Color;

/// Which faces of a mesh are rasterized.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum Side {
    /// Counter-clockwise faces only; back faces are culled.
    #[default]
    Front,
    /// Both faces; the back face is lit with a flipped normal.
    Double,
}

/// Lit surface description attached to a mesh draw command.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Material {
    pub color: Color,
    pub side: Side,
}

impl Material {
    #[inline]
    pub const fn new(color: Color, side: Side) -> Self {
        Self { color, side }
    }

    #[inline]
    pub const fn front(color: Color) -> Self {
        Self::new(color, Side::Front)
    }

    #[inline]
    pub const fn double_sided(color: Color) -> Self {
        Self::new(color, Side::Double)
    }
}
