/// Linear RGBA color with straight (non-premultiplied) alpha.
///
/// Scene documents author colors in sRGB; use [`Color::from_srgb`] to convert
/// them. The render surface is sRGB, so shaders output linear values.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Self = Self::from_linear(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::from_linear(0.0, 0.0, 0.0, 1.0);

    #[inline]
    pub const fn from_linear(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a linear color from sRGB-encoded components in `[0, 1]`.
    ///
    /// Alpha is not gamma-encoded and is only clamped.
    #[inline]
    pub fn from_srgb(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self {
            r: srgb_to_linear(r),
            g: srgb_to_linear(g),
            b: srgb_to_linear(b),
            a: a.clamp(0.0, 1.0),
        }
    }

    /// Creates a linear color from `[r, g, b, a]` sRGB components.
    #[inline]
    pub fn from_srgb_array(c: [f32; 4]) -> Self {
        Self::from_srgb(c[0], c[1], c[2], c[3])
    }

    #[inline]
    pub fn is_opaque(self) -> bool {
        self.a >= 1.0
    }

    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    #[inline]
    pub fn to_wgpu(self) -> wgpu::Color {
        wgpu::Color {
            r: self.r as f64,
            g: self.g as f64,
            b: self.b as f64,
            a: self.a as f64,
        }
    }
}

fn srgb_to_linear(c: f32) -> f32 {
    let c = c.clamp(0.0, 1.0);
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn srgb_endpoints_are_preserved() {
        let c = Color::from_srgb(0.0, 1.0, 0.0, 1.0);
        assert_eq!(c, Color::from_linear(0.0, 1.0, 0.0, 1.0));
    }

    #[test]
    fn srgb_mid_grey_is_darker_in_linear() {
        let c = Color::from_srgb(0.5, 0.5, 0.5, 1.0);
        assert_relative_eq!(c.r, 0.214_041, epsilon = 1e-5);
    }

    #[test]
    fn alpha_is_clamped_not_encoded() {
        let c = Color::from_srgb(1.0, 1.0, 1.0, 1.5);
        assert_eq!(c.a, 1.0);
        let c = Color::from_srgb(1.0, 1.0, 1.0, 0.5);
        assert_eq!(c.a, 0.5);
        assert!(!c.is_opaque());
    }
}
