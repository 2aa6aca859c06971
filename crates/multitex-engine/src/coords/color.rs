/// Linear straight-alpha RGBA color.
///
/// Values are not clamped; arithmetic helpers mirror what a shader computes
/// before the output target quantizes the result.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct ColorRgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl ColorRgba {
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Fully transparent black.
    #[inline]
    pub const fn transparent() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    #[inline]
    pub const fn white() -> Self {
        Self::new(1.0, 1.0, 1.0, 1.0)
    }

    /// Componentwise product.
    #[inline]
    pub fn modulate(self, other: Self) -> Self {
        Self::new(self.r * other.r, self.g * other.g, self.b * other.b, self.a * other.a)
    }

    /// Adds `bias` to every channel, alpha included.
    #[inline]
    pub fn offset(self, bias: f32) -> Self {
        Self::new(self.r + bias, self.g + bias, self.b + bias, self.a + bias)
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transparent_is_all_zero() {
        assert_eq!(ColorRgba::transparent().to_array(), [0.0; 4]);
    }

    #[test]
    fn modulate_is_componentwise() {
        let a = ColorRgba::new(0.5, 1.0, 0.25, 1.0);
        let b = ColorRgba::new(0.5, 0.5, 4.0, 0.0);
        assert_eq!(a.modulate(b), ColorRgba::new(0.25, 0.5, 1.0, 0.0));
    }

    #[test]
    fn offset_touches_alpha_and_does_not_clamp() {
        let c = ColorRgba::white().offset(0.25);
        assert_eq!(c, ColorRgba::new(1.25, 1.25, 1.25, 1.25));
    }

    #[test]
    fn to_wgpu_preserves_channels() {
        let w = ColorRgba::new(0.5, 0.25, 0.0, 1.0).to_wgpu();
        assert_eq!((w.r, w.g, w.b, w.a), (0.5, 0.25, 0.0, 1.0));
    }
}
