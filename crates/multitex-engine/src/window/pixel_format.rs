/// Requested framebuffer channel layout.
///
/// Only color channels are configurable; no depth or stencil attachment is
/// ever created by the runtime.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum PixelFormat {
    /// Color only; the window composites as opaque.
    #[default]
    Rgb,
    /// Color plus destination alpha; the window composites with its alpha.
    Rgba,
}

impl PixelFormat {
    #[inline]
    pub fn has_alpha(self) -> bool {
        matches!(self, Self::Rgba)
    }

    /// Surface alpha mode this layout asks for.
    #[inline]
    pub fn composite_alpha_mode(self) -> wgpu::CompositeAlphaMode {
        match self {
            Self::Rgb => wgpu::CompositeAlphaMode::Opaque,
            Self::Rgba => wgpu::CompositeAlphaMode::PreMultiplied,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_is_opaque() {
        assert!(!PixelFormat::Rgb.has_alpha());
        assert_eq!(PixelFormat::Rgb.composite_alpha_mode(), wgpu::CompositeAlphaMode::Opaque);
    }

    #[test]
    fn rgba_keeps_alpha() {
        assert!(PixelFormat::Rgba.has_alpha());
        assert_eq!(
            PixelFormat::Rgba.composite_alpha_mode(),
            wgpu::CompositeAlphaMode::PreMultiplied
        );
    }

    #[test]
    fn default_is_rgb() {
        assert_eq!(PixelFormat::default(), PixelFormat::Rgb);
    }
}
