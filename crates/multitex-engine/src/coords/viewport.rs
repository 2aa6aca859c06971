use winit::dpi::PhysicalSize;

/// Viewport rectangle in physical pixels.
///
/// Passed to `RenderPass::set_viewport` each frame; a full-window viewport
/// starts at the origin and spans the drawable size.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Viewport {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[inline]
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Viewport covering the whole drawable area.
    #[inline]
    pub const fn full(size: PhysicalSize<u32>) -> Self {
        Self::new(0, 0, size.width, size.height)
    }

    /// Zero-area viewports cannot be rendered into (e.g. minimized windows).
    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// `(x, y, width, height, min_depth, max_depth)` in the form wgpu expects.
    #[inline]
    pub fn to_wgpu(self) -> (f32, f32, f32, f32, f32, f32) {
        (
            self.x as f32,
            self.y as f32,
            self.width as f32,
            self.height as f32,
            0.0,
            1.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_matches_window_size() {
        let v = Viewport::full(PhysicalSize::new(1600, 800));
        assert_eq!(v, Viewport::new(0, 0, 1600, 800));
        assert!(v.is_valid());
    }

    #[test]
    fn zero_size_is_invalid() {
        assert!(!Viewport::full(PhysicalSize::new(0, 800)).is_valid());
        assert!(!Viewport::full(PhysicalSize::new(1600, 0)).is_valid());
    }

    #[test]
    fn to_wgpu_uses_unit_depth_range() {
        let (x, y, w, h, near, far) = Viewport::new(0, 0, 320, 240).to_wgpu();
        assert_eq!((x, y, w, h), (0.0, 0.0, 320.0, 240.0));
        assert_eq!((near, far), (0.0, 1.0));
    }
}
