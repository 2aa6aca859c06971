//! CPU reference for the fragment stage's compositing formula.
//!
//! `fs_main` in `shaders/multitex.wgsl` computes the same thing per texel.

use multitex_engine::coords::ColorRgba;

/// Added to the light map before modulation.
pub const LIGHT_BIAS: f32 = 0.25;

/// `base * (light + LIGHT_BIAS)`, componentwise over RGBA, unclamped.
pub fn light_map_blend(base: ColorRgba, light: ColorRgba) -> ColorRgba {
    base.modulate(light.offset(LIGHT_BIAS))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: ColorRgba, b: ColorRgba) -> bool {
        let (a, b) = (a.to_array(), b.to_array());
        a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() < 1e-6)
    }

    #[test]
    fn unlit_texel_keeps_a_quarter() {
        let base = ColorRgba::new(0.8, 0.4, 0.2, 1.0);
        let out = light_map_blend(base, ColorRgba::transparent());
        assert!(approx(out, ColorRgba::new(0.2, 0.1, 0.05, 0.25)));
    }

    #[test]
    fn fully_lit_texel_overshoots() {
        let out = light_map_blend(ColorRgba::white(), ColorRgba::white());
        assert_eq!(out, ColorRgba::new(1.25, 1.25, 1.25, 1.25));
    }

    #[test]
    fn solid_inputs_blend_componentwise() {
        let base = ColorRgba::new(0.5, 0.25, 1.0, 0.5);
        let light = ColorRgba::new(0.75, 0.0, 0.5, 1.0);
        let out = light_map_blend(base, light);
        assert!(approx(
            out,
            ColorRgba::new(0.5 * 1.0, 0.25 * 0.25, 1.0 * 0.75, 0.5 * 1.25)
        ));
    }

    #[test]
    fn black_base_stays_black() {
        let out = light_map_blend(ColorRgba::new(0.0, 0.0, 0.0, 0.0), ColorRgba::white());
        assert_eq!(out, ColorRgba::transparent());
    }
}
