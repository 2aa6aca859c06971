//! Coordinate and color types shared between the engine and render passes.
//!
//! Canonical framebuffer space:
//! - Physical pixels
//! - Origin top-left
//! - +X right, +Y down
//!
//! Geometry handed to shaders is already in clip space; only the viewport is
//! expressed in pixels.

mod color;
mod viewport;

pub use color::ColorRgba;
pub use viewport::Viewport;
