//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and Window, and wires them to the GPU layer.

mod pixel_format;
mod runtime;

pub use pixel_format::PixelFormat;
pub use runtime::{Runtime, RuntimeConfig};
