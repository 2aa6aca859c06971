//! WGSL compilation and reflection.
//!
//! Shaders are parsed and validated with `naga` before wgpu sees them, so
//! compile failures surface as [`ShaderError`] instead of a device panic, and
//! binding slots can be looked up by name.

mod compile;
mod error;
mod reflect;

pub use compile::{compile_wgsl, parse_wgsl, CompiledShader};
pub use error::ShaderError;
pub use reflect::{ResourceSlot, ShaderReflection, Stage};
