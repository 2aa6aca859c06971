//! Multitex engine crate.
//!
//! This crate owns the platform + GPU runtime pieces used by the sample:
//! window and event loop, device and surface, bitmap textures and WGSL
//! compilation with name-based binding lookup.

pub mod core;
pub mod device;
pub mod window;

pub mod coords;
pub mod logging;
pub mod render;
pub mod shader;
pub mod texture;
