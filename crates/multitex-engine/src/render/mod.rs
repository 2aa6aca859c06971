//! GPU rendering subsystem.
//!
//! Render passes own their GPU resources (pipelines, buffers, textures) and
//! record commands into the [`RenderTarget`] handed out by
//! [`FrameCtx::render`](crate::core::FrameCtx::render).
//!
//! Convention:
//! - Vertex positions are already in clip space.
//! - The viewport is in physical pixels and spans the whole surface.

mod ctx;

pub use ctx::{RenderCtx, RenderTarget};
