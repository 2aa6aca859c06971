use anyhow::Result;
use winit::event::WindowEvent;
use winit::window::WindowId;

use super::ctx::{FrameCtx, InitCtx};
use crate::device::Gpu;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract driven by [`Runtime`](crate::window::Runtime).
///
/// Call order is fixed: `on_init` once, then `on_frame` once per frame until
/// the window closes, then `on_shutdown` once. If `on_init` fails the frame
/// loop never starts and `on_shutdown` is not called.
pub trait App {
    /// Called once after the window and GPU context exist.
    fn on_init(&mut self, ctx: &InitCtx<'_, '_>) -> Result<()>;

    /// Called for window events.
    fn on_window_event(&mut self, window_id: WindowId, event: &WindowEvent) -> AppControl {
        let _ = (window_id, event);
        AppControl::Continue
    }

    /// Called once per rendered frame.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;

    /// Called once after the frame loop ends, while the GPU context is alive.
    fn on_shutdown(&mut self, gpu: &Gpu<'_>) {
        let _ = gpu;
    }
}
