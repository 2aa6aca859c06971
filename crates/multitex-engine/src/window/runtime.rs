use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App as CoreApp, AppControl, FrameCtx, InitCtx, WindowCtx};
use crate::device::{Gpu, GpuInit};

use super::PixelFormat;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: PhysicalSize<u32>,
    pub pixel_format: PixelFormat,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "multitex".to_string(),
            initial_size: PhysicalSize::new(1280, 720),
            pixel_format: PixelFormat::Rgb,
        }
    }
}

impl RuntimeConfig {
    /// Fills in the surface alpha mode from the pixel format unless the GPU
    /// init already pins one.
    fn apply_to(&self, mut gpu_init: GpuInit) -> GpuInit {
        if gpu_init.alpha_mode.is_none() {
            gpu_init.alpha_mode = Some(self.pixel_format.composite_alpha_mode());
        }
        gpu_init
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens the window, runs `app` to completion and returns.
    ///
    /// Returns the initialization error if `App::on_init` failed; in that case
    /// no frame was rendered.
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: 'static + CoreApp,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let gpu_init = config.apply_to(gpu_init);
        let mut state = AppState::new(config, gpu_init, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        state.phase.into_result()
    }
}

#[self_referencing]
struct WindowEntry {
    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

enum Phase {
    /// Waiting for the first `resumed`.
    Starting,
    /// `on_init` succeeded; frames are being delivered.
    Running,
    /// `on_shutdown` has run.
    Finished,
    /// Window/GPU creation or `on_init` failed.
    Failed(anyhow::Error),
}

impl Phase {
    /// Phase entered once startup has finished, successfully or not.
    fn after_start(result: Result<()>) -> Self {
        match result {
            Ok(()) => Self::Running,
            Err(e) => Self::Failed(e),
        }
    }

    fn delivers_frames(&self) -> bool {
        matches!(self, Self::Running)
    }

    /// Moves `Running` to `Finished`. Returns whether `on_shutdown` is due.
    fn begin_shutdown(&mut self) -> bool {
        if !self.delivers_frames() {
            return false;
        }
        *self = Self::Finished;
        true
    }

    /// Outcome reported by `Runtime::run`.
    fn into_result(self) -> Result<()> {
        match self {
            Self::Failed(err) => Err(err),
            _ => Ok(()),
        }
    }
}

struct AppState<A>
where
    A: CoreApp + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    entry: Option<WindowEntry>,
    phase: Phase,
    exit_requested: bool,
}

impl<A> AppState<A>
where
    A: CoreApp + 'static,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Self {
        Self {
            config,
            gpu_init,
            app,
            entry: None,
            phase: Phase::Starting,
            exit_requested: false,
        }
    }

    fn request_exit(&mut self, event_loop: &ActiveEventLoop) {
        self.exit_requested = true;
        event_loop.exit();
    }

    fn create_window_entry(&self, event_loop: &ActiveEventLoop) -> Result<WindowEntry> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size)
            .with_transparent(self.config.pixel_format.has_alpha());

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let gpu_init = self.gpu_init.clone();

        WindowEntryTryBuilder {
            window,
            gpu_builder: |w| {
                pollster::block_on(Gpu::new(w, gpu_init))
                    .context("GPU initialization failed for window")
            },
        }
        .try_build()
    }

    /// Creates the window and GPU context, then runs `App::on_init`.
    fn start(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let entry = self.create_window_entry(event_loop)?;

        let app = &mut self.app;
        entry.with(|fields| {
            let ctx = InitCtx {
                window: WindowCtx {
                    id: fields.window.id(),
                    window: fields.window,
                },
                gpu: fields.gpu,
            };
            app.on_init(&ctx)
        })?;

        entry.with_window(|w| w.request_redraw());
        self.entry = Some(entry);
        Ok(())
    }

    /// Runs `App::on_shutdown` at most once, and only after a successful init.
    fn shutdown(&mut self) {
        if !self.phase.begin_shutdown() {
            return;
        }

        if let Some(entry) = self.entry.as_ref() {
            let app = &mut self.app;
            entry.with_gpu(|gpu| app.on_shutdown(gpu));
        }
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: CoreApp + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if !matches!(self.phase, Phase::Starting) {
            return;
        }

        let result = self.start(event_loop);
        if let Err(e) = &result {
            log::error!("initialization failed: {e:#}");
        }

        self.phase = Phase::after_start(result);
        if self.phase.delivers_frames() {
            log::info!("initialization complete; entering frame loop");
        } else {
            // Dropping the entry releases the surface and window before exit.
            self.entry = None;
            self.request_exit(event_loop);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous redraw: one frame per loop iteration.
        if let Some(entry) = self.entry.as_ref() {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.exit_requested || !self.phase.delivers_frames() {
            return;
        }

        if self.app.on_window_event(window_id, &event) == AppControl::Exit {
            self.request_exit(event_loop);
            return;
        }

        let Some(entry) = self.entry.as_mut() else {
            return;
        };

        // Runtime-managed window lifecycle / resize / redraw handling.
        match &event {
            WindowEvent::CloseRequested => {
                log::info!("window close requested");
                self.request_exit(event_loop);
            }

            WindowEvent::Resized(new_size) => {
                entry.with_gpu_mut(|gpu| gpu.resize(*new_size));
                entry.with_window(|w| w.request_redraw());
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                let new_size = entry.with_window(|w| w.inner_size());
                entry.with_gpu_mut(|gpu| gpu.resize(new_size));
                entry.with_window(|w| w.request_redraw());
            }

            WindowEvent::RedrawRequested => {
                let app = &mut self.app;
                let control = entry.with_mut(|fields| {
                    let mut ctx = FrameCtx {
                        window: WindowCtx {
                            id: window_id,
                            window: fields.window,
                        },
                        gpu: fields.gpu,
                    };
                    app.on_frame(&mut ctx)
                });

                if control == AppControl::Exit {
                    self.request_exit(event_loop);
                }
            }

            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.shutdown();
        // Drops the GPU context before the window it borrows.
        self.entry = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── lifecycle ───────────────────────────────────────────────────────────

    #[test]
    fn successful_start_runs_frames_then_shuts_down_once() {
        let mut phase = Phase::after_start(Ok(()));
        assert!(phase.delivers_frames());

        assert!(phase.begin_shutdown());
        assert!(matches!(phase, Phase::Finished));
        assert!(!phase.delivers_frames());

        assert!(!phase.begin_shutdown());
        assert!(phase.into_result().is_ok());
    }

    #[test]
    fn failed_start_never_delivers_frames_or_shuts_down() {
        let mut phase = Phase::after_start(Err(anyhow::anyhow!("no light map")));
        assert!(!phase.delivers_frames());
        assert!(!phase.begin_shutdown());

        let err = phase.into_result().unwrap_err();
        assert_eq!(err.to_string(), "no light map");
    }

    #[test]
    fn exit_before_start_skips_shutdown() {
        let mut phase = Phase::Starting;
        assert!(!phase.delivers_frames());
        assert!(!phase.begin_shutdown());
        assert!(phase.into_result().is_ok());
    }

    // ── config ──────────────────────────────────────────────────────────────

    #[test]
    fn default_config() {
        let c = RuntimeConfig::default();
        assert_eq!(c.initial_size, PhysicalSize::new(1280, 720));
        assert_eq!(c.pixel_format, PixelFormat::Rgb);
    }

    #[test]
    fn pixel_format_sets_alpha_mode() {
        let c = RuntimeConfig {
            pixel_format: PixelFormat::Rgba,
            ..RuntimeConfig::default()
        };
        let init = c.apply_to(GpuInit::default());
        assert_eq!(init.alpha_mode, Some(wgpu::CompositeAlphaMode::PreMultiplied));
    }

    #[test]
    fn explicit_alpha_mode_is_kept() {
        let init = GpuInit {
            alpha_mode: Some(wgpu::CompositeAlphaMode::Inherit),
            ..GpuInit::default()
        };
        let init = RuntimeConfig::default().apply_to(init);
        assert_eq!(init.alpha_mode, Some(wgpu::CompositeAlphaMode::Inherit));
    }
}
