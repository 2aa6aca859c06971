use anyhow::Result;

use multitex_engine::core::{App, AppControl, FrameCtx, InitCtx};
use multitex_engine::device::Gpu;
use multitex_engine::texture::SamplerParams;

use crate::config::AssetPaths;
use crate::render_pass::RenderState;

/// Drives [`RenderState`] through the runtime's lifecycle callbacks.
pub struct MultiTextureApp {
    assets: AssetPaths,
    sampler: SamplerParams,
    state: Option<RenderState>,
}

impl MultiTextureApp {
    pub fn new(assets: AssetPaths) -> Self {
        Self {
            assets,
            sampler: SamplerParams::default(),
            state: None,
        }
    }
}

impl App for MultiTextureApp {
    fn on_init(&mut self, ctx: &InitCtx<'_, '_>) -> Result<()> {
        let size = ctx.window.physical_size();
        log::info!("initializing render pass at {}x{}", size.width, size.height);

        let state = RenderState::initialize(ctx.gpu, &self.assets, &self.sampler)?;
        log::info!("render pass ready, texture units {:?}", state.slots());
        self.state = Some(state);
        Ok(())
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let Some(state) = self.state.as_ref() else {
            return AppControl::Exit;
        };

        ctx.render(state.clear_color(), |rctx, target| state.draw(rctx, target))
    }

    fn on_shutdown(&mut self, _gpu: &Gpu<'_>) {
        if let Some(state) = self.state.take() {
            state.shutdown();
        }
    }
}
