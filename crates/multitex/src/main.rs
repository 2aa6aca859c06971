//! Single-pass multi-texture compositing sample.
//!
//! Draws one quad sampling a base map and a light map and combining them as
//! `base * (light + 0.25)`.

mod app;
#[cfg(test)]
mod blend;
mod config;
mod error;
mod geometry;
mod render_pass;

use anyhow::Result;

use multitex_engine::logging::init_logging;
use multitex_engine::window::Runtime;

use crate::app::MultiTextureApp;
use crate::config::AssetPaths;

fn main() -> Result<()> {
    init_logging(config::logging_config());

    let app = MultiTextureApp::new(AssetPaths::default());
    Runtime::run(config::runtime_config(), config::gpu_init(), app)
}
