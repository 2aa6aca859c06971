//! Fixed configuration of the sample.

use std::path::PathBuf;

use winit::dpi::PhysicalSize;

use multitex_engine::device::GpuInit;
use multitex_engine::logging::LoggingConfig;
use multitex_engine::window::{PixelFormat, RuntimeConfig};

pub const WINDOW_TITLE: &str = "MultiTexture";
pub const WINDOW_WIDTH: u32 = 1600;
pub const WINDOW_HEIGHT: u32 = 800;

/// Bitmaps sampled by the render pass, relative to the working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetPaths {
    pub base_map: PathBuf,
    pub light_map: PathBuf,
}

impl Default for AssetPaths {
    fn default() -> Self {
        Self {
            base_map: PathBuf::from("China.bmp"),
            light_map: PathBuf::from("world3.bmp"),
        }
    }
}

pub fn runtime_config() -> RuntimeConfig {
    RuntimeConfig {
        title: WINDOW_TITLE.to_string(),
        initial_size: PhysicalSize::new(WINDOW_WIDTH, WINDOW_HEIGHT),
        pixel_format: PixelFormat::Rgb,
    }
}

/// Non-sRGB surface so the blend result is written out as computed.
pub fn gpu_init() -> GpuInit {
    GpuInit {
        prefer_srgb: false,
        ..GpuInit::default()
    }
}

pub fn logging_config() -> LoggingConfig {
    LoggingConfig {
        fallback_filter: "info,wgpu_core=warn,wgpu_hal=warn,naga=warn".to_string(),
        ..LoggingConfig::default()
    }
}
