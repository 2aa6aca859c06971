use std::path::Path;

use super::{decode_bitmap, BitmapImage, TextureError};

/// Sampling state attached to a loaded texture.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SamplerParams {
    pub filter: wgpu::FilterMode,
    pub address_mode: wgpu::AddressMode,
}

impl Default for SamplerParams {
    fn default() -> Self {
        Self {
            filter: wgpu::FilterMode::Linear,
            address_mode: wgpu::AddressMode::ClampToEdge,
        }
    }
}

/// A sampled 2D texture with its default view and sampler.
///
/// Owns the GPU allocation. Call [`GpuTexture::release`] to free it
/// explicitly; dropping also frees it once the GPU is done with it.
pub struct GpuTexture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
    pub width: u32,
    pub height: u32,
}

impl GpuTexture {
    /// Texel format of every bitmap texture.
    ///
    /// UNORM (not sRGB) so shaders see the stored bytes as `byte / 255`.
    pub const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

    /// Uploads a decoded bitmap.
    pub fn from_bitmap(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        label: &str,
        bitmap: &BitmapImage,
        params: &SamplerParams,
    ) -> Result<Self, TextureError> {
        check_dimensions(
            Path::new(label),
            bitmap.width,
            bitmap.height,
            device.limits().max_texture_dimension_2d,
        )?;

        let size = wgpu::Extent3d {
            width: bitmap.width,
            height: bitmap.height,
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::FORMAT,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &bitmap.rgba,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(bitmap.bytes_per_row()),
                rows_per_image: Some(bitmap.height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some(label),
            address_mode_u: params.address_mode,
            address_mode_v: params.address_mode,
            address_mode_w: params.address_mode,
            mag_filter: params.filter,
            min_filter: params.filter,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        });

        Ok(Self {
            texture,
            view,
            sampler,
            width: bitmap.width,
            height: bitmap.height,
        })
    }

    /// Frees the GPU allocation now.
    pub fn release(self) {
        self.texture.destroy();
    }
}

/// Decodes the BMP at `path` and uploads it as a texture.
pub fn load_bitmap_texture(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    path: &Path,
    params: &SamplerParams,
) -> Result<GpuTexture, TextureError> {
    let bitmap = decode_bitmap(path)?;
    let label = path.display().to_string();
    let texture = GpuTexture::from_bitmap(device, queue, &label, &bitmap, params)?;

    log::info!("loaded {} ({}x{})", label, texture.width, texture.height);
    Ok(texture)
}

fn check_dimensions(path: &Path, width: u32, height: u32, max: u32) -> Result<(), TextureError> {
    if width == 0 || height == 0 {
        return Err(TextureError::Empty {
            path: path.to_path_buf(),
        });
    }
    if width > max || height > max {
        return Err(TextureError::TooLarge {
            path: path.to_path_buf(),
            width,
            height,
            max,
        });
    }
    Ok(())
}
