//! Bitmap texture loading.
//!
//! Decodes BMP files from disk and uploads them as sampled 2D GPU textures.
//! Decoding is independent of the GPU so it can be exercised without a device.

mod bitmap;
mod error;
mod gpu_texture;

pub use bitmap::{decode_bitmap, BitmapImage};
pub use error::TextureError;
pub use gpu_texture::{load_bitmap_texture, GpuTexture, SamplerParams};
