use std::path::Path;

use image::{ImageFormat, ImageReader};

use super::TextureError;

/// Decoded bitmap, expanded to tightly packed RGBA8 rows.
///
/// Rows keep the file's storage order: bottom row first. Texture row 0 is
/// therefore the bottom of the picture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitmapImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl BitmapImage {
    /// Bytes in one row of `rgba`.
    #[inline]
    pub fn bytes_per_row(&self) -> u32 {
        self.width * 4
    }
}

/// Reads and decodes a BMP file.
///
/// The file is always decoded as BMP regardless of extension; anything else is
/// reported as a decode failure. 24-bit sources get an opaque alpha channel.
/// The decoder yields rows top first, so they are flipped back into storage
/// order before upload.
pub fn decode_bitmap(path: &Path) -> Result<BitmapImage, TextureError> {
    let mut reader = ImageReader::open(path).map_err(|source| TextureError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    reader.set_format(ImageFormat::Bmp);

    let decoded = reader.decode().map_err(|source| TextureError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    let mut rgba = decoded.to_rgba8();
    image::imageops::flip_vertical_in_place(&mut rgba);
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(TextureError::Empty {
            path: path.to_path_buf(),
        });
    }

    Ok(BitmapImage {
        width,
        height,
        rgba: rgba.into_raw(),
    })
}
