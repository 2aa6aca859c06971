use std::path::PathBuf;

/// Failure to turn a bitmap file into a GPU texture.
#[derive(Debug, thiserror::Error)]
pub enum TextureError {
    #[error("cannot open bitmap {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot decode bitmap {}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("bitmap {} has no pixels", path.display())]
    Empty { path: PathBuf },

    #[error("bitmap {} is {width}x{height}, device limit is {max}", path.display())]
    TooLarge {
        path: PathBuf,
        width: u32,
        height: u32,
        max: u32,
    },
}
