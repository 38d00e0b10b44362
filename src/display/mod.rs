//! Frame storage and presentation.
//!
//! `PixelBuffer` is always available; the SDL2 window lives behind the
//! `viewer` feature because it links against the system SDL2 library.

mod pixel_buffer;
#[cfg(feature = "viewer")]
mod window;

pub use pixel_buffer::PixelBuffer;
#[cfg(feature = "viewer")]
pub use window::{Display, InputEvent, RenderTarget};

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("pixel data ({len} bytes) does not match {width}x{height}")]
    SizeMismatch { width: u32, height: u32, len: usize },
    #[error("failed to write image {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}
