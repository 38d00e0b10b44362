use super::OutputError;
use image::RgbaImage;
use std::path::Path;

// ============================================================================
// PixelBuffer
// ============================================================================

/// RGBA8 pixel buffer, rows top to bottom, bytes in R, G, B, A order.
/// Every frame the lensing core produces lands here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    pixels: Vec<u8>,
    width: u32,
    height: u32,
}

impl PixelBuffer {
    /// Create a zeroed (transparent black) buffer
    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            pixels: vec![0; width as usize * height as usize * 4],
            width,
            height,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bytes per row
    #[inline]
    pub fn stride(&self) -> usize {
        self.width as usize * 4
    }

    /// Check if coordinates are within bounds
    #[inline]
    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32
    }

    /// Calculate byte offset for pixel at (x, y)
    #[inline]
    fn pixel_index(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }

    /// Resize, discarding contents
    pub fn resize(&mut self, width: u32, height: u32) {
        if width != self.width || height != self.height {
            *self = Self::with_size(width, height);
        }
    }

    /// Read a pixel from the buffer (bounds checked)
    /// Returns None if coordinates are out of bounds
    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<[u8; 4]> {
        if self.in_bounds(x, y) {
            let idx = self.pixel_index(x as u32, y as u32);
            let mut out = [0; 4];
            out.copy_from_slice(&self.pixels[idx..idx + 4]);
            Some(out)
        } else {
            None
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    /// Copy into an `image` buffer
    pub fn to_image(&self) -> Result<RgbaImage, OutputError> {
        RgbaImage::from_raw(self.width, self.height, self.pixels.clone()).ok_or(
            OutputError::SizeMismatch {
                width: self.width,
                height: self.height,
                len: self.pixels.len(),
            },
        )
    }

    /// Write the buffer as a PNG file
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<(), OutputError> {
        let path = path.as_ref();
        self.to_image()?
            .save_with_format(path, image::ImageFormat::Png)
            .map_err(|source| OutputError::Image {
                path: path.to_path_buf(),
                source,
            })
    }
}
