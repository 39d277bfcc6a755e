//! Core types for segmentation masks.

use thiserror::Error;

/// Error types for mask geometry operations.
#[derive(Debug, Error)]
pub enum MaskError {
    /// No foreground pixel exists in the searched region.
    #[error("Mask has no foreground pixels in the searched region")]
    EmptyMask,

    /// A search window extends outside the mask.
    #[error(
        "Search window rows {min_y}..={max_y}, cols {min_x}..={max_x} \
         does not fit a {width}x{height} mask"
    )]
    WindowOutOfBounds {
        min_y: u32,
        max_y: u32,
        min_x: u32,
        max_x: u32,
        width: u32,
        height: u32,
    },
}

/// A segmentation mask with one or more channels per pixel.
///
/// Pixels are stored in row-major order with `channels` bytes per pixel.
/// A pixel belongs to the foreground when any of its channels is non-zero;
/// an all-zero pixel is background. Segmentation output is usually
/// single-channel, but every operation in this crate also accepts
/// multi-channel masks.
#[derive(Debug, Clone)]
pub struct Mask {
    /// Mask width in pixels.
    pub width: u32,
    /// Mask height in pixels.
    pub height: u32,
    /// Number of channels per pixel (at least 1).
    pub channels: u32,
    /// Pixel data in row-major order (`channels` bytes per pixel).
    /// Length should be width * height * channels.
    pub pixels: Vec<u8>,
}

impl Mask {
    /// Create a single-channel mask with the given dimensions and pixel data.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self::with_channels(width, height, 1, pixels)
    }

    /// Create a mask with an explicit channel count.
    pub fn with_channels(width: u32, height: u32, channels: u32, pixels: Vec<u8>) -> Self {
        debug_assert!(channels >= 1, "Mask needs at least one channel");
        debug_assert_eq!(
            pixels.len(),
            (width * height * channels) as usize,
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            channels,
            pixels,
        }
    }

    /// Create an all-background single-channel mask.
    pub fn zeros(width: u32, height: u32) -> Self {
        Self::new(width, height, vec![0; (width * height) as usize])
    }

    /// Create a Mask from an image::GrayImage.
    pub fn from_gray_image(img: image::GrayImage) -> Self {
        let (width, height) = img.dimensions();
        let pixels = img.into_raw();
        Self {
            width,
            height,
            channels: 1,
            pixels,
        }
    }

    /// Convert a single-channel mask to an image::GrayImage.
    ///
    /// Returns `None` for multi-channel masks.
    pub fn to_gray_image(&self) -> Option<image::GrayImage> {
        if self.channels != 1 {
            return None;
        }
        image::GrayImage::from_raw(self.width, self.height, self.pixels.clone())
    }

    /// Byte offset of the first channel of the pixel at (x, y).
    #[inline]
    fn pixel_offset(&self, x: u32, y: u32) -> usize {
        ((y * self.width + x) * self.channels) as usize
    }

    /// All channels of the pixel at (x, y).
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> &[u8] {
        let idx = self.pixel_offset(x, y);
        &self.pixels[idx..idx + self.channels as usize]
    }

    /// Mutable access to all channels of the pixel at (x, y).
    #[inline]
    pub fn pixel_mut(&mut self, x: u32, y: u32) -> &mut [u8] {
        let idx = self.pixel_offset(x, y);
        let channels = self.channels as usize;
        &mut self.pixels[idx..idx + channels]
    }

    /// Whether the pixel at (x, y) belongs to the foreground.
    #[inline]
    pub fn is_foreground(&self, x: u32, y: u32) -> bool {
        self.pixel(x, y).iter().any(|&v| v != 0)
    }

    /// Count the foreground pixels in the whole mask.
    pub fn foreground_count(&self) -> usize {
        self.pixels
            .chunks_exact(self.channels as usize)
            .filter(|px| px.iter().any(|&v| v != 0))
            .count()
    }

    /// Get the total number of pixels.
    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }

    /// Get the size of the pixel buffer in bytes.
    pub fn byte_size(&self) -> usize {
        self.pixels.len()
    }

    /// Check if this is an empty/degenerate mask.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }
}
