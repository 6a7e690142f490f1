use anyhow::ensure;
use image::{imageops, Rgba, RgbaImage};

/// Size of the buffer used by the fixed size loads
pub const FIXED_BUFFER_SIZE: u32 = 512;

/// An in-memory RGBA surface, the equivalent of a 2D canvas.
///
/// A fresh buffer is filled with transparent black. The dimensions can only be changed
/// until something has been drawn into it.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawableBuffer {
    pixels: RgbaImage,
    has_content: bool,
}

impl DrawableBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        DrawableBuffer {
            pixels: RgbaImage::new(width, height),
            has_content: false,
        }
    }

    /// A 0x0 buffer, waiting for its dimensions
    pub fn empty() -> Self {
        Self::new(0, 0)
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    pub fn has_content(&self) -> bool {
        self.has_content
    }

    /// Resizes the buffer, discarding the current pixels like a canvas does.
    /// Fails once an image has been drawn into the buffer.
    pub fn set_dimensions(&mut self, width: u32, height: u32) -> anyhow::Result<()> {
        ensure!(
            !self.has_content,
            "Can't resize a buffer of {}x{} after drawing into it",
            self.width(),
            self.height()
        );

        self.pixels = RgbaImage::new(width, height);
        Ok(())
    }

    /// Copies the pixels of `image` into the buffer with its top left corner at (`x`, `y`).
    /// Everything falling outside of the buffer is clipped.
    pub fn draw_image(&mut self, image: &RgbaImage, x: i64, y: i64) {
        imageops::replace(&mut self.pixels, image, x, y);
        self.has_content = true;
    }

    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Rgba<u8>> {
        self.pixels.get_pixel_checked(x, y).copied()
    }

    pub fn as_image(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Row-major RGBA bytes
    pub fn as_raw(&self) -> &[u8] {
        self.pixels.as_raw()
    }

    pub fn into_image(self) -> RgbaImage {
        self.pixels
    }
}
