//! Loads images into in-memory drawable buffers.
//!
//! ```no_run
//! # async_std::task::block_on(async {
//! let buffer = canvas_loader::load("photo.png").await;
//! println!("{}x{}", buffer.width(), buffer.height());
//! # });
//! ```

pub mod config;
pub mod drawable_buffer;
pub mod image_decoder;
pub mod image_loader;
pub mod image_source;
pub mod png_export;

pub use config::LoaderConfig;
pub use drawable_buffer::{DrawableBuffer, FIXED_BUFFER_SIZE};
pub use image_decoder::{ImageDecoder, OnLoad, ThreadPoolDecoder};
pub use image_loader::{BufferSizing, ImageLoader};

/// Loads `src` into a buffer with the natural size of the image, decoding on the global rayon pool.
/// Never finishes if the image can't be decoded.
pub async fn load(src: &str) -> DrawableBuffer {
    ImageLoader::new(ThreadPoolDecoder::global())
        .load_natural_size(src)
        .await
}

/// Loads `src` into a 512x512 buffer, decoding on the global rayon pool.
/// Never finishes if the image can't be decoded.
pub async fn load_fixed_size(src: &str) -> DrawableBuffer {
    ImageLoader::new(ThreadPoolDecoder::global())
        .load_fixed_size(src)
        .await
}
