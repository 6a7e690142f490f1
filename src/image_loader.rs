use async_std::future;
use image::RgbaImage;
use serde::{Deserialize, Serialize};

use crate::{
    drawable_buffer::{DrawableBuffer, FIXED_BUFFER_SIZE},
    image_decoder::{ImageDecoder, ThreadPoolDecoder},
};

/// How the buffer receiving a loaded image is sized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BufferSizing {
    /// Use the natural dimensions of the decoded image
    #[default]
    Natural,
    /// Pre-size the buffer, the image gets clipped to it
    Fixed { width: u32, height: u32 },
}

impl BufferSizing {
    pub const FIXED_512: BufferSizing = BufferSizing::Fixed {
        width: FIXED_BUFFER_SIZE,
        height: FIXED_BUFFER_SIZE,
    };
}

/// Loads images into freshly created drawable buffers.
///
/// Every load issues one decode request and suspends until the decoder signals completion.
/// There is no failure path: if the decoder never calls back, the load never finishes.
pub struct ImageLoader<D = ThreadPoolDecoder> {
    decoder: D,
    sizing: BufferSizing,
}

impl<D: ImageDecoder> ImageLoader<D> {
    pub fn new(decoder: D) -> Self {
        ImageLoader {
            decoder,
            sizing: BufferSizing::default(),
        }
    }

    pub fn with_sizing(mut self, sizing: BufferSizing) -> Self {
        self.sizing = sizing;
        self
    }

    pub fn sizing(&self) -> BufferSizing {
        self.sizing
    }

    pub fn decoder(&self) -> &D {
        &self.decoder
    }

    /// Loads `src` using the sizing this loader was configured with
    pub async fn load(&self, src: &str) -> DrawableBuffer {
        self.load_sized(src, self.sizing).await
    }

    /// The buffer gets the natural dimensions of the image
    pub async fn load_natural_size(&self, src: &str) -> DrawableBuffer {
        self.load_sized(src, BufferSizing::Natural).await
    }

    /// The buffer is 512x512, no matter how big the image is
    pub async fn load_fixed_size(&self, src: &str) -> DrawableBuffer {
        self.load_sized(src, BufferSizing::FIXED_512).await
    }

    pub async fn load_sized(&self, src: &str, sizing: BufferSizing) -> DrawableBuffer {
        let mut buffer = match sizing {
            BufferSizing::Natural => DrawableBuffer::empty(),
            BufferSizing::Fixed { width, height } => DrawableBuffer::new(width, height),
        };

        let image = self.decode(src).await;

        if sizing == BufferSizing::Natural {
            if let Err(error) = buffer.set_dimensions(image.width(), image.height()) {
                log::error!("Failed to size the buffer for {src}: {error:?}");
            }
        }
        buffer.draw_image(&image, 0, 0);

        log::info!(
            "Loaded {} into a {}x{} buffer",
            src,
            buffer.width(),
            buffer.height()
        );

        buffer
    }

    async fn decode(&self, src: &str) -> RgbaImage {
        // The decoder calls us back from one of its threads, sending over the image when it is done.
        let (sender, receiver) = futures_intrusive::channel::shared::oneshot_channel();
        self.decoder.decode(
            src,
            Box::new(move |image| {
                // The receiver is gone if the load was dropped in the meantime
                let _ = sender.send(image);
            }),
        );

        match receiver.receive().await {
            Some(image) => image,
            None => {
                log::debug!("The decoder gave up on {src}, this load won't finish");
                future::pending().await
            }
        }
    }
}
