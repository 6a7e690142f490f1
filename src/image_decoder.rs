use std::sync::Arc;

use async_std::task::block_on;
use image::RgbaImage;
use rayon::ThreadPool;

use crate::image_source::ImageSource;

pub const DEFAULT_WORKER_COUNT: usize = 4;

/// Called with the decoded image once decoding finished. Never called if decoding fails.
pub type OnLoad = Box<dyn FnOnce(RgbaImage) + Send + 'static>;

/// Turns an image locator into a decoded raster, asynchronously
pub trait ImageDecoder {
    /// Starts decoding `src`. `on_load` is invoked at most once, from any thread.
    fn decode(&self, src: &str, on_load: OnLoad);
}

/// Reads and decodes images on a rayon thread pool
#[derive(Clone)]
pub struct ThreadPoolDecoder {
    // None means the global rayon pool
    thread_pool: Option<Arc<ThreadPool>>,
}

impl ThreadPoolDecoder {
    pub fn global() -> Self {
        ThreadPoolDecoder { thread_pool: None }
    }

    pub fn with_workers(worker_count: usize) -> anyhow::Result<Self> {
        let thread_pool = rayon::ThreadPoolBuilder::new()
            .num_threads(worker_count)
            .thread_name(|index| format!("image-decoder-{index}"))
            .build()?;

        Ok(ThreadPoolDecoder {
            thread_pool: Some(Arc::new(thread_pool)),
        })
    }

    fn try_load_data(src: &str) -> anyhow::Result<RgbaImage> {
        let source = ImageSource::parse(src)?;
        let data = block_on(source.read_bytes())?;
        let img = image::load_from_memory(&data)?;
        Ok(img.to_rgba8())
    }
}

impl ImageDecoder for ThreadPoolDecoder {
    fn decode(&self, src: &str, on_load: OnLoad) {
        let src = src.to_owned();
        let job = move || match Self::try_load_data(&src) {
            Ok(image) => {
                log::debug!(
                    "Decoded {} ({}x{})",
                    src,
                    image.width(),
                    image.height()
                );
                on_load(image);
            }
            // Nobody is told about the failure, the load just never finishes
            Err(error) => log::warn!("Failed to decode {src}: {error:?}"),
        };

        match &self.thread_pool {
            Some(thread_pool) => thread_pool.spawn(job),
            None => rayon::spawn(job),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crossbeam_channel::Receiver;
    use image::Rgba;

    use super::*;

    fn decode_into_channel(decoder: &ThreadPoolDecoder, src: &str) -> Receiver<RgbaImage> {
        let (sender, receiver) = crossbeam_channel::bounded(1);
        decoder.decode(
            src,
            Box::new(move |image| {
                let _ = sender.send(image);
            }),
        );
        receiver
    }

    fn write_test_png(file_name: &str) -> (std::path::PathBuf, RgbaImage) {
        let image = RgbaImage::from_fn(5, 3, |x, y| Rgba([x as u8 * 40, y as u8 * 80, 7, 255]));
        let path = std::env::temp_dir().join(format!(
            "canvas_loader_decoder_{}_{file_name}",
            std::process::id()
        ));
        image.save(&path).unwrap();
        (path, image)
    }

    #[test]
    fn decodes_file_on_dedicated_pool() {
        let (path, expected) = write_test_png("dedicated.png");
        let decoder = ThreadPoolDecoder::with_workers(DEFAULT_WORKER_COUNT).unwrap();

        let receiver = decode_into_channel(&decoder, path.to_str().unwrap());
        let image = receiver.recv_timeout(Duration::from_secs(10)).unwrap();

        assert_eq!(image, expected);
    }

    #[test]
    fn decodes_file_on_global_pool() {
        let (path, expected) = write_test_png("global.png");
        let decoder = ThreadPoolDecoder::global();

        let receiver = decode_into_channel(&decoder, path.to_str().unwrap());
        let image = receiver.recv_timeout(Duration::from_secs(10)).unwrap();

        assert_eq!(image, expected);
    }

    #[test]
    fn failed_decode_never_calls_back() {
        let decoder = ThreadPoolDecoder::with_workers(1).unwrap();

        let missing = decode_into_channel(&decoder, "/this/file/does/not/exist.png");
        let garbage = decode_into_channel(&decoder, "data:image/png;base64,AAECAw==");

        // The callbacks are dropped without being called, which disconnects the channels
        assert!(missing.recv_timeout(Duration::from_secs(10)).is_err());
        assert!(garbage.recv_timeout(Duration::from_secs(10)).is_err());
    }
}
