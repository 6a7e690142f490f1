use std::{fs, path::Path};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::{
    image_decoder::{ThreadPoolDecoder, DEFAULT_WORKER_COUNT},
    image_loader::{BufferSizing, ImageLoader},
};

/// Settings of the loader, usually read from a json file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    pub sizing: BufferSizing,
    /// Number of threads decoding images. 0 means sharing the global rayon pool
    pub worker_count: usize,
    pub log_level: log::LevelFilter,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        LoaderConfig {
            sizing: BufferSizing::Natural,
            worker_count: DEFAULT_WORKER_COUNT,
            log_level: log::LevelFilter::Warn,
        }
    }
}

impl LoaderConfig {
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let json_string = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        Self::from_json(&json_string).with_context(|| format!("Invalid config file {:?}", path))
    }

    pub fn build_loader(&self) -> anyhow::Result<ImageLoader<ThreadPoolDecoder>> {
        let decoder = if self.worker_count == 0 {
            ThreadPoolDecoder::global()
        } else {
            ThreadPoolDecoder::with_workers(self.worker_count)?
        };

        Ok(ImageLoader::new(decoder).with_sizing(self.sizing))
    }
}
