use std::path::PathBuf;

use anyhow::{bail, Context};
use async_std::fs;
use base64::{engine::general_purpose::STANDARD, Engine};

const FILE_SCHEME: &str = "file://";
const DATA_SCHEME: &str = "data:";
const BASE64_MARKER: &str = ";base64";

/// Where the encoded bytes of an image come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    Path(PathBuf),
    /// Bytes embedded in a `data:` URI
    Inline(Vec<u8>),
}

impl ImageSource {
    /// Interprets a locator string. Plain strings and `file://` URIs are paths,
    /// `data:` URIs carry the image inline. Other URI schemes are rejected.
    pub fn parse(src: &str) -> anyhow::Result<Self> {
        if let Some(path) = src.strip_prefix(FILE_SCHEME) {
            return Ok(ImageSource::Path(path.into()));
        }

        if let Some(data_uri) = src.strip_prefix(DATA_SCHEME) {
            return Self::parse_data_uri(data_uri);
        }

        if let Some((scheme, _)) = src.split_once("://") {
            let is_scheme = !scheme.is_empty()
                && scheme
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
            if is_scheme {
                bail!("Unsupported scheme '{scheme}' in image source {src}");
            }
        }

        Ok(ImageSource::Path(src.into()))
    }

    fn parse_data_uri(data_uri: &str) -> anyhow::Result<Self> {
        let (header, payload) = data_uri
            .split_once(',')
            .context("Data URI without a ',' separating the header and the payload")?;

        let bytes = if header.ends_with(BASE64_MARKER) {
            STANDARD
                .decode(payload.trim())
                .context("Data URI with an invalid base64 payload")?
        } else {
            payload.as_bytes().to_vec()
        };

        Ok(ImageSource::Inline(bytes))
    }

    pub async fn read_bytes(self) -> anyhow::Result<Vec<u8>> {
        match self {
            ImageSource::Path(path) => fs::read(async_std::path::PathBuf::from(path.clone()))
                .await
                .with_context(|| format!("Failed to read image file {:?}", path)),
            ImageSource::Inline(bytes) => Ok(bytes),
        }
    }
}
