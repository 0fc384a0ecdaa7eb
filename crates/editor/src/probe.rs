//! Image preload probe.
//!
//! Before an image URL is persisted as an overlay it must actually load as
//! an image. [`HttpImageProbe`] fetches the start of the resource (or decodes
//! an inline `data:` URI) and reads the image header to confirm it decodes.

use std::io::Cursor;
use std::time::Duration;

use async_trait::async_trait;
use image::ImageReader;

use rtspio_core::data_uri;
use rtspio_core::error::CoreError;

/// Timeout for fetching a probed image.
const PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// Most bytes read from a probed response. Image headers sit well inside.
pub const PROBE_PREFIX_LIMIT: usize = 64 * 1024;

/// Dimensions and type of a successfully probed image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    pub mime: &'static str,
}

#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The image host answered with a non-2xx status.
    #[error("Image host returned HTTP {0}")]
    HttpStatus(u16),

    /// The bytes are not an image format that can be decoded.
    #[error("Not a decodable image: {0}")]
    NotAnImage(String),

    #[error(transparent)]
    Invalid(#[from] CoreError),
}

/// Checks that a URL loads as an image.
#[async_trait]
pub trait ImageProbe: Send + Sync {
    async fn probe(&self, url: &str) -> Result<ImageInfo, ProbeError>;
}

/// Probe backed by an HTTP GET and a header-only decode.
pub struct HttpImageProbe {
    client: reqwest::Client,
}

impl HttpImageProbe {
    pub fn new() -> Result<Self, ProbeError> {
        let client = reqwest::Client::builder().timeout(PROBE_TIMEOUT).build()?;
        Ok(Self { client })
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ImageProbe for HttpImageProbe {
    async fn probe(&self, url: &str) -> Result<ImageInfo, ProbeError> {
        if data_uri::is_data_uri(url) {
            let (_mime, bytes) = data_uri::decode(url)?;
            return inspect(&bytes);
        }

        let mut response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ProbeError::HttpStatus(status.as_u16()));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok());
        if let Some(content_type) = content_type {
            if !is_image_content_type(content_type) {
                return Err(ProbeError::NotAnImage(format!("served as {content_type}")));
            }
        }

        let mut prefix = Vec::new();
        while prefix.len() < PROBE_PREFIX_LIMIT {
            match response.chunk().await? {
                Some(chunk) => prefix.extend_from_slice(&chunk),
                None => break,
            }
        }
        prefix.truncate(PROBE_PREFIX_LIMIT);
        tracing::debug!(url, bytes = prefix.len(), "Probing image header");
        inspect(&prefix)
    }
}

/// `image/*`, or a generic binary type some hosts use for images.
fn is_image_content_type(value: &str) -> bool {
    let essence = value
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence.starts_with("image/") || essence == "application/octet-stream"
}

/// Identify the format and read the dimensions without decoding pixels.
pub fn inspect(bytes: &[u8]) -> Result<ImageInfo, ProbeError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| ProbeError::NotAnImage(e.to_string()))?;
    let format = reader
        .format()
        .ok_or_else(|| ProbeError::NotAnImage("unrecognized image format".to_string()))?;
    let (width, height) = reader
        .into_dimensions()
        .map_err(|e| ProbeError::NotAnImage(e.to_string()))?;
    Ok(ImageInfo {
        width,
        height,
        mime: format.to_mime_type(),
    })
}
