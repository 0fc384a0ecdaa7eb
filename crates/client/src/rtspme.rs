//! RTSP-to-embed conversion endpoint.

use reqwest::Url;

use rtspio_core::embed::{ConvertRtspRequest, EmbedResponse};

use crate::error::ApiError;
use crate::{endpoint, parse_response};

/// HTTP client for `/rtspme/...`.
#[derive(Debug, Clone)]
pub struct RtspMeApi {
    client: reqwest::Client,
    base_url: Url,
}

impl RtspMeApi {
    pub fn with_client(client: reqwest::Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    /// Convert an RTSP source into an embeddable player URL.
    ///
    /// Sends `POST /rtspme/convert-rtsp`. The caller is expected to have
    /// validated the request; the backend repeats the scheme check.
    pub async fn convert_rtsp(&self, data: &ConvertRtspRequest) -> Result<EmbedResponse, ApiError> {
        let url = endpoint(&self.base_url, &["rtspme", "convert-rtsp"])?;
        let response = self.client.post(url).json(data).send().await?;
        let body: EmbedResponse = parse_response(response).await?;
        tracing::info!(stream_id = %body.stream_id, embed_url = %body.embed_url, "Converted RTSP source");
        Ok(body)
    }
}
