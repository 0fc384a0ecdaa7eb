//! Wire types for the RTSP-to-embed conversion endpoint.
//!
//! The backend forwards an RTSP source to the RTSP.me service and returns
//! the embeddable player URL with the camera's metadata.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body of `POST /rtspme/convert-rtsp`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ConvertRtspRequest {
    #[validate(url, custom(function = "crate::validation::validate_rtsp_url"))]
    pub rtsp_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    /// Client IP the service should restrict playback to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(ip)]
    pub ip: Option<String>,
}

impl ConvertRtspRequest {
    pub fn new(rtsp_url: impl Into<String>) -> Self {
        Self {
            rtsp_url: rtsp_url.into(),
            name: None,
            ip: None,
        }
    }
}

/// Successful conversion result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbedResponse {
    pub success: bool,
    pub rtsp_url: String,
    pub stream_id: String,
    pub name: String,
    pub embed_url: String,
    #[serde(default)]
    pub access_url: String,
    #[serde(default)]
    pub stream_url: String,
    #[serde(default)]
    pub poster_url: String,
    #[serde(default)]
    pub monthly_counter: String,
    #[serde(default)]
    pub iframe_code: String,
    #[serde(default)]
    pub note: String,
}
