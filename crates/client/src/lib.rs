//! REST client for the RTSP.io overlay backend.
//!
//! [`ApiClient`] owns one configured [`reqwest::Client`] (base URL, fixed
//! timeout, JSON content type) and hands out the typed endpoint groups
//! [`OverlaysApi`] and [`RtspMeApi`]. Every failure is normalized into
//! [`ApiError`].

pub mod config;
pub mod error;
pub mod overlays;
pub mod rtspme;

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Url;
use serde::{Deserialize, Serialize};

pub use config::ClientConfig;
pub use error::{ApiError, ApiErrorKind};
pub use overlays::{MessageResponse, OverlayResponse, OverlaysApi, OverlaysResponse};
pub use rtspme::RtspMeApi;

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mongodb: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// Entry point for all backend calls.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// Build a client from configuration.
    ///
    /// Fails with a request-class [`ApiError`] if the base URL does not
    /// parse or the HTTP client cannot be constructed.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let base_url = parse_base_url(&config.base_url)?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self { http, base_url })
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(http: reqwest::Client, base_url: &str) -> Result<Self, ApiError> {
        Ok(Self {
            http,
            base_url: parse_base_url(base_url)?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn overlays(&self) -> OverlaysApi {
        OverlaysApi::with_client(self.http.clone(), self.base_url.clone())
    }

    pub fn rtspme(&self) -> RtspMeApi {
        RtspMeApi::with_client(self.http.clone(), self.base_url.clone())
    }

    /// Query the backend's health endpoint.
    pub async fn health(&self) -> Result<HealthResponse, ApiError> {
        let url = endpoint(&self.base_url, &["health"])?;
        let response = self.http.get(url).send().await?;
        parse_response(response).await
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ApiError> {
    Url::parse(raw).map_err(|e| ApiError::request(format!("invalid API base URL '{raw}': {e}")))
}

/// Append path segments to the base URL, percent-encoding each one.
///
/// A trailing empty segment produces a trailing slash (`/overlays/`).
pub(crate) fn endpoint(base: &Url, segments: &[&str]) -> Result<Url, ApiError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| ApiError::request(format!("API base URL '{base}' cannot have a path")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Ensure the response has a success status code, or turn the status and
/// body into a server-class [`ApiError`].
pub(crate) async fn ensure_success(
    response: reqwest::Response,
) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        tracing::debug!(status = status.as_u16(), body = %body, "Backend rejected request");
        return Err(ApiError::server(status.as_u16(), &body));
    }
    Ok(response)
}

/// Parse a successful JSON response body into the expected type.
pub(crate) async fn parse_response<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ApiError> {
    let response = ensure_success(response).await?;
    Ok(response.json::<T>().await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_appends_segments_with_trailing_slash() {
        let base = Url::parse("http://localhost:5000/api").unwrap();
        let url = endpoint(&base, &["overlays", ""]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/api/overlays/");
    }

    #[test]
    fn endpoint_tolerates_trailing_slash_in_base() {
        let base = Url::parse("http://localhost:5000/api/").unwrap();
        let url = endpoint(&base, &["overlays", "abc"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/api/overlays/abc");
    }

    #[test]
    fn endpoint_encodes_segments() {
        let base = Url::parse("http://localhost:5000/api").unwrap();
        let url = endpoint(&base, &["overlays", "stream", "lobby cam/2"]).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:5000/api/overlays/stream/lobby%20cam%2F2"
        );
    }

    #[test]
    fn bad_base_url_is_request_error() {
        let config = ClientConfig {
            base_url: "not a url".into(),
            ..ClientConfig::default()
        };
        let err = ApiClient::new(&config).unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::Request);
        assert_eq!(err.status, 0);
    }
}
