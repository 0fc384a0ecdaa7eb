//! Overlay CRUD endpoints.
//!
//! Wraps `/overlays/...` on the backend. Create and update return the
//! stored record so callers can reconcile local state with what the
//! server actually persisted.

use reqwest::Url;
use serde::{Deserialize, Serialize};

use rtspio_core::overlay::{CreateOverlay, Overlay};
use rtspio_core::patch::OverlayPatch;

use crate::error::ApiError;
use crate::{endpoint, parse_response};

/// Response of `GET /overlays/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlaysResponse {
    #[serde(default)]
    pub success: bool,
    pub overlays: Vec<Overlay>,
    #[serde(default)]
    pub count: usize,
}

/// Response of the single-overlay endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayResponse {
    #[serde(default)]
    pub success: bool,
    pub overlay: Overlay,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Response of the delete endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

/// HTTP client for the overlay endpoints.
#[derive(Debug, Clone)]
pub struct OverlaysApi {
    client: reqwest::Client,
    base_url: Url,
}

impl OverlaysApi {
    pub fn with_client(client: reqwest::Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    /// All overlays of a stream: `GET /overlays/?stream_id=ID`.
    pub async fn list_overlays(&self, stream_id: &str) -> Result<OverlaysResponse, ApiError> {
        let mut url = endpoint(&self.base_url, &["overlays", ""])?;
        url.query_pairs_mut().append_pair("stream_id", stream_id);

        let response = self.client.get(url).send().await?;
        let body: OverlaysResponse = parse_response(response).await?;
        tracing::debug!(stream_id, count = body.overlays.len(), "Fetched overlays");
        Ok(body)
    }

    /// One overlay by id: `GET /overlays/:id`.
    pub async fn get_overlay(&self, overlay_id: &str) -> Result<OverlayResponse, ApiError> {
        let url = endpoint(&self.base_url, &["overlays", overlay_id])?;
        let response = self.client.get(url).send().await?;
        parse_response(response).await
    }

    /// Persist a new overlay: `POST /overlays/`.
    pub async fn create_overlay(&self, data: &CreateOverlay) -> Result<OverlayResponse, ApiError> {
        let url = endpoint(&self.base_url, &["overlays", ""])?;
        let response = self.client.post(url).json(data).send().await?;
        let body: OverlayResponse = parse_response(response).await?;
        tracing::debug!(overlay_id = %body.overlay.id, kind = body.overlay.kind.as_str(), "Created overlay");
        Ok(body)
    }

    /// Apply a partial update: `PUT /overlays/:id`.
    pub async fn update_overlay(
        &self,
        overlay_id: &str,
        patch: &OverlayPatch,
    ) -> Result<OverlayResponse, ApiError> {
        let url = endpoint(&self.base_url, &["overlays", overlay_id])?;
        let response = self.client.put(url).json(patch).send().await?;
        parse_response(response).await
    }

    /// Remove one overlay: `DELETE /overlays/:id`.
    pub async fn delete_overlay(&self, overlay_id: &str) -> Result<MessageResponse, ApiError> {
        let url = endpoint(&self.base_url, &["overlays", overlay_id])?;
        let response = self.client.delete(url).send().await?;
        parse_response(response).await
    }

    /// Remove every overlay of a stream: `DELETE /overlays/stream/:streamId`.
    pub async fn delete_stream_overlays(&self, stream_id: &str) -> Result<MessageResponse, ApiError> {
        let url = endpoint(&self.base_url, &["overlays", "stream", stream_id])?;
        let response = self.client.delete(url).send().await?;
        let body: MessageResponse = parse_response(response).await?;
        tracing::info!(stream_id, message = %body.message, "Deleted stream overlays");
        Ok(body)
    }
}
