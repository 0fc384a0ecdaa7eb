//! Persistence seam between the editor and the overlay backend.

use async_trait::async_trait;

use rtspio_client::{ApiError, OverlaysApi};
use rtspio_core::overlay::{CreateOverlay, Overlay};
use rtspio_core::patch::OverlayPatch;

/// Remote CRUD store the editor synchronizes against.
///
/// Implemented for [`OverlaysApi`]; tests substitute an in-memory store.
#[async_trait]
pub trait OverlayStore: Send + Sync {
    async fn list(&self, stream_id: &str) -> Result<Vec<Overlay>, ApiError>;

    async fn create(&self, data: &CreateOverlay) -> Result<Overlay, ApiError>;

    async fn update(&self, overlay_id: &str, patch: &OverlayPatch) -> Result<Overlay, ApiError>;

    async fn delete(&self, overlay_id: &str) -> Result<(), ApiError>;

    /// Remove every overlay of a stream, returning the backend's message.
    async fn delete_stream(&self, stream_id: &str) -> Result<String, ApiError>;
}

#[async_trait]
impl OverlayStore for OverlaysApi {
    async fn list(&self, stream_id: &str) -> Result<Vec<Overlay>, ApiError> {
        Ok(self.list_overlays(stream_id).await?.overlays)
    }

    async fn create(&self, data: &CreateOverlay) -> Result<Overlay, ApiError> {
        Ok(self.create_overlay(data).await?.overlay)
    }

    async fn update(&self, overlay_id: &str, patch: &OverlayPatch) -> Result<Overlay, ApiError> {
        Ok(self.update_overlay(overlay_id, patch).await?.overlay)
    }

    async fn delete(&self, overlay_id: &str) -> Result<(), ApiError> {
        self.delete_overlay(overlay_id).await?;
        Ok(())
    }

    async fn delete_stream(&self, stream_id: &str) -> Result<String, ApiError> {
        Ok(self.delete_stream_overlays(stream_id).await?.message)
    }
}
