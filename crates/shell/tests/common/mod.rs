//! In-memory backend for driving a shell session without a network.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use rtspio_client::ApiError;
use rtspio_core::geometry::Bounds;
use rtspio_core::overlay::{CreateOverlay, Overlay};
use rtspio_core::patch::OverlayPatch;
use rtspio_editor::probe::{ImageInfo, ImageProbe, ProbeError};
use rtspio_editor::{OverlayEditor, OverlayStore};
use rtspio_shell::command;
use rtspio_shell::session::{Flow, Session};

#[derive(Default)]
pub struct MemoryStore {
    overlays: Mutex<Vec<Overlay>>,
    next_id: Mutex<u64>,
}

impl MemoryStore {
    pub fn stored(&self) -> Vec<Overlay> {
        self.overlays.lock().unwrap().clone()
    }
}

#[async_trait]
impl OverlayStore for MemoryStore {
    async fn list(&self, stream_id: &str) -> Result<Vec<Overlay>, ApiError> {
        Ok(self
            .stored()
            .into_iter()
            .filter(|o| o.stream_id == stream_id)
            .collect())
    }

    async fn create(&self, data: &CreateOverlay) -> Result<Overlay, ApiError> {
        let mut next = self.next_id.lock().unwrap();
        *next += 1;
        let overlay = Overlay {
            id: format!("ov-{}", *next),
            overlay_id: None,
            stream_id: data.stream_id.clone(),
            kind: data.kind,
            content: data.content.clone(),
            position: data.position,
            size: data.size,
            z_index: data.z_index.unwrap_or(1),
            visible: data.visible.unwrap_or(true),
            style: data.style.clone(),
            created_at: None,
            updated_at: None,
        };
        self.overlays.lock().unwrap().push(overlay.clone());
        Ok(overlay)
    }

    async fn update(&self, overlay_id: &str, patch: &OverlayPatch) -> Result<Overlay, ApiError> {
        let mut overlays = self.overlays.lock().unwrap();
        let overlay = overlays
            .iter_mut()
            .find(|o| o.id == overlay_id)
            .ok_or_else(|| ApiError::server(404, r#"{"error": "Overlay not found"}"#))?;
        overlay.apply_patch(patch);
        Ok(overlay.clone())
    }

    async fn delete(&self, overlay_id: &str) -> Result<(), ApiError> {
        self.overlays.lock().unwrap().retain(|o| o.id != overlay_id);
        Ok(())
    }

    async fn delete_stream(&self, stream_id: &str) -> Result<String, ApiError> {
        self.overlays
            .lock()
            .unwrap()
            .retain(|o| o.stream_id != stream_id);
        Ok(format!("Deleted overlays for stream {stream_id}"))
    }
}

/// Probe that rejects every URL.
pub struct RejectingProbe;

#[async_trait]
impl ImageProbe for RejectingProbe {
    async fn probe(&self, _url: &str) -> Result<ImageInfo, ProbeError> {
        Err(ProbeError::HttpStatus(404))
    }
}

/// A started session over an empty in-memory store.
pub async fn session() -> (Arc<MemoryStore>, Session) {
    let store = Arc::new(MemoryStore::default());
    let editor = OverlayEditor::new(
        store.clone(),
        Arc::new(RejectingProbe),
        "default",
        Bounds::new(1280.0, 720.0),
    );
    let mut session = Session::new(
        editor,
        None,
        "https://rtsp.me/embed/K68Zhiyr/",
        "RTSP Stream",
    );
    let mut sink = Vec::new();
    session.start(&mut sink).await.unwrap();
    (store, session)
}

/// Parse and run one command line, returning what it printed.
pub async fn run(session: &mut Session, line: &str) -> String {
    let command = command::parse(line).unwrap();
    let mut out = Vec::new();
    let flow = session.execute(command, &mut out).await.unwrap();
    assert_eq!(flow, Flow::Continue);
    String::from_utf8(out).unwrap()
}
