//! In-memory overlay store and image probe for driving the editor.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use rtspio_client::ApiError;
use rtspio_core::geometry::Bounds;
use rtspio_core::overlay::{CreateOverlay, Overlay};
use rtspio_core::patch::OverlayPatch;
use rtspio_editor::probe::{ImageInfo, ImageProbe, ProbeError};
use rtspio_editor::{OverlayEditor, OverlayStore};

/// A request the editor sent to the store.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    List(String),
    Create(CreateOverlay),
    Update(String, OverlayPatch),
    Delete(String),
    DeleteStream(String),
}

#[derive(Default)]
struct Inner {
    overlays: Vec<Overlay>,
    next_id: u64,
    calls: Vec<Call>,
    fail_list: bool,
    fail_create: bool,
    fail_update: bool,
    fail_delete: bool,
}

/// Backend stand-in that behaves like the real service and records calls.
#[derive(Default)]
pub struct MockStore {
    inner: Mutex<Inner>,
}

impl MockStore {
    pub fn seed(&self, data: CreateOverlay) -> Overlay {
        let mut inner = self.inner.lock().unwrap();
        insert(&mut inner, data)
    }

    /// Server-side overlays of one stream.
    pub fn stored(&self, stream_id: &str) -> Vec<Overlay> {
        let inner = self.inner.lock().unwrap();
        inner
            .overlays
            .iter()
            .filter(|o| o.stream_id == stream_id)
            .cloned()
            .collect()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.inner.lock().unwrap().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.inner.lock().unwrap().calls.clear();
    }

    pub fn updates(&self) -> Vec<(String, OverlayPatch)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Update(id, patch) => Some((id, patch)),
                _ => None,
            })
            .collect()
    }

    pub fn creates(&self) -> Vec<CreateOverlay> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Create(data) => Some(data),
                _ => None,
            })
            .collect()
    }

    pub fn fail_list(&self, fail: bool) {
        self.inner.lock().unwrap().fail_list = fail;
    }

    pub fn fail_create(&self, fail: bool) {
        self.inner.lock().unwrap().fail_create = fail;
    }

    pub fn fail_update(&self, fail: bool) {
        self.inner.lock().unwrap().fail_update = fail;
    }

    pub fn fail_delete(&self, fail: bool) {
        self.inner.lock().unwrap().fail_delete = fail;
    }
}

fn insert(inner: &mut Inner, data: CreateOverlay) -> Overlay {
    inner.next_id += 1;
    let overlay = Overlay {
        id: format!("ov-{}", inner.next_id),
        overlay_id: None,
        stream_id: data.stream_id,
        kind: data.kind,
        content: data.content,
        position: data.position,
        size: data.size,
        z_index: data.z_index.unwrap_or(1),
        visible: data.visible.unwrap_or(true),
        style: Some(data.style.unwrap_or_default()),
        created_at: None,
        updated_at: None,
    };
    inner.overlays.push(overlay.clone());
    overlay
}

fn server_error() -> ApiError {
    ApiError::server(500, r#"{"error": "Database error"}"#)
}

fn not_found() -> ApiError {
    ApiError::server(404, r#"{"error": "Overlay not found"}"#)
}

#[async_trait]
impl OverlayStore for MockStore {
    async fn list(&self, stream_id: &str) -> Result<Vec<Overlay>, ApiError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(Call::List(stream_id.to_string()));
        if inner.fail_list {
            return Err(ApiError::network());
        }
        Ok(inner
            .overlays
            .iter()
            .filter(|o| o.stream_id == stream_id)
            .cloned()
            .collect())
    }

    async fn create(&self, data: &CreateOverlay) -> Result<Overlay, ApiError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(Call::Create(data.clone()));
        if inner.fail_create {
            return Err(server_error());
        }
        Ok(insert(&mut inner, data.clone()))
    }

    async fn update(&self, overlay_id: &str, patch: &OverlayPatch) -> Result<Overlay, ApiError> {
        let mut inner = self.inner.lock().unwrap();
        inner
            .calls
            .push(Call::Update(overlay_id.to_string(), patch.clone()));
        if inner.fail_update {
            return Err(server_error());
        }
        let overlay = inner
            .overlays
            .iter_mut()
            .find(|o| o.id == overlay_id)
            .ok_or_else(not_found)?;
        overlay.apply_patch(patch);
        Ok(overlay.clone())
    }

    async fn delete(&self, overlay_id: &str) -> Result<(), ApiError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(Call::Delete(overlay_id.to_string()));
        if inner.fail_delete {
            return Err(server_error());
        }
        let before = inner.overlays.len();
        inner.overlays.retain(|o| o.id != overlay_id);
        if inner.overlays.len() == before {
            return Err(not_found());
        }
        Ok(())
    }

    async fn delete_stream(&self, stream_id: &str) -> Result<String, ApiError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(Call::DeleteStream(stream_id.to_string()));
        let before = inner.overlays.len();
        inner.overlays.retain(|o| o.stream_id != stream_id);
        let deleted = before - inner.overlays.len();
        Ok(format!("Deleted {deleted} overlays for stream {stream_id}"))
    }
}

/// Probe that accepts a fixed set of URLs and records every probe.
#[derive(Default)]
pub struct MockProbe {
    loadable: HashSet<String>,
    probed: Mutex<Vec<String>>,
}

impl MockProbe {
    pub fn accepting(urls: &[&str]) -> Self {
        Self {
            loadable: urls.iter().map(|u| u.to_string()).collect(),
            probed: Mutex::new(Vec::new()),
        }
    }

    pub fn probed(&self) -> Vec<String> {
        self.probed.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageProbe for MockProbe {
    async fn probe(&self, url: &str) -> Result<ImageInfo, ProbeError> {
        self.probed.lock().unwrap().push(url.to_string());
        if self.loadable.contains(url) {
            Ok(ImageInfo {
                width: 64,
                height: 64,
                mime: "image/png",
            })
        } else {
            Err(ProbeError::HttpStatus(404))
        }
    }
}

pub const LOGO_URL: &str = "https://cdn.example.com/logo.png";

/// Editor on the `default` stream with the editor panel shown and the
/// initial load done.
pub async fn editor_with(store: &Arc<MockStore>, probe: &Arc<MockProbe>) -> OverlayEditor {
    let mut editor = OverlayEditor::new(
        store.clone(),
        probe.clone(),
        "default",
        Bounds::new(1280.0, 720.0),
    );
    editor.load().await;
    editor.set_editor_visible(true).await;
    store.clear_calls();
    editor
}

/// Fresh store, a probe accepting [`LOGO_URL`], and a loaded editor.
pub async fn setup() -> (Arc<MockStore>, Arc<MockProbe>, OverlayEditor) {
    let store = Arc::new(MockStore::default());
    let probe = Arc::new(MockProbe::accepting(&[LOGO_URL]));
    let editor = editor_with(&store, &probe).await;
    (store, probe, editor)
}
