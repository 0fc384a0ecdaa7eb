//! In-process fake of the overlay backend.
//!
//! Speaks the same REST contract as the real service (`/api/overlays/...`,
//! `/api/rtspme/convert-rtsp`, `/api/health`) over a real TCP socket so the
//! client is exercised end to end, including error bodies and timeouts.

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;

use rtspio_client::{ApiClient, ClientConfig};
use rtspio_core::overlay::{CreateOverlay, Overlay};
use rtspio_core::patch::OverlayPatch;

/// Shared state of the fake backend.
#[derive(Clone, Default)]
pub struct FakeBackend {
    overlays: Arc<Mutex<Vec<Overlay>>>,
    next_id: Arc<Mutex<u64>>,
}

impl FakeBackend {
    pub fn overlays(&self) -> Vec<Overlay> {
        self.overlays.lock().unwrap().clone()
    }

    pub fn seed(&self, create: CreateOverlay) -> Overlay {
        self.insert(create)
    }

    fn insert(&self, data: CreateOverlay) -> Overlay {
        let mut next = self.next_id.lock().unwrap();
        *next += 1;
        let overlay = Overlay {
            id: format!("{:024x}", *next),
            overlay_id: None,
            stream_id: data.stream_id,
            kind: data.kind,
            content: data.content,
            position: data.position,
            size: data.size,
            z_index: data.z_index.unwrap_or(1),
            visible: data.visible.unwrap_or(true),
            style: Some(data.style.unwrap_or_default()),
            created_at: Some(chrono_now()),
            updated_at: Some(chrono_now()),
        };
        self.overlays.lock().unwrap().push(overlay.clone());
        overlay
    }
}

fn chrono_now() -> rtspio_core::types::Timestamp {
    rtspio_core::timestamp::parse("2026-10-16T10:00:00Z").unwrap()
}

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({"error": message}))).into_response()
}

#[derive(serde::Deserialize)]
struct ListQuery {
    stream_id: Option<String>,
}

async fn list(State(backend): State<FakeBackend>, Query(q): Query<ListQuery>) -> Response {
    let stream_id = q.stream_id.unwrap_or_else(|| "default".into());
    let overlays: Vec<Overlay> = backend
        .overlays()
        .into_iter()
        .filter(|o| o.stream_id == stream_id)
        .collect();
    let count = overlays.len();
    Json(json!({"success": true, "overlays": overlays, "count": count})).into_response()
}

async fn create(State(backend): State<FakeBackend>, Json(data): Json<serde_json::Value>) -> Response {
    for field in ["type", "content", "position", "size"] {
        if data.get(field).is_none() {
            return error(
                StatusCode::BAD_REQUEST,
                &format!("Missing required field: {field}"),
            );
        }
    }
    let data: CreateOverlay = match serde_json::from_value(data) {
        Ok(data) => data,
        Err(e) => return error(StatusCode::BAD_REQUEST, &e.to_string()),
    };
    let overlay = backend.insert(data);
    (
        StatusCode::CREATED,
        Json(json!({"success": true, "message": "Overlay created successfully", "overlay": overlay})),
    )
        .into_response()
}

async fn get_one(State(backend): State<FakeBackend>, Path(id): Path<String>) -> Response {
    if id == "explode" {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": "Database error", "details": {"reason": "primary down"}})),
        )
            .into_response();
    }
    match backend.overlays().into_iter().find(|o| o.id == id) {
        Some(overlay) => Json(json!({"success": true, "overlay": overlay})).into_response(),
        None => error(StatusCode::NOT_FOUND, "Overlay not found"),
    }
}

async fn update(
    State(backend): State<FakeBackend>,
    Path(id): Path<String>,
    Json(patch): Json<OverlayPatch>,
) -> Response {
    let mut overlays = backend.overlays.lock().unwrap();
    match overlays.iter_mut().find(|o| o.id == id) {
        Some(overlay) => {
            overlay.apply_patch(&patch);
            let overlay = overlay.clone();
            Json(json!({"success": true, "message": "Overlay updated successfully", "overlay": overlay}))
                .into_response()
        }
        None => error(StatusCode::NOT_FOUND, "Overlay not found"),
    }
}

async fn delete_one(State(backend): State<FakeBackend>, Path(id): Path<String>) -> Response {
    let mut overlays = backend.overlays.lock().unwrap();
    let before = overlays.len();
    overlays.retain(|o| o.id != id);
    if overlays.len() == before {
        return error(StatusCode::NOT_FOUND, "Overlay not found");
    }
    Json(json!({"success": true, "message": "Overlay deleted successfully"})).into_response()
}

async fn delete_stream(State(backend): State<FakeBackend>, Path(stream_id): Path<String>) -> Response {
    let mut overlays = backend.overlays.lock().unwrap();
    let before = overlays.len();
    overlays.retain(|o| o.stream_id != stream_id);
    let deleted = before - overlays.len();
    Json(json!({
        "success": true,
        "message": format!("Deleted {deleted} overlays for stream {stream_id}")
    }))
    .into_response()
}

async fn convert(Json(body): Json<HashMap<String, String>>) -> Response {
    let rtsp_url = body.get("rtsp_url").cloned().unwrap_or_default();
    if !rtsp_url.starts_with("rtsp://") && !rtsp_url.starts_with("rtsps://") {
        return error(
            StatusCode::BAD_REQUEST,
            "Invalid RTSP URL format. Must start with rtsp:// or rtsps://",
        );
    }
    let name = body.get("name").cloned().unwrap_or_else(|| "RTSP Stream".into());
    Json(json!({
        "success": true,
        "rtsp_url": rtsp_url,
        "stream_id": "K68Zhiyr",
        "name": name,
        "embed_url": "https://rtsp.me/embed/K68Zhiyr/",
        "access_url": "https://rtsp.me/K68Zhiyr",
        "stream_url": "https://rtsp.me/K68Zhiyr",
        "poster_url": "https://rtsp.me/poster/K68Zhiyr.jpg",
        "monthly_counter": "12",
        "iframe_code": "<iframe src=\"https://rtsp.me/embed/K68Zhiyr/\"></iframe>",
        "note": "Standard RTSP.me embed URL generated."
    }))
    .into_response()
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({"status": "healthy", "mongodb": "connected", "version": "1.0.0"}))
}

async fn slow() -> Json<serde_json::Value> {
    tokio::time::sleep(Duration::from_secs(5)).await;
    Json(json!({"success": true, "overlays": [], "count": 0}))
}

async fn garbage() -> &'static str {
    "this is not json"
}

fn router(backend: FakeBackend) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/overlays/", get(list).post(create))
        .route(
            "/api/overlays/{id}",
            get(get_one).put(update).delete(delete_one),
        )
        .route(
            "/api/overlays/stream/{stream_id}",
            axum::routing::delete(delete_stream),
        )
        .route("/api/rtspme/convert-rtsp", post(convert))
        .route("/slow/overlays/", get(slow))
        .route("/garbage/overlays/", get(garbage))
        .with_state(backend)
}

/// Start the fake backend on an ephemeral port.
pub async fn spawn_backend() -> (FakeBackend, SocketAddr) {
    let backend = FakeBackend::default();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = router(backend.clone());
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (backend, addr)
}

/// Client pointed at `http://{addr}{prefix}` with the given timeout.
pub fn client_for(addr: SocketAddr, prefix: &str, timeout: Duration) -> ApiClient {
    ApiClient::new(&ClientConfig {
        base_url: format!("http://{addr}{prefix}"),
        timeout,
    })
    .unwrap()
}

/// Client for the regular `/api` prefix with a generous timeout.
pub fn api_client(addr: SocketAddr) -> ApiClient {
    client_for(addr, "/api", Duration::from_secs(5))
}
