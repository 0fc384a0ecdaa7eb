//! Loading, stream switching and reconciliation after failures.

mod common;

use std::sync::Arc;

use rtspio_core::geometry::Bounds;
use rtspio_core::overlay::{CreateOverlay, Position};
use rtspio_core::patch::OverlayPatch;
use rtspio_editor::{LoadStatus, OverlayEditor};

use common::{Call, MockProbe, MockStore};

// ---------------------------------------------------------------------------
// Test: initial load
// ---------------------------------------------------------------------------

#[tokio::test]
async fn load_replaces_list_for_stream() {
    let store = Arc::new(MockStore::default());
    store.seed(CreateOverlay::text("default", 1));
    store.seed(CreateOverlay::text("lobby", 1));
    let probe = Arc::new(MockProbe::default());

    let mut editor = OverlayEditor::new(store.clone(), probe, "default", Bounds::default());
    assert_eq!(editor.status(), &LoadStatus::Loading);

    assert!(editor.load().await);
    assert_eq!(editor.status(), &LoadStatus::Ready);
    assert_eq!(editor.overlays(), store.stored("default").as_slice());
    assert_eq!(store.calls(), vec![Call::List("default".to_string())]);
}

#[tokio::test]
async fn load_failure_shows_banner_and_stays_usable() {
    let store = Arc::new(MockStore::default());
    store.fail_list(true);
    let probe = Arc::new(MockProbe::default());
    let mut editor = common::editor_with(&store, &probe).await;

    assert_eq!(editor.status().banner(), Some("Failed to load overlays"));
    assert!(editor.add_text_overlay().await.is_some());
    assert_eq!(editor.status().banner(), Some("Failed to load overlays"));

    store.fail_list(false);
    assert!(editor.load().await);
    assert_eq!(editor.status(), &LoadStatus::Ready);
    assert_eq!(editor.status().banner(), None);
}

// ---------------------------------------------------------------------------
// Test: stale loads
// ---------------------------------------------------------------------------

#[tokio::test]
async fn stale_load_never_overwrites_newer_stream() {
    let (store, _probe, mut editor) = common::setup().await;
    let ghost = store.seed(CreateOverlay::text("default", 1));
    store.seed(CreateOverlay::text("lobby", 1));

    let stale = editor.begin_load();
    assert!(editor.set_stream("lobby").await);
    assert!(stale.is_cancelled());

    assert!(!editor.finish_load(stale, Ok(vec![ghost])));
    assert_eq!(editor.stream_id(), "lobby");
    assert_eq!(editor.overlays(), store.stored("lobby").as_slice());
}

#[tokio::test]
async fn cancelled_ticket_fetches_nothing() {
    let (store, _probe, mut editor) = common::setup().await;
    let first = editor.begin_load();
    let second = editor.begin_load();

    assert!(first.fetch(&*store).await.is_none());
    assert!(store.calls().is_empty());

    let result = second.fetch(&*store).await.unwrap();
    assert!(editor.finish_load(second, result));
}

#[tokio::test]
async fn stream_switch_drops_selection() {
    let (_store, _probe, mut editor) = common::setup().await;
    let id = editor.add_text_overlay().await.unwrap();
    assert_eq!(editor.selected(), Some(id.as_str()));

    editor.set_stream("lobby").await;

    assert!(editor.selected().is_none());
    assert!(editor.overlays().is_empty());
}

// ---------------------------------------------------------------------------
// Test: reconciliation after a failed update
// ---------------------------------------------------------------------------

#[tokio::test]
async fn failed_update_reloads_backend_state() {
    let (store, _probe, mut editor) = common::setup().await;
    let id = editor.add_text_overlay().await.unwrap();
    editor.add_text_overlay().await.unwrap();
    store.fail_update(true);
    store.clear_calls();

    let moved = OverlayPatch::position(Position { x: 400.0, y: 300.0 });
    assert!(!editor.update_overlay(&id, moved).await);

    assert_eq!(editor.overlays(), store.stored("default").as_slice());
    assert_eq!(
        editor.overlay(&id).unwrap().position,
        Position { x: 100.0, y: 100.0 }
    );
    assert!(store.calls().contains(&Call::List("default".to_string())));
}

#[tokio::test]
async fn successful_update_takes_server_copy() {
    let (store, _probe, mut editor) = common::setup().await;
    let id = editor.add_text_overlay().await.unwrap();

    assert!(
        editor
            .update_overlay(&id, OverlayPatch::content("Breaking news"))
            .await
    );
    assert_eq!(editor.overlays(), store.stored("default").as_slice());
}

#[tokio::test]
async fn empty_patch_is_not_sent() {
    let (store, _probe, mut editor) = common::setup().await;
    let id = editor.add_text_overlay().await.unwrap();

    assert!(!editor.update_overlay(&id, OverlayPatch::default()).await);
    assert!(store.updates().is_empty());
}
