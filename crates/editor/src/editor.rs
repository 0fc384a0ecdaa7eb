//! The overlay editor state machine.
//!
//! [`OverlayEditor`] owns the overlay list of one stream and everything the
//! user can do to it: add, select, drag, resize, edit text, restyle, hide and
//! delete. Every change is synchronized with the backend through an
//! [`OverlayStore`]. No operation returns a transport error; failures are
//! logged and reconciled (inline prompt error, reload, or banner).
//!
//! Panel controls (adding, restyling, reordering, hiding, deleting) and
//! pointer input are ignored while the editor is hidden.

use std::path::Path;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use rtspio_client::ApiError;
use rtspio_core::error::CoreError;
use rtspio_core::geometry::{Bounds, Point, Rect, ResizeHandle};
use rtspio_core::overlay::{CreateOverlay, Overlay, OverlayKind, OverlayStyle, ResolvedStyle};
use rtspio_core::patch::OverlayPatch;
use rtspio_core::render::{next_z_index, render_order};
use rtspio_core::types::OverlayId;
use rtspio_core::validation;

use crate::gesture::{Gesture, GestureKind};
use crate::probe::ImageProbe;
use crate::state::{
    EditKey, EditorMode, LoadStatus, CREATE_FAILED, IMAGE_LOAD_FAILED, LOAD_ERROR_BANNER,
};
use crate::store::OverlayStore;
use crate::upload;

/// Handle for one in-flight load.
///
/// Only the ticket from the most recent [`OverlayEditor::begin_load`] is
/// accepted by [`OverlayEditor::finish_load`]; older ones are discarded.
#[derive(Debug, Clone)]
pub struct LoadTicket {
    stream_id: String,
    generation: u64,
    cancel: CancellationToken,
}

impl LoadTicket {
    pub fn stream_id(&self) -> &str {
        &self.stream_id
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Fetch the overlay list for this ticket's stream.
    ///
    /// Resolves to `None` as soon as the ticket is cancelled.
    pub async fn fetch(
        &self,
        store: &dyn OverlayStore,
    ) -> Option<Result<Vec<Overlay>, ApiError>> {
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => None,
            result = store.list(&self.stream_id) => Some(result),
        }
    }
}

/// One overlay as it should be drawn over the video.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedOverlay {
    pub id: OverlayId,
    pub kind: OverlayKind,
    pub rect: Rect,
    pub z_index: i64,
    /// The stored content, or the draft while the text is being edited.
    pub content: String,
    pub style: ResolvedStyle,
    pub selected: bool,
    pub editing: bool,
    /// Whether the overlay takes pointer input. When false, clicks fall
    /// through to the video.
    pub interactive: bool,
}

/// One row of the editor panel's overlay list.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelEntry {
    pub id: OverlayId,
    pub kind: OverlayKind,
    pub label: String,
    pub rect: Rect,
    pub z_index: i64,
    pub visible: bool,
    pub selected: bool,
}

pub struct OverlayEditor {
    store: Arc<dyn OverlayStore>,
    probe: Arc<dyn ImageProbe>,
    stream_id: String,
    bounds: Bounds,
    overlays: Vec<Overlay>,
    status: LoadStatus,
    mode: EditorMode,
    selected: Option<OverlayId>,
    show_editor: bool,
    gesture: Option<Gesture>,
    generation: u64,
    load_cancel: CancellationToken,
}

impl OverlayEditor {
    /// Create an editor for `stream_id`. Nothing is loaded until
    /// [`load`](Self::load) is called.
    pub fn new(
        store: Arc<dyn OverlayStore>,
        probe: Arc<dyn ImageProbe>,
        stream_id: impl Into<String>,
        bounds: Bounds,
    ) -> Self {
        Self {
            store,
            probe,
            stream_id: stream_id.into(),
            bounds,
            overlays: Vec::new(),
            status: LoadStatus::Loading,
            mode: EditorMode::Idle,
            selected: None,
            show_editor: false,
            gesture: None,
            generation: 0,
            load_cancel: CancellationToken::new(),
        }
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn stream_id(&self) -> &str {
        &self.stream_id
    }

    pub fn overlays(&self) -> &[Overlay] {
        &self.overlays
    }

    pub fn overlay(&self, id: &str) -> Option<&Overlay> {
        self.overlays.iter().find(|o| o.id == id)
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn mode(&self) -> &EditorMode {
        &self.mode
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn selected_overlay(&self) -> Option<&Overlay> {
        self.selected.as_deref().and_then(|id| self.overlay(id))
    }

    pub fn show_editor(&self) -> bool {
        self.show_editor
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn is_dragging(&self) -> bool {
        self.gesture.is_some()
    }

    fn find_mut(&mut self, id: &str) -> Option<&mut Overlay> {
        self.overlays.iter_mut().find(|o| o.id == id)
    }

    /// Panel controls only act while the editor is shown.
    fn panel_shown(&self, action: &'static str) -> bool {
        if !self.show_editor {
            tracing::debug!(action, "Ignored while overlay editor is hidden");
        }
        self.show_editor
    }

    // -----------------------------------------------------------------------
    // Loading
    // -----------------------------------------------------------------------

    /// Start a load for the current stream, cancelling any load in flight.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.load_cancel.cancel();
        self.load_cancel = CancellationToken::new();
        self.generation += 1;
        self.status = LoadStatus::Loading;
        LoadTicket {
            stream_id: self.stream_id.clone(),
            generation: self.generation,
            cancel: self.load_cancel.clone(),
        }
    }

    /// Apply the result of a load. Returns `true` when the list was replaced.
    ///
    /// Results for a superseded ticket are dropped without touching state.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<Overlay>, ApiError>,
    ) -> bool {
        if ticket.generation != self.generation || ticket.is_cancelled() {
            tracing::debug!(
                stream_id = %ticket.stream_id,
                generation = ticket.generation,
                "Discarding stale overlay load"
            );
            return false;
        }

        match result {
            Ok(overlays) => {
                tracing::info!(
                    stream_id = %self.stream_id,
                    count = overlays.len(),
                    "Loaded overlays"
                );
                self.overlays = overlays;
                self.status = LoadStatus::Ready;
                self.forget_missing();
                true
            }
            Err(e) => {
                tracing::error!(stream_id = %self.stream_id, error = %e, "Failed to load overlays");
                self.status = LoadStatus::Failed(LOAD_ERROR_BANNER.to_string());
                false
            }
        }
    }

    /// Fetch the full overlay list and replace local state with it.
    pub async fn load(&mut self) -> bool {
        let ticket = self.begin_load();
        let store = Arc::clone(&self.store);
        match ticket.fetch(store.as_ref()).await {
            Some(result) => self.finish_load(ticket, result),
            None => false,
        }
    }

    /// Switch to another stream and load its overlays.
    pub async fn set_stream(&mut self, stream_id: impl Into<String>) -> bool {
        let stream_id = stream_id.into();
        if stream_id == self.stream_id {
            return self.load().await;
        }
        tracing::info!(from = %self.stream_id, to = %stream_id, "Switching stream");
        self.stream_id = stream_id;
        self.overlays.clear();
        self.selected = None;
        self.mode = EditorMode::Idle;
        self.gesture = None;
        self.load().await
    }

    /// Drop selection, edit and gesture state pointing at vanished overlays.
    fn forget_missing(&mut self) {
        if let Some(id) = self.selected.clone() {
            if self.overlay(&id).is_none() {
                self.selected = None;
            }
        }
        if let Some(id) = self.mode.editing_id().map(str::to_owned) {
            if self.overlay(&id).is_none() {
                self.mode = EditorMode::Idle;
            }
        }
        if let Some(id) = self.gesture.as_ref().map(|g| g.id().to_owned()) {
            if self.overlay(&id).is_none() {
                self.gesture = None;
            }
        }
    }

    // -----------------------------------------------------------------------
    // Panel and menu
    // -----------------------------------------------------------------------

    /// Show or hide the editor. Hiding commits a text edit in progress and
    /// closes the add menu and URL prompt.
    pub async fn set_editor_visible(&mut self, visible: bool) {
        if visible == self.show_editor {
            return;
        }
        if !visible {
            self.gesture = None;
            match self.mode {
                EditorMode::EditingText { .. } => {
                    self.commit_text_edit().await;
                }
                EditorMode::AddMenuOpen | EditorMode::ImageUrlPrompt { .. } => {
                    self.mode = EditorMode::Idle;
                }
                EditorMode::Idle => {}
            }
        }
        self.show_editor = visible;
        tracing::debug!(show_editor = visible, "Toggled overlay editor");
    }

    pub async fn toggle_editor(&mut self) {
        self.set_editor_visible(!self.show_editor).await;
    }

    /// Open or close the add menu. Opening it ends a text edit.
    pub async fn toggle_add_menu(&mut self) {
        if !self.show_editor {
            return;
        }
        match self.mode {
            EditorMode::AddMenuOpen => self.mode = EditorMode::Idle,
            EditorMode::EditingText { .. } => {
                self.commit_text_edit().await;
                self.mode = EditorMode::AddMenuOpen;
            }
            _ => self.mode = EditorMode::AddMenuOpen,
        }
    }

    /// Select an overlay, e.g. from the panel list.
    pub fn select(&mut self, id: &str) -> bool {
        if !self.show_editor || self.overlay(id).is_none() {
            return false;
        }
        self.selected = Some(id.to_string());
        true
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Rows of the editor panel in list order. Empty while the editor is
    /// hidden.
    pub fn panel_entries(&self) -> Vec<PanelEntry> {
        if !self.show_editor {
            return Vec::new();
        }
        self.overlays
            .iter()
            .map(|o| PanelEntry {
                id: o.id.clone(),
                kind: o.kind,
                label: o.label().to_string(),
                rect: o.rect(),
                z_index: o.z_index,
                visible: o.visible,
                selected: self.selected.as_deref() == Some(o.id.as_str()),
            })
            .collect()
    }

    // -----------------------------------------------------------------------
    // Creating overlays
    // -----------------------------------------------------------------------

    /// Create a default text overlay and select it.
    pub async fn add_text_overlay(&mut self) -> Option<OverlayId> {
        if !self.panel_shown("add text overlay") {
            return None;
        }
        self.leave_mode().await;
        let data = CreateOverlay::text(&self.stream_id, next_z_index(self.overlays.len()));
        match self.create(&data).await {
            Ok(id) => Some(id),
            Err(e) => {
                tracing::error!(stream_id = %self.stream_id, error = %e, "Failed to create text overlay");
                None
            }
        }
    }

    /// Create an image overlay from a local file, inlined as a data URI.
    pub async fn add_image_file(&mut self, path: &Path) -> Option<OverlayId> {
        if !self.panel_shown("add image file") {
            return None;
        }
        self.leave_mode().await;
        let content = match upload::read_as_data_uri(path).await {
            Ok(content) => content,
            Err(e) => {
                tracing::error!(error = %e, "Failed to read image file");
                return None;
            }
        };
        let data = CreateOverlay::image(
            &self.stream_id,
            content,
            next_z_index(self.overlays.len()),
        );
        match self.create(&data).await {
            Ok(id) => Some(id),
            Err(e) => {
                tracing::error!(stream_id = %self.stream_id, error = %e, "Failed to create image overlay");
                None
            }
        }
    }

    /// Open the image URL prompt (from the add menu).
    pub fn open_image_url_prompt(&mut self) {
        if !self.panel_shown("open image URL prompt") {
            return;
        }
        self.mode = EditorMode::ImageUrlPrompt {
            input: String::new(),
            error: None,
        };
    }

    /// Replace the prompt's input. Typing clears the previous error.
    pub fn set_image_url_input(&mut self, value: impl Into<String>) {
        if let EditorMode::ImageUrlPrompt { input, error } = &mut self.mode {
            *input = value.into();
            *error = None;
        }
    }

    pub fn cancel_image_url_prompt(&mut self) {
        if self.mode.is_prompt() {
            self.mode = EditorMode::Idle;
        }
    }

    fn set_prompt_error(&mut self, message: impl Into<String>) {
        if let EditorMode::ImageUrlPrompt { error, .. } = &mut self.mode {
            *error = Some(message.into());
        }
    }

    /// Validate, probe and persist the URL typed into the prompt.
    ///
    /// On any failure the prompt stays open with an inline error and no
    /// overlay is created.
    pub async fn submit_image_url(&mut self) -> Option<OverlayId> {
        let input = match &self.mode {
            EditorMode::ImageUrlPrompt { input, .. } => input.clone(),
            _ => return None,
        };

        let url = match validation::validate_image_url(&input) {
            Ok(url) => url,
            Err(CoreError::Validation(message)) => {
                self.set_prompt_error(message);
                return None;
            }
        };

        if let Err(e) = self.probe.probe(&url).await {
            tracing::warn!(url = %url, error = %e, "Image did not load");
            self.set_prompt_error(IMAGE_LOAD_FAILED);
            return None;
        }

        let data = CreateOverlay::image(&self.stream_id, url, next_z_index(self.overlays.len()));
        match self.create(&data).await {
            Ok(id) => {
                self.mode = EditorMode::Idle;
                Some(id)
            }
            Err(e) => {
                tracing::error!(stream_id = %self.stream_id, error = %e, "Failed to create image overlay");
                self.set_prompt_error(CREATE_FAILED);
                None
            }
        }
    }

    /// Close the menu or prompt, committing a text edit first.
    async fn leave_mode(&mut self) {
        match self.mode {
            EditorMode::EditingText { .. } => {
                self.commit_text_edit().await;
            }
            _ => self.mode = EditorMode::Idle,
        }
    }

    async fn create(&mut self, data: &CreateOverlay) -> Result<OverlayId, CreateFailure> {
        data.validate()?;
        let overlay = self.store.create(data).await?;
        let id = overlay.id.clone();
        tracing::info!(
            overlay_id = %id,
            kind = overlay.kind.as_str(),
            z_index = overlay.z_index,
            "Created overlay"
        );
        self.overlays.push(overlay);
        self.selected = Some(id.clone());
        Ok(id)
    }

    // -----------------------------------------------------------------------
    // Updating overlays
    // -----------------------------------------------------------------------

    /// Apply `patch` locally, then persist it.
    ///
    /// On success the local record is replaced with the server's copy. On
    /// failure the whole list is reloaded so local state matches the
    /// backend again.
    pub async fn update_overlay(&mut self, id: &str, patch: OverlayPatch) -> bool {
        if let Err(e) = patch.validate() {
            tracing::warn!(overlay_id = %id, error = %e, "Rejected overlay update");
            return false;
        }
        match self.find_mut(id) {
            Some(overlay) => overlay.apply_patch(&patch),
            None => {
                tracing::warn!(overlay_id = %id, "Update for unknown overlay");
                return false;
            }
        }

        match self.store.update(id, &patch).await {
            Ok(saved) => {
                tracing::debug!(overlay_id = %id, "Updated overlay");
                if let Some(overlay) = self.find_mut(id) {
                    *overlay = saved;
                }
                true
            }
            Err(e) => {
                tracing::error!(overlay_id = %id, error = %e, "Failed to update overlay");
                self.load().await;
                false
            }
        }
    }

    pub async fn toggle_visibility(&mut self, id: &str) -> bool {
        if !self.panel_shown("toggle visibility") {
            return false;
        }
        let Some(visible) = self.overlay(id).map(|o| o.visible) else {
            return false;
        };
        self.update_overlay(id, OverlayPatch::visible(!visible)).await
    }

    pub async fn set_z_index(&mut self, id: &str, z_index: i64) -> bool {
        if !self.panel_shown("set z-index") {
            return false;
        }
        self.update_overlay(id, OverlayPatch::z_index(z_index)).await
    }

    /// Set the text colour (`#RRGGBB`) of the selected text overlay.
    pub async fn set_text_color(&mut self, color: &str) -> Result<bool, CoreError> {
        validation::validate_color_hex(color)?;
        self.restyle_selected(OverlayStyle {
            color: Some(color.to_string()),
            ..Default::default()
        })
        .await
    }

    /// Set the font size of the selected text overlay.
    pub async fn set_font_size(&mut self, font_size: f64) -> Result<bool, CoreError> {
        validation::validate_font_size(font_size)?;
        self.restyle_selected(OverlayStyle {
            font_size: Some(font_size),
            ..Default::default()
        })
        .await
    }

    async fn restyle_selected(&mut self, change: OverlayStyle) -> Result<bool, CoreError> {
        if !self.panel_shown("restyle") {
            return Ok(false);
        }
        let overlay = self
            .selected_overlay()
            .ok_or_else(|| CoreError::Validation("no overlay selected".to_string()))?;
        if !overlay.is_text() {
            return Err(CoreError::Validation(
                "style controls apply to text overlays only".to_string(),
            ));
        }
        let id = overlay.id.clone();
        let style = overlay.style.clone().unwrap_or_default().merged(&change);
        Ok(self.update_overlay(&id, OverlayPatch::style(style)).await)
    }

    // -----------------------------------------------------------------------
    // Deleting overlays
    // -----------------------------------------------------------------------

    /// Delete remotely, then locally. A failed delete changes nothing.
    pub async fn delete_overlay(&mut self, id: &str) -> bool {
        if !self.panel_shown("delete overlay") {
            return false;
        }
        if let Err(e) = self.store.delete(id).await {
            tracing::error!(overlay_id = %id, error = %e, "Failed to delete overlay");
            return false;
        }
        tracing::info!(overlay_id = %id, "Deleted overlay");
        self.overlays.retain(|o| o.id != id);
        self.forget_missing();
        true
    }

    /// Delete every overlay of the current stream.
    pub async fn clear_stream(&mut self) -> bool {
        match self.store.delete_stream(&self.stream_id).await {
            Ok(message) => {
                tracing::info!(stream_id = %self.stream_id, message = %message, "Cleared stream overlays");
                self.overlays.clear();
                self.forget_missing();
                true
            }
            Err(e) => {
                tracing::error!(stream_id = %self.stream_id, error = %e, "Failed to clear stream overlays");
                false
            }
        }
    }

    // -----------------------------------------------------------------------
    // Inline text editing
    // -----------------------------------------------------------------------

    /// Click on an overlay in the video area.
    ///
    /// Selects it, and for text overlays starts inline editing seeded with
    /// the stored content. Ignored while the editor is hidden.
    pub async fn click_overlay(&mut self, id: &str) -> bool {
        if !self.panel_shown("click overlay") {
            return false;
        }
        let Some(overlay) = self.overlay(id) else {
            return false;
        };
        let is_text = overlay.is_text();
        let content = overlay.content.clone();

        let editing = self.mode.editing_id().map(str::to_owned);
        match editing.as_deref() {
            Some(current) if current == id => return true,
            Some(_) => {
                self.commit_text_edit().await;
            }
            None => {}
        }
        if self.overlay(id).is_none() {
            return false;
        }

        self.selected = Some(id.to_string());
        if is_text {
            self.mode = EditorMode::EditingText {
                id: id.to_string(),
                draft: content,
            };
        }
        true
    }

    /// Replace the draft of the text being edited.
    pub fn set_draft(&mut self, text: impl Into<String>) {
        if let EditorMode::EditingText { draft, .. } = &mut self.mode {
            *draft = text.into();
        }
    }

    pub async fn key(&mut self, key: EditKey) {
        match key {
            EditKey::Enter => {
                self.commit_text_edit().await;
            }
            EditKey::Escape => self.cancel_text_edit(),
        }
    }

    /// Focus left the text input: same as Enter.
    pub async fn blur(&mut self) {
        self.commit_text_edit().await;
    }

    /// Persist the draft and leave edit mode.
    pub async fn commit_text_edit(&mut self) -> bool {
        let EditorMode::EditingText { id, draft } = std::mem::take(&mut self.mode) else {
            return false;
        };
        self.update_overlay(&id, OverlayPatch::content(draft)).await
    }

    /// Leave edit mode without writing anything.
    pub fn cancel_text_edit(&mut self) {
        if self.mode.editing_id().is_some() {
            self.mode = EditorMode::Idle;
        }
    }

    // -----------------------------------------------------------------------
    // Drag and resize
    // -----------------------------------------------------------------------

    /// Press on an overlay body (`handle == None`) or one of its resize
    /// handles. Starts a gesture and selects the overlay.
    pub fn pointer_down(&mut self, id: &str, at: Point, handle: Option<ResizeHandle>) -> bool {
        if !self.show_editor {
            return false;
        }
        let Some(overlay) = self.overlay(id).filter(|o| o.visible) else {
            return false;
        };
        let kind = match handle {
            Some(handle) => GestureKind::Resize(handle),
            None => GestureKind::Drag,
        };
        self.gesture = Some(Gesture::new(id.to_string(), kind, overlay.rect(), at));
        self.selected = Some(id.to_string());
        true
    }

    /// Follow the pointer. Only local state changes; nothing is sent.
    pub fn pointer_move(&mut self, at: Point) {
        let bounds = self.bounds;
        let Some(gesture) = self.gesture.as_mut() else {
            return;
        };
        let rect = gesture.update(bounds, at);
        let id = gesture.id().to_string();
        if let Some(overlay) = self.find_mut(&id) {
            overlay.set_rect(rect);
        }
    }

    /// Release the pointer, persisting the final geometry if it changed.
    pub async fn pointer_up(&mut self) -> bool {
        let Some(gesture) = self.gesture.take() else {
            return false;
        };
        match gesture.finish() {
            Some((id, patch)) => self.update_overlay(&id, patch).await,
            None => false,
        }
    }

    // -----------------------------------------------------------------------
    // Rendering
    // -----------------------------------------------------------------------

    /// Visible overlays in paint order, with everything needed to draw them.
    pub fn render(&self) -> Vec<RenderedOverlay> {
        let editing = self.mode.editing_id();
        render_order(&self.overlays)
            .into_iter()
            .map(|o| {
                let is_editing = editing == Some(o.id.as_str());
                let content = match (&self.mode, is_editing) {
                    (EditorMode::EditingText { draft, .. }, true) => draft.clone(),
                    _ => o.content.clone(),
                };
                RenderedOverlay {
                    id: o.id.clone(),
                    kind: o.kind,
                    rect: o.rect(),
                    z_index: o.z_index,
                    content,
                    style: o.resolved_style(),
                    selected: self.show_editor && self.selected.as_deref() == Some(o.id.as_str()),
                    editing: is_editing,
                    interactive: self.show_editor,
                }
            })
            .collect()
    }
}

/// Why a create did not go through.
#[derive(Debug, thiserror::Error)]
enum CreateFailure {
    #[error(transparent)]
    Invalid(#[from] CoreError),
    #[error(transparent)]
    Api(#[from] ApiError),
}
