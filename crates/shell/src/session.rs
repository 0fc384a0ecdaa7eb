//! One interactive page session: the editor plus the surrounding page.

use std::io::Write;
use std::path::Path;

use validator::Validate;

use rtspio_client::RtspMeApi;
use rtspio_core::embed::ConvertRtspRequest;
use rtspio_core::geometry::Point;
use rtspio_editor::{EditKey, EditorMode, OverlayEditor};

use crate::command::{Command, HELP};
use crate::page::{HomePage, PlayerView, Route};

/// Whether the read loop should keep going after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Session {
    editor: OverlayEditor,
    rtspme: Option<RtspMeApi>,
    embed_url: String,
    player_title: String,
}

impl Session {
    /// `rtspme` is `None` when no backend is configured for conversions.
    pub fn new(
        editor: OverlayEditor,
        rtspme: Option<RtspMeApi>,
        embed_url: impl Into<String>,
        player_title: impl Into<String>,
    ) -> Self {
        Self {
            editor,
            rtspme,
            embed_url: embed_url.into(),
            player_title: player_title.into(),
        }
    }

    pub fn editor(&self) -> &OverlayEditor {
        &self.editor
    }

    pub fn embed_url(&self) -> &str {
        &self.embed_url
    }

    pub fn player(&self) -> PlayerView {
        PlayerView::new(&self.embed_url, &self.player_title, self.editor.status())
    }

    /// Print the home page, then load the overlays of the stream.
    pub async fn start(&mut self, out: &mut impl Write) -> std::io::Result<()> {
        tracing::debug!(path = Route::Home.path(), "Rendering route");
        self.print_home(out)?;
        self.editor.load().await;
        writeln!(out)?;
        writeln!(out, "{}", self.player())?;
        self.print_status(out)
    }

    /// Print the page header, player and instructions.
    pub fn print_home(&self, out: &mut impl Write) -> std::io::Result<()> {
        let player = self.player();
        write!(out, "{}", HomePage { player: &player })
    }

    /// Run one command and print its outcome.
    pub async fn execute(&mut self, command: Command, out: &mut impl Write) -> std::io::Result<Flow> {
        tracing::debug!(?command, "Executing command");
        match command {
            Command::Help => writeln!(out, "{HELP}")?,
            Command::List => self.print_list(out)?,
            Command::Render => self.print_render(out)?,
            Command::Quit => return Ok(Flow::Quit),

            Command::ToggleEditor => {
                self.editor.toggle_editor().await;
                let state = if self.editor.show_editor() { "shown" } else { "hidden" };
                writeln!(out, "Overlay editor {state}")?;
            }
            Command::ToggleMenu => {
                if self.require_editor(out)? {
                    self.editor.toggle_add_menu().await;
                    let state = match self.editor.mode() {
                        EditorMode::AddMenuOpen => "open",
                        _ => "closed",
                    };
                    writeln!(out, "Add menu {state}")?;
                }
            }

            Command::AddText => {
                if self.require_editor(out)? {
                    match self.editor.add_text_overlay().await {
                        Some(id) => writeln!(out, "Added text overlay {id}")?,
                        None => writeln!(out, "Failed to create text overlay")?,
                    }
                }
            }
            Command::AddImageFile(path) => {
                if self.require_editor(out)? {
                    match self.editor.add_image_file(Path::new(&path)).await {
                        Some(id) => writeln!(out, "Added image overlay {id}")?,
                        None => writeln!(out, "Failed to add image from {path}")?,
                    }
                }
            }
            Command::AddImageUrl(url) => {
                if self.require_editor(out)? {
                    self.editor.open_image_url_prompt();
                    self.editor.set_image_url_input(url);
                    match self.editor.submit_image_url().await {
                        Some(id) => writeln!(out, "Added image overlay {id}")?,
                        None => {
                            if let EditorMode::ImageUrlPrompt { error: Some(error), .. } =
                                self.editor.mode()
                            {
                                writeln!(out, "{error}")?;
                            }
                            self.editor.cancel_image_url_prompt();
                        }
                    }
                }
            }

            Command::Select(id) => {
                if self.require_editor(out)? {
                    if self.editor.select(&id) {
                        writeln!(out, "Selected {id}")?;
                    } else {
                        writeln!(out, "No overlay {id}")?;
                    }
                }
            }
            Command::Click(id) => {
                if self.require_editor(out)? {
                    if !self.editor.click_overlay(&id).await {
                        writeln!(out, "No overlay {id}")?;
                    } else if let EditorMode::EditingText { draft, .. } = self.editor.mode() {
                        writeln!(out, "Editing {id}: {draft}")?;
                    } else {
                        writeln!(out, "Selected {id}")?;
                    }
                }
            }
            Command::Type(text) => {
                if self.editor.mode().editing_id().is_some() {
                    self.editor.set_draft(text);
                } else {
                    writeln!(out, "No text overlay is being edited")?;
                }
            }
            Command::Enter => self.editor.key(EditKey::Enter).await,
            Command::Escape => self.editor.key(EditKey::Escape).await,
            Command::Blur => self.editor.blur().await,

            Command::Move { id, x, y } => {
                if self.require_editor(out)? {
                    let Some(start) = self.editor.overlay(&id).map(|o| o.rect()) else {
                        writeln!(out, "No overlay {id}")?;
                        return Ok(Flow::Continue);
                    };
                    if self.editor.pointer_down(&id, Point::new(start.x, start.y), None) {
                        self.editor.pointer_move(Point::new(x, y));
                        self.editor.pointer_up().await;
                        self.print_geometry(&id, out)?;
                    } else {
                        writeln!(out, "Overlay {id} is hidden")?;
                    }
                }
            }
            Command::Resize { id, handle, dx, dy } => {
                if self.require_editor(out)? {
                    if self.editor.pointer_down(&id, Point::default(), Some(handle)) {
                        self.editor.pointer_move(Point::new(dx, dy));
                        self.editor.pointer_up().await;
                        self.print_geometry(&id, out)?;
                    } else {
                        writeln!(out, "No visible overlay {id}")?;
                    }
                }
            }

            Command::Hide(id) => {
                if self.require_editor(out)? && !self.editor.toggle_visibility(&id).await {
                    writeln!(out, "Could not change visibility of {id}")?;
                }
            }
            Command::Delete(id) => {
                if self.require_editor(out)? {
                    if self.editor.delete_overlay(&id).await {
                        writeln!(out, "Deleted {id}")?;
                    } else {
                        writeln!(out, "Failed to delete {id}")?;
                    }
                }
            }
            Command::ZIndex { id, z_index } => {
                if self.require_editor(out)? && !self.editor.set_z_index(&id, z_index).await {
                    writeln!(out, "Could not set z-index of {id}")?;
                }
            }
            Command::Color(color) => {
                if self.require_editor(out)? {
                    if let Err(e) = self.editor.set_text_color(&color).await {
                        writeln!(out, "{e}")?;
                    }
                }
            }
            Command::Font(size) => {
                if self.require_editor(out)? {
                    if let Err(e) = self.editor.set_font_size(size).await {
                        writeln!(out, "{e}")?;
                    }
                }
            }

            Command::Stream(stream_id) => {
                self.editor.set_stream(stream_id).await;
                self.print_status(out)?;
            }
            Command::Reload => {
                self.editor.load().await;
                self.print_status(out)?;
            }
            Command::Clear => {
                if self.editor.clear_stream().await {
                    writeln!(out, "Cleared overlays of stream {}", self.editor.stream_id())?;
                } else {
                    writeln!(out, "Failed to clear overlays")?;
                }
            }
            Command::Convert { rtsp_url, name } => self.convert(rtsp_url, name, out).await?,
        }
        Ok(Flow::Continue)
    }

    fn require_editor(&self, out: &mut impl Write) -> std::io::Result<bool> {
        if !self.editor.show_editor() {
            writeln!(out, "Overlay editor is hidden, run 'editor' first")?;
            return Ok(false);
        }
        Ok(true)
    }

    async fn convert(
        &mut self,
        rtsp_url: String,
        name: Option<String>,
        out: &mut impl Write,
    ) -> std::io::Result<()> {
        let request = ConvertRtspRequest {
            name,
            ..ConvertRtspRequest::new(rtsp_url)
        };
        if let Err(e) = request.validate() {
            tracing::warn!(rtsp_url = %request.rtsp_url, error = %e, "Rejected RTSP URL");
            return writeln!(out, "Invalid RTSP URL format. Must start with rtsp:// or rtsps://");
        }
        let Some(rtspme) = &self.rtspme else {
            return writeln!(out, "RTSP conversion is not available");
        };
        match rtspme.convert_rtsp(&request).await {
            Ok(embed) => {
                tracing::info!(stream_id = %embed.stream_id, embed_url = %embed.embed_url, "Converted RTSP stream");
                self.embed_url = embed.embed_url;
                writeln!(out, "{}: {}", embed.name, self.embed_url)?;
                if !embed.note.is_empty() {
                    writeln!(out, "{}", embed.note)?;
                }
                writeln!(out, "{}", self.player())
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to convert RTSP stream");
                writeln!(out, "{}", e.message)
            }
        }
    }

    fn print_status(&self, out: &mut impl Write) -> std::io::Result<()> {
        match self.editor.status().banner() {
            Some(banner) => writeln!(out, "{banner}"),
            None => writeln!(
                out,
                "Stream {}: {} overlays",
                self.editor.stream_id(),
                self.editor.overlays().len()
            ),
        }
    }

    fn print_geometry(&self, id: &str, out: &mut impl Write) -> std::io::Result<()> {
        if let Some(overlay) = self.editor.overlay(id) {
            let r = overlay.rect();
            writeln!(out, "{id} at ({}, {}) size {}x{}", r.x, r.y, r.w, r.h)?;
        }
        Ok(())
    }

    /// The editor panel's overlay list.
    fn print_list(&self, out: &mut impl Write) -> std::io::Result<()> {
        if !self.require_editor(out)? {
            return Ok(());
        }
        if let Some(banner) = self.editor.status().banner() {
            writeln!(out, "! {banner}")?;
        }
        let entries = self.editor.panel_entries();
        if entries.is_empty() {
            return writeln!(out, "No overlays");
        }
        for entry in entries {
            let marker = if entry.selected { '*' } else { ' ' };
            let r = entry.rect;
            writeln!(
                out,
                "{marker} {} {:<5} z={} {} ({}, {}) {}x{} {}",
                entry.id,
                entry.kind.as_str(),
                entry.z_index,
                if entry.visible { "shown " } else { "hidden" },
                r.x,
                r.y,
                r.w,
                r.h,
                truncate(&entry.label, 32),
            )?;
        }
        Ok(())
    }

    fn print_render(&self, out: &mut impl Write) -> std::io::Result<()> {
        writeln!(out, "{}", self.player())?;
        for item in self.editor.render() {
            let mut flags = Vec::new();
            if item.selected {
                flags.push("selected");
            }
            if item.editing {
                flags.push("editing");
            }
            if !item.interactive {
                flags.push("pass-through");
            }
            writeln!(
                out,
                "  z={} {} {} ({}, {}) {}x{} color={} font={} [{}] {}",
                item.z_index,
                item.id,
                item.kind.as_str(),
                item.rect.x,
                item.rect.y,
                item.rect.w,
                item.rect.h,
                item.style.color,
                item.style.font_size,
                flags.join(","),
                truncate(&item.content, 32),
            )?;
        }
        Ok(())
    }
}

/// At most `max` characters, with `...` when cut.
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let cut: String = s.chars().take(max).collect();
    format!("{cut}...")
}
