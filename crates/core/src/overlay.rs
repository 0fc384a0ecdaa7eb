//! Overlay records as exchanged with the overlay backend.
//!
//! An overlay is a text label or an image positioned over the video frame.
//! Field names follow the backend's wire format (`_id`, `type`, `zIndex`,
//! camelCase style keys) via serde renames.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::geometry::Rect;
use crate::patch::OverlayPatch;
use crate::types::{OverlayId, Timestamp, DEFAULT_STREAM_ID};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Content given to a freshly added text overlay.
pub const DEFAULT_TEXT_CONTENT: &str = "New Text Overlay";

/// Placement of a freshly added text overlay.
pub const DEFAULT_TEXT_POSITION: Position = Position { x: 100.0, y: 100.0 };

/// Size of a freshly added text overlay.
pub const DEFAULT_TEXT_SIZE: Size = Size { w: 200.0, h: 50.0 };

/// Placement of a freshly added image overlay.
pub const DEFAULT_IMAGE_POSITION: Position = Position { x: 150.0, y: 150.0 };

/// Size of a freshly added image overlay.
pub const DEFAULT_IMAGE_SIZE: Size = Size { w: 200.0, h: 150.0 };

/// Text colour used when a style does not set one.
pub const DEFAULT_TEXT_COLOR: &str = "#ffffff";

/// Font size in pixels used when a style does not set one.
pub const DEFAULT_FONT_SIZE: f64 = 16.0;

/// Background used when a style does not set one.
pub const DEFAULT_BACKGROUND: &str = "transparent";

/// Corner radius in pixels used when a style does not set one.
pub const DEFAULT_BORDER_RADIUS: f64 = 4.0;

// ---------------------------------------------------------------------------
// Kind
// ---------------------------------------------------------------------------

/// What an overlay displays. Fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlayKind {
    Text,
    Image,
}

/// All valid overlay kind strings.
const VALID_KIND_STRINGS: &[&str] = &["text", "image"];

impl OverlayKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Image => "image",
        }
    }

    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "text" => Ok(Self::Text),
            "image" => Ok(Self::Image),
            _ => Err(CoreError::Validation(format!(
                "Invalid overlay type '{s}'. Must be one of: {}",
                VALID_KIND_STRINGS.join(", ")
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Geometry and style
// ---------------------------------------------------------------------------

/// Top-left corner in pixels, relative to the video container.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Width and height in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub w: f64,
    pub h: f64,
}

/// Optional presentation attributes. Every field may be absent.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<f64>,
}

impl OverlayStyle {
    /// Style given to new text overlays.
    pub fn default_text() -> Self {
        Self {
            color: Some(DEFAULT_TEXT_COLOR.to_string()),
            font_size: Some(DEFAULT_FONT_SIZE),
            background: Some(DEFAULT_BACKGROUND.to_string()),
            border_radius: Some(DEFAULT_BORDER_RADIUS),
        }
    }

    /// Style given to new image overlays.
    pub fn default_image() -> Self {
        Self {
            border_radius: Some(DEFAULT_BORDER_RADIUS),
            ..Default::default()
        }
    }

    /// Overlay `other` on top of `self`: fields set in `other` win.
    pub fn merged(&self, other: &OverlayStyle) -> OverlayStyle {
        OverlayStyle {
            color: other.color.clone().or_else(|| self.color.clone()),
            font_size: other.font_size.or(self.font_size),
            background: other.background.clone().or_else(|| self.background.clone()),
            border_radius: other.border_radius.or(self.border_radius),
        }
    }
}

/// A style with every default filled in, ready for presentation.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedStyle {
    pub color: String,
    pub font_size: f64,
    pub background: String,
    pub border_radius: f64,
}

impl From<Option<&OverlayStyle>> for ResolvedStyle {
    fn from(style: Option<&OverlayStyle>) -> Self {
        let style = style.cloned().unwrap_or_default();
        Self {
            color: style.color.unwrap_or_else(|| DEFAULT_TEXT_COLOR.to_string()),
            font_size: style.font_size.unwrap_or(DEFAULT_FONT_SIZE),
            background: style
                .background
                .unwrap_or_else(|| DEFAULT_BACKGROUND.to_string()),
            border_radius: style.border_radius.unwrap_or(DEFAULT_BORDER_RADIUS),
        }
    }
}

// ---------------------------------------------------------------------------
// Overlay
// ---------------------------------------------------------------------------

fn default_stream_id() -> String {
    DEFAULT_STREAM_ID.to_string()
}

fn default_visible() -> bool {
    true
}

/// A persisted overlay as returned by the backend.
///
/// A missing `zIndex` orders as 0 and a missing `visible` counts as shown,
/// matching what the backend fills in on create.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Overlay {
    #[serde(rename = "_id")]
    pub id: OverlayId,
    #[serde(rename = "overlayId", default, skip_serializing_if = "Option::is_none")]
    pub overlay_id: Option<String>,
    #[serde(rename = "stream_id", alias = "streamId", default = "default_stream_id")]
    pub stream_id: String,
    #[serde(rename = "type")]
    pub kind: OverlayKind,
    pub content: String,
    pub position: Position,
    pub size: Size,
    #[serde(rename = "zIndex", default)]
    pub z_index: i64,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<OverlayStyle>,
    #[serde(
        rename = "createdAt",
        default,
        with = "crate::timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<Timestamp>,
    #[serde(
        rename = "updatedAt",
        default,
        with = "crate::timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<Timestamp>,
}

impl Overlay {
    pub fn is_text(&self) -> bool {
        self.kind == OverlayKind::Text
    }

    pub fn rect(&self) -> Rect {
        Rect {
            x: self.position.x,
            y: self.position.y,
            w: self.size.w,
            h: self.size.h,
        }
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.position = Position { x: rect.x, y: rect.y };
        self.size = Size { w: rect.w, h: rect.h };
    }

    /// Short label for overlay lists: the text itself, or `Image`.
    pub fn label(&self) -> &str {
        match self.kind {
            OverlayKind::Text => &self.content,
            OverlayKind::Image => "Image",
        }
    }

    pub fn resolved_style(&self) -> ResolvedStyle {
        ResolvedStyle::from(self.style.as_ref())
    }

    /// Apply a partial update in place. The kind is never touched.
    pub fn apply_patch(&mut self, patch: &OverlayPatch) {
        if let Some(content) = &patch.content {
            self.content = content.clone();
        }
        if let Some(position) = patch.position {
            self.position = position;
        }
        if let Some(size) = patch.size {
            self.size = size;
        }
        if let Some(z_index) = patch.z_index {
            self.z_index = z_index;
        }
        if let Some(visible) = patch.visible {
            self.visible = visible;
        }
        if let Some(style) = &patch.style {
            self.style = Some(style.clone());
        }
    }
}

// ---------------------------------------------------------------------------
// Create payload
// ---------------------------------------------------------------------------

/// Body of `POST /overlays/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateOverlay {
    #[serde(default = "default_stream_id")]
    pub stream_id: String,
    #[serde(rename = "type")]
    pub kind: OverlayKind,
    pub content: String,
    pub position: Position,
    pub size: Size,
    #[serde(rename = "zIndex", default, skip_serializing_if = "Option::is_none")]
    pub z_index: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<OverlayStyle>,
}

impl CreateOverlay {
    /// A default text overlay at the standard text placement.
    pub fn text(stream_id: &str, z_index: i64) -> Self {
        Self {
            stream_id: stream_id.to_string(),
            kind: OverlayKind::Text,
            content: DEFAULT_TEXT_CONTENT.to_string(),
            position: DEFAULT_TEXT_POSITION,
            size: DEFAULT_TEXT_SIZE,
            z_index: Some(z_index),
            visible: Some(true),
            style: Some(OverlayStyle::default_text()),
        }
    }

    /// An image overlay showing `content` (a URL or data URI).
    pub fn image(stream_id: &str, content: String, z_index: i64) -> Self {
        Self {
            stream_id: stream_id.to_string(),
            kind: OverlayKind::Image,
            content,
            position: DEFAULT_IMAGE_POSITION,
            size: DEFAULT_IMAGE_SIZE,
            z_index: Some(z_index),
            visible: Some(true),
            style: Some(OverlayStyle::default_image()),
        }
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.kind == OverlayKind::Image && self.content.trim().is_empty() {
            return Err(CoreError::Validation(
                "image overlay content must not be empty".to_string(),
            ));
        }
        crate::validation::validate_position(self.position)?;
        crate::validation::validate_size(self.size)?;
        if let Some(style) = &self.style {
            crate::validation::validate_style(style)?;
        }
        Ok(())
    }
}
