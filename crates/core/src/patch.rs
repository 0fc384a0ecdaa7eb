//! Partial overlay updates (`PUT /overlays/:id` bodies).
//!
//! [`OverlayPatch`] carries only the mutable fields. It has no `type` or
//! `stream_id` field: a patch cannot change an overlay's kind or stream.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::geometry::Rect;
use crate::overlay::{OverlayStyle, Position, Size};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OverlayPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<Size>,
    #[serde(rename = "zIndex", default, skip_serializing_if = "Option::is_none")]
    pub z_index: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<OverlayStyle>,
}

impl OverlayPatch {
    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Default::default()
        }
    }

    pub fn position(position: Position) -> Self {
        Self {
            position: Some(position),
            ..Default::default()
        }
    }

    /// Position and size together, as committed at the end of a resize.
    pub fn geometry(rect: Rect) -> Self {
        Self {
            position: Some(Position { x: rect.x, y: rect.y }),
            size: Some(Size { w: rect.w, h: rect.h }),
            ..Default::default()
        }
    }

    pub fn visible(visible: bool) -> Self {
        Self {
            visible: Some(visible),
            ..Default::default()
        }
    }

    pub fn z_index(z_index: i64) -> Self {
        Self {
            z_index: Some(z_index),
            ..Default::default()
        }
    }

    pub fn style(style: OverlayStyle) -> Self {
        Self {
            style: Some(style),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Reject patches that carry nothing or out-of-range geometry/style.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.is_empty() {
            return Err(CoreError::Validation(
                "update must change at least one field".to_string(),
            ));
        }
        if let Some(position) = self.position {
            crate::validation::validate_position(position)?;
        }
        if let Some(size) = self.size {
            crate::validation::validate_size(size)?;
        }
        if let Some(style) = &self.style {
            crate::validation::validate_style(style)?;
        }
        Ok(())
    }
}
