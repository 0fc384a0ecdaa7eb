//! Editor interaction states.

use rtspio_core::types::OverlayId;

/// Banner shown while the last overlay load has failed.
pub const LOAD_ERROR_BANNER: &str = "Failed to load overlays";

/// Message shown under the URL field when the image does not load.
pub const IMAGE_LOAD_FAILED: &str = "Failed to load image. Please check the URL.";

/// Message shown under the URL field when the backend rejects the create.
pub const CREATE_FAILED: &str = "Failed to create overlay";

/// Progress of the overlay list for the current stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    Loading,
    Ready,
    Failed(String),
}

impl LoadStatus {
    pub fn banner(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// What the editor is doing right now.
///
/// Exactly one of these holds at a time, so the add menu, the image URL
/// prompt and an inline text edit can never be open together.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EditorMode {
    #[default]
    Idle,
    AddMenuOpen,
    ImageUrlPrompt {
        input: String,
        error: Option<String>,
    },
    EditingText {
        id: OverlayId,
        draft: String,
    },
}

impl EditorMode {
    pub fn editing_id(&self) -> Option<&str> {
        match self {
            Self::EditingText { id, .. } => Some(id),
            _ => None,
        }
    }

    pub fn is_prompt(&self) -> bool {
        matches!(self, Self::ImageUrlPrompt { .. })
    }
}

/// Keys the inline text editor reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKey {
    Enter,
    Escape,
}
