//! Interactive overlay editor for the RTSP.io video page.
//!
//! The editor keeps the overlays of one stream in sync with the backend and
//! models every user interaction (menus, prompts, drag and resize, inline
//! text editing) as explicit state transitions, so it can be driven by any
//! front end.

pub mod editor;
pub mod gesture;
pub mod probe;
pub mod state;
pub mod store;
pub mod upload;

pub use editor::{LoadTicket, OverlayEditor, PanelEntry, RenderedOverlay};
pub use probe::{HttpImageProbe, ImageInfo, ImageProbe, ProbeError};
pub use state::{EditKey, EditorMode, LoadStatus};
pub use store::OverlayStore;
