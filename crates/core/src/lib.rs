//! Overlay domain model for the RTSP.io video page.
//!
//! Records exchanged with the overlay backend, the partial-update payload,
//! container geometry, stacking order, and shared validation.

pub mod data_uri;
pub mod embed;
pub mod error;
pub mod geometry;
pub mod overlay;
pub mod patch;
pub mod render;
pub mod timestamp;
pub mod types;
pub mod validation;
