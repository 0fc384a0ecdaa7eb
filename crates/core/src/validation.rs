//! Input validation shared by the editor and the client.

use validator::ValidateUrl;

use crate::error::CoreError;
use crate::overlay::{OverlayStyle, Position, Size};

/// Smallest font size offered by the style controls.
pub const MIN_FONT_SIZE: f64 = 12.0;

/// Largest font size offered by the style controls.
pub const MAX_FONT_SIZE: f64 = 48.0;

/// URL schemes accepted for RTSP sources.
pub const RTSP_SCHEMES: &[&str] = &["rtsp://", "rtsps://"];

/// Check an image URL typed by the user and return it trimmed.
///
/// Error messages are user-facing and shown inline under the URL field.
pub fn validate_image_url(input: &str) -> Result<String, CoreError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Please enter an image URL".to_string()));
    }
    let candidate = trimmed.to_string();
    if !candidate.validate_url() {
        return Err(CoreError::Validation("Please enter a valid URL".to_string()));
    }
    Ok(candidate)
}

/// Validate that a color string matches `#RRGGBB`.
pub fn validate_color_hex(color: &str) -> Result<(), CoreError> {
    let valid = color
        .strip_prefix('#')
        .is_some_and(|hex| hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()));
    if !valid {
        return Err(CoreError::Validation(format!(
            "color must be in #RRGGBB format, got '{color}'"
        )));
    }
    Ok(())
}

pub fn validate_font_size(size: f64) -> Result<(), CoreError> {
    if !size.is_finite() || !(MIN_FONT_SIZE..=MAX_FONT_SIZE).contains(&size) {
        return Err(CoreError::Validation(format!(
            "font size must be between {MIN_FONT_SIZE} and {MAX_FONT_SIZE}, got {size}"
        )));
    }
    Ok(())
}

pub fn validate_position(position: Position) -> Result<(), CoreError> {
    if !(position.x.is_finite() && position.y.is_finite()) || position.x < 0.0 || position.y < 0.0
    {
        return Err(CoreError::Validation(format!(
            "position must be non-negative, got ({}, {})",
            position.x, position.y
        )));
    }
    Ok(())
}

pub fn validate_size(size: Size) -> Result<(), CoreError> {
    if !(size.w.is_finite() && size.h.is_finite()) || size.w < 0.0 || size.h < 0.0 {
        return Err(CoreError::Validation(format!(
            "size must be non-negative, got {}x{}",
            size.w, size.h
        )));
    }
    Ok(())
}

/// Colour and font size are checked when present; background is free-form CSS.
pub fn validate_style(style: &OverlayStyle) -> Result<(), CoreError> {
    if let Some(color) = &style.color {
        validate_color_hex(color)?;
    }
    if let Some(size) = style.font_size {
        validate_font_size(size)?;
    }
    if let Some(radius) = style.border_radius {
        if !radius.is_finite() || radius < 0.0 {
            return Err(CoreError::Validation(format!(
                "border radius must be non-negative, got {radius}"
            )));
        }
    }
    Ok(())
}

/// RTSP source URLs must use the `rtsp://` or `rtsps://` scheme.
pub fn validate_rtsp_url(url: &str) -> Result<(), validator::ValidationError> {
    if RTSP_SCHEMES.iter().any(|scheme| url.starts_with(scheme)) {
        Ok(())
    } else {
        let mut err = validator::ValidationError::new("rtsp_scheme");
        err.message =
            Some("Invalid RTSP URL format. Must start with rtsp:// or rtsps://".into());
        Err(err)
    }
}
