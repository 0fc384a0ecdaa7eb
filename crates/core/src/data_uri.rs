//! Embedding image bytes as `data:` URIs.
//!
//! Uploaded image files are stored inline in the overlay content rather
//! than as a reference to the local file.

use std::path::Path;

use base64::Engine;

use crate::error::CoreError;

/// Image MIME type sniffed from the bytes first, then the extension.
///
/// `None` when neither identifies an image format.
pub fn sniff_mime(bytes: &[u8], file_name: Option<&Path>) -> Option<&'static str> {
    if let Ok(format) = image::guess_format(bytes) {
        return Some(format.to_mime_type());
    }
    file_name
        .and_then(|name| image::ImageFormat::from_path(name).ok())
        .map(|format| format.to_mime_type())
}

/// `data:<mime>;base64,<payload>`
pub fn encode(bytes: &[u8], mime: &str) -> String {
    let payload = base64::engine::general_purpose::STANDARD.encode(bytes);
    format!("data:{mime};base64,{payload}")
}

pub fn is_data_uri(s: &str) -> bool {
    s.starts_with("data:")
}

/// Split a base64 `data:` URI into its MIME type and decoded bytes.
pub fn decode(uri: &str) -> Result<(String, Vec<u8>), CoreError> {
    let rest = uri
        .strip_prefix("data:")
        .ok_or_else(|| CoreError::Validation("not a data URI".to_string()))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| CoreError::Validation("data URI has no payload".to_string()))?;
    let mime = header
        .strip_suffix(";base64")
        .ok_or_else(|| CoreError::Validation("only base64 data URIs are supported".to_string()))?;
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(payload.trim())
        .map_err(|e| CoreError::Validation(format!("invalid base64 payload: {e}")))?;
    Ok((mime.to_string(), bytes))
}
