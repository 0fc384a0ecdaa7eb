//! Uniform error shape for every REST call.
//!
//! Transport and server failures are normalized into [`ApiError`]
//! (`message`, optional `details`, `status`). `status` is the HTTP code for
//! server rejections and 0 when no response was received.

use std::fmt;

/// Message used when the server's error body carries no `error` field.
pub const DEFAULT_SERVER_MESSAGE: &str = "An error occurred";

/// Message used when a request was sent but no response arrived.
pub const NETWORK_MESSAGE: &str = "Network error - please check your connection";

/// Message used when a request failed without any further explanation.
pub const UNEXPECTED_MESSAGE: &str = "An unexpected error occurred";

/// Which of the three failure classes an [`ApiError`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// The server answered with a non-2xx status.
    Server,
    /// The request went out but no response came back (refused, timed out, reset).
    Network,
    /// The request could not be built or sent, or the response was unreadable.
    Request,
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Server => "server",
            Self::Network => "network",
            Self::Request => "request",
        })
    }
}

#[derive(Debug, Clone, thiserror::Error)]
#[error("{message} (status {status})")]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
    pub details: Option<serde_json::Value>,
    pub status: u16,
}

impl ApiError {
    /// Build a server-class error from a non-2xx status and its raw body.
    ///
    /// The message comes from the body's `error` field and the details from
    /// its `details` field when the body is a JSON object.
    pub fn server(status: u16, body: &str) -> Self {
        let parsed: Option<serde_json::Value> = serde_json::from_str(body).ok();
        let message = parsed
            .as_ref()
            .and_then(|v| v.get("error"))
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| DEFAULT_SERVER_MESSAGE.to_string());
        let details = parsed
            .as_ref()
            .and_then(|v| v.get("details"))
            .filter(|v| !v.is_null())
            .cloned();
        Self {
            kind: ApiErrorKind::Server,
            message,
            details,
            status,
        }
    }

    pub fn network() -> Self {
        Self {
            kind: ApiErrorKind::Network,
            message: NETWORK_MESSAGE.to_string(),
            details: None,
            status: 0,
        }
    }

    pub fn request(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            kind: ApiErrorKind::Request,
            message: if message.is_empty() {
                UNEXPECTED_MESSAGE.to_string()
            } else {
                message
            },
            details: None,
            status: 0,
        }
    }

    /// True for failures worth retrying silently rather than showing the user.
    pub fn is_network(&self) -> bool {
        self.kind == ApiErrorKind::Network
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() || err.is_decode() {
            return Self::request(err.to_string());
        }
        if let Some(status) = err.status() {
            return Self::server(status.as_u16(), "");
        }
        if err.is_connect() || err.is_timeout() || err.is_request() || err.is_body() {
            return Self::network();
        }
        Self::request(err.to_string())
    }
}
