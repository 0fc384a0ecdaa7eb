use rtspio_client::ClientConfig;
use rtspio_core::geometry::Bounds;
use rtspio_core::types::DEFAULT_STREAM_ID;

/// Player embed shown when `RTSPIO_EMBED_URL` is unset.
pub const DEFAULT_EMBED_URL: &str = "https://rtsp.me/embed/K68Zhiyr/";

/// Player title when `RTSPIO_PLAYER_TITLE` is unset.
pub const DEFAULT_PLAYER_TITLE: &str = "RTSP Stream";

/// Page configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ShellConfig {
    pub client: ClientConfig,
    /// RTSP.me embed URL. Empty means no stream is selected.
    pub embed_url: String,
    pub stream_id: String,
    pub player_title: String,
    /// Size of the video container overlays are clamped to.
    pub container: Bounds,
}

impl ShellConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default                           |
    /// |---------------------------|-----------------------------------|
    /// | `RTSPIO_API_BASE`         | `http://localhost:5000/api`       |
    /// | `RTSPIO_API_TIMEOUT_SECS` | `10`                              |
    /// | `RTSPIO_EMBED_URL`        | `https://rtsp.me/embed/K68Zhiyr/` |
    /// | `RTSPIO_STREAM_ID`        | `default`                         |
    /// | `RTSPIO_PLAYER_TITLE`     | `RTSP Stream`                     |
    /// | `RTSPIO_CONTAINER_SIZE`   | `1280x720`                        |
    ///
    /// `RTSPIO_EMBED_URL` may be set to an empty string to start without a
    /// stream.
    pub fn from_env() -> Self {
        let embed_url = std::env::var("RTSPIO_EMBED_URL")
            .map(|v| v.trim().to_string())
            .unwrap_or_else(|_| DEFAULT_EMBED_URL.into());

        let stream_id = non_empty_var("RTSPIO_STREAM_ID").unwrap_or_else(|| DEFAULT_STREAM_ID.into());

        let player_title =
            non_empty_var("RTSPIO_PLAYER_TITLE").unwrap_or_else(|| DEFAULT_PLAYER_TITLE.into());

        let container = match non_empty_var("RTSPIO_CONTAINER_SIZE") {
            Some(raw) => Bounds::parse(&raw).unwrap_or_else(|e| {
                tracing::warn!(value = %raw, error = %e, "Invalid RTSPIO_CONTAINER_SIZE, using default");
                Bounds::default()
            }),
            None => Bounds::default(),
        };

        Self {
            client: ClientConfig::from_env(),
            embed_url,
            stream_id,
            player_title,
            container,
        }
    }
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            client: ClientConfig::default(),
            embed_url: DEFAULT_EMBED_URL.to_string(),
            stream_id: DEFAULT_STREAM_ID.to_string(),
            player_title: DEFAULT_PLAYER_TITLE.to_string(),
            container: Bounds::default(),
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
