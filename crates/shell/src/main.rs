//! `rtspio` -- the RTSP.io video page as an interactive terminal shell.
//!
//! Shows the RTSP.me player descriptor and drives the overlay editor
//! against the overlay backend.
//!
//! # Environment variables
//!
//! | Variable                  | Default                           |
//! |---------------------------|-----------------------------------|
//! | `RTSPIO_API_BASE`         | `http://localhost:5000/api`       |
//! | `RTSPIO_API_TIMEOUT_SECS` | `10`                              |
//! | `RTSPIO_EMBED_URL`        | `https://rtsp.me/embed/K68Zhiyr/` |
//! | `RTSPIO_STREAM_ID`        | `default`                         |
//! | `RTSPIO_PLAYER_TITLE`     | `RTSP Stream`                     |
//! | `RTSPIO_CONTAINER_SIZE`   | `1280x720`                        |

use rtspio_shell::config::ShellConfig;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "rtspio_shell=info,rtspio_editor=info,rtspio_client=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = ShellConfig::from_env();

    tracing::info!(
        api_base = %config.client.base_url,
        stream_id = %config.stream_id,
        embed_url = %config.embed_url,
        "Starting rtspio shell",
    );

    rtspio_shell::run(config).await
}
