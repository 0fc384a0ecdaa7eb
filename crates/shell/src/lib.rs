//! `rtspio-shell` library crate.
//!
//! Hosts the page shell around the overlay editor: configuration, the
//! static page, command parsing and the interactive read loop. The binary
//! entrypoint lives in `main.rs`.

pub mod command;
pub mod config;
pub mod page;
pub mod session;

use std::io::Write;
use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};

use rtspio_client::ApiClient;
use rtspio_editor::{HttpImageProbe, OverlayEditor, OverlayStore};

use crate::config::ShellConfig;
use crate::session::{Flow, Session};

/// Build the session from `config` and serve commands from stdin until
/// `quit`, end of input, or Ctrl-C.
pub async fn run(config: ShellConfig) -> anyhow::Result<()> {
    let client = ApiClient::new(&config.client).context("Failed to build API client")?;

    match client.health().await {
        Ok(health) => tracing::info!(
            status = %health.status,
            mongodb = ?health.mongodb,
            version = ?health.version,
            "Backend reachable"
        ),
        Err(e) => tracing::warn!(
            base_url = %client.base_url(),
            error = %e,
            "Backend health check failed"
        ),
    }

    let probe = HttpImageProbe::new().context("Failed to build image probe")?;
    let store: Arc<dyn OverlayStore> = Arc::new(client.overlays());
    let editor = OverlayEditor::new(
        store,
        Arc::new(probe),
        config.stream_id.clone(),
        config.container,
    );
    let mut session = Session::new(
        editor,
        Some(client.rtspme()),
        config.embed_url,
        config.player_title,
    );

    let mut stdout = std::io::stdout();
    session.start(&mut stdout).await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        write!(stdout, "> ")?;
        stdout.flush()?;

        let line = tokio::select! {
            line = lines.next_line() => line.context("Failed to read from stdin")?,
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupted");
                break;
            }
        };
        let Some(line) = line else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        match command::parse(&line) {
            Ok(command) => {
                if session.execute(command, &mut stdout).await? == Flow::Quit {
                    break;
                }
            }
            Err(e) => writeln!(stdout, "{e}")?,
        }
    }

    tracing::info!("Shell stopped");
    Ok(())
}
