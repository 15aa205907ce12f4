//! Headless driver for the canvas window manager.
//!
//! Events arrive as JSON lines, from a `--replay` log or stdin, and the
//! final workspace snapshot is printed when the stream ends.

use std::io::BufRead;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use sanctum_wm::actor::dock::DockStore;
use sanctum_wm::actor::reactor::{replay, Event, Reactor, ReactorHandle};
use sanctum_wm::common::config::Config;
use sanctum_wm::common::log;
use sanctum_wm::render::TracingSink;

#[derive(Parser, Debug)]
#[command(name = "sanctum", about = "Multi-workspace canvas window manager")]
struct Cli {
    /// Path to a TOML config file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Replay a JSONL event log instead of reading stdin.
    #[arg(long)]
    replay: Option<PathBuf>,

    /// Tracing filter, e.g. "debug" or "sanctum_wm=trace".
    #[arg(long)]
    log_filter: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;
    log::init(cli.log_filter.as_deref().unwrap_or(&config.log.filter));

    let store = match &config.dock.position_path {
        Some(path) => DockStore::at(path.clone()),
        None => DockStore::default_location(),
    };
    let cancel = CancellationToken::new();
    let (handle, task) = Reactor::spawn(config, store, Arc::new(TracingSink), cancel.clone());

    let snapshot = tokio::task::spawn_blocking(move || feed_and_snapshot(cli.replay, handle))
        .await
        .context("event feed panicked")??;
    println!("{}", serde_json::to_string_pretty(&snapshot)?);

    cancel.cancel();
    task.await?;
    Ok(())
}

fn feed_and_snapshot(
    replay_path: Option<PathBuf>,
    handle: ReactorHandle,
) -> anyhow::Result<serde_json::Value> {
    let sender = handle.sender();
    match replay_path {
        Some(path) => {
            let sent = replay(&path, &sender)?;
            info!(sent, path = %path.display(), "replayed event log");
        }
        None => {
            for line in std::io::stdin().lock().lines() {
                let line = line?;
                if line.trim().is_empty() {
                    continue;
                }
                match serde_json::from_str::<Event>(&line) {
                    Ok(event) => sender.send(event),
                    Err(err) => warn!(%err, "skipping unparsable event"),
                }
            }
        }
    }

    Ok(serde_json::json!({
        "workspaces": handle.query_workspaces(),
        "dock": handle.query_dock(),
        "scene": handle.query_scene(),
        "external_opens": handle.query_external_opens(),
    }))
}
