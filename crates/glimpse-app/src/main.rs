use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use glimpse_config::Config;
use glimpse_types::{AppEvent, SelectionRect};
use tokio::signal;
use tracing_subscriber::EnvFilter;

mod controller;
mod events;
mod pipeline;
mod presenter;
mod sink;
mod state;

#[cfg(test)]
mod tests;

use self::controller::AppController;
use self::state::AppState;

#[derive(Parser)]
#[command(about = "Capture a screen region, recognize its text, translate it")]
struct Args {
    /// Selection rectangle as "x,y,w,h" in global screen points
    /// (bottom-left origin). Stand-in for the selection-drawing UI.
    #[arg(long)]
    region: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_ansi(atty::is(atty::Stream::Stdout))
        .init();

    let args = Args::parse();
    let state = Arc::new(AppState::new(Config::new()));

    let controller = AppController::new(state);
    let gestures = controller.gesture_sender();
    let mut tasks = controller.spawn_tasks();

    if let Some(spec) = args.region.as_deref() {
        let selection = parse_region(spec)?;
        gestures
            .send(AppEvent::CaptureRequested(selection))
            .await
            .context("event loop is not running")?;
    }

    tokio::select! {
        _ = signal::ctrl_c() => {
            tracing::info!("shutdown requested");
        }
        result = tasks.join_next() => {
            match result {
                Some(Ok(Ok(()))) => tracing::warn!("task exited"),
                Some(Ok(Err(e))) => tracing::error!("task failed: {e}"),
                Some(Err(e)) => tracing::error!("task panicked: {e}"),
                None => {}
            }
        }
    }

    controller.shutdown();
    Ok(())
}

fn parse_region(spec: &str) -> anyhow::Result<SelectionRect> {
    let parts: Vec<f64> = spec
        .split(',')
        .map(|p| p.trim().parse())
        .collect::<Result<_, _>>()
        .with_context(|| format!("invalid region '{spec}'"))?;
    anyhow::ensure!(parts.len() == 4, "region must be x,y,w,h");
    anyhow::ensure!(
        parts[2] >= 0.0 && parts[3] >= 0.0,
        "region size must be non-negative"
    );
    Ok(SelectionRect::new(parts[0], parts[1], parts[2], parts[3]))
}
