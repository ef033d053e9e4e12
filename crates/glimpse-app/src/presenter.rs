use std::sync::Arc;

use kanal::AsyncReceiver;
use glimpse_config::ui::DisplayMode;
use glimpse_types::{AppEvent, PipelineOutcome};
use tokio_util::sync::CancellationToken;

use crate::state::AppState;

/// Terminal stand-in for the two presentation surfaces: the display-mode
/// preference routes between a compact popover-style line and a framed
/// window-style block. Generation filtering already happened in the sink.
pub async fn presenter_loop(
    state: Arc<AppState>,
    app_to_ui_rx: AsyncReceiver<AppEvent>,
    cancel_token: CancellationToken,
) -> anyhow::Result<()> {
    loop {
        let event = tokio::select! {
            event = app_to_ui_rx.recv() => event?,
            _ = cancel_token.cancelled() => return Ok(()),
        };

        match event {
            AppEvent::ShowOutcome(outcome) => {
                let mode = state.config.read().await.ui.display_mode;
                render(&outcome, mode);
            }
            AppEvent::Shutdown => return Ok(()),
            AppEvent::CaptureRequested(_) => {
                // App-side event, ignored here.
            }
        }
    }
}

fn render(outcome: &PipelineOutcome, mode: DisplayMode) {
    match mode {
        DisplayMode::Popover => {
            if !outcome.original.is_empty() {
                println!("▸ {}", outcome.original.replace('\n', " "));
            }
            println!("▸ {}", outcome.translated.replace('\n', " "));
        }
        DisplayMode::Window => {
            let hint = outcome
                .monitor
                .as_ref()
                .map(|m| format!(" (monitor {})", m.id))
                .unwrap_or_default();
            println!("┌─ result{hint}");
            for line in outcome.original.lines() {
                println!("│ {line}");
            }
            println!("├─");
            for line in outcome.translated.lines() {
                println!("│ {line}");
            }
            println!("└─");
        }
    }
}
