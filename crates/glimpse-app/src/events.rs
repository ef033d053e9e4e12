use std::sync::Arc;
use std::time::Duration;

use kanal::{AsyncReceiver, AsyncSender};
use glimpse_capture::{CaptureOptions, RegionCapturer, StreamConfig, XcapBackend, XcapMonitorSource};
use glimpse_ocr::{HttpOcrEngine, OcrOptions, TextRecognizer};
use glimpse_translator::{HttpTranslator, TranslationStage};
use glimpse_types::AppEvent;

use crate::pipeline::Pipeline;
use crate::sink::{ChannelSink, GenerationGate, GuardedSink};
use crate::state::AppState;

/// App's main loop: each capture request starts a fresh pipeline run on its
/// own task, so a new gesture can supersede a run still translating.
pub async fn event_loop(
    state: Arc<AppState>,
    ui_to_app_rx: AsyncReceiver<AppEvent>,
    app_to_ui_tx: AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let pipeline = Arc::new(build_pipeline(&state, app_to_ui_tx).await);

    tracing::info!("event loop started, waiting for capture requests");
    loop {
        let event = ui_to_app_rx.recv().await?;

        match event {
            AppEvent::CaptureRequested(selection) => {
                tracing::debug!(?selection, "capture requested");
                let pipeline = pipeline.clone();
                tokio::spawn(async move { pipeline.run(selection).await });
            }
            AppEvent::ShowOutcome(_) => {
                // Presenter-side event, ignored here.
            }
            AppEvent::Shutdown => {
                tracing::info!("event loop shutting down");
                return Ok(());
            }
        }
    }
}

async fn build_pipeline(state: &Arc<AppState>, app_to_ui_tx: AsyncSender<AppEvent>) -> Pipeline {
    let config = state.config.read().await;

    let capturer = RegionCapturer::new(
        Arc::new(XcapMonitorSource),
        Arc::new(XcapBackend),
        CaptureOptions {
            frame_timeout: Duration::from_millis(config.capture.frame_timeout_ms),
            stream: StreamConfig {
                show_cursor: config.capture.show_cursor,
                capture_audio: config.capture.capture_audio,
                max_frame_rate: config.capture.max_frame_rate,
            },
        },
    );

    let recognizer = TextRecognizer::new(
        Arc::new(HttpOcrEngine::new(config.ocr.endpoint.clone())),
        OcrOptions {
            languages: config.ocr.languages.clone(),
            accurate: config.ocr.accurate,
            language_correction: config.ocr.language_correction,
            min_text_height: config.ocr.min_text_height,
        },
    );

    let stage = TranslationStage::new(
        Arc::new(HttpTranslator::new(
            config.translator.api_key.clone(),
            config.translator.api_url.clone(),
        )),
        config.translator.script_a_lang.clone(),
        config.translator.script_b_lang.clone(),
    );

    let generations = Arc::new(GenerationGate::new());
    let sink = Arc::new(GuardedSink::new(
        generations.clone(),
        Arc::new(ChannelSink::new(app_to_ui_tx)),
    ));

    Pipeline::new(capturer, recognizer, stage, sink, generations)
}
