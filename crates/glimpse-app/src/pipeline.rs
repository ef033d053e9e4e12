use std::sync::Arc;

use glimpse_capture::RegionCapturer;
use glimpse_core::preprocess::{DefaultPreprocessor, Preprocessor};
use glimpse_core::script;
use glimpse_core::state::PipelineState;
use glimpse_ocr::TextRecognizer;
use glimpse_translator::TranslationStage;
use glimpse_types::{PipelineOutcome, SelectionRect, TranslationResult};

use crate::sink::{GenerationGate, PresentationSink};

pub const NO_TEXT_MESSAGE: &str =
    "No text recognized. Try selecting a region with clearer text";
pub const TRANSLATING_PLACEHOLDER: &str = "Translating…";

/// Sequences one run: capture → recognize → classify → translate → present.
///
/// Every failure is converted to an outcome at this boundary; nothing
/// escapes, and each gesture yields exactly one terminal outcome. The sink
/// is expected to be generation-guarded so a run superseded mid-flight
/// cannot overwrite newer presentation state.
pub struct Pipeline {
    capturer: RegionCapturer,
    recognizer: TextRecognizer,
    stage: TranslationStage,
    sink: Arc<dyn PresentationSink>,
    generations: Arc<GenerationGate>,
}

impl Pipeline {
    pub fn new(
        capturer: RegionCapturer,
        recognizer: TextRecognizer,
        stage: TranslationStage,
        sink: Arc<dyn PresentationSink>,
        generations: Arc<GenerationGate>,
    ) -> Self {
        Self {
            capturer,
            recognizer,
            stage,
            sink,
            generations,
        }
    }

    pub async fn run(&self, selection: SelectionRect) {
        let generation = self.generations.begin();
        let mut state = PipelineState::Idle;
        advance(&mut state, PipelineState::Capturing, generation);

        let captured = match self.capturer.capture_region(selection).await {
            Ok(captured) => captured,
            Err(e) => {
                self.present_error(&mut state, generation, &e.to_string()).await;
                return;
            }
        };
        let monitor = Some(captured.monitor.clone());

        advance(&mut state, PipelineState::Recognizing, generation);
        let recognized = match self.recognizer.recognize(&captured.image).await {
            Ok(recognized) => recognized,
            Err(e) => {
                self.present_error(&mut state, generation, &e.to_string()).await;
                return;
            }
        };

        let text = DefaultPreprocessor.process(&recognized.text);
        if recognized.empty || text.is_empty() {
            // "Found nothing" is a real outcome; translation is skipped
            // entirely.
            advance(&mut state, PipelineState::Presented, generation);
            self.sink
                .present(PipelineOutcome::no_text(generation, NO_TEXT_MESSAGE, monitor))
                .await;
            return;
        }

        advance(&mut state, PipelineState::Classifying, generation);
        let source_is_script_a = script::is_chinese(&text).unwrap_or(false);

        advance(&mut state, PipelineState::Translating, generation);
        self.sink
            .present(PipelineOutcome {
                generation,
                original: text.clone(),
                translated: TRANSLATING_PLACEHOLDER.to_string(),
                source_is_script_a,
                monitor: monitor.clone(),
            })
            .await;

        let translated = match self.stage.translate(&text, source_is_script_a).await {
            TranslationResult::Succeeded(translated) => translated,
            // Partial success: the original text stays visible next to the
            // failure reason.
            TranslationResult::Failed(reason) => format!("Translation failed: {reason}"),
            TranslationResult::Pending => TRANSLATING_PLACEHOLDER.to_string(),
        };

        advance(&mut state, PipelineState::Presented, generation);
        self.sink
            .present(PipelineOutcome {
                generation,
                original: text,
                translated,
                source_is_script_a,
                monitor,
            })
            .await;
    }

    async fn present_error(&self, state: &mut PipelineState, generation: u64, message: &str) {
        advance(state, PipelineState::ErrorPresented, generation);
        self.sink
            .present(PipelineOutcome::error(generation, format!("Error: {message}")))
            .await;
    }
}

fn advance(state: &mut PipelineState, next: PipelineState, generation: u64) {
    debug_assert!(state.may_advance_to(next), "{state} -> {next}");
    tracing::debug!(generation, from = %state, to = %next, "pipeline transition");
    *state = next;
}
