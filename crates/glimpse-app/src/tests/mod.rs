use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use glimpse_capture::{
    CaptureBackend, CaptureError, CaptureOptions, CaptureStream, FrameSink, MonitorSource,
    RawFrame, RegionCapturer, StreamConfig,
};
use glimpse_ocr::{OcrCandidate, OcrEngine, OcrError, OcrOptions, TextRecognizer};
use glimpse_translator::{
    Availability, LanguageCode, ProviderMetadata, TranslateError, Translation, TranslationStage,
    Translator,
};
use glimpse_types::{CropSpec, MonitorDescriptor, MonitorFrame, PipelineOutcome};
use image::RgbaImage;
use tokio::sync::Notify;

use crate::pipeline::Pipeline;
use crate::sink::{GenerationGate, GuardedSink, PresentationSink};


fn test_monitor() -> MonitorDescriptor {
    MonitorDescriptor {
        id: 1,
        frame: MonitorFrame {
            x: 0.0,
            y: 0.0,
            width: 1920.0,
            height: 1080.0,
        },
        scale: 2.0,
        primary: true,
    }
}

struct FixedMonitors(Vec<MonitorDescriptor>);

impl MonitorSource for FixedMonitors {
    fn monitors(&self) -> Result<Vec<MonitorDescriptor>, CaptureError> {
        Ok(self.0.clone())
    }
}

/// Backend that records the crops it was asked for and pushes one synthetic
/// frame per stream (or nothing, to force a timeout).
struct ScriptedBackend {
    deliver: bool,
    crops: Mutex<Vec<CropSpec>>,
}

impl ScriptedBackend {
    fn new(deliver: bool) -> Arc<Self> {
        Arc::new(Self {
            deliver,
            crops: Mutex::new(Vec::new()),
        })
    }

    fn recorded_crops(&self) -> Vec<CropSpec> {
        self.crops.lock().unwrap().clone()
    }
}

impl CaptureBackend for ScriptedBackend {
    fn open_stream(
        &self,
        _monitor: &MonitorDescriptor,
        crop: &CropSpec,
        _config: &StreamConfig,
        sink: FrameSink,
    ) -> Result<Box<dyn CaptureStream>, CaptureError> {
        self.crops.lock().unwrap().push(*crop);
        Ok(Box::new(ScriptedStream {
            frame: self.deliver.then(|| RawFrame {
                data: vec![0u8; (crop.pixel_width * crop.pixel_height * 4) as usize],
                width: crop.pixel_width,
                height: crop.pixel_height,
            }),
            sink: Some(sink),
        }))
    }
}

struct ScriptedStream {
    frame: Option<RawFrame>,
    sink: Option<FrameSink>,
}

#[async_trait]
impl CaptureStream for ScriptedStream {
    async fn start(&mut self) -> Result<(), CaptureError> {
        if let (Some(frame), Some(sink)) = (self.frame.take(), self.sink.take()) {
            tokio::spawn(async move { sink(frame) });
        }
        Ok(())
    }

    async fn stop(&mut self) -> Result<(), CaptureError> {
        Ok(())
    }
}

struct ScriptedOcr(Vec<String>);

#[async_trait]
impl OcrEngine for ScriptedOcr {
    async fn recognize(
        &self,
        _image: &RgbaImage,
        _options: &OcrOptions,
    ) -> Result<Vec<OcrCandidate>, OcrError> {
        Ok(self
            .0
            .iter()
            .map(|text| OcrCandidate {
                text: text.clone(),
                confidence: 0.95,
            })
            .collect())
    }
}

/// Translator that records directions, optionally blocks until released, and
/// optionally fails.
struct MockTranslator {
    calls: AtomicUsize,
    directions: Mutex<Vec<(LanguageCode, LanguageCode)>>,
    fail: bool,
    hold: Option<Arc<Notify>>,
    entered: Notify,
}

impl MockTranslator {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            directions: Mutex::new(Vec::new()),
            fail: false,
            hold: None,
            entered: Notify::new(),
        })
    }

    fn failing() -> Arc<Self> {
        Arc::new(Self {
            fail: true,
            ..Self::unwrapped()
        })
    }

    fn held(hold: Arc<Notify>) -> Arc<Self> {
        Arc::new(Self {
            hold: Some(hold),
            ..Self::unwrapped()
        })
    }

    fn unwrapped() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            directions: Mutex::new(Vec::new()),
            fail: false,
            hold: None,
            entered: Notify::new(),
        }
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Translator for MockTranslator {
    async fn translate(
        &self,
        text: &str,
        from: LanguageCode,
        to: LanguageCode,
    ) -> Result<Translation, TranslateError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.directions.lock().unwrap().push((from.clone(), to.clone()));
        self.entered.notify_one();

        if let Some(hold) = &self.hold {
            hold.notified().await;
        }
        if self.fail {
            return Err(TranslateError::ApiError("backend unavailable".into()));
        }
        Ok(Translation {
            text: format!("[{from}->{to}] {text}"),
            from,
            to,
            provider: "mock".into(),
        })
    }

    fn availability(&self, _from: &str, _to: &str) -> Availability {
        Availability::Ready
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "mock".into(),
            requires_api_key: false,
        }
    }
}

#[derive(Default)]
struct CollectingSink {
    outcomes: Mutex<Vec<PipelineOutcome>>,
}

impl CollectingSink {
    fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn outcomes(&self) -> Vec<PipelineOutcome> {
        self.outcomes.lock().unwrap().clone()
    }
}

#[async_trait]
impl PresentationSink for CollectingSink {
    async fn present(&self, outcome: PipelineOutcome) {
        self.outcomes.lock().unwrap().push(outcome);
    }
}

struct TestRig {
    pipeline: Pipeline,
    backend: Arc<ScriptedBackend>,
    translator: Arc<MockTranslator>,
    sink: Arc<CollectingSink>,
}

fn rig(ocr_lines: Vec<&str>, translator: Arc<MockTranslator>) -> TestRig {
    rig_shared(
        ocr_lines,
        translator,
        Arc::new(GenerationGate::new()),
        CollectingSink::new(),
        true,
    )
}

/// Build a pipeline wired to mocks; gate and terminal sink can be shared
/// between rigs to exercise staleness across runs.
fn rig_shared(
    ocr_lines: Vec<&str>,
    translator: Arc<MockTranslator>,
    gate: Arc<GenerationGate>,
    sink: Arc<CollectingSink>,
    deliver_frame: bool,
) -> TestRig {
    let backend = ScriptedBackend::new(deliver_frame);

    let capturer = RegionCapturer::new(
        Arc::new(FixedMonitors(vec![test_monitor()])),
        backend.clone(),
        CaptureOptions {
            frame_timeout: Duration::from_millis(100),
            stream: StreamConfig::default(),
        },
    );

    let recognizer = TextRecognizer::new(
        Arc::new(ScriptedOcr(
            ocr_lines.into_iter().map(str::to_string).collect(),
        )),
        OcrOptions::default(),
    );

    let stage = TranslationStage::new(translator.clone(), "zh".into(), "en".into());

    let guarded = Arc::new(GuardedSink::new(gate.clone(), sink.clone()));
    let pipeline = Pipeline::new(capturer, recognizer, stage, guarded, gate);

    TestRig {
        pipeline,
        backend,
        translator,
        sink,
    }
}
