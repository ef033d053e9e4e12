use serde::{Deserialize, Serialize};

/// User-drawn selection in global screen points, bottom-left origin.
///
/// Produced once per gesture by the selection UI and consumed by exactly one
/// pipeline run. Minimum-size validation happens upstream.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelectionRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl SelectionRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// A monitor's global frame in screen points, bottom-left origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonitorFrame {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl MonitorFrame {
    /// Half-open containment, so a point on a seam between two monitors
    /// belongs to exactly one frame.
    pub fn contains(&self, px: f64, py: f64) -> bool {
        px >= self.x && px < self.x + self.width && py >= self.y && py < self.y + self.height
    }
}

/// One physical display, enumerated fresh at the start of every capture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitorDescriptor {
    /// Stable identifier understood by the capture subsystem.
    pub id: u32,
    pub frame: MonitorFrame,
    /// Pixels per point.
    pub scale: f64,
    pub primary: bool,
}

/// Monitor-local crop rectangle (points, top-left origin) plus the pixel
/// resolution the stream should produce.
///
/// Invariant: the rect is fully clamped inside the monitor's local bounds and
/// at least 1 point / 1 pixel on each axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropSpec {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub pixel_width: u32,
    pub pixel_height: u32,
}

/// OCR output: the concatenated text plus an explicit marker for "ran, found
/// nothing", which is a first-class outcome and not an error.
#[derive(Debug, Clone, PartialEq)]
pub struct RecognizedText {
    pub text: String,
    pub empty: bool,
}

impl RecognizedText {
    pub fn from_text(text: String) -> Self {
        let empty = text.trim().is_empty();
        Self { text, empty }
    }

    pub fn none() -> Self {
        Self {
            text: String::new(),
            empty: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TranslationResult {
    Pending,
    Succeeded(String),
    Failed(String),
}

/// Terminal result of one pipeline run, handed to the presentation sink.
///
/// `translated` carries the translation, a placeholder, or a human-readable
/// error line; `monitor` hints where a result window should be placed.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutcome {
    /// Run generation; sinks drop outcomes from superseded generations.
    pub generation: u64,
    pub original: String,
    pub translated: String,
    pub source_is_script_a: bool,
    pub monitor: Option<MonitorDescriptor>,
}

impl PipelineOutcome {
    pub fn no_text(generation: u64, message: &str, monitor: Option<MonitorDescriptor>) -> Self {
        Self {
            generation,
            original: String::new(),
            translated: message.to_string(),
            source_is_script_a: false,
            monitor,
        }
    }

    pub fn error(generation: u64, message: String) -> Self {
        Self {
            generation,
            original: String::new(),
            translated: message,
            source_is_script_a: false,
            monitor: None,
        }
    }
}

#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Selection UI finished a gesture; start a pipeline run.
    CaptureRequested(SelectionRect),
    /// Pipeline handed an outcome (interim or terminal) to presentation.
    ShowOutcome(PipelineOutcome),
    Shutdown,
}
