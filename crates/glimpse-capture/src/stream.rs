use async_trait::async_trait;
use glimpse_types::{CropSpec, MonitorDescriptor};

use crate::CaptureError;

/// One undecoded frame as pushed by the capture subsystem (RGBA8).
#[derive(Debug, Clone)]
pub struct RawFrame {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Callback invoked by the backend for every produced frame. Runs on the
/// backend's own context, not the pipeline's.
pub type FrameSink = Box<dyn Fn(RawFrame) + Send + Sync>;

#[derive(Debug, Clone, Copy)]
pub struct StreamConfig {
    pub show_cursor: bool,
    pub capture_audio: bool,
    /// Frame-rate ceiling; bounds stream overhead, one frame is enough.
    pub max_frame_rate: u32,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            show_cursor: false,
            capture_audio: false,
            max_frame_rate: 60,
        }
    }
}

/// Monitor enumeration service. The set may change between runs, so callers
/// enumerate fresh every time and never cache descriptors.
pub trait MonitorSource: Send + Sync {
    fn monitors(&self) -> Result<Vec<MonitorDescriptor>, CaptureError>;
}

/// Factory for capture streams scoped to one monitor and one crop rect.
pub trait CaptureBackend: Send + Sync {
    fn open_stream(
        &self,
        monitor: &MonitorDescriptor,
        crop: &CropSpec,
        config: &StreamConfig,
        sink: FrameSink,
    ) -> Result<Box<dyn CaptureStream>, CaptureError>;
}

/// A started stream is a scarce OS resource; whoever starts one must stop it
/// on every exit path.
#[async_trait]
pub trait CaptureStream: Send {
    async fn start(&mut self) -> Result<(), CaptureError>;
    async fn stop(&mut self) -> Result<(), CaptureError>;
}
