use std::sync::Arc;
use std::time::Duration;

use image::RgbaImage;
use glimpse_types::{MonitorDescriptor, SelectionRect};

use crate::gate::FrameGate;
use crate::geometry::map_selection;
use crate::stream::{CaptureBackend, MonitorSource, RawFrame, StreamConfig};
use crate::CaptureError;

#[derive(Debug, Clone, Copy)]
pub struct CaptureOptions {
    pub frame_timeout: Duration,
    pub stream: StreamConfig,
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self {
            frame_timeout: Duration::from_secs(1),
            stream: StreamConfig::default(),
        }
    }
}

/// A decoded still image plus the monitor it came from, for window-placement
/// hints downstream.
pub struct Captured {
    pub image: RgbaImage,
    pub monitor: MonitorDescriptor,
}

/// Orchestrates one capture: enumerate monitors, map the selection, run a
/// stream scoped to the crop, take one frame, decode it.
pub struct RegionCapturer {
    monitors: Arc<dyn MonitorSource>,
    backend: Arc<dyn CaptureBackend>,
    options: CaptureOptions,
}

impl RegionCapturer {
    pub fn new(
        monitors: Arc<dyn MonitorSource>,
        backend: Arc<dyn CaptureBackend>,
        options: CaptureOptions,
    ) -> Self {
        Self {
            monitors,
            backend,
            options,
        }
    }

    /// The stream is stopped on every exit path once it has been opened:
    /// failed start, timeout, decode error, or success. A leaked stream would
    /// hold OS capture resources past the end of the run.
    pub async fn capture_region(&self, selection: SelectionRect) -> Result<Captured, CaptureError> {
        let monitors = self.monitors.monitors()?;
        let (monitor, crop) = map_selection(&selection, &monitors)?;

        let gate = Arc::new(FrameGate::new());
        let sink = {
            let gate = gate.clone();
            Box::new(move |frame: RawFrame| gate.deliver(frame))
        };

        let mut stream = self
            .backend
            .open_stream(&monitor, &crop, &self.options.stream, sink)?;

        // From here the stream exists, so every exit path goes through stop,
        // including a failed start (which may have partially engaged the OS
        // capture session).
        let started = stream.start().await;
        let waited = match started {
            Ok(()) => gate.next_frame(self.options.frame_timeout).await,
            Err(e) => Err(e),
        };
        if let Err(e) = stream.stop().await {
            tracing::warn!(error = %e, "capture stream did not stop cleanly");
        }

        let frame = waited?;
        let image = decode_frame(frame)?;

        tracing::debug!(
            monitor = monitor.id,
            width = image.width(),
            height = image.height(),
            "captured region"
        );

        Ok(Captured { image, monitor })
    }
}

fn decode_frame(frame: RawFrame) -> Result<RgbaImage, CaptureError> {
    if frame.width == 0 || frame.height == 0 {
        return Err(CaptureError::CannotCreateImage);
    }
    RgbaImage::from_raw(frame.width, frame.height, frame.data)
        .ok_or(CaptureError::CannotCreateImage)
}
