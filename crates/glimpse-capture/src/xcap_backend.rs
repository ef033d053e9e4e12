use async_trait::async_trait;
use glimpse_types::{CropSpec, MonitorDescriptor, MonitorFrame};
use tokio::task::JoinHandle;
use xcap::Monitor;

use crate::stream::{CaptureBackend, CaptureStream, FrameSink, MonitorSource, RawFrame, StreamConfig};
use crate::CaptureError;

/// Monitor enumeration over xcap.
///
/// xcap reports global coordinates with a top-left origin; descriptors use
/// the bottom-left screen convention, so y is flipped about the primary
/// monitor's bottom edge.
pub struct XcapMonitorSource;

impl MonitorSource for XcapMonitorSource {
    fn monitors(&self) -> Result<Vec<MonitorDescriptor>, CaptureError> {
        let monitors = Monitor::all().map_err(|e| CaptureError::Backend(e.to_string()))?;
        if monitors.is_empty() {
            return Err(CaptureError::NoDisplay);
        }

        let primary_height = monitors
            .iter()
            .find(|m| m.is_primary())
            .unwrap_or(&monitors[0])
            .height() as f64;

        Ok(monitors
            .iter()
            .map(|m| MonitorDescriptor {
                id: m.id(),
                frame: MonitorFrame {
                    x: m.x() as f64,
                    y: primary_height - (m.y() as f64 + m.height() as f64),
                    width: m.width() as f64,
                    height: m.height() as f64,
                },
                scale: m.scale_factor() as f64,
                primary: m.is_primary(),
            })
            .collect())
    }
}

/// Capture backend over xcap, which grabs stills rather than streaming.
/// Exposed as a stream that pushes exactly one frame after start.
pub struct XcapBackend;

impl CaptureBackend for XcapBackend {
    fn open_stream(
        &self,
        monitor: &MonitorDescriptor,
        crop: &CropSpec,
        _config: &StreamConfig,
        sink: FrameSink,
    ) -> Result<Box<dyn CaptureStream>, CaptureError> {
        Ok(Box::new(XcapStream {
            monitor_id: monitor.id,
            scale: monitor.scale,
            crop: *crop,
            sink: Some(sink),
            task: None,
        }))
    }
}

struct XcapStream {
    monitor_id: u32,
    scale: f64,
    crop: CropSpec,
    sink: Option<FrameSink>,
    task: Option<JoinHandle<()>>,
}

#[async_trait]
impl CaptureStream for XcapStream {
    async fn start(&mut self) -> Result<(), CaptureError> {
        let sink = self
            .sink
            .take()
            .ok_or_else(|| CaptureError::Backend("stream already started".into()))?;
        let monitor_id = self.monitor_id;
        let crop = self.crop;
        let scale = self.scale;

        self.task = Some(tokio::task::spawn_blocking(move || {
            match grab_cropped(monitor_id, &crop, scale) {
                Ok(frame) => sink(frame),
                // No delivery: the waiter's timeout reports the failure.
                Err(e) => tracing::warn!(error = %e, "xcap grab failed"),
            }
        }));
        Ok(())
    }

    async fn stop(&mut self) -> Result<(), CaptureError> {
        if let Some(task) = self.task.take() {
            // The grab is short; let it finish so xcap resources unwind.
            let _ = task.await;
        }
        Ok(())
    }
}

fn grab_cropped(monitor_id: u32, crop: &CropSpec, scale: f64) -> Result<RawFrame, CaptureError> {
    let monitors = Monitor::all().map_err(|e| CaptureError::Backend(e.to_string()))?;
    let monitor = monitors
        .into_iter()
        .find(|m| m.id() == monitor_id)
        .ok_or(CaptureError::NoDisplay)?;

    let image = monitor
        .capture_image()
        .map_err(|e| CaptureError::Backend(e.to_string()))?;

    // The crop is in monitor-local top-left points; xcap captures at native
    // pixel resolution.
    let px = (crop.x * scale).round() as u32;
    let py = (crop.y * scale).round() as u32;
    let pw = crop.pixel_width.min(image.width().saturating_sub(px)).max(1);
    let ph = crop.pixel_height.min(image.height().saturating_sub(py)).max(1);

    // Crop through xcap's re-exported image to stay on its pinned version.
    let cropped = xcap::image::imageops::crop_imm(&image, px, py, pw, ph).to_image();
    Ok(RawFrame {
        width: cropped.width(),
        height: cropped.height(),
        data: cropped.into_raw(),
    })
}
