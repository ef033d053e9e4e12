use glimpse_types::{CropSpec, MonitorDescriptor, SelectionRect};

use crate::CaptureError;

/// Map a global selection to the monitor it belongs to and the crop the
/// capture subsystem needs.
///
/// Screen coordinates are bottom-left origin; the crop rect the capture
/// subsystem takes is monitor-local, top-left origin, so the vertical axis is
/// flipped here. The crop is clamped fully inside the monitor with a floor of
/// one point per axis, and the pixel target is the point size scaled by the
/// monitor's backing factor.
pub fn map_selection(
    selection: &SelectionRect,
    monitors: &[MonitorDescriptor],
) -> Result<(MonitorDescriptor, CropSpec), CaptureError> {
    let (cx, cy) = selection.center();

    let monitor = monitors
        .iter()
        .find(|m| m.frame.contains(cx, cy))
        // Selection straddles a seam or its monitor went away; fall back to
        // the primary.
        .or_else(|| monitors.iter().find(|m| m.primary))
        .or_else(|| monitors.first())
        .ok_or(CaptureError::NoDisplay)?
        .clone();

    let frame = monitor.frame;
    let local_x = selection.x - frame.x;
    let local_y = selection.y - frame.y;

    // Bottom-left local y to top-left local y.
    let y_from_top = frame.height - (local_y + selection.height);

    // Clamping x/y one point short of the far edge keeps the one-point
    // width/height floor inside the monitor.
    let x = local_x.clamp(0.0, (frame.width - 1.0).max(0.0));
    let y = y_from_top.clamp(0.0, (frame.height - 1.0).max(0.0));
    let width = selection.width.min(frame.width - x).max(1.0);
    let height = selection.height.min(frame.height - y).max(1.0);

    let pixel_width = ((width * monitor.scale).round() as u32).max(1);
    let pixel_height = ((height * monitor.scale).round() as u32).max(1);

    let crop = CropSpec {
        x,
        y,
        width,
        height,
        pixel_width,
        pixel_height,
    };

    tracing::debug!(
        monitor = monitor.id,
        crop.x,
        crop.y,
        crop.width,
        crop.height,
        crop.pixel_width,
        crop.pixel_height,
        "mapped selection"
    );

    Ok((monitor, crop))
}
