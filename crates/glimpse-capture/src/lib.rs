mod gate;
mod geometry;
mod region;
mod stream;
mod xcap_backend;

pub use gate::FrameGate;
pub use geometry::map_selection;
pub use region::{Captured, CaptureOptions, RegionCapturer};
pub use stream::{CaptureBackend, CaptureStream, FrameSink, MonitorSource, RawFrame, StreamConfig};
pub use xcap_backend::{XcapBackend, XcapMonitorSource};

#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("no display available for capture")]
    NoDisplay,

    #[error("no frame arrived before the timeout")]
    NoFrame,

    #[error("could not create a still image from the captured frame")]
    CannotCreateImage,

    #[error("capture backend error: {0}")]
    Backend(String),
}
