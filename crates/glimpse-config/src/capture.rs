use serde::{Deserialize, Serialize};

fn default_frame_timeout_ms() -> u64 {
    1000
}

fn default_max_frame_rate() -> u32 {
    60
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct CaptureConfig {
    /// How long to wait for the first frame before giving up.
    #[serde(default = "default_frame_timeout_ms")]
    pub frame_timeout_ms: u64,
    /// Ceiling on stream frame rate; one frame is all we need.
    #[serde(default = "default_max_frame_rate")]
    pub max_frame_rate: u32,
    #[serde(default)]
    pub show_cursor: bool,
    #[serde(default)]
    pub capture_audio: bool,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            frame_timeout_ms: default_frame_timeout_ms(),
            max_frame_rate: default_max_frame_rate(),
            show_cursor: false,
            capture_audio: false,
        }
    }
}
