use std::env;

use serde::{Deserialize, Serialize};

use self::capture::CaptureConfig;
use self::ocr::OcrConfig;
use self::translator::TranslatorConfig;
use self::ui::UiConfig;

pub mod capture;
pub mod ocr;
pub mod translator;
pub mod ui;

#[derive(Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub capture: CaptureConfig,
    pub ocr: OcrConfig,
    pub translator: TranslatorConfig,
    pub ui: UiConfig,
}

impl Config {
    pub fn new() -> Self {
        let mut config = Config::default();

        if let Some(ms) = env_u64("GLIMPSE_FRAME_TIMEOUT_MS") {
            config.capture.frame_timeout_ms = ms;
        }
        if let Ok(url) = env::var("GLIMPSE_OCR_URL") {
            config.ocr.endpoint = url;
        }
        if let Ok(key) = env::var("GLIMPSE_TRANSLATE_API_KEY") {
            config.translator.api_key = key;
        }
        if let Ok(url) = env::var("GLIMPSE_TRANSLATE_URL") {
            config.translator.api_url = url;
        }

        config
    }
}

fn env_u64(name: &str) -> Option<u64> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}
