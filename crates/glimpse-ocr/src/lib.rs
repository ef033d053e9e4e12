use async_trait::async_trait;
use image::RgbaImage;

mod http;
mod recognizer;

pub use http::HttpOcrEngine;
pub use recognizer::TextRecognizer;

/// Engine-side knobs: candidate languages in priority order, accuracy level,
/// language correction, and a glyph-height floor to suppress noise.
#[derive(Debug, Clone)]
pub struct OcrOptions {
    pub languages: Vec<String>,
    pub accurate: bool,
    pub language_correction: bool,
    pub min_text_height: f32,
}

impl Default for OcrOptions {
    fn default() -> Self {
        Self {
            languages: vec!["zh-Hans".to_string(), "en-US".to_string()],
            accurate: true,
            language_correction: true,
            min_text_height: 0.015,
        }
    }
}

/// One recognized line or block, in reading order.
#[derive(Debug, Clone)]
pub struct OcrCandidate {
    pub text: String,
    pub confidence: f32,
}

/// Black-box OCR service boundary.
#[async_trait]
pub trait OcrEngine: Send + Sync {
    async fn recognize(
        &self,
        image: &RgbaImage,
        options: &OcrOptions,
    ) -> Result<Vec<OcrCandidate>, OcrError>;
}

#[derive(Debug, thiserror::Error)]
pub enum OcrError {
    #[error("OCR engine error: {0}")]
    Engine(String),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("could not encode image for recognition: {0}")]
    Encode(String),
}
