use async_trait::async_trait;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, RgbaImage};
use serde::Deserialize;

use crate::{OcrCandidate, OcrEngine, OcrError, OcrOptions};

/// OCR over a local HTTP recognition service: PNG in, ordered JSON lines out.
pub struct HttpOcrEngine {
    client: reqwest::Client,
    endpoint: String,
}

#[derive(Deserialize)]
struct RecognizeResponse {
    lines: Vec<RecognizedLine>,
}

#[derive(Deserialize)]
struct RecognizedLine {
    text: String,
    #[serde(default)]
    confidence: f32,
}

impl HttpOcrEngine {
    pub fn new(endpoint: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
        }
    }
}

#[async_trait]
impl OcrEngine for HttpOcrEngine {
    async fn recognize(
        &self,
        image: &RgbaImage,
        options: &OcrOptions,
    ) -> Result<Vec<OcrCandidate>, OcrError> {
        let png = encode_png(image)?;

        let response = self
            .client
            .post(&self.endpoint)
            .query(&[
                ("languages", options.languages.join(",")),
                ("accurate", options.accurate.to_string()),
                ("correction", options.language_correction.to_string()),
                ("min_text_height", options.min_text_height.to_string()),
            ])
            .header("Content-Type", "image/png")
            .body(png)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(OcrError::Engine(format!("HTTP {}", response.status())));
        }

        let parsed: RecognizeResponse = response
            .json()
            .await
            .map_err(|e| OcrError::Engine(format!("bad response: {e}")))?;

        Ok(parsed
            .lines
            .into_iter()
            .map(|line| OcrCandidate {
                text: line.text,
                confidence: line.confidence,
            })
            .collect())
    }
}

fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, OcrError> {
    let mut buffer = Vec::new();
    PngEncoder::new(&mut buffer)
        .write_image(
            image.as_raw(),
            image.width(),
            image.height(),
            ExtendedColorType::Rgba8,
        )
        .map_err(|e| OcrError::Encode(e.to_string()))?;
    Ok(buffer)
}
