use std::sync::Arc;

use glimpse_types::RecognizedText;
use image::RgbaImage;

use crate::{OcrEngine, OcrError, OcrOptions};

/// Submits a still image to the engine and joins the candidates in reading
/// order. Zero usable candidates is reported as an empty `RecognizedText`,
/// which is a first-class outcome distinct from an engine failure.
pub struct TextRecognizer {
    engine: Arc<dyn OcrEngine>,
    options: OcrOptions,
}

impl TextRecognizer {
    pub fn new(engine: Arc<dyn OcrEngine>, options: OcrOptions) -> Self {
        Self { engine, options }
    }

    pub async fn recognize(&self, image: &RgbaImage) -> Result<RecognizedText, OcrError> {
        let candidates = self.engine.recognize(image, &self.options).await?;

        let text = candidates
            .iter()
            .map(|c| c.text.trim_end())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join("\n");

        if text.is_empty() {
            tracing::debug!("OCR ran but found no text");
            return Ok(RecognizedText::none());
        }

        tracing::debug!(chars = text.chars().count(), "OCR recognized text");
        Ok(RecognizedText::from_text(text))
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;

    struct FixedEngine(Vec<OcrCandidate>);
    use crate::OcrCandidate;

    #[async_trait]
    impl OcrEngine for FixedEngine {
        async fn recognize(
            &self,
            _image: &RgbaImage,
            _options: &OcrOptions,
        ) -> Result<Vec<OcrCandidate>, OcrError> {
            Ok(self.0.clone())
        }
    }

    struct FailingEngine;

    #[async_trait]
    impl OcrEngine for FailingEngine {
        async fn recognize(
            &self,
            _image: &RgbaImage,
            _options: &OcrOptions,
        ) -> Result<Vec<OcrCandidate>, OcrError> {
            Err(OcrError::Engine("engine exploded".into()))
        }
    }

    fn candidate(text: &str) -> OcrCandidate {
        OcrCandidate {
            text: text.to_string(),
            confidence: 0.9,
        }
    }

    fn blank() -> RgbaImage {
        RgbaImage::new(4, 4)
    }

    #[tokio::test]
    async fn joins_candidates_in_reading_order() {
        let recognizer = TextRecognizer::new(
            Arc::new(FixedEngine(vec![
                candidate("first line"),
                candidate("second line"),
                candidate("third"),
            ])),
            OcrOptions::default(),
        );

        let recognized = recognizer.recognize(&blank()).await.unwrap();
        assert_eq!(recognized.text, "first line\nsecond line\nthird");
        assert!(!recognized.empty);
    }

    #[tokio::test]
    async fn blank_candidates_are_skipped() {
        let recognizer = TextRecognizer::new(
            Arc::new(FixedEngine(vec![
                candidate("hello"),
                candidate("   "),
                candidate("world"),
            ])),
            OcrOptions::default(),
        );

        let recognized = recognizer.recognize(&blank()).await.unwrap();
        assert_eq!(recognized.text, "hello\nworld");
    }

    #[tokio::test]
    async fn zero_candidates_is_empty_not_error() {
        let recognizer =
            TextRecognizer::new(Arc::new(FixedEngine(vec![])), OcrOptions::default());

        let recognized = recognizer.recognize(&blank()).await.unwrap();
        assert!(recognized.empty);
        assert_eq!(recognized.text, "");
    }

    #[tokio::test]
    async fn engine_failure_is_an_error() {
        let recognizer = TextRecognizer::new(Arc::new(FailingEngine), OcrOptions::default());
        assert!(matches!(
            recognizer.recognize(&blank()).await,
            Err(OcrError::Engine(_))
        ));
    }
}
