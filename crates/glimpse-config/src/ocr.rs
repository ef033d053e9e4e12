use serde::{Deserialize, Serialize};

fn default_languages() -> Vec<String> {
    vec!["zh-Hans".to_string(), "en-US".to_string()]
}

fn default_min_text_height() -> f32 {
    0.015
}

fn default_true() -> bool {
    true
}

fn default_endpoint() -> String {
    "http://localhost:8765/recognize".to_string()
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct OcrConfig {
    /// Candidate languages handed to the engine, in priority order.
    #[serde(default = "default_languages")]
    pub languages: Vec<String>,
    /// Fraction of image height below which glyphs are treated as noise.
    #[serde(default = "default_min_text_height")]
    pub min_text_height: f32,
    #[serde(default = "default_true")]
    pub accurate: bool,
    #[serde(default = "default_true")]
    pub language_correction: bool,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            languages: default_languages(),
            min_text_height: default_min_text_height(),
            accurate: true,
            language_correction: true,
            endpoint: default_endpoint(),
        }
    }
}
