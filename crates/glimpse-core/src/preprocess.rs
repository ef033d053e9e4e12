use unicode_normalization::UnicodeNormalization;

pub trait Preprocessor {
    /// Default cleanup for OCR output before classification and translation.
    fn process(&self, text: &str) -> String {
        let text = text.trim();

        if text.is_empty() {
            return String::new();
        }

        // Unicode normalization (NFKC)
        let text: String = text.nfkc().collect();

        // Unify line endings; line breaks are kept because the recognizer
        // joins blocks in reading order with them.
        text.replace("\r\n", "\n").replace('\r', "\n")
    }
}

pub struct DefaultPreprocessor;
impl Preprocessor for DefaultPreprocessor {}
