use std::sync::Arc;

use glimpse_types::TranslationResult;

use crate::{Availability, LanguageCode, Translator};

/// Script-pair direction resolved from the classifier's verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Direction {
    pub from: LanguageCode,
    pub to: LanguageCode,
}

/// Requests a translation in the direction implied by the detected script:
/// script A text translates A→B, anything else B→A. Failures become
/// `TranslationResult::Failed` with a reason; nothing is thrown past here.
pub struct TranslationStage {
    translator: Arc<dyn Translator>,
    script_a: LanguageCode,
    script_b: LanguageCode,
}

impl TranslationStage {
    pub fn new(translator: Arc<dyn Translator>, script_a: LanguageCode, script_b: LanguageCode) -> Self {
        Self {
            translator,
            script_a,
            script_b,
        }
    }

    pub fn direction(&self, source_is_script_a: bool) -> Direction {
        if source_is_script_a {
            Direction {
                from: self.script_a.clone(),
                to: self.script_b.clone(),
            }
        } else {
            Direction {
                from: self.script_b.clone(),
                to: self.script_a.clone(),
            }
        }
    }

    pub async fn translate(&self, text: &str, source_is_script_a: bool) -> TranslationResult {
        let Direction { from, to } = self.direction(source_is_script_a);

        if self.translator.availability(&from, &to) == Availability::Unsupported {
            return TranslationResult::Failed(format!(
                "translation from {from} to {to} is not available"
            ));
        }

        match self.translator.translate(text, from, to).await {
            Ok(translation) => TranslationResult::Succeeded(translation.text),
            Err(e) => {
                tracing::warn!(error = %e, "translation failed");
                TranslationResult::Failed(e.to_string())
            }
        }
    }
}
