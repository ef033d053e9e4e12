use async_trait::async_trait;

use crate::{
    Availability, LanguageCode, ProviderMetadata, TranslateError, Translation, Translator,
};

/// DeepL-style HTTP translation provider.
#[derive(Clone)]
pub struct HttpTranslator {
    client: reqwest::Client,
    api_key: String,
    api_url: String,
}

const SUPPORTED_PAIRS: &[(&str, &str)] = &[("zh", "en"), ("en", "zh")];

impl HttpTranslator {
    pub fn new(api_key: String, api_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            api_url,
        }
    }
}

#[async_trait]
impl Translator for HttpTranslator {
    async fn translate(
        &self,
        text: &str,
        from: LanguageCode,
        to: LanguageCode,
    ) -> Result<Translation, TranslateError> {
        if self.api_key.is_empty() {
            return Err(TranslateError::AuthenticationError);
        }

        let params = [
            ("text", text),
            ("source_lang", &from.to_uppercase()),
            ("target_lang", &to.to_uppercase()),
        ];

        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("DeepL-Auth-Key {}", self.api_key))
            .form(&params)
            .send()
            .await?;

        if response.status() == 429 {
            return Err(TranslateError::RateLimitExceeded);
        }

        if response.status() == 403 {
            return Err(TranslateError::AuthenticationError);
        }

        if !response.status().is_success() {
            return Err(TranslateError::ApiError(format!(
                "HTTP {}",
                response.status()
            )));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| TranslateError::ApiError(format!("Failed to parse response: {e}")))?;

        let translated_text = json["translations"]
            .get(0)
            .and_then(|t| t["text"].as_str())
            .ok_or_else(|| TranslateError::ApiError("No translation in response".to_string()))?;

        Ok(Translation {
            text: translated_text.to_string(),
            from,
            to,
            provider: "deepl".to_string(),
        })
    }

    fn availability(&self, from: &str, to: &str) -> Availability {
        if self.api_key.is_empty() {
            return Availability::Unsupported;
        }
        if SUPPORTED_PAIRS.iter().any(|(f, t)| *f == from && *t == to) {
            Availability::Ready
        } else {
            Availability::Unsupported
        }
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "DeepL".to_string(),
            requires_api_key: true,
        }
    }
}
