use serde::{Deserialize, Serialize};

fn default_script_a_lang() -> String {
    "zh".to_string()
}

fn default_script_b_lang() -> String {
    "en".to_string()
}

fn default_api_url() -> String {
    "https://api-free.deepl.com/v2/translate".to_string()
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct TranslatorConfig {
    /// Language tag for script A (the script the classifier detects).
    #[serde(default = "default_script_a_lang")]
    pub script_a_lang: String,
    /// Language tag for script B (everything else).
    #[serde(default = "default_script_b_lang")]
    pub script_b_lang: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_api_url")]
    pub api_url: String,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            script_a_lang: default_script_a_lang(),
            script_b_lang: default_script_b_lang(),
            api_key: String::new(),
            api_url: default_api_url(),
        }
    }
}
