use async_trait::async_trait;
use serde_json::{Value, json};

use super::error::ProviderError;

pub const TRANSLATION_PLACEHOLDER: &str = "Translation failed";

const SYSTEM_PROMPT: &str = "In the following text, translate the text into English. \
    Make it to the point. \
    Do not add any other text to the response. \
    Check first if the text is in English, if it is, just return the text. \
    Check if the text is in Tagalog, if it is, translate it into English but if it is not, \
    just return the text'.";

const TEMPERATURE: f64 = 0.7;
const TOP_P: f64 = 0.95;
const TOP_K: u32 = 40;
const MAX_OUTPUT_TOKENS: u32 = 1000;

#[async_trait]
pub trait TranslationProvider: Send + Sync {
    async fn translate(&self, text: &str) -> Result<String, ProviderError>;
}

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub endpoint: String,
    pub timeout: std::time::Duration,
}

impl From<&crate::config::Config> for GeminiConfig {
    fn from(config: &crate::config::Config) -> Self {
        Self {
            api_key: config.gemini_api_key.clone(),
            endpoint: config.gemini_endpoint.clone(),
            timeout: config.gemini_timeout(),
        }
    }
}

/// Gemini `generateContent` 客户端
#[derive(Debug, Clone)]
pub struct GeminiProvider {
    client: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiProvider {
    pub fn new(config: GeminiConfig) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }
}

pub fn build_prompt(text: &str) -> String {
    format!("{}\n\nText to translate: {}", SYSTEM_PROMPT, text)
}

pub fn build_request_body(text: &str) -> Value {
    json!({
        "contents": [{
            "role": "user",
            "parts": [{ "text": build_prompt(text) }]
        }],
        "generationConfig": {
            "temperature": TEMPERATURE,
            "topP": TOP_P,
            "topK": TOP_K,
            "maxOutputTokens": MAX_OUTPUT_TOKENS,
        }
    })
}

/// 取第一个候选的文本，缺失时返回占位符
pub fn extract_translation(body: &Value) -> String {
    match body["candidates"][0]["content"]["parts"][0]["text"].as_str() {
        Some(text) => text.to_string(),
        None => {
            tracing::warn!("Translation response missing candidate text: {}", body);
            TRANSLATION_PLACEHOLDER.to_string()
        }
    }
}

#[async_trait]
impl TranslationProvider for GeminiProvider {
    async fn translate(&self, text: &str) -> Result<String, ProviderError> {
        let response = self
            .client
            .post(&self.config.endpoint)
            .query(&[("key", self.config.api_key.as_str())])
            .json(&build_request_body(text))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let raw = response.text().await.unwrap_or_default();
            let details = serde_json::from_str(&raw).unwrap_or(Value::String(raw));
            tracing::error!("Translation service returned {}: {}", status, details);
            return Err(ProviderError::Status {
                status: status.as_u16(),
                details,
            });
        }

        let body = response.json::<Value>().await.unwrap_or_else(|e| {
            tracing::warn!("Failed to decode translation response: {}", e);
            Value::Null
        });

        Ok(extract_translation(&body))
    }
}
