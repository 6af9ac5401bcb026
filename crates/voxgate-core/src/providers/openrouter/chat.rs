use super::data::OPENROUTER_MODELS;
use super::{API_KEY_VAR, OPENROUTER};
use crate::Result;
use crate::capabilities::{ChatMessage, ChatOptions, ChatResult};
use crate::config::ProviderSettings;
use crate::providers::Chatter;
use crate::providers::http::{require_key, str_at};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;

/// Request defaults for OpenRouter chat completions
pub struct OpenRouterDefaults;

impl OpenRouterDefaults {
    pub const MODEL: &'static str = "openai/gpt-4o-mini";
    pub const TEMPERATURE: f32 = 0.7;
    pub const MAX_TOKENS: u32 = 1000;
}

/// OpenRouter chat adapter
pub struct OpenRouterChatter {
    api_key: String,
    base_url: String,
    referer: String,
    client: Client,
}

impl OpenRouterChatter {
    pub fn new(settings: &ProviderSettings) -> Result<Self> {
        let api_key = require_key(
            settings.credentials.openrouter_api_key.as_ref(),
            API_KEY_VAR,
        )?;
        Ok(Self {
            api_key,
            base_url: settings.endpoints.openrouter.clone(),
            referer: settings.http.referer.clone(),
            client: OPENROUTER.client(settings.http.llm_timeout())?,
        })
    }
}

#[async_trait]
impl Chatter for OpenRouterChatter {
    fn name(&self) -> &str {
        "OpenRouter"
    }

    async fn chat(&self, messages: &[ChatMessage], options: &ChatOptions) -> Result<ChatResult> {
        let model = options
            .model
            .as_deref()
            .filter(|m| !m.is_empty())
            .unwrap_or(OpenRouterDefaults::MODEL);

        let body = json!({
            "model": model,
            "messages": messages,
            "temperature": options.temperature.unwrap_or(OpenRouterDefaults::TEMPERATURE),
            "max_tokens": options.max_tokens.unwrap_or(OpenRouterDefaults::MAX_TOKENS),
        });

        tracing::debug!(model, messages = messages.len(), "OpenRouter chat request");

        let json = OPENROUTER
            .send_json(
                self.client
                    .post(format!("{}/chat/completions", self.base_url))
                    .bearer_auth(&self.api_key)
                    .header("HTTP-Referer", &self.referer)
                    .json(&body),
            )
            .await?;

        Ok(ChatResult {
            message: str_at(&json, "/choices/0/message/content").to_string(),
            model: model.to_string(),
            tokens_used: json["usage"]["total_tokens"].as_u64().map(|t| t as u32),
        })
    }

    fn available_models(&self) -> Vec<String> {
        OPENROUTER_MODELS
            .iter()
            .map(|(id, _, _)| id.to_string())
            .collect()
    }
}
