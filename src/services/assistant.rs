//! Conversational assistant gateway

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use crate::services::error::ProviderError;

const SYSTEM_PROMPT: &str = "You are an accurate, helpful financial expert. \
Provide information and analysis only; never give investment advice.";

const MAX_TOKENS: u32 = 300;

#[async_trait::async_trait]
pub trait AssistantGateway: Send + Sync {
    /// Forward a prompt to the hosted model and return its text reply
    async fn reply(&self, prompt: &str) -> Result<String, ProviderError>;
}

/// OpenAI-compatible chat completion client
pub struct ChatCompletionGateway {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChoiceMessage {
    content: String,
}

impl ChatCompletionGateway {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }
}

#[async_trait::async_trait]
impl AssistantGateway for ChatCompletionGateway {
    async fn reply(&self, prompt: &str) -> Result<String, ProviderError> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": prompt },
            ],
            "max_tokens": MAX_TOKENS,
        });

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        let completion: CompletionResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Malformed(e.to_string()))?;

        let reply = completion
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| ProviderError::Malformed("empty choices".to_string()))?;

        debug!(chars = reply.len(), "assistant reply received");
        Ok(reply)
    }
}
