// Primary provider: Groq's OpenAI-compatible chat completion API

use std::borrow::Cow;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::{invalid_json, non_empty, read_success_body, InsightProvider, ProviderError, MAX_TOKENS, TEMPERATURE};
use crate::config::environment::ApiKey;
use crate::prompt::{ChatMessage, InsightPrompt};

pub const NAME: &str = "Groq";

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Option<AssistantMessage>,
}

#[derive(Deserialize)]
struct AssistantMessage {
    content: Option<String>,
}

#[derive(Debug, Clone)]
pub struct GroqProvider {
    client: Client,
    api_key: ApiKey,
    model: Cow<'static, str>,
    base_url: Cow<'static, str>,
}

impl GroqProvider {
    pub fn new(
        client: Client,
        api_key: ApiKey,
        model: Cow<'static, str>,
        base_url: Cow<'static, str>,
    ) -> Self {
        Self { client, api_key, model, base_url }
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl InsightProvider for GroqProvider {
    fn name(&self) -> &'static str {
        NAME
    }

    #[instrument(skip_all, fields(model = %self.model))]
    async fn generate(&self, prompt: &InsightPrompt) -> Result<String, ProviderError> {
        let request: ChatCompletionRequest<'_> = ChatCompletionRequest {
            model: &self.model,
            messages: prompt.chat_messages(),
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        let response: reqwest::Response = self
            .client
            .post(self.endpoint())
            .bearer_auth(self.api_key.expose())
            .json(&request)
            .send()
            .await
            .map_err(|source| ProviderError::Transport { provider: NAME, source })?;

        let body: String = read_success_body(NAME, response).await?;
        debug!(bytes = body.len(), "Groq responded");

        let completion: ChatCompletionResponse =
            serde_json::from_str(&body).map_err(|_| invalid_json(NAME, &body))?;

        let content: Option<&str> = completion
            .choices
            .first()
            .and_then(|choice| choice.message.as_ref())
            .and_then(|message| message.content.as_deref());

        non_empty(NAME, content)
    }
}
