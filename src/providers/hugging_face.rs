// Fallback provider: Hugging Face hosted inference

use std::borrow::Cow;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument};

use super::{invalid_json, non_empty, read_success_body, InsightProvider, ProviderError, MAX_TOKENS, TEMPERATURE};
use crate::config::environment::ApiKey;
use crate::prompt::InsightPrompt;

pub const NAME: &str = "Hugging Face";

#[derive(Serialize)]
struct InferenceRequest {
    inputs: String,
    parameters: InferenceParameters,
}

#[derive(Serialize)]
struct InferenceParameters {
    max_new_tokens: u32,
    temperature: f32,
    return_full_text: bool,
}

#[derive(Debug, Clone)]
pub struct HuggingFaceProvider {
    client: Client,
    api_key: ApiKey,
    model: Cow<'static, str>,
    base_url: Cow<'static, str>,
}

impl HuggingFaceProvider {
    pub fn new(
        client: Client,
        api_key: ApiKey,
        model: Cow<'static, str>,
        base_url: Cow<'static, str>,
    ) -> Self {
        Self { client, api_key, model, base_url }
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}", self.base_url.trim_end_matches('/'), self.model)
    }
}

/// The inference API answers with either `[{..}]` or `{..}`, and some models
/// nest the result one array deeper.
fn extract_generated_text(data: &Value) -> Option<&str> {
    let raw: &Value = match data {
        Value::Array(items) => items.first()?,
        other => other,
    };

    raw.get("generated_text")
        .and_then(Value::as_str)
        .or_else(|| {
            raw.get(0)
                .and_then(|first| first.get("generated_text"))
                .and_then(Value::as_str)
        })
}

#[async_trait]
impl InsightProvider for HuggingFaceProvider {
    fn name(&self) -> &'static str {
        NAME
    }

    #[instrument(skip_all, fields(model = %self.model))]
    async fn generate(&self, prompt: &InsightPrompt) -> Result<String, ProviderError> {
        let request: InferenceRequest = InferenceRequest {
            inputs: prompt.completion_text(),
            parameters: InferenceParameters {
                max_new_tokens: MAX_TOKENS,
                temperature: TEMPERATURE,
                return_full_text: false,
            },
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
        debug!(bytes = body.len(), "Hugging Face responded");

        let data: Value = serde_json::from_str(&body).map_err(|_| invalid_json(NAME, &body))?;

        non_empty(NAME, extract_generated_text(&data))
    }
}
