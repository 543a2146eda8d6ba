// Start of file: /src/providers/mod.rs

/*
    * Language model providers that turn an InsightPrompt into report text,
    * and the ordered chain that falls back from one to the next.
*/

pub mod chain;
pub mod groq;
pub mod hugging_face;

use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use thiserror::Error;

use crate::prompt::InsightPrompt;
use crate::utils::utils::preview;

pub use chain::{ProviderChain, ProvidersExhausted};
pub use groq::GroqProvider;
pub use hugging_face::HuggingFaceProvider;

// ! Shared generation settings for every provider
pub const TEMPERATURE: f32 = 0.6;
pub const MAX_TOKENS: u32 = 2000;

const STATUS_BODY_PREVIEW: usize = 300;
const INVALID_JSON_PREVIEW: usize = 100;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("{provider} request failed: {source}")]
    Transport {
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{provider} {status}: {body}")]
    Status {
        provider: &'static str,
        status: u16,
        body: String,
    },

    #[error("{provider} invalid JSON: {body}")]
    InvalidJson { provider: &'static str, body: String },

    #[error("{provider} returned no generated text")]
    EmptyCompletion { provider: &'static str },
}

/// An external language model API.
#[async_trait]
pub trait InsightProvider: Send + Sync {
    fn name(&self) -> &'static str;

    /// Returns the trimmed, non-empty generated text.
    async fn generate(&self, prompt: &InsightPrompt) -> Result<String, ProviderError>;
}

/// Reads the whole body and rejects non-2xx statuses with a short preview.
pub(crate) async fn read_success_body(
    provider: &'static str,
    response: Response,
) -> Result<String, ProviderError> {
    let status: StatusCode = response.status();
    let body: String = response
        .text()
        .await
        .map_err(|source| ProviderError::Transport { provider, source })?;

    if !status.is_success() {
        return Err(ProviderError::Status {
            provider,
            status: status.as_u16(),
            body: preview(&body, STATUS_BODY_PREVIEW).to_string(),
        });
    }

    Ok(body)
}

pub(crate) fn invalid_json(provider: &'static str, body: &str) -> ProviderError {
    ProviderError::InvalidJson {
        provider,
        body: preview(body, INVALID_JSON_PREVIEW).to_string(),
    }
}

/// Trims the text and turns blank output into an error.
pub(crate) fn non_empty(provider: &'static str, text: Option<&str>) -> Result<String, ProviderError> {
    match text.map(str::trim) {
        Some(t) if !t.is_empty() => Ok(t.to_string()),
        _ => Err(ProviderError::EmptyCompletion { provider }),
    }
}

// End of file: /src/providers/mod.rs
