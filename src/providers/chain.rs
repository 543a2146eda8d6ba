// Ordered provider fallback: first success wins, no retries

use std::{fmt, sync::Arc};

use reqwest::Client;
use thiserror::Error;
use tracing::{error, info};

use super::{GroqProvider, HuggingFaceProvider, InsightProvider, ProviderError};
use crate::config::environment::EnvironmentVariables;
use crate::prompt::InsightPrompt;

/// Every configured provider failed. Holds the last failure, if any ran.
#[derive(Debug, Error)]
#[error("all providers failed")]
pub struct ProvidersExhausted {
    pub last_error: Option<ProviderError>,
}

pub struct ProviderChain {
    providers: Vec<Arc<dyn InsightProvider>>,
}

impl ProviderChain {
    pub fn new(providers: Vec<Arc<dyn InsightProvider>>) -> Self {
        Self { providers }
    }

    /// Groq first, Hugging Face second; providers without a key are skipped.
    pub fn from_environment(env: &EnvironmentVariables, client: Client) -> Self {
        let mut providers: Vec<Arc<dyn InsightProvider>> = Vec::with_capacity(2);

        if let Some(key) = &env.groq_api_key {
            providers.push(Arc::new(GroqProvider::new(
                client.clone(),
                key.clone(),
                env.groq_model.clone(),
                env.groq_base_url.clone(),
            )));
        }

        if let Some(key) = &env.huggingface_api_key {
            providers.push(Arc::new(HuggingFaceProvider::new(
                client,
                key.clone(),
                env.huggingface_model.clone(),
                env.huggingface_base_url.clone(),
            )));
        }

        Self::new(providers)
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    pub async fn generate(&self, prompt: &InsightPrompt) -> Result<String, ProvidersExhausted> {
        let mut last_error: Option<ProviderError> = None;

        for provider in &self.providers {
            match provider.generate(prompt).await {
                Ok(text) => {
                    info!(provider = provider.name(), chars = text.chars().count(), "Insight generated");
                    return Ok(text);
                }
                Err(err) => {
                    error!(provider = provider.name(), error = %err, "Provider failed");
                    last_error = Some(err);
                }
            }
        }

        Err(ProvidersExhausted { last_error })
    }
}

impl fmt::Debug for ProviderChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderChain")
            .field("providers", &self.names())
            .finish()
    }
}
