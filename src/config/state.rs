// Application state shared by every request

use std::sync::Arc;
use reqwest::Client;

use crate::config::environment::EnvironmentVariables;
use crate::providers::ProviderChain;

#[derive(Debug, Clone)]
pub struct AppState {
    pub environment: Arc<EnvironmentVariables>,
    pub providers: Arc<ProviderChain>,
}

impl AppState {
    /// Builds the state with one HTTP client shared by all providers
    pub fn new(environment: EnvironmentVariables) -> anyhow::Result<Self> {
        let client: Client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let providers: ProviderChain = ProviderChain::from_environment(&environment, client);

        tracing::info!(providers = ?providers.names(), "Provider chain ready");

        Ok(Self {
            environment: Arc::new(environment),
            providers: Arc::new(providers),
        })
    }

    /// State backed by the process environment and .env files
    pub fn from_env() -> anyhow::Result<Self> {
        Self::new(EnvironmentVariables::load()?)
    }
}
