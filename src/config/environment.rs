// Start of file: /src/config/environment.rs

// * Environment configuration.
// * Values come from the process, `.env` and `.env.local` (local overrides).

use std::{borrow::Cow, collections::HashMap, fmt};
// * anyhow for convenient error handling
use anyhow::{Context, Result};
use tracing::{debug, warn};

// ! Default values for environment variables (used if variables aren't set):
const DEFAULT_ENVIRONMENT: &str = "development";
const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_MAX_BODY_SIZE: usize = 102_400; // 100KB, plenty for one answer
const DEFAULT_TIMEOUT: u64 = 120; // Long generations take a while
const DEFAULT_STATIC_DIR: &str = "public";
const DEFAULT_GROQ_MODEL: &str = "llama-3.3-70b-versatile";
const DEFAULT_GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";
const DEFAULT_HUGGINGFACE_MODEL: &str = "mistralai/Mistral-7B-Instruct-v0.2";
const DEFAULT_HUGGINGFACE_BASE_URL: &str = "https://api-inference.huggingface.co";

const ENV_FILE: &str = ".env";
const LOCAL_ENV_FILE: &str = ".env.local";

/// Bearer credential for a provider. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Trims the raw value; blank values are treated as unset.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed: &str = raw.trim();
        (!trimmed.is_empty()).then(|| Self(trimmed.to_string()))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

// * A struct containing all environment variables used by the app
#[derive(Clone, Debug)]
pub struct EnvironmentVariables {
    pub environment: Cow<'static, str>,
    pub host: Cow<'static, str>,
    pub port: u16,
    pub max_request_body_size: usize,
    pub default_timeout_seconds: u64,
    pub static_dir: Cow<'static, str>,
    pub groq_api_key: Option<ApiKey>,
    pub groq_model: Cow<'static, str>,
    pub groq_base_url: Cow<'static, str>,
    pub huggingface_api_key: Option<ApiKey>,
    pub huggingface_model: Cow<'static, str>,
    pub huggingface_base_url: Cow<'static, str>,
    pub on_vercel: bool,
}

impl EnvironmentVariables {
    // * Reads the process environment layered with the .env files.
    pub fn load() -> Result<Self> {
        let vars: HashMap<String, String> = layer_env_files(
            std::env::vars().collect(),
            read_env_file(ENV_FILE),
            read_env_file(LOCAL_ENV_FILE),
        );

        let config: EnvironmentVariables = Self::from_vars(&vars)?;

        if cfg!(debug_assertions) {
            debug!("Loaded environment configuration: {:#?}", config);
        }

        Ok(config)
    }

    // * Builds the configuration from an explicit set of variables,
    // * providing defaults if missing
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self> {
        let get_var = |key: &str| vars.get(key).map(String::as_str);
        let owned_or = |key: &str, default: &'static str| -> Cow<'static, str> {
            get_var(key)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|s| Cow::Owned(s.into()))
                .unwrap_or(Cow::Borrowed(default))
        };

        let groq_api_key: Option<ApiKey> = get_var("GROQ_API_KEY").and_then(ApiKey::parse);
        let huggingface_api_key: Option<ApiKey> =
            get_var("HUGGINGFACE_API_KEY").and_then(ApiKey::parse);

        if groq_api_key.is_none() && huggingface_api_key.is_none() {
            warn!("Neither GROQ_API_KEY nor HUGGINGFACE_API_KEY is set, insight requests will fail");
        }

        Ok(Self {
            environment: get_var("ENVIRONMENT")
                .map(|s| Cow::Owned(s.into()))
                .unwrap_or_else(|| {
                    warn!("Missing ENVIRONMENT, defaulting to '{DEFAULT_ENVIRONMENT}'");
                    Cow::Borrowed(DEFAULT_ENVIRONMENT)
                }),

            host: owned_or("HOST", DEFAULT_HOST),

            port: get_var("PORT")
                .map(|s| s.trim().parse().context("Invalid PORT value"))
                .transpose()?
                .unwrap_or(DEFAULT_PORT),

            max_request_body_size: get_var("MAX_REQUEST_BODY_SIZE")
                .map(|s| s.trim().parse().context("Invalid MAX_REQUEST_BODY_SIZE"))
                .transpose()?
                .unwrap_or(DEFAULT_MAX_BODY_SIZE),

            default_timeout_seconds: get_var("DEFAULT_TIMEOUT_SECONDS")
                .map(|s| s.trim().parse().context("Invalid DEFAULT_TIMEOUT_SECONDS"))
                .transpose()?
                .unwrap_or(DEFAULT_TIMEOUT),

            static_dir: owned_or("STATIC_DIR", DEFAULT_STATIC_DIR),

            groq_api_key,
            groq_model: owned_or("GROQ_MODEL", DEFAULT_GROQ_MODEL),
            groq_base_url: owned_or("GROQ_BASE_URL", DEFAULT_GROQ_BASE_URL),

            huggingface_api_key,
            huggingface_model: owned_or("HUGGINGFACE_MODEL", DEFAULT_HUGGINGFACE_MODEL),
            huggingface_base_url: owned_or("HUGGINGFACE_BASE_URL", DEFAULT_HUGGINGFACE_BASE_URL),

            on_vercel: get_var("VERCEL").is_some_and(|s| !s.is_empty()),
        })
    }

    /// True when at least one provider has credentials.
    pub fn has_provider_credentials(&self) -> bool {
        self.groq_api_key.is_some() || self.huggingface_api_key.is_some()
    }
}

// * Missing or unreadable files contribute nothing
fn read_env_file(filename: &str) -> Vec<(String, String)> {
    dotenv::from_filename_iter(filename)
        .map(|entries| entries.flatten().collect())
        .unwrap_or_default()
}

// * Layers the files over the process variables:
// * `.env` only fills gaps, `.env.local` overrides both.
// * Only reads .env files if ENVIRONMENT != "production".
fn layer_env_files(
    mut vars: HashMap<String, String>,
    env_file: Vec<(String, String)>,
    local_env_file: Vec<(String, String)>,
) -> HashMap<String, String> {
    if vars.get("ENVIRONMENT").map(String::as_str) == Some("production") {
        return vars;
    }

    for (key, value) in env_file {
        vars.entry(key).or_insert(value);
    }
    vars.extend(local_env_file);

    vars
}


// End of file: /src/config/environment.rs
