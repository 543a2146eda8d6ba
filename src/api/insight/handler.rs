// Insight endpoint: validate the answer, ask the providers, return the report

use serde_json::json;
use axum::{http::StatusCode, extract::State, body::Bytes};
use tracing::{instrument, info, warn};

use crate::config::state::AppState;
use crate::prompt::InsightPrompt;
use crate::utils::response_handler::HandlerResponse;
use super::error::InsightError;
use super::models::InsightRequest;

#[instrument(skip(state, body), fields(body_bytes = body.len()))]
pub async fn insight_handler(
    State(state): State<AppState>,
    body: Bytes, // Raw body, parsed leniently by InsightRequest
) -> Result<HandlerResponse, InsightError> {
    let request: InsightRequest = InsightRequest::from_body(&body);
    let answer: &str = request.validate()?;

    if state.providers.is_empty() {
        let env = &state.environment;
        warn!(
            groq_api_key_set = env.groq_api_key.is_some(),
            huggingface_api_key_set = env.huggingface_api_key.is_some(),
            on_vercel = env.on_vercel,
            "Missing API keys"
        );
        return Err(InsightError::NotConfigured { on_vercel: env.on_vercel });
    }

    info!(answer_chars = answer.chars().count(), "Generating insight");

    let prompt: InsightPrompt = InsightPrompt::new(answer);
    let report: String = state.providers.generate(&prompt).await?;

    Ok(HandlerResponse::new(StatusCode::OK).data(json!({ "report": report })))
}
