// User-visible failures of the insight endpoint

use axum::{http::StatusCode, response::{IntoResponse, Response}};
use thiserror::Error;

use crate::providers::ProvidersExhausted;
use crate::utils::response_handler::HandlerResponse;
use crate::utils::utils::preview;

const HINT_CHARS: usize = 120;

const VERCEL_HINT: &str = " In Vercel: Project → Settings → Environment Variables, add them for Production (and Preview), then redeploy.";

#[derive(Debug, Error)]
pub enum InsightError {
    #[error("Missing or invalid answer.")]
    InvalidAnswer,

    #[error("Please write at least a few sentences so we can reflect your response meaningfully.")]
    AnswerTooShort,

    #[error("Server is not configured for AI. Please set GROQ_API_KEY or HUGGINGFACE_API_KEY.{}", vercel_hint(.on_vercel))]
    NotConfigured { on_vercel: bool },

    #[error("No insight was generated. Groq and Hugging Face both failed or are unconfigured. Please try again or set GROQ_API_KEY / HUGGINGFACE_API_KEY.{}", server_log_hint(.0))]
    Exhausted(#[from] ProvidersExhausted),
}

fn vercel_hint(on_vercel: &bool) -> &'static str {
    if *on_vercel { VERCEL_HINT } else { "" }
}

/// ` (Server log: ...)` with the start of the last provider error, if there was one
fn server_log_hint(exhausted: &ProvidersExhausted) -> String {
    match &exhausted.last_error {
        Some(err) => format!(" (Server log: {})", preview(&err.to_string(), HINT_CHARS)),
        None => String::new(),
    }
}

impl InsightError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidAnswer | Self::AnswerTooShort => StatusCode::BAD_REQUEST,
            Self::NotConfigured { .. } | Self::Exhausted(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for InsightError {
    fn into_response(self) -> Response {
        HandlerResponse::error(self.status_code(), self.to_string()).into_response()
    }
}
