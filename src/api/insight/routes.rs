// Insight route definitions

use axum::{
    routing::post,
    Router,
};

use crate::config::state::AppState;
use super::handler;

pub fn insight_routes() -> Router<AppState> {
    Router::new()
        .route("/api/insight", post(handler::insight_handler))
}
