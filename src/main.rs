// Start of file: src/main.rs

use axum::{Router, serve};
use tokio::net::TcpListener;

use reflected_api::config::state::AppState;
use reflected_api::core::{logging, server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init_tracing();

    let state: AppState = AppState::from_env()?;

    let listener: TcpListener = server::setup_listener(&state.environment).await?;
    let app: Router = server::create_app(state);

    tracing::info!("Reflected running at http://{}", listener.local_addr()?);

    serve(listener, app)
        .with_graceful_shutdown(server::shutdown_signal())
        .await?;

    Ok(())
}

// End of file: src/main.rs
