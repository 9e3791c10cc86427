//! HTTP surface: prompt generation, session submissions and video delivery.

/// API error type and status mapping.
pub mod error;
/// Request handlers.
pub mod handlers;
/// Router assembly.
pub mod routes;
/// Shared handler state.
pub mod state;

use crate::config::StudioConfig;
use crate::foundation::error::StudioResult;
use crate::studio::SystemStudio;

pub use routes::create_router;
pub use state::AppState;

/// Bind `config.bind_addr()` and serve until the process is stopped.
pub async fn serve(config: &StudioConfig) -> StudioResult<()> {
    use anyhow::Context as _;

    let studio = SystemStudio::from_config(config)?;
    let app = create_router(AppState::new(studio));

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "stillmotion listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
