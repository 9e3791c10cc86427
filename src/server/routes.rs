//! API routes.

use axum::Router;
use axum::routing::{delete, get, post};
use tower_http::trace::TraceLayer;

use crate::assets::fetch::ImageFetcher;
use crate::encode::sink::RecorderFactory;
use crate::server::handlers::{close_session, generate, health, submit, video};
use crate::server::state::AppState;

/// Create the API router.
pub fn create_router<F, R>(state: AppState<F, R>) -> Router
where
    F: ImageFetcher + 'static,
    R: RecorderFactory + 'static,
{
    Router::new()
        .route("/health", get(health))
        .route("/generate", post(generate::<F, R>))
        .route("/sessions/:session/submit", post(submit::<F, R>))
        .route("/sessions/:session", delete(close_session::<F, R>))
        .route("/videos/:token", get(video::<F, R>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
