//! Request handlers.

use axum::Json;
use axum::body::Body;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::Response;
use chrono::Utc;
use serde::Serialize;

use crate::assets::fetch::ImageFetcher;
use crate::encode::codec::VideoCodec;
use crate::encode::sink::RecorderFactory;
use crate::prompt::service::GenerationResult;
use crate::server::error::{ApiError, ApiResult};
use crate::server::state::AppState;
use crate::studio::Submission;

/// Health response.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Always `healthy`.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// Response time, RFC 3339.
    pub timestamp: String,
}

/// Health check endpoint (liveness probe).
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now().to_rfc3339(),
    })
}

fn submission_body(body: Result<Json<Submission>, JsonRejection>) -> ApiResult<Submission> {
    body.map(|Json(s)| s)
        .map_err(|e| ApiError::bad_request(format!("Invalid request body: {}", e.body_text())))
}

/// `POST /generate`: enhance prompts and build the image URL.
pub async fn generate<F, R>(
    State(state): State<AppState<F, R>>,
    body: Result<Json<Submission>, JsonRejection>,
) -> ApiResult<Json<GenerationResult>>
where
    F: ImageFetcher + 'static,
    R: RecorderFactory + 'static,
{
    let submission = submission_body(body)?;
    Ok(Json(state.studio.generate(&submission)?))
}

/// Video part of a submission response.
#[derive(Serialize)]
pub struct VideoView {
    /// Object URL serving the video.
    pub url: String,
    /// Download filename.
    pub filename: String,
    /// Codec used.
    pub codec: VideoCodec,
    /// MIME type.
    pub mime: String,
    /// Size in bytes.
    pub bytes: usize,
}

/// Submission response.
#[derive(Serialize)]
pub struct SubmitResponse {
    /// Enhanced prompts and image URL.
    pub result: GenerationResult,
    /// The session's new live video.
    pub video: VideoView,
}

/// `POST /sessions/:session/submit`: run the full prompt-to-video flow.
pub async fn submit<F, R>(
    State(state): State<AppState<F, R>>,
    Path(session): Path<String>,
    body: Result<Json<Submission>, JsonRejection>,
) -> ApiResult<Json<SubmitResponse>>
where
    F: ImageFetcher + 'static,
    R: RecorderFactory + 'static,
{
    let submission = submission_body(body)?;
    let done = state.studio.submit(&session, &submission).await?;
    Ok(Json(SubmitResponse {
        result: done.result,
        video: VideoView {
            mime: done.video.mime().to_string(),
            bytes: done.video.bytes.len(),
            url: done.video.url,
            filename: done.video.filename,
            codec: done.video.codec,
        },
    }))
}

/// `DELETE /sessions/:session`: drop the session and revoke its video URL.
pub async fn close_session<F, R>(
    State(state): State<AppState<F, R>>,
    Path(session): Path<String>,
) -> ApiResult<StatusCode>
where
    F: ImageFetcher + 'static,
    R: RecorderFactory + 'static,
{
    if state.studio.close_session(&session) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found("Session not found"))
    }
}

/// `GET /videos/:token`: serve a live video.
pub async fn video<F, R>(
    State(state): State<AppState<F, R>>,
    Path(token): Path<String>,
) -> ApiResult<Response>
where
    F: ImageFetcher + 'static,
    R: RecorderFactory + 'static,
{
    let stored = state
        .studio
        .registry()
        .resolve(&token)
        .ok_or_else(|| ApiError::not_found("Video not found"))?;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, stored.codec.mime())
        .header(header::CONTENT_LENGTH, stored.bytes.len())
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", stored.filename),
        )
        .header(header::CACHE_CONTROL, "no-store")
        .body(Body::from(stored.bytes.clone()))
        .map_err(|e| ApiError::internal(format!("Failed to build response: {e}")))
}
