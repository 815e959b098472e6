use super::state::AppState;
use crate::notice::Notice;
use crate::session::{SessionState, SessionStatus};
use crate::speech::Language;
use crate::store::Transcription;
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::sse::{Event, KeepAlive, Sse},
    response::{IntoResponse, Json},
};
use futures::stream::Stream;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use tracing::error;
use uuid::Uuid;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    /// False on hosts without a recognition engine; the record control is
    /// disabled entirely then.
    pub recording_supported: bool,

    #[serde(flatten)]
    pub session: SessionStatus,
}

#[derive(Debug, Deserialize)]
pub struct SetLanguageRequest {
    pub language: String,
}

#[derive(Debug, Serialize)]
pub struct LanguageInfo {
    pub tag: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ClearResponse {
    pub removed: usize,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

// ============================================================================
// Handlers
// ============================================================================

async fn status_response(state: &AppState) -> StatusResponse {
    StatusResponse {
        recording_supported: state.controller.recording_supported().await,
        session: state.controller.status().await,
    }
}

/// POST /session/start
/// Begin a recording session
pub async fn start_session(State(state): State<AppState>) -> impl IntoResponse {
    if !state.controller.recording_supported().await {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ErrorResponse {
                error: "Speech recognition is not supported on this host".to_string(),
            }),
        )
            .into_response();
    }

    if state.controller.state().await == SessionState::Recording {
        return (
            StatusCode::CONFLICT,
            Json(ErrorResponse {
                error: "A recording session is already active".to_string(),
            }),
        )
            .into_response();
    }

    match state.controller.start().await {
        Ok(()) => (StatusCode::OK, Json(status_response(&state).await)).into_response(),
        Err(e) => {
            error!("Failed to start recording: {e:#}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Failed to start recording: {e:#}"),
                }),
            )
                .into_response()
        }
    }
}

/// POST /session/stop
/// Stop the live session; no-op when idle
pub async fn stop_session(State(state): State<AppState>) -> impl IntoResponse {
    state.controller.stop().await;
    (StatusCode::OK, Json(status_response(&state).await))
}

/// GET /session/status
pub async fn session_status(State(state): State<AppState>) -> impl IntoResponse {
    (StatusCode::OK, Json(status_response(&state).await))
}

/// PUT /session/language
/// Switch the recognition language; stops a live session
pub async fn set_language(
    State(state): State<AppState>,
    Json(req): Json<SetLanguageRequest>,
) -> impl IntoResponse {
    match req.language.parse::<Language>() {
        Ok(language) => {
            state.controller.set_language(language).await;
            (StatusCode::OK, Json(status_response(&state).await)).into_response()
        }
        Err(e) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
            .into_response(),
    }
}

/// GET /languages
/// The fixed supported-language list for the picker
pub async fn list_languages() -> impl IntoResponse {
    let languages: Vec<LanguageInfo> = Language::ALL
        .iter()
        .map(|language| LanguageInfo {
            tag: language.tag(),
            label: language.label(),
        })
        .collect();
    (StatusCode::OK, Json(languages))
}

/// GET /transcriptions
/// Full record list in store order (newest first)
pub async fn list_transcriptions(State(state): State<AppState>) -> impl IntoResponse {
    let store = state.store.lock().await;
    let records: Vec<Transcription> = store.records().to_vec();
    (StatusCode::OK, Json(records))
}

/// DELETE /transcriptions
/// Bulk clear
pub async fn clear_transcriptions(State(state): State<AppState>) -> impl IntoResponse {
    let mut store = state.store.lock().await;
    let removed = store.len();
    store.clear();
    (StatusCode::OK, Json(ClearResponse { removed }))
}

/// GET /transcriptions/export
/// The export artifact, offered as a download
pub async fn export_transcriptions(State(state): State<AppState>) -> impl IntoResponse {
    let store = state.store.lock().await;

    match store.export() {
        Some(artifact) => (
            StatusCode::OK,
            [
                (
                    header::CONTENT_TYPE,
                    "text/plain; charset=utf-8".to_string(),
                ),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", artifact.filename),
                ),
            ],
            artifact.body,
        )
            .into_response(),
        None => (
            StatusCode::CONFLICT,
            Json(ErrorResponse {
                error: "There are no transcriptions to export".to_string(),
            }),
        )
            .into_response(),
    }
}

/// POST /transcriptions/:id/copy
/// Place one record's text on the system clipboard
pub async fn copy_transcription(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let store = state.store.lock().await;

    if store.get(id).is_none() {
        return (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("No transcription with id {id}"),
            }),
        )
            .into_response();
    }

    match store.copy(id, state.clipboard.as_ref()) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => {
            error!("Failed to copy transcription: {e:#}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Failed to copy transcription: {e:#}"),
                }),
            )
                .into_response()
        }
    }
}

/// GET /notices
/// Recent transient notices, oldest first
pub async fn recent_notices(State(state): State<AppState>) -> impl IntoResponse {
    let notices: Vec<Notice> = state.notices.recent();
    (StatusCode::OK, Json(notices))
}

/// GET /notices/stream
/// Live notice feed as server-sent events
pub async fn notice_stream(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = state.notices.subscribe();

    let stream = futures::stream::unfold(rx, |mut rx| async move {
        loop {
            match rx.recv().await {
                Ok(notice) => {
                    if let Ok(event) = Event::default().json_data(&notice) {
                        return Some((Ok::<_, Infallible>(event), rx));
                    }
                }
                Err(tokio::sync::broadcast::error::RecvError::Lagged(_)) => continue,
                Err(tokio::sync::broadcast::error::RecvError::Closed) => return None,
            }
        }
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
