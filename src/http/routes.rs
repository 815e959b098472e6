use super::handlers;
use super::state::AppState;
use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::trace::TraceLayer;

/// Create the HTTP router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Recording control
        .route("/session/start", post(handlers::start_session))
        .route("/session/stop", post(handlers::stop_session))
        .route("/session/status", get(handlers::session_status))
        .route("/session/language", put(handlers::set_language))
        .route("/languages", get(handlers::list_languages))
        // Transcript log
        .route(
            "/transcriptions",
            get(handlers::list_transcriptions).delete(handlers::clear_transcriptions),
        )
        .route(
            "/transcriptions/export",
            get(handlers::export_transcriptions),
        )
        .route(
            "/transcriptions/:id/copy",
            post(handlers::copy_transcription),
        )
        // User notices
        .route("/notices", get(handlers::recent_notices))
        .route("/notices/stream", get(handlers::notice_stream))
        // Add tracing middleware for request logging
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
