//! HTTP API server for the user-facing surface
//!
//! This module provides a localhost REST API a frontend consumes:
//! - POST /session/start, POST /session/stop - Recording control
//! - GET  /session/status - State, interim transcript, audio level
//! - PUT  /session/language - Language picker
//! - GET  /languages - Supported locale list
//! - GET/DELETE /transcriptions - Transcript list and bulk clear
//! - GET  /transcriptions/export - Downloadable text export
//! - POST /transcriptions/:id/copy - Per-record clipboard copy
//! - GET  /notices, /notices/stream - Transient user notices
//! - GET  /health - Health check

mod handlers;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
