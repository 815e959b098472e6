use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::speech::Language;

/// Whether a recording session is live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    Idle,
    Recording,
}

/// Snapshot of the session controller for the control surface.
#[derive(Debug, Clone, Serialize)]
pub struct SessionStatus {
    pub state: SessionState,

    /// Currently selected recognition locale.
    pub language: Language,

    /// Not-yet-finalized candidate transcript; empty when idle.
    pub interim_transcript: String,

    /// Normalized microphone energy in [0,1]; 0 when idle.
    pub audio_level: f32,

    /// When the live session started, if one is live.
    pub started_at: Option<DateTime<Utc>>,
}
