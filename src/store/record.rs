use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::speech::Language;

/// Confidence recorded when the engine omits one.
pub const DEFAULT_CONFIDENCE: f32 = 0.8;

/// One finalized utterance. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transcription {
    pub id: Uuid,
    /// Finalized utterance text, trimmed.
    pub text: String,
    /// Creation instant.
    pub timestamp: DateTime<Utc>,
    /// Engine confidence in [0,1]; `DEFAULT_CONFIDENCE` when unreported.
    pub confidence: f32,
    /// Recognition locale active when the utterance was finalized.
    pub language: Language,
}

impl Transcription {
    pub fn new(text: impl AsRef<str>, confidence: Option<f32>, language: Language) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.as_ref().trim().to_string(),
            timestamp: Utc::now(),
            confidence: confidence.unwrap_or(DEFAULT_CONFIDENCE),
            language,
        }
    }
}
